//! Telemetry model definition
//!
//! Field ownership:
//! - sensor fields are written only by frame application
//! - `Vcu::active` and `Telemetry::tick` are written only by the scheduler

use pitwall_protocol::{InverterIndex, StatusWord};

use crate::config::VcuLimits;

/// Motor speed to vehicle speed: wheel circumference and final drive
const MPH_PER_SPEED_COUNT: f32 = 0.02975;
const SPEED_COUNT_DIVISOR: f32 = 5.0;

/// One motor inverter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inverter {
    /// Output torque (N·m)
    pub output_torque: f32,
    /// Motor speed (raw, RPM-proportional)
    pub motor_speed: i16,
    /// DC battery current (raw)
    pub battery_current: i16,
    /// Available forward torque (N·m)
    pub available_forward_torque: f32,
    /// Available reverse torque (N·m)
    pub available_reverse_torque: f32,
    pub statusword: StatusWord,
    /// DC link capacitor voltage (V)
    pub capacitor_voltage: f32,
    /// Inverter temperature (°C); negative once past the cutoff
    pub temperature: i16,
    /// Motor temperature (raw)
    pub motor_temp: i16,
    /// Inverter seen by the VCU
    pub active: bool,
}

impl Inverter {
    pub const fn new() -> Self {
        Self {
            output_torque: 0.0,
            motor_speed: 0,
            battery_current: 0,
            available_forward_torque: 0.0,
            available_reverse_torque: 0.0,
            statusword: StatusWord::Unknown(0),
            capacitor_voltage: 0.0,
            temperature: 0,
            motor_temp: 0,
            active: false,
        }
    }
}

impl Default for Inverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Tractive system battery, as reported by the BMS
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Battery {
    /// Pack discharge current limit (A)
    pub pack_dcl: u16,
    /// Temperature (°C)
    pub temperature: u8,
    /// Pack voltage (V)
    pub pack_voltage: f32,
    /// State of charge (%), not clamped
    pub pack_soc: u8,
    /// Pack current (A)
    pub pack_current: f32,
    /// BMS seen by the VCU
    pub active: bool,
}

impl Battery {
    pub const fn new() -> Self {
        Self {
            pack_dcl: 0,
            temperature: 0,
            pack_voltage: 0.0,
            pack_soc: 0,
            pack_current: 0.0,
            active: false,
        }
    }
}

impl Default for Battery {
    fn default() -> Self {
        Self::new()
    }
}

/// Vehicle control unit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vcu {
    /// Low-voltage rail (V)
    pub lv_voltage: f32,
    /// Configured, never decoded
    pub max_rpm: u16,
    /// Inverter current limit (A)
    pub current_limit: u8,
    /// Configured, never decoded
    pub max_torque: u16,
    /// Ready-to-drive, as decided by the VCU
    pub rtd: bool,
    /// Position of the physical RTD switch
    pub rtd_switch_state: bool,
    /// Fault code, 0 = no fault
    pub fault: u8,
    /// Link liveness, derived from `last_comm_tick` by the scheduler
    pub active: bool,
    /// Tick at which the last VCU frame was applied
    pub last_comm_tick: u32,
}

impl Vcu {
    pub const fn new() -> Self {
        Self {
            lv_voltage: 0.0,
            max_rpm: 0,
            current_limit: 0,
            max_torque: 0,
            rtd: false,
            rtd_switch_state: false,
            fault: 0,
            active: false,
            last_comm_tick: 0,
        }
    }

    /// True when the VCU reports a fault
    pub const fn has_fault(&self) -> bool {
        self.fault != 0
    }
}

impl Default for Vcu {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete vehicle state seen by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telemetry {
    /// Inverter 1 and 2, in that order
    pub inverters: [Inverter; 2],
    pub battery: Battery,
    pub vcu: Vcu,
    /// Free-running scheduler tick counter (wraps)
    pub tick: u32,
}

impl Telemetry {
    /// Zeroed state, as at power-on
    pub const fn new() -> Self {
        Self {
            inverters: [Inverter::new(), Inverter::new()],
            battery: Battery::new(),
            vcu: Vcu::new(),
            tick: 0,
        }
    }

    /// Zeroed state with the externally configured VCU limits filled in
    pub const fn with_limits(limits: VcuLimits) -> Self {
        let mut telemetry = Self::new();
        telemetry.vcu.max_rpm = limits.max_rpm;
        telemetry.vcu.max_torque = limits.max_torque;
        telemetry
    }

    pub fn inverter(&self, index: InverterIndex) -> &Inverter {
        &self.inverters[index.slot()]
    }

    pub fn inverter_mut(&mut self, index: InverterIndex) -> &mut Inverter {
        &mut self.inverters[index.slot()]
    }

    /// Apply configuration limits, which no frame carries
    pub fn set_limits(&mut self, limits: VcuLimits) {
        self.vcu.max_rpm = limits.max_rpm;
        self.vcu.max_torque = limits.max_torque;
    }

    /// Vehicle speed (mph) from the average of both motor speeds
    ///
    /// Truncated toward zero.
    pub fn vehicle_speed_mph(&self) -> i32 {
        let sum = i32::from(self.inverters[0].motor_speed) + i32::from(self.inverters[1].motor_speed);
        (sum as f32 * MPH_PER_SPEED_COUNT / SPEED_COUNT_DIVISOR) as i32
    }
}
