//! Severity classification for displayed values
//!
//! Screens colour a value by comparing it against a `(good, warn, critical)`
//! triple. Values past the critical bound are reported separately so an
//! implausible reading is not shown as merely bad.

use crate::telemetry::Telemetry;

/// Battery temperature bounds (°C), lower is better
pub const BATTERY_TEMP: (u8, u8, u8) = (35, 45, 70);

/// Pack state of charge bounds (%), higher is better
pub const PACK_SOC: (u8, u8, u8) = (50, 20, 0);

/// LV battery voltage below this is a warning (V)
pub const LV_VOLTAGE_GOOD: f32 = 12.7;

/// RTD switch alert blink period (ticks)
pub const RTD_BLINK_PERIOD: u32 = 80;

/// How a value compares against its thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Good,
    Warning,
    Critical,
    /// Beyond the critical bound
    OutOfRange,
}

impl Severity {
    pub const fn is_good(&self) -> bool {
        matches!(self, Severity::Good)
    }
}

/// Classify a value where larger is better
pub fn rising_is_good<T: PartialOrd>(value: T, good: T, warn: T, critical: T) -> Severity {
    if value >= good {
        Severity::Good
    } else if value >= warn {
        Severity::Warning
    } else if value >= critical {
        Severity::Critical
    } else {
        Severity::OutOfRange
    }
}

/// Classify a value where smaller is better
pub fn falling_is_good<T: PartialOrd>(value: T, good: T, warn: T, critical: T) -> Severity {
    if value <= good {
        Severity::Good
    } else if value <= warn {
        Severity::Warning
    } else if value <= critical {
        Severity::Critical
    } else {
        Severity::OutOfRange
    }
}

pub fn battery_temperature(celsius: u8) -> Severity {
    let (good, warn, critical) = BATTERY_TEMP;
    falling_is_good(celsius, good, warn, critical)
}

pub fn pack_soc(percent: u8) -> Severity {
    let (good, warn, critical) = PACK_SOC;
    rising_is_good(percent, good, warn, critical)
}

pub fn lv_voltage(volts: f32) -> Severity {
    if volts >= LV_VOLTAGE_GOOD {
        Severity::Good
    } else {
        Severity::Warning
    }
}

/// Whether the RTD switch alert is in its lit half-period
///
/// Only blinks while the switch is on.
pub fn rtd_alert_lit(telemetry: &Telemetry) -> bool {
    telemetry.vcu.rtd_switch_state && telemetry.tick % RTD_BLINK_PERIOD >= RTD_BLINK_PERIOD / 2
}
