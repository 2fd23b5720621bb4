//! Configuration type definitions
//!
//! All timing is expressed in scheduler ticks. At the reference 10 ms tick
//! the defaults give a 3.5 s logo hold and a 0.5 s VCU staleness window;
//! the ratios matter, not the absolute period.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ticks the boot logo is held for
pub const LOGO_TICKS: u32 = 350;

/// Ticks since the last VCU frame before the link counts as stale
pub const LIVENESS_WINDOW: u32 = 50;

/// Refresh the active screen every N ticks
pub const REFRESH_DIVISOR: u32 = 2;

/// Reference tick period (ms)
pub const TICK_PERIOD_MS: u32 = 10;

/// Scheduler timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchedulerConfig {
    /// Boot splash hold (ticks)
    pub logo_ticks: u32,
    /// VCU staleness window (ticks, inclusive)
    pub liveness_window: u32,
    /// Refresh throttle; 0 is treated as 1
    pub refresh_divisor: u32,
}

impl SchedulerConfig {
    pub const fn new() -> Self {
        Self {
            logo_ticks: LOGO_TICKS,
            liveness_window: LIVENESS_WINDOW,
            refresh_divisor: REFRESH_DIVISOR,
        }
    }

    /// Whether `tick` is a refresh tick
    pub const fn is_refresh_tick(&self, tick: u32) -> bool {
        match tick.checked_rem(self.refresh_divisor) {
            Some(rem) => rem == 0,
            None => true,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// VCU limits shown on the pre-drive screen
///
/// The VCU does not broadcast these; they are set per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VcuLimits {
    pub max_rpm: u16,
    /// N·m
    pub max_torque: u16,
}

impl VcuLimits {
    pub const fn new() -> Self {
        Self {
            max_rpm: 0,
            max_torque: 0,
        }
    }
}

/// Everything the dashboard can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DashboardConfig {
    pub scheduler: SchedulerConfig,
    pub limits: VcuLimits,
}
