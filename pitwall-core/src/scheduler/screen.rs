//! Screen identifiers and screen selection
//!
//! The commanded screen is a pure function of the telemetry:
//!
//! 1. Logo while the boot splash is held
//! 2. Diagnostic on a VCU fault or a stale VCU link
//! 3. Drive when ready-to-drive, otherwise PreDrive

use crate::config::SchedulerConfig;
use crate::safety;
use crate::telemetry::Telemetry;

/// Dashboard screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Screen {
    /// Nothing built yet; only valid before the first tick
    #[default]
    Uninitialized = 0,
    /// Boot splash
    Logo = 1,
    /// Parked: LV battery, RTD switch, pack and inverter status
    PreDrive = 2,
    /// Driving: temperatures, SOC, speed
    Drive = 3,
    /// VCU fault code or lost link
    Diagnostic = 4,
}

impl Screen {
    /// Whether the renderer has widgets for this screen
    pub const fn is_renderable(&self) -> bool {
        !matches!(self, Screen::Uninitialized)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Screen::Uninitialized => "uninitialized",
            Screen::Logo => "logo",
            Screen::PreDrive => "pre-drive",
            Screen::Drive => "drive",
            Screen::Diagnostic => "diagnostic",
        }
    }
}

/// Pick the screen the dashboard should be showing
pub fn select(telemetry: &Telemetry, config: &SchedulerConfig) -> Screen {
    if telemetry.tick < config.logo_ticks {
        return Screen::Logo;
    }

    if safety::check(&telemetry.vcu).is_some() {
        return Screen::Diagnostic;
    }

    if telemetry.vcu.rtd {
        Screen::Drive
    } else {
        Screen::PreDrive
    }
}
