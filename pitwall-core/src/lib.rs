//! Board-agnostic core logic for the dashboard controller
//!
//! This crate contains everything between the CAN receive interrupt and the
//! screen renderer that does not depend on specific hardware:
//!
//! - Telemetry model (inverters, BMS, VCU) and frame application
//! - Display scheduler (screen selection, two-phase transitions, refresh)
//! - VCU link liveness
//! - Severity thresholds used by the screens
//! - Configuration type definitions and persistence
//! - Renderer trait and the shared context used from both execution contexts

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod safety;
pub mod scheduler;
pub mod shared;
pub mod telemetry;
pub mod thresholds;
pub mod traits;

pub use scheduler::{DisplayScheduler, Phase, Screen};
pub use shared::SharedTelemetry;
pub use telemetry::{Battery, Inverter, Telemetry, Vcu};
pub use traits::ScreenRenderer;
