//! Live vehicle state
//!
//! One record, created zeroed at boot and overwritten in place as frames
//! arrive. No history is kept.

pub mod model;
pub mod update;

pub use model::{Battery, Inverter, Telemetry, Vcu};
