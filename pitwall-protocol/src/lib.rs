//! Dashboard CAN Telemetry Protocol
//!
//! This crate decodes the periodic broadcast frames the dashboard listens to
//! on the vehicle CAN bus. Every frame carries an 8-byte payload and is keyed
//! by its identifier:
//!
//! ```text
//! Extended (29-bit, masked to 25 bits)    Standard (11-bit)
//! ┌────────────┬──────────────────────┐   ┌───────┬───────────────────┐
//! │ 0x118ff7n  │ inverter n HS1       │   │ 0x6B0 │ BMS pack          │
//! │ 0x119ff7n  │ inverter n HS2       │   │ 0x6B1 │ BMS limits        │
//! │ 0x11aff7n  │ inverter n HS3       │   │ 0x7A4 │ VCU status        │
//! └────────────┴──────────────────────┘   └───────┴───────────────────┘
//! ```
//!
//! Decoding is pure: a frame maps to a [`Message`] describing the new values
//! of the fields that frame owns. Unknown identifiers decode to `None`. The
//! decoder never allocates and never panics, whatever the payload holds.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod ids;
pub mod messages;
pub mod status;

pub use frame::{FrameError, RawFrame, PAYLOAD_LEN};
pub use messages::{
    decode, decode_extended, decode_raw, decode_standard, BmsLimits, BmsPack, InverterDrive,
    InverterIndex, InverterLimits, InverterThermal, Message, VcuStatus,
};
pub use status::StatusWord;
