//! Screen selection and sequencing

pub mod display;
pub mod screen;

pub use display::{DisplayScheduler, Phase, Transition, TRANSITION_LOG_LEN};
pub use screen::{select, Screen};
