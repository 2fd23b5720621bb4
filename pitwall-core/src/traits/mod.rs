//! Interfaces to external collaborators
//!
//! These traits define the boundary between the scheduling logic and the
//! rendering implementation.

pub mod renderer;

pub use renderer::ScreenRenderer;
