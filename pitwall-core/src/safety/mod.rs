//! Fault and link monitoring
//!
//! Decides whether the dashboard must override the normal screens with the
//! diagnostic screen.

pub mod link;

pub use link::{is_alive, LinkEdge, LinkStatus};

use crate::telemetry::Vcu;

/// Why the diagnostic screen is up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagnosticCause {
    /// VCU reported a non-zero fault code
    VcuFault(u8),
    /// VCU went quiet
    LinkStale,
}

/// Check the VCU state
///
/// A reported fault takes precedence over a stale link so the last known
/// fault code stays visible.
pub fn check(vcu: &Vcu) -> Option<DiagnosticCause> {
    if vcu.has_fault() {
        return Some(DiagnosticCause::VcuFault(vcu.fault));
    }
    if !vcu.active {
        return Some(DiagnosticCause::LinkStale);
    }
    None
}
