//! Screen renderer trait

use crate::scheduler::Screen;
use crate::telemetry::Telemetry;

/// Trait for the screen renderer
///
/// The renderer owns the widgets; the scheduler only decides when a screen
/// is built, refreshed and destroyed. The scheduler guarantees:
///
/// - `teardown` is never called twice for a screen without an `initialize`
///   in between
/// - `refresh` is never called on the tick a screen was torn down or built
/// - `Screen::Uninitialized` is never passed in
///
/// Rendering failures are the renderer's own business; none of these calls
/// report back.
pub trait ScreenRenderer {
    /// Build the widgets for `screen`
    fn initialize(&mut self, screen: Screen, telemetry: &Telemetry);

    /// Update the widgets of the live `screen` from `telemetry`
    fn refresh(&mut self, screen: Screen, telemetry: &Telemetry);

    /// Destroy the widgets of `screen`
    fn teardown(&mut self, screen: Screen, telemetry: &Telemetry);
}

impl<R: ScreenRenderer + ?Sized> ScreenRenderer for &mut R {
    fn initialize(&mut self, screen: Screen, telemetry: &Telemetry) {
        (**self).initialize(screen, telemetry)
    }

    fn refresh(&mut self, screen: Screen, telemetry: &Telemetry) {
        (**self).refresh(screen, telemetry)
    }

    fn teardown(&mut self, screen: Screen, telemetry: &Telemetry) {
        (**self).teardown(screen, telemetry)
    }
}
