//! Telemetry shared between the frame interrupt and the tick task
//!
//! The model lives behind one blocking mutex. Frames are decoded outside the
//! lock and committed whole; the tick works on a snapshot so renderer calls
//! never hold the lock, then commits liveness and the tick counter against
//! the live model.
//!
//! ```ignore
//! static TELEMETRY: SharedTelemetry<CriticalSectionRawMutex> = SharedTelemetry::new();
//!
//! // FDCAN RX interrupt
//! TELEMETRY.on_raw(header.id, header.extended, &payload);
//!
//! // 10 ms tick
//! TELEMETRY.on_tick(&mut scheduler, &mut renderer);
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_can::Frame;
use pitwall_protocol::{decode, decode_raw, Message, PAYLOAD_LEN};

use crate::config::VcuLimits;
use crate::scheduler::{DisplayScheduler, Screen};
use crate::telemetry::Telemetry;
use crate::traits::ScreenRenderer;

/// Telemetry model guarded for use from two execution contexts
pub struct SharedTelemetry<M: RawMutex> {
    inner: Mutex<M, RefCell<Telemetry>>,
}

impl<M: RawMutex> SharedTelemetry<M> {
    pub const fn new() -> Self {
        Self::with_limits(VcuLimits::new())
    }

    pub const fn with_limits(limits: VcuLimits) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Telemetry::with_limits(limits))),
        }
    }

    /// Apply a decoded message as one commit
    pub fn apply(&self, msg: &Message) {
        self.inner.lock(|cell| cell.borrow_mut().apply(msg));
    }

    /// Decode and apply a received frame. Returns false for unknown ids.
    pub fn on_frame<F: Frame>(&self, frame: &F) -> bool {
        match decode(frame) {
            Some(msg) => {
                self.apply(&msg);
                true
            }
            None => false,
        }
    }

    /// Decode and apply the raw receive-FIFO shape
    pub fn on_raw(&self, id: u32, extended: bool, data: &[u8; PAYLOAD_LEN]) -> bool {
        match decode_raw(id, extended, data) {
            Some(msg) => {
                self.apply(&msg);
                true
            }
            None => false,
        }
    }

    /// Run one scheduler tick
    ///
    /// Returns the screen on display after the tick.
    pub fn on_tick<R: ScreenRenderer>(
        &self,
        scheduler: &mut DisplayScheduler,
        renderer: &mut R,
    ) -> Screen {
        let snapshot = self.snapshot();
        scheduler.step(&snapshot, renderer);
        self.inner
            .lock(|cell| scheduler.advance(&mut cell.borrow_mut()));
        scheduler.current_screen()
    }

    /// Copy of the model
    pub fn snapshot(&self) -> Telemetry {
        self.inner.lock(|cell| *cell.borrow())
    }

    /// Replace the configured VCU limits
    pub fn configure(&self, limits: VcuLimits) {
        self.inner.lock(|cell| cell.borrow_mut().set_limits(limits));
    }

    pub fn tick(&self) -> u32 {
        self.inner.lock(|cell| cell.borrow().tick)
    }
}

impl<M: RawMutex> Default for SharedTelemetry<M> {
    fn default() -> Self {
        Self::new()
    }
}
