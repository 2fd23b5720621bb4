//! Display scheduler
//!
//! Runs once per tick. A screen change is spread over two ticks so that a
//! screen is never destroyed and built, or built and refreshed, within the
//! same tick:
//!
//! ```text
//!  tick n          tick n+1            tick n+2 ...
//!  teardown(A) ──► initialize(B) ──►   refresh(B) on refresh ticks
//!  Idle→TearingDown→PendingInit  →Idle
//! ```

use heapless::Deque;

use super::screen::{self, Screen};
use crate::config::SchedulerConfig;
use crate::safety::LinkStatus;
use crate::telemetry::Telemetry;
use crate::traits::ScreenRenderer;

/// Completed transitions kept for diagnostics
pub const TRANSITION_LOG_LEN: usize = 8;

/// Where the scheduler is in a screen change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Current screen is built and refreshed on refresh ticks
    #[default]
    Idle,
    /// Commanded screen differs; the current screen is torn down this tick
    ///
    /// Only held inside `step`: the teardown tick ends in `PendingInit`, so
    /// `phase()` never reports this variant between ticks.
    TearingDown,
    /// Current screen is gone; the commanded screen is built next tick
    PendingInit,
}

/// A completed screen change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    /// Tick on which `to` was initialized
    pub tick: u32,
}

/// Screen state machine
#[derive(Debug, Clone)]
pub struct DisplayScheduler {
    config: SchedulerConfig,
    current: Screen,
    commanded: Screen,
    phase: Phase,
    last_tick: u32,
    history: Deque<Transition, TRANSITION_LOG_LEN>,
}

impl Default for DisplayScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl DisplayScheduler {
    /// Create a scheduler with nothing on screen
    pub const fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            current: Screen::Uninitialized,
            commanded: Screen::Logo,
            phase: Phase::Idle,
            last_tick: 0,
            history: Deque::new(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Screen whose widgets exist (or last existed, while a change is pending)
    pub fn current_screen(&self) -> Screen {
        self.current
    }

    /// Screen selected on the last tick
    pub fn commanded_screen(&self) -> Screen {
        self.commanded
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Tick seen by the last `step`
    pub fn tick_count(&self) -> u32 {
        self.last_tick
    }

    /// Whether a screen change is in flight
    pub fn is_transitioning(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Recent screen changes, oldest first
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.history.iter()
    }

    /// One full tick on an exclusively owned model
    pub fn tick<R: ScreenRenderer>(&mut self, telemetry: &mut Telemetry, renderer: &mut R) {
        self.step(telemetry, renderer);
        self.advance(telemetry);
    }

    /// Screen half of a tick: select, sequence and refresh
    ///
    /// Reads the model only. Exactly one of teardown, initialize or refresh
    /// (or nothing) reaches the renderer per call.
    pub fn step<R: ScreenRenderer>(&mut self, telemetry: &Telemetry, renderer: &mut R) {
        let tick = telemetry.tick;
        self.last_tick = tick;
        self.commanded = screen::select(telemetry, &self.config);

        if self.phase == Phase::Idle && self.commanded != self.current {
            self.phase = Phase::TearingDown;
        }

        match self.phase {
            Phase::TearingDown => {
                if self.current.is_renderable() {
                    renderer.teardown(self.current, telemetry);
                }
                self.phase = Phase::PendingInit;
            }
            Phase::PendingInit => {
                renderer.initialize(self.commanded, telemetry);
                self.record(Transition {
                    from: self.current,
                    to: self.commanded,
                    tick,
                });
                self.current = self.commanded;
                self.phase = Phase::Idle;
            }
            Phase::Idle => {
                if self.config.is_refresh_tick(tick) && self.current.is_renderable() {
                    renderer.refresh(self.current, telemetry);
                }
            }
        }
    }

    /// Bookkeeping half of a tick: advance the tick counter, then VCU
    /// liveness against the new tick
    ///
    /// The next `step` therefore already sees a link that went stale on this
    /// tick boundary. Must see the live model so the liveness check observes
    /// the last VCU frame in full.
    pub fn advance(&self, telemetry: &mut Telemetry) {
        telemetry.tick = telemetry.tick.wrapping_add(1);

        let previous = LinkStatus::from_active(telemetry.vcu.active);
        let status = LinkStatus::evaluate(
            telemetry.tick,
            telemetry.vcu.last_comm_tick,
            self.config.liveness_window,
        );

        #[cfg(feature = "defmt")]
        match previous.edge(status) {
            Some(crate::safety::LinkEdge::Lost) => {
                defmt::warn!("VCU link stale at tick {}", telemetry.tick)
            }
            Some(crate::safety::LinkEdge::Restored) => {
                defmt::info!("VCU link restored at tick {}", telemetry.tick)
            }
            None => {}
        }
        #[cfg(not(feature = "defmt"))]
        let _ = previous;

        telemetry.vcu.active = status.is_alive();
    }

    fn record(&mut self, transition: Transition) {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Screen {} -> {} at tick {}",
            transition.from.name(),
            transition.to.name(),
            transition.tick
        );

        if self.history.is_full() {
            self.history.pop_front();
        }
        // Cannot fail: a slot was just freed
        let _ = self.history.push_back(transition);
    }
}
