//! VCU link liveness
//!
//! The link is alive while the tick counter is within `window` ticks of the
//! last VCU frame, inclusive. Differences use wrapping arithmetic so the
//! counter rolling over does not produce a false stale reading.

/// Link health as seen by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// VCU heard from within the window
    Alive,
    /// Nothing from the VCU for longer than the window
    Stale,
}

/// Change in link health between two ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEdge {
    Lost,
    Restored,
}

/// Whether a peer last heard at `last_comm_tick` is still alive at `now`
pub const fn is_alive(now: u32, last_comm_tick: u32, window: u32) -> bool {
    now.wrapping_sub(last_comm_tick) <= window
}

impl LinkStatus {
    pub const fn evaluate(now: u32, last_comm_tick: u32, window: u32) -> Self {
        if is_alive(now, last_comm_tick, window) {
            LinkStatus::Alive
        } else {
            LinkStatus::Stale
        }
    }

    pub const fn from_active(active: bool) -> Self {
        if active {
            LinkStatus::Alive
        } else {
            LinkStatus::Stale
        }
    }

    pub const fn is_alive(&self) -> bool {
        matches!(self, LinkStatus::Alive)
    }

    /// Edge from `self` (previous tick) to `next`
    pub fn edge(self, next: LinkStatus) -> Option<LinkEdge> {
        match (self, next) {
            (LinkStatus::Alive, LinkStatus::Stale) => Some(LinkEdge::Lost),
            (LinkStatus::Stale, LinkStatus::Alive) => Some(LinkEdge::Restored),
            _ => None,
        }
    }
}
