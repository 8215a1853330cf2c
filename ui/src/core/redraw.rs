//! Redraw lifecycle of a chart instance.
//!
//! ```text
//! Uninitialized ──data──▶ Rendering ──complete──▶ Idle
//!                            ▲                     │
//!                            └─data / legend / breakpoint
//! ```
//!
//! Every [`RedrawMachine::begin`] hands out a [`RenderTicket`]. Starting a new
//! render while one is in flight supersedes it: the old ticket stops receiving
//! progress and its completion is ignored, the same way a task run id guards
//! against stale timers.

use super::layout::{eased_progress, TRANSITION_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawTrigger {
    Data,
    LegendToggle,
    Breakpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Uninitialized,
    Rendering { generation: u64 },
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket {
    pub generation: u64,
    pub trigger: RedrawTrigger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RedrawMachine {
    phase: RenderPhase,
    generation: u64,
    duration_ms: u64,
    last_trigger: Option<RedrawTrigger>,
}

impl Default for RedrawMachine {
    fn default() -> Self {
        Self::new(TRANSITION_MS)
    }
}

impl RedrawMachine {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            phase: RenderPhase::Uninitialized,
            generation: 0,
            duration_ms,
            last_trigger: None,
        }
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn last_trigger(&self) -> Option<RedrawTrigger> {
        self.last_trigger
    }

    /// Start a render. Returns `None` when a non-data trigger arrives before
    /// any data (there is nothing to redraw yet).
    pub fn begin(&mut self, trigger: RedrawTrigger) -> Option<RenderTicket> {
        if self.phase == RenderPhase::Uninitialized && trigger != RedrawTrigger::Data {
            return None;
        }

        self.generation = self.generation.wrapping_add(1);
        self.phase = RenderPhase::Rendering {
            generation: self.generation,
        };
        self.last_trigger = Some(trigger);

        Some(RenderTicket {
            generation: self.generation,
            trigger,
        })
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.phase
            == RenderPhase::Rendering {
                generation: ticket.generation,
            }
    }

    /// Eased progress for `ticket` after `elapsed_ms`, or `None` once superseded.
    pub fn progress(&self, ticket: RenderTicket, elapsed_ms: u64) -> Option<f64> {
        self.is_current(ticket)
            .then(|| eased_progress(elapsed_ms, self.duration_ms))
    }

    /// Finish the transition for `ticket`. Stale tickets leave the phase alone.
    pub fn complete(&mut self, ticket: RenderTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.phase = RenderPhase::Idle;
        true
    }

    /// Abandon any in-flight render (component teardown).
    pub fn cancel(&mut self) {
        if matches!(self.phase, RenderPhase::Rendering { .. }) {
            self.generation = self.generation.wrapping_add(1);
            self.phase = RenderPhase::Idle;
        }
    }
}
