//! Armed/idle latch deciding whether clock ticks may advance the run.
//!
//! The latch is independent of numeric validation: an armed gate still
//! rejects a tick whose entries do not validate, and an idle gate rejects a
//! tick even when everything validates.
//!
//! ```text
//!            Confirm / Hold
//!   ┌──────┐ ─────────────▶ ┌───────┐
//!   │ Idle │                │ Armed │
//!   └──────┘ ◀───────────── └───────┘
//!              Edit / Reset
//! ```

use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    /// Ticks are suppressed, typically while an entry is being typed.
    #[default]
    Idle,
    /// The next tick may advance the simulation.
    Armed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    /// An entry changed and has not been confirmed yet.
    Edit,
    /// The operator committed an entry.
    Confirm,
    /// File replay ran past its data and is repeating its last sample.
    Hold,
    /// All run state was cleared.
    Reset,
}

#[derive(Debug, Clone, Default)]
pub struct TickGate {
    state: GateState,
}

impl TickGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == GateState::Armed
    }

    /// Apply an event and return the resulting state.
    pub fn apply(&mut self, event: GateEvent) -> GateState {
        let next = match event {
            GateEvent::Edit | GateEvent::Reset => GateState::Idle,
            GateEvent::Confirm | GateEvent::Hold => GateState::Armed,
        };
        if next != self.state {
            debug!(?event, from = ?self.state, to = ?next, "tick gate transition");
        }
        self.state = next;
        next
    }
}
