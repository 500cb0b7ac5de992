//! Session struct and transcript management.

use kokoro_common::SessionId;
use tracing::trace;

use crate::Turn;

use super::types::TurnPhase;

/// One conversation: identifier, transcript, and turn-cycle phase.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    /// Turns in production order. Only ever pushed to.
    history: Vec<Turn>,
    pub(crate) phase: TurnPhase,
}

impl Session {
    /// Start a session with an empty history and a fresh random identifier.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            history: Vec::new(),
            phase: TurnPhase::Idle,
        }
    }

    /// Append a turn. Content is not validated here.
    pub fn append(&mut self, turn: Turn) {
        trace!(session = %self.id, role = %turn.role(), "appending turn");
        self.history.push(turn);
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The full transcript in chronological order.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.history.last()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
