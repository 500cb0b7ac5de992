//! Session phase and shared-handle types.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::manager::Session;

/// Where a session is in its current turn-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    /// No request in flight; the last cycle failed or none has run.
    #[default]
    Idle,
    /// The user turn is appended and the model call is outstanding.
    AwaitingResponse,
    /// The last cycle completed with a model turn.
    Settled,
}

/// Shared ownership of one session for hosts that can fire submissions
/// concurrently. Holding the lock for a whole turn-cycle keeps the
/// user/model pairs from interleaving.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Wait for exclusive access to the session.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().await
    }
}

/// Holds a session in `AwaitingResponse` for one turn-cycle.
///
/// Unless [`settle`](Self::settle) is called, dropping the guard returns the
/// session to `Idle`, whether the cycle failed or its future was dropped.
pub(crate) struct CycleGuard<'a> {
    session: &'a mut Session,
    settled: bool,
}

impl<'a> CycleGuard<'a> {
    pub(crate) fn begin(session: &'a mut Session) -> Self {
        session.phase = TurnPhase::AwaitingResponse;
        Self {
            session,
            settled: false,
        }
    }

    pub(crate) fn settle(&mut self) {
        self.session.phase = TurnPhase::Settled;
        self.settled = true;
    }
}

impl Deref for CycleGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for CycleGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.phase = TurnPhase::Idle;
        }
    }
}
