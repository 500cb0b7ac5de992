//! Turn-cycle orchestration.
//!
//! `ChatController` validates the input, appends the user turn, calls the
//! model once, appends the reply, and runs risk detection over the pair.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::risk::RiskDetector;
use crate::session::{CycleGuard, Session, SessionHandle};
use crate::{AiError, Credentials, ModelClient, Turn};

/// Result of a completed turn-cycle.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The session's transcript after the model turn was appended.
    pub history: Vec<Turn>,
    /// The model's reply for this cycle.
    pub reply: String,
    /// Whether the user text or the reply contained a risk keyword.
    pub risk_flagged: bool,
}

/// Drives one user turn through session, model, and risk check.
pub struct ChatController {
    client: Arc<dyn ModelClient>,
    risk: Arc<RiskDetector>,
}

impl ChatController {
    pub fn new(client: Arc<dyn ModelClient>, risk: Arc<RiskDetector>) -> Self {
        Self { client, risk }
    }

    /// Run one turn-cycle against `session`.
    ///
    /// Validation failures leave the session untouched. Model failures keep
    /// the appended user turn and add no model turn. Dropping the future
    /// mid-call has the same effect as a failure: the phase returns to `Idle`.
    pub async fn submit_turn(
        &self,
        session: &mut Session,
        user_text: &str,
        credentials: Option<&Credentials>,
    ) -> Result<TurnOutcome, AiError> {
        if user_text.is_empty() {
            debug!(session = %session.id(), "rejected empty message");
            return Err(AiError::Validation("message is empty".into()));
        }
        let credentials = match credentials {
            Some(c) if !c.is_blank() => c,
            _ => {
                debug!(session = %session.id(), "rejected submission without credentials");
                return Err(AiError::Validation("API key is missing".into()));
            }
        };

        // The model sees the prior transcript plus this text as its final block.
        let prior_len = session.len();
        let mut cycle = CycleGuard::begin(session);
        cycle.append(Turn::user(user_text));

        info!(session = %cycle.id(), turns = cycle.len(), "turn submitted");

        let prior = &cycle.history()[..prior_len];
        let reply = match self.client.send(prior, user_text, credentials).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session = %cycle.id(), error = %e, "model call failed");
                return Err(e);
            }
        };

        cycle.append(Turn::model(reply.clone()));

        let risk_flagged = self.risk.detect_turn(user_text, &reply);
        if risk_flagged {
            let hits = self.risk.matched_turn(user_text, &reply).len();
            warn!(session = %cycle.id(), hits, "risk keywords detected");
        }

        cycle.settle();
        Ok(TurnOutcome {
            history: cycle.history().to_vec(),
            reply,
            risk_flagged,
        })
    }

    /// Same as [`submit_turn`](Self::submit_turn), holding the session lock
    /// for the entire cycle so concurrent callers are serialized.
    pub async fn submit_shared(
        &self,
        handle: &SessionHandle,
        user_text: &str,
        credentials: Option<&Credentials>,
    ) -> Result<TurnOutcome, AiError> {
        let mut session = handle.lock().await;
        self.submit_turn(&mut session, user_text, credentials).await
    }
}
