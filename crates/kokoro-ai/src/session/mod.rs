//! Conversation session state.
//!
//! A `Session` owns the ordered, append-only transcript and the session
//! identifier. It lives in memory for one interaction and is never persisted.

mod manager;
mod types;


pub use manager::Session;
pub use types::{SessionHandle, TurnPhase};
pub(crate) use types::CycleGuard;
