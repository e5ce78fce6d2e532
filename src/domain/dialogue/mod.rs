//! Dialogue session state and response composition.
//!
//! One [`DialogueSession`] per active conversation, owned exclusively by
//! the turn-processing handler. The session is a small state machine over
//! its cursor: `Collecting` while fields remain, `Complete` once every
//! field has been filled. Completion keeps the session readable; disposal
//! is an explicit caller operation.

mod composer;
mod session;

pub use composer::ResponseComposer;
pub use session::{DialogueSession, FillOutcome, HistoryEntry, HistoryRole, RejectReason};
