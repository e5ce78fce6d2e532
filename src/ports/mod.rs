//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AnswerGenerator` - generative-answer backend (invoked on questions)
//! - `ContextRetriever` - best-effort reference snippet retrieval
//! - `SessionStore` - dialogue session persistence with per-session locking

mod answer_generator;
mod context_retriever;
mod session_store;

pub use answer_generator::{AnswerGenerator, AnswerRequest, GenerationError, HistoryTurn, TurnRole};
pub use context_retriever::{ContextRetriever, RetrievalError};
pub use session_store::{SessionHandle, SessionStore, StoreError};
