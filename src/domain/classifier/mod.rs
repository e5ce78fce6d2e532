//! Utterance classification.
//!
//! A three-stage keyword cascade that decides, for each utterance, whether
//! the user asked a question, answered the current field, embedded an
//! answer in conversation, made small talk, or was unclear. The cascade is
//! a pure function of the utterance, the optional current field, and the
//! static catalog; it performs no I/O.

mod cascade;
mod result;

pub use cascade::UtteranceClassifier;
pub use result::{ClassificationKind, ClassificationResult, Rationale};
