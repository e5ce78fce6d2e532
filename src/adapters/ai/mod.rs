//! Generative-answer adapters.

mod gemini;
mod mock;

pub use gemini::{GeminiAnswerGenerator, GeminiConfig};
pub use mock::MockAnswerGenerator;
