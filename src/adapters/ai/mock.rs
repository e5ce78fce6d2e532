//! Mock answer generator for tests.
//!
//! Scripted responses are consumed in order; when the script runs dry the
//! mock returns a fixed default so long flows don't need exhaustive
//! scripting. Requests are captured for verification.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AnswerGenerator, AnswerRequest, GenerationError};

/// Configurable mock implementation of [`AnswerGenerator`].
#[derive(Debug, Clone)]
pub struct MockAnswerGenerator {
    /// Scripted outcomes, consumed front to back.
    script: Arc<Mutex<VecDeque<Result<String, GenerationError>>>>,
    /// Returned once the script is exhausted.
    default_response: String,
    /// Captured requests for verification.
    calls: Arc<Mutex<Vec<AnswerRequest>>>,
}

impl Default for MockAnswerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnswerGenerator {
    /// Creates a mock that answers with a fixed default.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_response: "모의 응답입니다.".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Ok(response.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: GenerationError) -> Self {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Err(error));
        self
    }

    /// Sets the response used once the script is exhausted.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Returns the captured requests.
    pub fn calls(&self) -> Vec<AnswerRequest> {
        self.calls.lock().expect("mock call lock").clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call lock").len()
    }
}

#[async_trait]
impl AnswerGenerator for MockAnswerGenerator {
    async fn generate(&self, request: AnswerRequest) -> Result<String, GenerationError> {
        self.calls.lock().expect("mock call lock").push(request);
        self.script
            .lock()
            .expect("mock script lock")
            .pop_front()
            .unwrap_or_else(|| Ok(self.default_response.clone()))
    }
}
