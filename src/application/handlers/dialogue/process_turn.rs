//! ProcessTurn command handler.
//!
//! Drives one utterance through the classifier and mutates the session
//! accordingly. The session handle is locked for the whole turn, so turns
//! within one session are serialized; collaborator failures degrade to a
//! static apology and never move the cursor.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::catalog::FieldKey;
use crate::domain::classifier::{ClassificationKind, ClassificationResult, UtteranceClassifier};
use crate::domain::dialogue::{
    DialogueSession, FillOutcome, HistoryRole, ResponseComposer,
};
use crate::domain::extraction::ValueExtractor;
use crate::domain::foundation::SessionId;
use crate::ports::{
    AnswerGenerator, AnswerRequest, ContextRetriever, HistoryTurn, SessionStore, TurnRole,
};

use super::prompts;

/// How many reference snippets enrich a question prompt.
const RETRIEVAL_K: usize = 3;

/// How many history entries accompany a generative request.
const HISTORY_TAIL: usize = 4;

/// Command to process one utterance in a session.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    /// The session this utterance belongs to.
    pub session_id: SessionId,
    /// The raw user utterance.
    pub utterance: String,
    /// Caller-supplied current field; defaults to the cursor target.
    pub current_field: Option<FieldKey>,
}

/// Result of processing one turn.
#[derive(Debug, Clone)]
pub struct ProcessTurnResult {
    /// User-facing message.
    pub message: String,
    /// The field this turn addressed, when one was identified.
    pub field: Option<FieldKey>,
    /// Value recorded this turn, if any.
    pub value: Option<String>,
    /// Example values for the field now being collected.
    pub suggestions: Vec<String>,
    /// Confidence of the firing classification rule.
    pub confidence: f32,
    /// Selectable items split out of a generative answer.
    pub items: Vec<String>,
    /// True once every field has been collected.
    pub completed: bool,
}

/// Errors rejected at the turn boundary.
///
/// Collaborator failures are not errors: they degrade to an apology
/// message inside a successful result.
#[derive(Debug, Clone, Error)]
pub enum ProcessTurnError {
    /// Utterance was empty or whitespace only.
    #[error("Validation error: utterance cannot be empty")]
    EmptyUtterance,

    /// No session with this id.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Storage backend failure.
    #[error("Storage backend failure: {0}")]
    Storage(String),
}

/// Handler for the turn-processing boundary.
pub struct ProcessTurnHandler {
    store: Arc<dyn SessionStore>,
    generator: Arc<dyn AnswerGenerator>,
    retriever: Arc<dyn ContextRetriever>,
    classifier: UtteranceClassifier,
    extractor: ValueExtractor,
    composer: ResponseComposer,
}

impl ProcessTurnHandler {
    /// Creates a new handler over the given collaborators.
    pub fn new(
        store: Arc<dyn SessionStore>,
        generator: Arc<dyn AnswerGenerator>,
        retriever: Arc<dyn ContextRetriever>,
    ) -> Self {
        Self {
            store,
            generator,
            retriever,
            classifier: UtteranceClassifier::new(),
            extractor: ValueExtractor::new(),
            composer: ResponseComposer::new(),
        }
    }

    /// Processes one utterance and returns the composed response.
    pub async fn handle(
        &self,
        cmd: ProcessTurnCommand,
    ) -> Result<ProcessTurnResult, ProcessTurnError> {
        let utterance = cmd.utterance.trim().to_string();
        if utterance.is_empty() {
            return Err(ProcessTurnError::EmptyUtterance);
        }

        let handle = self
            .store
            .get(&cmd.session_id)
            .await
            .map_err(|err| ProcessTurnError::Storage(err.to_string()))?
            .ok_or(ProcessTurnError::SessionNotFound(cmd.session_id))?;

        // Held for the whole turn: no partial-turn interleaving per session.
        let mut session = handle.lock().await;

        if session.is_complete() {
            session.append_history(HistoryRole::User, &utterance, None);
            let message = self.composer.already_complete();
            session.append_history(HistoryRole::Assistant, &message, None);
            return Ok(ProcessTurnResult {
                message,
                field: None,
                value: None,
                suggestions: Vec::new(),
                confidence: 1.0,
                items: Vec::new(),
                completed: true,
            });
        }

        let current_field = cmd.current_field.or_else(|| session.current_field());
        session.append_history(HistoryRole::User, &utterance, current_field);

        let classification = self.classifier.classify(&utterance, current_field);
        debug!(
            session_id = %cmd.session_id,
            kind = ?classification.kind,
            rationale = classification.rationale.as_str(),
            confidence = classification.confidence,
            "turn classified"
        );

        let result = match classification.kind {
            ClassificationKind::Question => {
                self.answer_question(&mut session, &utterance, current_field, &classification)
                    .await
            }
            ClassificationKind::Answer => {
                self.accept_answer(&mut session, &utterance, current_field, &classification)
            }
            ClassificationKind::ConversationalAnswer => {
                self.extract_conversationally(&mut session, &utterance, current_field, &classification)
                    .await
            }
            ClassificationKind::Chat => self.acknowledge_chat(current_field, &classification),
            ClassificationKind::Unclear => {
                self.request_clarification(&utterance, current_field, &classification)
            }
        };

        session.append_history(HistoryRole::Assistant, &result.message, result.field);
        Ok(result)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Per-kind branches
    // ─────────────────────────────────────────────────────────────────────

    /// Question branch: retrieval-augmented generative answer. The session
    /// cursor never moves here.
    async fn answer_question(
        &self,
        session: &mut DialogueSession,
        utterance: &str,
        current_field: Option<FieldKey>,
        classification: &ClassificationResult,
    ) -> ProcessTurnResult {
        let context = match self.retriever.retrieve(utterance, RETRIEVAL_K).await {
            Ok(snippets) => snippets,
            Err(err) => {
                warn!(error = %err, "context retrieval failed; answering without context");
                Vec::new()
            }
        };

        let prompt = prompts::question_prompt(current_field, utterance, &context);
        let request = AnswerRequest::new(prompt).with_history(history_tail(session));

        match self.generator.generate(request).await {
            Ok(answer) => {
                let items = self.composer.split_items(&answer);
                ProcessTurnResult {
                    message: answer,
                    field: current_field,
                    value: None,
                    suggestions: Vec::new(),
                    confidence: classification.confidence,
                    items,
                    completed: false,
                }
            }
            Err(err) => {
                warn!(error = %err, "answer generation failed; degrading to apology");
                ProcessTurnResult {
                    message: self.composer.backend_apology(current_field),
                    field: current_field,
                    value: None,
                    suggestions: self.suggestions_for(current_field),
                    confidence: classification.confidence,
                    items: Vec::new(),
                    completed: false,
                }
            }
        }
    }

    /// Answer branch: record the extracted value and advance.
    fn accept_answer(
        &self,
        session: &mut DialogueSession,
        utterance: &str,
        current_field: Option<FieldKey>,
        classification: &ClassificationResult,
    ) -> ProcessTurnResult {
        let field = classification
            .target_field
            .or(current_field)
            .expect("answer classification always names a field");
        let value = classification
            .extracted_value
            .clone()
            .unwrap_or_else(|| utterance.to_string());

        self.fill_and_compose(session, field, value, current_field, classification, None)
    }

    /// Conversational branch: delegate value recovery to the generative
    /// backend, then treat the recovered text like a direct answer.
    async fn extract_conversationally(
        &self,
        session: &mut DialogueSession,
        utterance: &str,
        current_field: Option<FieldKey>,
        classification: &ClassificationResult,
    ) -> ProcessTurnResult {
        let Some(field) = classification.target_field.or(current_field) else {
            return self.request_clarification(utterance, current_field, classification);
        };

        let request = AnswerRequest::new(prompts::extraction_prompt(field, utterance))
            .with_history(history_tail(session));

        match self.generator.generate(request).await {
            Ok(response) => {
                let response = response.trim().to_string();
                if response.is_empty() || response.contains(prompts::NO_INFO_MARKER) {
                    debug!(field = %field, "conversational extraction found nothing");
                    return ProcessTurnResult {
                        message: self.composer.conversational_no_info(field),
                        field: Some(field),
                        value: None,
                        suggestions: self.suggestions_for(Some(field)),
                        confidence: classification.confidence,
                        items: Vec::new(),
                        completed: false,
                    };
                }

                let value = self.extractor.extract(&response, field);
                let prefix = self.composer.conversational_extracted(field, &value);
                self.fill_and_compose(
                    session,
                    field,
                    value,
                    current_field,
                    classification,
                    Some(prefix),
                )
            }
            Err(err) => {
                warn!(error = %err, "conversational extraction failed; degrading to apology");
                ProcessTurnResult {
                    message: self.composer.backend_apology(Some(field)),
                    field: Some(field),
                    value: None,
                    suggestions: self.suggestions_for(Some(field)),
                    confidence: classification.confidence,
                    items: Vec::new(),
                    completed: false,
                }
            }
        }
    }

    /// Chat branch: canned acknowledgement plus current-field reminder.
    fn acknowledge_chat(
        &self,
        current_field: Option<FieldKey>,
        classification: &ClassificationResult,
    ) -> ProcessTurnResult {
        let message = match current_field {
            Some(field) => self.composer.chat_acknowledgement(field),
            None => self.composer.already_complete(),
        };
        ProcessTurnResult {
            message,
            field: current_field,
            value: None,
            suggestions: self.suggestions_for(current_field),
            confidence: classification.confidence,
            items: Vec::new(),
            completed: false,
        }
    }

    /// Unclear branch: clarification with example values; no mutation.
    fn request_clarification(
        &self,
        utterance: &str,
        current_field: Option<FieldKey>,
        classification: &ClassificationResult,
    ) -> ProcessTurnResult {
        let message = match current_field {
            Some(field) => self.composer.clarification(field, utterance),
            None => self.composer.already_complete(),
        };
        ProcessTurnResult {
            message,
            field: current_field,
            value: None,
            suggestions: self.suggestions_for(current_field),
            confidence: classification.confidence,
            items: Vec::new(),
            completed: false,
        }
    }

    /// Shared fill-then-compose path for direct and recovered answers.
    fn fill_and_compose(
        &self,
        session: &mut DialogueSession,
        field: FieldKey,
        value: String,
        current_field: Option<FieldKey>,
        classification: &ClassificationResult,
        message_prefix: Option<String>,
    ) -> ProcessTurnResult {
        match session.fill(field, value.clone()) {
            FillOutcome::Accepted { next_field } => {
                let message = match message_prefix {
                    Some(prefix) => format!("{}{}", prefix, self.composer.follow_up(next_field)),
                    None => self.composer.value_accepted(field, &value, next_field),
                };
                ProcessTurnResult {
                    message,
                    field: Some(field),
                    value: Some(value),
                    suggestions: self.suggestions_for(next_field),
                    confidence: classification.confidence,
                    items: Vec::new(),
                    completed: session.is_complete(),
                }
            }
            FillOutcome::Rejected(reason) => {
                debug!(field = %field, ?reason, "fill rejected; asking again");
                let ask_field = current_field.unwrap_or(field);
                ProcessTurnResult {
                    message: self.composer.clarification(ask_field, &value),
                    field: Some(ask_field),
                    value: None,
                    suggestions: self.suggestions_for(Some(ask_field)),
                    confidence: classification.confidence,
                    items: Vec::new(),
                    completed: session.is_complete(),
                }
            }
        }
    }

    fn suggestions_for(&self, field: Option<FieldKey>) -> Vec<String> {
        field
            .map(|f| self.composer.suggestions_for(f))
            .unwrap_or_default()
    }
}

/// Maps the most recent history entries to generative-backend turns.
fn history_tail(session: &DialogueSession) -> Vec<HistoryTurn> {
    let history = session.history();
    let start = history.len().saturating_sub(HISTORY_TAIL);
    history[start..]
        .iter()
        .map(|entry| {
            HistoryTurn::new(
                match entry.role {
                    HistoryRole::User => TurnRole::User,
                    HistoryRole::Assistant => TurnRole::Assistant,
                },
                entry.text.clone(),
            )
        })
        .collect()
}
