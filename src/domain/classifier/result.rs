//! Classification result types.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::FieldKey;

/// What kind of utterance the classifier decided this was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationKind {
    /// A question for the assistant; delegated to the generative backend.
    Question,
    /// A direct answer to a field; carries an extracted value.
    Answer,
    /// An answer embedded in conversational text; needs generative
    /// extraction before a value can be trusted.
    ConversationalAnswer,
    /// Small talk; acknowledged without touching the session.
    Chat,
    /// Could not be classified; the user is asked to rephrase.
    Unclear,
}

/// Which cascade rule produced the result. Diagnostic only; never drives
/// control flow on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rationale {
    /// Stage 1: question indicator or trailing question mark.
    ClearQuestion,
    /// Stage 2: keyword match on the supplied current field.
    TargetedFieldMatch,
    /// Stage 2: keyword match found by the priority scan (no current field).
    ScannedFieldMatch,
    /// Stage 2.5: both an answer part and a question part present.
    MixedInput,
    /// Stage 2.5: answer part only.
    ConversationalAnswer,
    /// Stage 2.5: question part only.
    ConversationalQuestion,
    /// Stage 2.5: neither part; hand to generative extraction.
    ContextExtraction,
    /// Greeting/acknowledgement bucket.
    SmallTalk,
    /// Stage 3 fallback.
    ClarificationNeeded,
}

impl Rationale {
    /// Stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rationale::ClearQuestion => "clear_question",
            Rationale::TargetedFieldMatch => "targeted_field_match",
            Rationale::ScannedFieldMatch => "scanned_field_match",
            Rationale::MixedInput => "mixed_input",
            Rationale::ConversationalAnswer => "conversational_answer",
            Rationale::ConversationalQuestion => "conversational_question",
            Rationale::ContextExtraction => "context_extraction",
            Rationale::SmallTalk => "small_talk",
            Rationale::ClarificationNeeded => "clarification_needed",
        }
    }
}

/// Outcome of classifying one utterance.
///
/// # Invariants
///
/// - `extracted_value` is only set when `kind` is [`ClassificationKind::Answer`]
///   or [`ClassificationKind::ConversationalAnswer`]
/// - `confidence` is in `[0.0, 1.0]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The decided kind.
    pub kind: ClassificationKind,
    /// The field this utterance targets, when one was identified.
    pub target_field: Option<FieldKey>,
    /// Normalized value pulled from the utterance (direct answers only).
    pub extracted_value: Option<String>,
    /// How certain the firing rule is.
    pub confidence: f32,
    /// Which rule fired.
    pub rationale: Rationale,
}

impl ClassificationResult {
    /// A question result.
    pub fn question(confidence: f32, rationale: Rationale) -> Self {
        Self {
            kind: ClassificationKind::Question,
            target_field: None,
            extracted_value: None,
            confidence,
            rationale,
        }
    }

    /// A direct answer with an extracted value.
    pub fn answer(
        field: FieldKey,
        value: impl Into<String>,
        confidence: f32,
        rationale: Rationale,
    ) -> Self {
        Self {
            kind: ClassificationKind::Answer,
            target_field: Some(field),
            extracted_value: Some(value.into()),
            confidence,
            rationale,
        }
    }

    /// A conversational answer; value extraction is deferred.
    pub fn conversational(
        field: Option<FieldKey>,
        confidence: f32,
        rationale: Rationale,
    ) -> Self {
        Self {
            kind: ClassificationKind::ConversationalAnswer,
            target_field: field,
            extracted_value: None,
            confidence,
            rationale,
        }
    }

    /// A small-talk result.
    pub fn chat(confidence: f32) -> Self {
        Self {
            kind: ClassificationKind::Chat,
            target_field: None,
            extracted_value: None,
            confidence,
            rationale: Rationale::SmallTalk,
        }
    }

    /// The terminal "please rephrase" result.
    pub fn unclear(confidence: f32) -> Self {
        Self {
            kind: ClassificationKind::Unclear,
            target_field: None,
            extracted_value: None,
            confidence,
            rationale: Rationale::ClarificationNeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracted_value_implies_answer_kind() {
        let result = ClassificationResult::answer(
            FieldKey::Headcount,
            "3명",
            0.9,
            Rationale::TargetedFieldMatch,
        );
        assert!(matches!(
            result.kind,
            ClassificationKind::Answer | ClassificationKind::ConversationalAnswer
        ));
        assert!(result.extracted_value.is_some());
    }

    #[test]
    fn non_answer_constructors_carry_no_value() {
        assert!(ClassificationResult::question(0.95, Rationale::ClearQuestion)
            .extracted_value
            .is_none());
        assert!(ClassificationResult::chat(0.7).extracted_value.is_none());
        assert!(ClassificationResult::unclear(0.8).extracted_value.is_none());
        assert!(
            ClassificationResult::conversational(None, 0.6, Rationale::ContextExtraction)
                .extracted_value
                .is_none()
        );
    }

    #[test]
    fn rationale_names_are_stable() {
        assert_eq!(Rationale::ClearQuestion.as_str(), "clear_question");
        assert_eq!(Rationale::ContextExtraction.as_str(), "context_extraction");
    }
}
