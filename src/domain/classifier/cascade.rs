//! The classification cascade.
//!
//! Stage order is load-bearing: question detection runs before any field
//! matching so that a question which happens to contain a field keyword
//! ("몇 명이 적당할까요?") is never misread as an answer, and a field match
//! must survive the validity gate before being trusted, because free-text
//! answers frequently hedge ("잘 모르겠지만 아마 개발 쪽이요").

use tracing::debug;

use crate::domain::catalog::{
    catalog, contains_question_indicator, contains_uncertainty_marker, is_small_talk, FieldKey,
};
use crate::domain::extraction::ValueExtractor;

use super::result::{ClassificationResult, Rationale};

/// Valid answers are between 2 and 200 characters.
const MIN_ANSWER_CHARS: usize = 2;
const MAX_ANSWER_CHARS: usize = 200;

/// Utterances longer than this are eligible for the conversational retest.
const MIN_CONVERSATIONAL_CHARS: usize = 5;

/// Priority order for the no-current-field scan, after the duty-specific,
/// headcount, and work-hours tiers.
const SCAN_REMAINDER: [FieldKey; 6] = [
    FieldKey::Department,
    FieldKey::MainDuties,
    FieldKey::LocationCity,
    FieldKey::Salary,
    FieldKey::Deadline,
    FieldKey::ContactEmail,
];

/// Keyword-cascade utterance classifier.
///
/// Deterministic and pure: the same utterance and current field always
/// produce the same result, and no I/O happens here.
#[derive(Debug, Clone, Default)]
pub struct UtteranceClassifier {
    extractor: ValueExtractor,
}

impl UtteranceClassifier {
    /// Creates a new classifier over the static catalog.
    pub fn new() -> Self {
        Self {
            extractor: ValueExtractor::new(),
        }
    }

    /// Classifies one utterance against the optional current field.
    pub fn classify(&self, raw: &str, current_field: Option<FieldKey>) -> ClassificationResult {
        let text = raw.trim();
        let lower = text.to_lowercase();

        // Stage 1: question detection, always before field matching.
        if contains_question_indicator(text) {
            debug!(rationale = "clear_question", "utterance classified");
            return ClassificationResult::question(0.95, Rationale::ClearQuestion);
        }

        // Stage 2: field match with validity gate.
        if let Some(field) = current_field {
            if catalog().spec(field).matches(&lower) && self.is_valid_answer(text, field) {
                let value = self.extractor.extract(text, field);
                debug!(field = %field, value = %value, "targeted field match");
                return ClassificationResult::answer(
                    field,
                    value,
                    0.9,
                    Rationale::TargetedFieldMatch,
                );
            }
        } else if let Some(result) = self.priority_scan(text, &lower) {
            return result;
        }

        // Small talk: short greetings and acknowledgements.
        if is_small_talk(text) {
            debug!(rationale = "small_talk", "utterance classified");
            return ClassificationResult::chat(0.7);
        }

        // Stage 2.5: conversational retest for long-enough utterances.
        if text.chars().count() > MIN_CONVERSATIONAL_CHARS {
            return self.conversational_retest(text, &lower, current_field);
        }

        // Stage 3: terminal "ask the user to rephrase" branch.
        debug!(rationale = "clarification_needed", "utterance classified");
        ClassificationResult::unclear(0.8)
    }

    /// The validity gate: vetoes an otherwise-matching answer.
    fn is_valid_answer(&self, text: &str, field: FieldKey) -> bool {
        if contains_uncertainty_marker(text) || contains_question_indicator(text) {
            return false;
        }

        let chars = text.chars().count();
        if !(MIN_ANSWER_CHARS..=MAX_ANSWER_CHARS).contains(&chars) {
            return false;
        }

        if field.extracts_number() && !text.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }

        if field == FieldKey::ContactEmail && !text.contains('@') {
            return false;
        }

        true
    }

    /// No-current-field scan: most specific fields first, confidence
    /// stepped down per tier.
    fn priority_scan(&self, text: &str, lower: &str) -> Option<ClassificationResult> {
        let cat = catalog();

        // Tier 1: duty-specific compound terms are unambiguous.
        let duties = cat.spec(FieldKey::MainDuties);
        let duties_hit = duties
            .specific_terms
            .iter()
            .any(|t| lower.contains(t.to_lowercase().as_str()));
        if duties_hit && self.is_valid_answer(text, FieldKey::MainDuties) {
            let value = self.extractor.extract(text, FieldKey::MainDuties);
            debug!(field = "mainDuties", value = %value, "priority scan hit (specific duties)");
            return Some(ClassificationResult::answer(
                FieldKey::MainDuties,
                value,
                0.95,
                Rationale::ScannedFieldMatch,
            ));
        }

        // Tier 2: headcount and work hours carry distinctive tokens.
        for field in [FieldKey::Headcount, FieldKey::WorkHours] {
            if cat.spec(field).matches(lower) && self.is_valid_answer(text, field) {
                let value = self.extractor.extract(text, field);
                debug!(field = %field, value = %value, "priority scan hit");
                return Some(ClassificationResult::answer(
                    field,
                    value,
                    0.9,
                    Rationale::ScannedFieldMatch,
                ));
            }
        }

        // Tier 3: everything else in catalog order.
        for field in SCAN_REMAINDER {
            if cat.spec(field).matches(lower) && self.is_valid_answer(text, field) {
                let value = self.extractor.extract(text, field);
                debug!(field = %field, value = %value, "priority scan hit");
                return Some(ClassificationResult::answer(
                    field,
                    value,
                    0.85,
                    Rationale::ScannedFieldMatch,
                ));
            }
        }

        None
    }

    /// Stage 2.5: keyword-presence-only retest of the answer part and
    /// question part, without the validity gate.
    fn conversational_retest(
        &self,
        text: &str,
        lower: &str,
        current_field: Option<FieldKey>,
    ) -> ClassificationResult {
        let has_answer_part = current_field
            .map(|field| catalog().spec(field).matches(lower))
            .unwrap_or(false);
        let has_question_part = contains_question_indicator(text);

        let result = match (has_answer_part, has_question_part) {
            (true, true) => {
                ClassificationResult::conversational(current_field, 0.8, Rationale::MixedInput)
            }
            (true, false) => ClassificationResult::conversational(
                current_field,
                0.7,
                Rationale::ConversationalAnswer,
            ),
            (false, true) => {
                ClassificationResult::question(0.7, Rationale::ConversationalQuestion)
            }
            (false, false) => ClassificationResult::conversational(
                current_field,
                0.6,
                Rationale::ContextExtraction,
            ),
        };
        debug!(rationale = result.rationale.as_str(), "conversational retest");
        result
    }
}
