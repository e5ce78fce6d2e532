//! Dialogue session aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::FieldKey;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};

/// Generic assistant self-references that must never be accepted as field
/// values, even when non-empty.
const PLACEHOLDER_VALUES: &[&str] = &[
    "ai 채용공고 등록 도우미",
    "채용공고 등록 도우미",
    "ai 어시스턴트",
    "채용공고",
    "도우미",
    "ai",
];

/// Who produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRole {
    User,
    Assistant,
}

/// One turn in the session's append-only audit log.
///
/// History is never a source of truth for control flow; the cursor and
/// filled fields are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub text: String,
    pub field: Option<FieldKey>,
    pub at: Timestamp,
}

/// Why a fill attempt was rejected. None of these mutate the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Value was empty after trimming.
    Empty,
    /// Value is on the placeholder denylist.
    Placeholder,
    /// The field already holds a value; keys are settable at most once.
    AlreadyFilled,
    /// All fields are collected; the session no longer accepts values.
    Complete,
}

/// Outcome of attempting to fill a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// Value recorded; `next_field` is the new cursor target, `None` once
    /// the session is complete.
    Accepted { next_field: Option<FieldKey> },
    /// Value rejected; session unchanged.
    Rejected(RejectReason),
}

/// One slot-filling conversation.
///
/// # Invariants
///
/// - `cursor` only increases and never exceeds `ordered_fields.len()`
/// - a field key appears in `filled_fields` at most once
/// - `history` is append-only, never truncated or reordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueSession {
    /// Unique identifier for this session.
    id: SessionId,

    /// The fields to collect, in collection order.
    ordered_fields: Vec<FieldKey>,

    /// Index of the field currently being collected.
    cursor: usize,

    /// Collected values, insertion order = fill order.
    filled_fields: Vec<(FieldKey, String)>,

    /// Append-only turn log.
    history: Vec<HistoryEntry>,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last touched.
    updated_at: Timestamp,
}

impl DialogueSession {
    /// Creates a new session at cursor zero.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `ordered_fields` is empty or contains a
    ///   duplicate key
    pub fn new(id: SessionId, ordered_fields: Vec<FieldKey>) -> Result<Self, DomainError> {
        if ordered_fields.is_empty() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Session requires at least one field to collect",
            ));
        }
        for (i, field) in ordered_fields.iter().enumerate() {
            if ordered_fields[..i].contains(field) {
                return Err(DomainError::validation(
                    field.as_str(),
                    "Duplicate field in collection order",
                ));
            }
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            ordered_fields,
            cursor: 0,
            filled_fields: Vec::new(),
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the fields to collect, in order.
    pub fn ordered_fields(&self) -> &[FieldKey] {
        &self.ordered_fields
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the field currently being collected, `None` once complete.
    pub fn current_field(&self) -> Option<FieldKey> {
        self.ordered_fields.get(self.cursor).copied()
    }

    /// Returns the collected values in fill order.
    pub fn filled_fields(&self) -> &[(FieldKey, String)] {
        &self.filled_fields
    }

    /// Returns the value collected for a field, if any.
    pub fn value_of(&self, field: FieldKey) -> Option<&str> {
        self.filled_fields
            .iter()
            .find(|(k, _)| *k == field)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the turn log.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns true once every field has been collected.
    pub fn is_complete(&self) -> bool {
        self.cursor == self.ordered_fields.len()
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the session was last touched.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Records a value for `field` and advances the cursor.
    ///
    /// The field may differ from the cursor target when the classifier
    /// identified it by scan; the cursor still advances by one. Empty,
    /// placeholder, and repeated values are rejected without mutation.
    pub fn fill(&mut self, field: FieldKey, value: impl Into<String>) -> FillOutcome {
        if self.is_complete() {
            return FillOutcome::Rejected(RejectReason::Complete);
        }

        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return FillOutcome::Rejected(RejectReason::Empty);
        }
        if is_placeholder(trimmed) {
            return FillOutcome::Rejected(RejectReason::Placeholder);
        }
        if self.value_of(field).is_some() {
            return FillOutcome::Rejected(RejectReason::AlreadyFilled);
        }

        self.filled_fields.push((field, trimmed.to_string()));
        self.cursor += 1;
        self.updated_at = Timestamp::now();

        FillOutcome::Accepted {
            next_field: self.current_field(),
        }
    }

    /// Overrides a field value directly (manual form edit), without moving
    /// the cursor.
    pub fn override_value(&mut self, field: FieldKey, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.filled_fields.iter_mut().find(|(k, _)| *k == field) {
            slot.1 = value;
        } else {
            self.filled_fields.push((field, value));
        }
        self.updated_at = Timestamp::now();
    }

    /// Appends a turn to the audit log.
    pub fn append_history(
        &mut self,
        role: HistoryRole,
        text: impl Into<String>,
        field: Option<FieldKey>,
    ) {
        self.history.push(HistoryEntry {
            role,
            text: text.into(),
            field,
            at: Timestamp::now(),
        });
        self.updated_at = Timestamp::now();
    }
}

/// Returns true if the value is a generic assistant self-reference.
fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_VALUES.iter().any(|p| lower == *p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_field_session() -> DialogueSession {
        DialogueSession::new(
            SessionId::new(),
            vec![FieldKey::Department, FieldKey::Headcount],
        )
        .unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn starts_at_cursor_zero() {
            let session = two_field_session();
            assert_eq!(session.cursor(), 0);
            assert_eq!(session.current_field(), Some(FieldKey::Department));
            assert!(!session.is_complete());
        }

        #[test]
        fn rejects_empty_field_list() {
            assert!(DialogueSession::new(SessionId::new(), vec![]).is_err());
        }

        #[test]
        fn rejects_duplicate_fields() {
            let result = DialogueSession::new(
                SessionId::new(),
                vec![FieldKey::Department, FieldKey::Department],
            );
            assert!(result.is_err());
        }
    }

    mod fill {
        use super::*;

        #[test]
        fn accepted_value_advances_cursor() {
            let mut session = two_field_session();
            let outcome = session.fill(FieldKey::Department, "개발팀");
            assert_eq!(
                outcome,
                FillOutcome::Accepted {
                    next_field: Some(FieldKey::Headcount)
                }
            );
            assert_eq!(session.cursor(), 1);
            assert_eq!(session.value_of(FieldKey::Department), Some("개발팀"));
        }

        #[test]
        fn last_fill_completes_the_session() {
            let mut session = two_field_session();
            session.fill(FieldKey::Department, "개발팀");
            let outcome = session.fill(FieldKey::Headcount, "3명");
            assert_eq!(outcome, FillOutcome::Accepted { next_field: None });
            assert!(session.is_complete());
        }

        #[test]
        fn empty_value_is_rejected_without_mutation() {
            let mut session = two_field_session();
            let outcome = session.fill(FieldKey::Department, "   ");
            assert_eq!(outcome, FillOutcome::Rejected(RejectReason::Empty));
            assert_eq!(session.cursor(), 0);
            assert!(session.filled_fields().is_empty());
        }

        #[test]
        fn placeholder_value_is_rejected() {
            let mut session = two_field_session();
            let outcome = session.fill(FieldKey::Department, "AI 어시스턴트");
            assert_eq!(outcome, FillOutcome::Rejected(RejectReason::Placeholder));
            assert_eq!(session.cursor(), 0);
        }

        #[test]
        fn each_key_is_settable_at_most_once() {
            let mut session = DialogueSession::new(
                SessionId::new(),
                vec![FieldKey::Department, FieldKey::Headcount, FieldKey::Salary],
            )
            .unwrap();
            session.fill(FieldKey::Department, "개발팀");
            // Scan hit on an already-filled field must not overwrite it.
            let outcome = session.fill(FieldKey::Department, "영업팀");
            assert_eq!(outcome, FillOutcome::Rejected(RejectReason::AlreadyFilled));
            assert_eq!(session.value_of(FieldKey::Department), Some("개발팀"));
            assert_eq!(session.cursor(), 1);
        }

        #[test]
        fn complete_session_rejects_further_values() {
            let mut session = two_field_session();
            session.fill(FieldKey::Department, "개발팀");
            session.fill(FieldKey::Headcount, "3명");
            let outcome = session.fill(FieldKey::Salary, "4000만원");
            assert_eq!(outcome, FillOutcome::Rejected(RejectReason::Complete));
            assert_eq!(session.cursor(), 2);
        }

        #[test]
        fn scan_hit_on_other_field_still_advances_cursor() {
            let mut session = two_field_session();
            // Cursor targets department, but the utterance named headcount.
            let outcome = session.fill(FieldKey::Headcount, "3명");
            assert_eq!(
                outcome,
                FillOutcome::Accepted {
                    next_field: Some(FieldKey::Headcount)
                }
            );
            assert_eq!(session.value_of(FieldKey::Headcount), Some("3명"));
            assert_eq!(session.cursor(), 1);
        }
    }

    mod history {
        use super::*;

        #[test]
        fn history_is_append_only_in_order() {
            let mut session = two_field_session();
            session.append_history(HistoryRole::User, "개발팀", Some(FieldKey::Department));
            session.append_history(HistoryRole::Assistant, "확인했습니다", Some(FieldKey::Department));
            assert_eq!(session.history().len(), 2);
            assert_eq!(session.history()[0].role, HistoryRole::User);
            assert_eq!(session.history()[1].role, HistoryRole::Assistant);
        }
    }

    mod override_value {
        use super::*;

        #[test]
        fn overrides_existing_value_without_cursor_move() {
            let mut session = two_field_session();
            session.fill(FieldKey::Department, "개발팀");
            session.override_value(FieldKey::Department, "디자인팀");
            assert_eq!(session.value_of(FieldKey::Department), Some("디자인팀"));
            assert_eq!(session.cursor(), 1);
        }

        #[test]
        fn can_set_unfilled_field_without_cursor_move() {
            let mut session = two_field_session();
            session.override_value(FieldKey::Headcount, "5명");
            assert_eq!(session.value_of(FieldKey::Headcount), Some("5명"));
            assert_eq!(session.cursor(), 0);
        }
    }

    mod cursor_monotonicity {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_value() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("개발팀".to_string()),
                Just("3명".to_string()),
                Just("".to_string()),
                Just("AI".to_string()),
                Just("서울".to_string()),
                "[a-z가-힣]{0,12}",
            ]
        }

        proptest! {
            #[test]
            fn cursor_never_decreases_and_never_exceeds_len(
                values in proptest::collection::vec(arbitrary_value(), 0..24),
                field_picks in proptest::collection::vec(0usize..8, 0..24),
            ) {
                let mut session = DialogueSession::new(
                    SessionId::new(),
                    FieldKey::ALL.to_vec(),
                ).unwrap();

                let mut last_cursor = session.cursor();
                for (value, pick) in values.iter().zip(field_picks.iter()) {
                    let field = FieldKey::ALL[*pick % FieldKey::ALL.len()];
                    let _ = session.fill(field, value.clone());
                    prop_assert!(session.cursor() >= last_cursor);
                    prop_assert!(session.cursor() <= session.ordered_fields().len());
                    last_cursor = session.cursor();
                }

                // Each key appears at most once in the fill log.
                let mut seen = std::collections::HashSet::new();
                for (key, _) in session.filled_fields() {
                    prop_assert!(seen.insert(*key));
                }
            }
        }
    }
}
