//! ValidateField query handler - direct value validation for form edits.

use crate::domain::catalog::FieldKey;

/// Query to validate a candidate field value.
#[derive(Debug, Clone)]
pub struct ValidateFieldQuery {
    pub field: FieldKey,
    pub value: String,
}

/// Validation verdict with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: String,
}

/// Handler applying the same per-field format rules the classifier's
/// validity gate uses.
#[derive(Debug, Clone, Default)]
pub struct ValidateFieldHandler;

impl ValidateFieldHandler {
    /// Creates a new handler.
    pub fn new() -> Self {
        Self
    }

    /// Validates the value for the field.
    pub fn handle(&self, query: ValidateFieldQuery) -> ValidationOutcome {
        let value = query.value.trim();

        if value.is_empty() {
            return ValidationOutcome {
                valid: false,
                message: "값을 입력해주세요.".to_string(),
            };
        }

        if query.field == FieldKey::ContactEmail && !value.contains('@') {
            return ValidationOutcome {
                valid: false,
                message: "올바른 이메일 형식을 입력해주세요.".to_string(),
            };
        }

        if query.field.extracts_number() && !value.chars().any(|c| c.is_ascii_digit()) {
            return ValidationOutcome {
                valid: false,
                message: "숫자를 포함해 입력해주세요.".to_string(),
            };
        }

        ValidationOutcome {
            valid: true,
            message: "올바른 형식입니다.".to_string(),
        }
    }
}
