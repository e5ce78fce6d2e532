//! User-facing message composition.
//!
//! All conversational copy lives here so handlers stay free of string
//! assembly. Messages are Korean, matching the audience of the keyword
//! tables.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::catalog::{catalog, FieldKey, FieldSpec};

/// At most this many example values accompany a clarification request.
const MAX_EXAMPLE_VALUES: usize = 3;

static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").expect("valid regex"));

/// Builds the user-facing message and next prompt for each turn outcome.
#[derive(Debug, Clone, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    /// Creates a new composer.
    pub fn new() -> Self {
        Self
    }

    /// Session-opening greeting plus the first field's prompt.
    pub fn greeting(&self, first_field: FieldKey) -> String {
        let spec = catalog().spec(first_field);
        format!(
            "안녕하세요! 채용공고 작성을 도와드리겠습니다. 🤖\n\n먼저 {}에 대해 알려주세요. {}",
            spec.label, spec.prompt
        )
    }

    /// Confirmation of an accepted value, followed by the next field's
    /// prompt or the completion banner.
    pub fn value_accepted(
        &self,
        field: FieldKey,
        value: &str,
        next_field: Option<FieldKey>,
    ) -> String {
        let spec = catalog().spec(field);
        let mut message = format!("'{}'에 대해 '{}'로 입력하겠습니다.", spec.label, value);
        match next_field {
            Some(next) => {
                let next_spec = catalog().spec(next);
                message.push_str(&format!(" {}", next_spec.prompt));
            }
            None => message.push_str("\n\n🎉 모든 정보 입력이 완료되었습니다!"),
        }
        message
    }

    /// Confirmation of a value recovered from conversational text.
    pub fn conversational_extracted(&self, field: FieldKey, value: &str) -> String {
        let spec = catalog().spec(field);
        format!(
            "대화 내용에서 '{}' 정보를 확인했습니다: {}",
            spec.label, value
        )
    }

    /// Invitation to the next field, or the completion banner.
    pub fn follow_up(&self, next_field: Option<FieldKey>) -> String {
        match next_field {
            Some(next) => {
                let spec = catalog().spec(next);
                format!(
                    "\n\n다음으로 {}에 대해 알려주세요. {}",
                    spec.label, spec.prompt
                )
            }
            None => "\n\n🎉 모든 정보 입력이 완료되었습니다!".to_string(),
        }
    }

    /// Re-prompt when conversational extraction found nothing relevant.
    pub fn conversational_no_info(&self, field: FieldKey) -> String {
        let spec = catalog().spec(field);
        format!(
            "대화 내용을 확인했습니다. 현재 {}에 대한 정보를 입력해주세요.",
            spec.label
        )
    }

    /// Clarification request with up to three example values.
    pub fn clarification(&self, field: FieldKey, utterance: &str) -> String {
        let spec = catalog().spec(field);
        let examples = spec
            .suggestions
            .iter()
            .take(MAX_EXAMPLE_VALUES)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "죄송합니다. '{}'이(가) 무엇을 의미하는지 명확하지 않습니다. 현재 {}에 대해 다시 말씀해주세요. 예시: {}",
            utterance, spec.label, examples
        )
    }

    /// Small-talk acknowledgement plus a reminder of the current field.
    pub fn chat_acknowledgement(&self, field: FieldKey) -> String {
        let spec = catalog().spec(field);
        format!(
            "안녕하세요! 채용공고 작성을 도와드리고 있습니다. 현재 {}에 대한 정보를 입력해주세요.",
            spec.label
        )
    }

    /// Static apology when a collaborator call fails; still names the field
    /// being collected so the user can simply retry.
    pub fn backend_apology(&self, field: Option<FieldKey>) -> String {
        match field {
            Some(field) => {
                let spec = catalog().spec(field);
                format!(
                    "AI 응답을 가져오는 데 실패했습니다. 다시 시도해 주세요. 현재 {}에 대한 정보를 입력해주시면 됩니다.",
                    spec.label
                )
            }
            None => "AI 응답을 가져오는 데 실패했습니다. 다시 시도해 주세요.".to_string(),
        }
    }

    /// Banner for turns arriving after every field is collected.
    pub fn already_complete(&self) -> String {
        "모든 정보를 입력받았습니다! 완료 버튼을 눌러주세요. 🎉".to_string()
    }

    /// Splits a generative answer into selectable items.
    ///
    /// Numbered lines ("1. …") start new items; bullet lines and
    /// continuation lines attach to the current item. A response without
    /// any structure becomes a single item.
    pub fn split_items(&self, answer: &str) -> Vec<String> {
        let mut items: Vec<String> = Vec::new();
        let mut current = String::new();

        for line in answer.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if NUMBERED_ITEM.is_match(line) {
                if !current.is_empty() {
                    items.push(current.trim().to_string());
                }
                current = strip_list_marker(line);
            } else if !current.is_empty() {
                current.push(' ');
                current.push_str(&strip_list_marker(line));
            } else {
                current = strip_list_marker(line);
            }
        }
        if !current.is_empty() {
            items.push(current.trim().to_string());
        }

        if items.is_empty() && !answer.trim().is_empty() {
            items.push(answer.trim().to_string());
        }
        items
    }

    /// Example values offered alongside a prompt.
    pub fn suggestions_for(&self, field: FieldKey) -> Vec<String> {
        let spec: &FieldSpec = catalog().spec(field);
        spec.suggestions.iter().map(|s| s.to_string()).collect()
    }
}

/// Removes a leading "1." / "-" / "•" / "*" marker.
fn strip_list_marker(line: &str) -> String {
    let without_number = NUMBERED_ITEM.replace(line, "");
    without_number
        .trim_start_matches(['-', '•', '*'])
        .trim()
        .to_string()
}
