//! Prompt templates for the generative-answer backend.
//!
//! Retrieved context is inlined between `---` fences; the backend's output
//! is passed through to the user unmodified, so the templates carry the
//! formatting rules.

use crate::domain::catalog::{catalog, FieldKey};

/// Marker the extraction template asks the backend to emit when the
/// conversation holds no usable value.
pub const NO_INFO_MARKER: &str = "관련 정보 없음";

/// Prompt for answering a user question, optionally enriched with
/// retrieved reference snippets.
pub fn question_prompt(field: Option<FieldKey>, utterance: &str, context: &[String]) -> String {
    let field_line = match field {
        Some(field) => {
            let spec = catalog().spec(field);
            format!(
                "현재 채용공고 작성 중입니다. 현재 항목: {} ({})\n",
                spec.label, field
            )
        }
        None => String::new(),
    };

    let context_block = if context.is_empty() {
        String::new()
    } else {
        format!(
            "**참고 정보:**\n아래 정보를 활용하여 답변의 정확성을 높여주세요.\n---\n{}\n---\n",
            context.join("\n")
        )
    };

    format!(
        "당신은 채용 전문 어시스턴트입니다. 채용공고 작성에 도움이 되는 실무적인 답변을 제공해주세요.\n\n{field_line}{context_block}\
         **주의사항:**\n\
         - 모든 답변은 핵심만 간단하게 2~3줄 이내로 작성해주세요\n\
         - 번호가 있는 항목은 각 줄마다 줄바꿈하여 출력해주세요\n\
         - 한국어로 답변해주세요\n\n\
         **사용자 질문:** {utterance}"
    )
}

/// Prompt asking the backend to extract the current field's value from
/// conversational text.
pub fn extraction_prompt(field: FieldKey, utterance: &str) -> String {
    let spec = catalog().spec(field);
    format!(
        "현재 채용공고 작성 중입니다. 현재 항목: {label} ({key})\n\n\
         사용자 입력: {utterance}\n\n\
         이 대화형 입력에서 '{label}'에 대한 정보를 추출해주세요.\n\
         관련 정보가 없다면 \"{marker}\"이라고만 답해주세요.\n\
         추출된 정보만 간단히 답해주세요.",
        label = spec.label,
        key = field,
        marker = NO_INFO_MARKER,
    )
}
