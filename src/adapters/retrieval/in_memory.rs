//! In-memory reference snippet retrieval.
//!
//! Ranks a fixed set of recruitment-practice snippets against the query by
//! cosine similarity of term-frequency vectors. The embedding backend is
//! outside this system's boundary; the ranking rule, top-k cut, and
//! degrade-to-empty behavior match what the prompt builder expects from a
//! real retrieval service.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::ports::{ContextRetriever, RetrievalError};

/// Default reference snippets offered to the prompt builder.
const DEFAULT_SNIPPETS: &[&str] = &[
    "채용공고의 주요 업무는 지원자가 직무를 이해할 수 있도록 구체적인 동사(개발, 분석, 관리 등)로 서술하는 것이 좋습니다.",
    "채용 인원은 현재 업무량과 향후 계획을 고려해 결정하고, 초기에는 소수로 시작해 필요 시 추가 채용을 검토하는 방식이 일반적입니다.",
    "급여 조건은 면접 후 협의로 표기할 수 있으나, 범위를 명시하면 지원율이 높아지는 경향이 있습니다.",
    "근무 시간은 09:00-18:00 고정 근무 외에 유연근무제, 시차출근제 등 운영 방식을 함께 안내하면 좋습니다.",
    "마감일은 특정 일자 외에 상시채용, 채용시마감 형태로도 표기할 수 있습니다.",
    "연락처 이메일은 채용 담당 부서의 공용 메일(hr@, recruit@)을 사용하는 것이 일반적입니다.",
];

type TermVector = HashMap<String, f32>;

/// Cosine-similarity snippet ranker over a fixed corpus.
#[derive(Debug, Clone)]
pub struct InMemoryRetriever {
    snippets: Vec<(String, TermVector)>,
}

impl Default for InMemoryRetriever {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRetriever {
    /// Creates a retriever over the default recruitment snippets.
    pub fn new() -> Self {
        Self::with_snippets(DEFAULT_SNIPPETS.iter().map(|s| s.to_string()).collect())
    }

    /// Creates a retriever over a custom snippet corpus.
    pub fn with_snippets(snippets: Vec<String>) -> Self {
        let snippets = snippets
            .into_iter()
            .map(|text| {
                let vector = term_vector(&text);
                (text, vector)
            })
            .collect();
        Self { snippets }
    }
}

#[async_trait]
impl ContextRetriever for InMemoryRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        let query_vector = term_vector(query);
        if query_vector.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f32, &String)> = self
            .snippets
            .iter()
            .map(|(text, vector)| (cosine(&query_vector, vector), text))
            .filter(|(score, _)| *score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored.into_iter().take(k).map(|(_, text)| text.clone()).collect())
    }
}

/// Whitespace-tokenized term-frequency vector, punctuation stripped.
fn term_vector(text: &str) -> TermVector {
    let mut vector = TermVector::new();
    for token in text.split_whitespace() {
        let token: String = token
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '@')
            .collect();
        if !token.is_empty() {
            *vector.entry(token).or_insert(0.0) += 1.0;
        }
    }
    vector
}

fn cosine(a: &TermVector, b: &TermVector) -> f32 {
    let dot: f32 = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
        .sum();
    if dot == 0.0 {
        return 0.0;
    }
    let norm_a: f32 = a.values().map(|w| w * w).sum::<f32>().sqrt();
    let norm_b: f32 = b.values().map(|w| w * w).sum::<f32>().sqrt();
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ranks_overlapping_snippet_first() {
        let retriever = InMemoryRetriever::with_snippets(vec![
            "급여 조건은 면접 후 협의가 일반적입니다".to_string(),
            "근무 시간은 자유롭게 정할 수 있습니다".to_string(),
        ]);
        let results = retriever.retrieve("급여 조건 어떻게 정하나요", 2).await.unwrap();
        assert!(!results.is_empty());
        assert!(results[0].contains("급여"));
    }

    #[tokio::test]
    async fn no_overlap_yields_empty_result() {
        let retriever = InMemoryRetriever::new();
        let results = retriever.retrieve("weather forecast tomorrow", 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn respects_k() {
        let retriever = InMemoryRetriever::with_snippets(vec![
            "채용 인원 결정 기준".to_string(),
            "채용 인원 산정 방법".to_string(),
            "채용 인원과 팀 규모".to_string(),
        ]);
        let results = retriever.retrieve("채용 인원", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn empty_query_is_valid_and_empty() {
        let retriever = InMemoryRetriever::new();
        assert!(retriever.retrieve("", 3).await.unwrap().is_empty());
    }
}
