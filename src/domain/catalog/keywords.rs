//! Keyword tables and catalog construction.
//!
//! The trigger tables target Korean utterances with the Latin-script terms
//! that commonly appear in them (email, hr, UI/UX). Order matters: scans
//! stop at the first hit, so compound terms are listed before the broad
//! terms they contain.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use thiserror::Error;

use super::field::{FieldKey, FieldSpec};

/// Interrogative markers, question endings, and request-for-recommendation
/// phrases. A hit on any of these (or a trailing `?`) classifies the
/// utterance as a question before any field matching runs.
const QUESTION_INDICATORS: &[&str] = &[
    // Interrogatives
    "어떻게", "왜", "무엇", "뭐", "언제", "어디", "어느", "어떤", "무슨",
    // Question endings
    "있을까", "있나요", "인가요", "일까", "될까", "할까", "어때", "어떠",
    "어떤가요", "좋을까요", "될까요", "할까요",
    // Quantity questions
    "몇 명", "몇명", "얼마나", "어느 정도",
    // Recommendation / suggestion requests
    "추천", "제안", "추천해", "제안해", "추천해줘", "추천해주세요",
    // Information requests
    "알려줘", "알려주세요", "보여줘", "보여주세요", "설명해줘", "궁금",
];

/// Hedging and uncertainty markers that veto an otherwise-matching answer.
const UNCERTAINTY_MARKERS: &[&str] = &["모르겠", "잘 모르", "몰라", "궁금", "어떻게", "왜", "뭐"];

/// Greeting and acknowledgement tokens for the small-talk bucket.
const SMALL_TALK_TOKENS: &[&str] = &[
    "안녕", "반가워", "고마워", "감사", "좋아요", "그래", "응", "네", "넵", "아니",
];

/// Small talk only applies to short utterances; longer text with a greeting
/// embedded is still a candidate answer.
const SMALL_TALK_MAX_CHARS: usize = 12;

/// Returns true if the text contains a question indicator or ends with `?`.
pub fn contains_question_indicator(text: &str) -> bool {
    let lower = text.to_lowercase();
    let trimmed = text.trim();
    trimmed.ends_with('?') || QUESTION_INDICATORS.iter().any(|ind| lower.contains(ind))
}

/// Returns true if the text contains a hedging/uncertainty marker.
pub fn contains_uncertainty_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    UNCERTAINTY_MARKERS.iter().any(|m| lower.contains(m))
}

/// Returns true if a short utterance reads as a greeting or acknowledgement.
pub fn is_small_talk(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() <= SMALL_TALK_MAX_CHARS
        && SMALL_TALK_TOKENS.iter().any(|t| trimmed.contains(t))
}

// ─────────────────────────────────────────────────────────────────────────
// Per-field tables
// ─────────────────────────────────────────────────────────────────────────

const DEPARTMENT_KEYWORDS: &[&str] = &[
    "개발팀", "마케팅팀", "영업팀", "디자인팀", "기획팀", "인사팀",
    "개발자", "마케터", "영업사원", "디자이너", "기획자", "인사담당자",
    "프로그래머", "UX디자이너", "UI디자이너", "그래픽디자이너",
    "개발", "마케팅", "영업", "디자인", "기획", "인사",
];
const DEPARTMENT_SPECIFIC: &[&str] = &["개발팀", "마케팅팀", "영업팀", "디자인팀", "기획팀", "인사팀"];
const DEPARTMENT_GENERIC: &[&str] = &["개발", "마케팅", "영업", "디자인", "기획", "인사"];

const HEADCOUNT_KEYWORDS: &[&str] = &[
    "명", "인원", "사람",
    "1명", "2명", "3명", "4명", "5명", "6명", "7명", "8명", "9명", "10명",
    "한 명", "두 명", "세 명", "네 명", "다섯 명",
    "여섯 명", "일곱 명", "여덟 명", "아홉 명", "열 명",
];

const MAIN_DUTIES_KEYWORDS: &[&str] = &[
    "웹개발", "앱개발", "모바일개발", "서버개발", "프론트엔드", "백엔드", "풀스택",
    "UI/UX", "UI디자인", "UX디자인", "그래픽디자인", "편집디자인", "패키지디자인",
    "브랜드마케팅", "디지털마케팅", "콘텐츠마케팅", "SNS마케팅", "퍼포먼스마케팅",
    "데이터분석", "AI개발", "프로그래밍", "코딩", "브랜딩",
    "광고", "홍보", "콘텐츠", "고객관리", "매출관리", "전략기획", "사업기획", "제품기획",
    "개발", "디자인", "마케팅", "영업", "기획", "관리", "운영", "분석", "설계", "테스트", "유지보수",
];
const MAIN_DUTIES_SPECIFIC: &[&str] = &[
    "웹개발", "앱개발", "모바일개발", "서버개발", "프론트엔드", "백엔드", "풀스택",
    "UI/UX", "UI디자인", "UX디자인", "그래픽디자인", "편집디자인", "패키지디자인",
    "브랜드마케팅", "디지털마케팅", "콘텐츠마케팅", "SNS마케팅", "퍼포먼스마케팅",
    "데이터분석", "AI개발", "프로그래밍", "코딩",
];
const MAIN_DUTIES_GENERIC: &[&str] = &[
    "개발", "디자인", "마케팅", "영업", "기획", "관리", "운영", "분석", "설계", "테스트", "유지보수",
];

const WORK_HOURS_KEYWORDS: &[&str] = &[
    "09:00", "10:00", "18:00", "19:00", "유연근무", "재택근무", "시차출근",
    "오전", "오후", "아침", "저녁", "평일", "주말", "주중",
    "시", "분", "시간",
];

const LOCATION_KEYWORDS: &[&str] = &[
    "서울", "부산", "대구", "인천", "대전", "광주", "울산", "세종",
    "경기", "강원", "충북", "충남", "전북", "전남", "경북", "경남", "제주",
    "강남", "강북", "서초", "송파", "마포", "용산", "영등포", "동대문", "중구",
];

const SALARY_KEYWORDS: &[&str] = &[
    "만원", "연봉", "월급", "급여", "보수", "임금", "협의", "원",
    "3000", "4000", "5000", "6000", "7000", "8000", "9000", "10000",
];

const DEADLINE_KEYWORDS: &[&str] = &[
    "상시채용", "채용시마감", "마감일", "마감", "지원", "채용",
    "년", "월", "일", "2025", "2026",
];

const CONTACT_EMAIL_KEYWORDS: &[&str] = &[
    "@", "이메일", "email", "메일", "mail", "hr", "recruit", "인사", "채용",
];

/// The static field specifications, in canonical collection order.
const SPECS: &[FieldSpec] = &[
    FieldSpec {
        key: FieldKey::Department,
        label: "구인 부서",
        keywords: DEPARTMENT_KEYWORDS,
        specific_terms: DEPARTMENT_SPECIFIC,
        generic_terms: DEPARTMENT_GENERIC,
        generic_suffix: Some("팀"),
        extracts_number: false,
        prompt: "구인 부서를 알려주세요.",
        suggestions: &["개발팀", "마케팅팀", "영업팀", "디자인팀", "기획팀", "인사팀"],
    },
    FieldSpec {
        key: FieldKey::Headcount,
        label: "채용 인원",
        keywords: HEADCOUNT_KEYWORDS,
        specific_terms: &[],
        generic_terms: &[],
        generic_suffix: None,
        extracts_number: true,
        prompt: "채용 인원은 몇 명인가요?",
        suggestions: &["1명", "2명", "3명", "5명", "10명"],
    },
    FieldSpec {
        key: FieldKey::MainDuties,
        label: "업무 내용",
        keywords: MAIN_DUTIES_KEYWORDS,
        specific_terms: MAIN_DUTIES_SPECIFIC,
        generic_terms: MAIN_DUTIES_GENERIC,
        generic_suffix: None,
        extracts_number: false,
        prompt: "어떤 업무를 담당하게 되나요?",
        suggestions: &["웹개발", "앱개발", "UI/UX 디자인", "브랜드마케팅", "데이터분석"],
    },
    FieldSpec {
        key: FieldKey::WorkHours,
        label: "근무 시간",
        keywords: WORK_HOURS_KEYWORDS,
        specific_terms: &[],
        generic_terms: &[],
        generic_suffix: None,
        extracts_number: false,
        prompt: "근무 시간은 어떻게 되나요?",
        suggestions: &["09:00-18:00", "10:00-19:00", "유연근무제", "시차출근제"],
    },
    FieldSpec {
        key: FieldKey::LocationCity,
        label: "근무 위치",
        keywords: LOCATION_KEYWORDS,
        specific_terms: LOCATION_KEYWORDS,
        generic_terms: &[],
        generic_suffix: None,
        extracts_number: false,
        prompt: "근무 위치는 어디인가요?",
        suggestions: &["서울", "부산", "대구", "인천", "대전"],
    },
    FieldSpec {
        key: FieldKey::Salary,
        label: "급여 조건",
        keywords: SALARY_KEYWORDS,
        specific_terms: &[],
        generic_terms: &[],
        generic_suffix: None,
        extracts_number: true,
        prompt: "급여 조건은 어떻게 되나요?",
        suggestions: &["면접 후 협의", "3000만원", "4000만원", "5000만원"],
    },
    FieldSpec {
        key: FieldKey::Deadline,
        label: "마감일",
        keywords: DEADLINE_KEYWORDS,
        specific_terms: &[],
        generic_terms: &[],
        generic_suffix: None,
        extracts_number: false,
        prompt: "마감일은 언제인가요?",
        suggestions: &["2025-12-31", "상시채용", "채용시마감"],
    },
    FieldSpec {
        key: FieldKey::ContactEmail,
        label: "연락처 이메일",
        keywords: CONTACT_EMAIL_KEYWORDS,
        specific_terms: &[],
        generic_terms: &[],
        generic_suffix: None,
        extracts_number: false,
        prompt: "연락처 이메일을 알려주세요.",
        suggestions: &["hr@company.com", "recruit@company.com"],
    },
];

/// Errors detected while validating the static catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Field '{0}' is missing from the catalog")]
    MissingField(FieldKey),

    #[error("Field '{0}' appears more than once in the catalog")]
    DuplicateField(FieldKey),

    #[error("Field '{0}' has an empty keyword table")]
    EmptyKeywords(FieldKey),

    #[error("Numeric field '{0}' has no canonical unit")]
    MissingUnit(FieldKey),
}

/// Validated, immutable catalog of all field specifications.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    specs: &'static [FieldSpec],
}

impl FieldCatalog {
    /// Builds and validates the catalog.
    ///
    /// Every [`FieldKey`] must appear exactly once with a non-empty keyword
    /// table, and numeric fields must carry a unit. An unknown or missing
    /// field is a construction-time error.
    pub fn build() -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for spec in SPECS {
            if !seen.insert(spec.key) {
                return Err(CatalogError::DuplicateField(spec.key));
            }
            if spec.keywords.is_empty() {
                return Err(CatalogError::EmptyKeywords(spec.key));
            }
            if spec.extracts_number && spec.key.unit().is_none() {
                return Err(CatalogError::MissingUnit(spec.key));
            }
        }
        for key in FieldKey::ALL {
            if !seen.contains(&key) {
                return Err(CatalogError::MissingField(key));
            }
        }
        Ok(Self { specs: SPECS })
    }

    /// Returns the spec for a field.
    pub fn spec(&self, key: FieldKey) -> &FieldSpec {
        // Safe: build() guarantees every key is present.
        self.specs
            .iter()
            .find(|s| s.key == key)
            .expect("catalog validated at construction")
    }

    /// Returns the trigger keywords for a field.
    pub fn keywords_for(&self, key: FieldKey) -> &'static [&'static str] {
        self.spec(key).keywords
    }

    /// All specs in canonical collection order.
    pub fn specs(&self) -> &'static [FieldSpec] {
        self.specs
    }
}

/// Process-wide catalog, constructed on first use and immutable thereafter.
pub fn catalog() -> &'static FieldCatalog {
    static CATALOG: Lazy<FieldCatalog> = Lazy::new(|| {
        FieldCatalog::build().expect("static field catalog must be complete")
    });
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn catalog_builds_successfully() {
            assert!(FieldCatalog::build().is_ok());
        }

        #[test]
        fn every_field_has_a_spec() {
            let cat = catalog();
            for key in FieldKey::ALL {
                assert_eq!(cat.spec(key).key, key);
            }
        }

        #[test]
        fn keyword_tables_are_non_empty() {
            for spec in catalog().specs() {
                assert!(!spec.keywords.is_empty(), "{} has no keywords", spec.key);
            }
        }

        #[test]
        fn every_field_has_prompt_and_suggestions() {
            for spec in catalog().specs() {
                assert!(!spec.prompt.is_empty());
                assert!(!spec.suggestions.is_empty());
            }
        }

        #[test]
        fn specific_terms_precede_generic_terms_in_triggers() {
            // Compound terms must win ties, so they are listed first.
            let duties = catalog().spec(FieldKey::MainDuties);
            let pos_specific = duties
                .keywords
                .iter()
                .position(|k| *k == "웹개발")
                .unwrap();
            let pos_generic = duties.keywords.iter().position(|k| *k == "개발").unwrap();
            assert!(pos_specific < pos_generic);
        }
    }

    mod question_indicators {
        use super::*;

        #[test]
        fn detects_interrogative() {
            assert!(contains_question_indicator("채용 인원은 어떻게 정하나요"));
        }

        #[test]
        fn detects_trailing_question_mark() {
            assert!(contains_question_indicator("3명 정도면 충분?"));
        }

        #[test]
        fn detects_recommendation_request() {
            assert!(contains_question_indicator("업무 내용 추천해주세요"));
        }

        #[test]
        fn plain_answer_is_not_a_question() {
            assert!(!contains_question_indicator("개발팀입니다"));
        }
    }

    mod uncertainty_markers {
        use super::*;

        #[test]
        fn detects_hedging() {
            assert!(contains_uncertainty_marker("잘 모르겠어요"));
        }

        #[test]
        fn clean_answer_has_no_marker() {
            assert!(!contains_uncertainty_marker("개발팀 2명 채용합니다"));
        }
    }

    mod small_talk {
        use super::*;

        #[test]
        fn greeting_is_small_talk() {
            assert!(is_small_talk("안녕하세요"));
        }

        #[test]
        fn thanks_is_small_talk() {
            assert!(is_small_talk("감사합니다"));
        }

        #[test]
        fn long_text_with_greeting_is_not_small_talk() {
            assert!(!is_small_talk("안녕하세요 개발팀에서 백엔드 개발자 두 명을 채용하려고 합니다"));
        }
    }
}
