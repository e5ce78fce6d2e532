//! Per-field value grammars.
//!
//! Each grammar is an ordered rule chain; the first successful rule wins.
//! Numeric fields select the numerically largest digit run so that
//! aggregate phrasings ("신입 2명, 경력 1명, 총 3명") yield the total
//! rather than the first mention.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::catalog::{catalog, FieldKey, FieldSpec};

static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

static TIME_RANGE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}-\d{1,2}:\d{2}").expect("valid regex"));

static TIME_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("valid regex"));

static MORNING_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"오전\s*(\d{1,2})시").expect("valid regex"));

static AFTERNOON_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"오후\s*(\d{1,2})시").expect("valid regex"));

static HOUR_RANGE_KO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})시부터\s*(\d{1,2})시까지").expect("valid regex"));

static HOUR_RANGE_EN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)from\s+(\d{1,2})\s+to\s+(\d{1,2})").expect("valid regex"));

static DEADLINE_LONG_KO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}년\s*\d{1,2}월\s*\d{1,2}일").expect("valid regex"));

static DEADLINE_ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{1,2}-\d{1,2}").expect("valid regex"));

static DEADLINE_SHORT_KO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}월\s*\d{1,2}일").expect("valid regex"));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
});

/// Named work-hour regimes accepted without a clock range.
const HOUR_REGIMES: &[&str] = &["유연근무", "재택근무", "시차출근"];

/// Rolling-hiring deadline tokens.
const ROLLING_DEADLINES: &[&str] = &["상시채용", "상시 채용", "채용시마감", "채용 시 마감"];

/// Spelled-out small numbers accepted when no digit run is present.
const SPELLED_NUMBERS: &[(&str, u64)] = &[
    ("한", 1),
    ("두", 2),
    ("세", 3),
    ("네", 4),
    ("다섯", 5),
    ("여섯", 6),
    ("일곱", 7),
    ("여덟", 8),
    ("아홉", 9),
    ("열", 10),
];

/// Pulls normalized values out of raw utterance text.
///
/// Stateless; per-field behavior is driven by the static field catalog.
#[derive(Debug, Clone, Default)]
pub struct ValueExtractor;

impl ValueExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extracts a normalized value for `field` from `raw`.
    ///
    /// Never fails: when no field-appropriate pattern matches, the trimmed
    /// input is returned unchanged.
    pub fn extract(&self, raw: &str, field: FieldKey) -> String {
        let cleaned = raw.trim();
        let spec = catalog().spec(field);

        let extracted = match field {
            FieldKey::Headcount | FieldKey::Salary => self.extract_numeric(cleaned, field),
            FieldKey::Department | FieldKey::MainDuties => self.extract_tiered(cleaned, spec),
            FieldKey::WorkHours => self.extract_work_hours(cleaned),
            FieldKey::LocationCity => self.extract_place(cleaned, spec),
            FieldKey::Deadline => self.extract_deadline(cleaned),
            FieldKey::ContactEmail => self.extract_email(cleaned),
        };

        extracted.unwrap_or_else(|| cleaned.to_string())
    }

    /// Largest digit run with the field's canonical unit appended; falls
    /// back to the spelled-out small-number vocabulary.
    fn extract_numeric(&self, text: &str, field: FieldKey) -> Option<String> {
        let unit = field.unit().expect("numeric fields carry a unit");

        let max_run = DIGIT_RUNS
            .find_iter(text)
            .filter_map(|m| m.as_str().parse::<u64>().ok())
            .max();
        if let Some(n) = max_run {
            return Some(format!("{}{}", n, unit));
        }

        // "두 명" / "두명" style spelled-out counts.
        let counter = match field {
            FieldKey::Headcount => "명",
            _ => unit,
        };
        for (word, value) in SPELLED_NUMBERS {
            if text.contains(&format!("{} {}", word, counter))
                || text.contains(&format!("{}{}", word, counter))
            {
                return Some(format!("{}{}", value, unit));
            }
        }
        None
    }

    /// Two-tier keyword scan: compound terms first, then broad terms with
    /// the optional canonical suffix. Ties within a tier resolve by catalog
    /// order.
    fn extract_tiered(&self, text: &str, spec: &FieldSpec) -> Option<String> {
        let lower = text.to_lowercase();

        for term in spec.specific_terms {
            if lower.contains(term.to_lowercase().as_str()) {
                return Some((*term).to_string());
            }
        }
        for term in spec.generic_terms {
            if lower.contains(term.to_lowercase().as_str()) {
                return Some(match spec.generic_suffix {
                    Some(suffix) => format!("{}{}", term, suffix),
                    None => (*term).to_string(),
                });
            }
        }
        None
    }

    /// Ordered work-hours rules: explicit range literal, named regime,
    /// morning/afternoon pair, "H시부터 H시까지" / "from H to H" range,
    /// then a bare clock literal.
    fn extract_work_hours(&self, text: &str) -> Option<String> {
        if let Some(m) = TIME_RANGE_LITERAL.find(text) {
            return Some(m.as_str().to_string());
        }

        for regime in HOUR_REGIMES {
            if text.contains(regime) {
                return Some((*regime).to_string());
            }
        }

        if let (Some(morning), Some(afternoon)) =
            (MORNING_HOUR.captures(text), AFTERNOON_HOUR.captures(text))
        {
            let start: u32 = morning[1].parse().ok()?;
            let end: u32 = afternoon[1].parse().ok()?;
            return Some(format!("{:02}:00-{:02}:00", start, to_pm(end)));
        }

        if let Some(caps) = HOUR_RANGE_KO
            .captures(text)
            .or_else(|| HOUR_RANGE_EN.captures(text))
        {
            let start: u32 = caps[1].parse().ok()?;
            let mut end: u32 = caps[2].parse().ok()?;
            // "9시부터 6시까지" means 18:00, not 06:00.
            if end <= start && end < 12 {
                end += 12;
            }
            return Some(format!("{:02}:00-{:02}:00", start, end));
        }

        TIME_LITERAL.find(text).map(|m| m.as_str().to_string())
    }

    /// First place name in the flat catalog list wins; no disambiguation
    /// between overlapping names.
    fn extract_place(&self, text: &str, spec: &FieldSpec) -> Option<String> {
        spec.specific_terms
            .iter()
            .find(|place| text.contains(**place))
            .map(|place| (*place).to_string())
    }

    /// Ordered deadline alternatives: Korean long form, ISO date, Korean
    /// short form, rolling-hiring tokens.
    fn extract_deadline(&self, text: &str) -> Option<String> {
        if let Some(m) = DEADLINE_LONG_KO.find(text) {
            return Some(m.as_str().to_string());
        }
        if let Some(m) = DEADLINE_ISO.find(text) {
            return Some(m.as_str().to_string());
        }
        if let Some(m) = DEADLINE_SHORT_KO.find(text) {
            return Some(m.as_str().to_string());
        }
        ROLLING_DEADLINES
            .iter()
            .find(|token| text.contains(**token))
            .map(|token| token.replace(' ', ""))
    }

    fn extract_email(&self, text: &str) -> Option<String> {
        EMAIL.find(text).map(|m| m.as_str().to_string())
    }
}

/// Normalizes an afternoon hour to 24h form.
fn to_pm(hour: u32) -> u32 {
    if hour < 12 {
        hour + 12
    } else {
        hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str, field: FieldKey) -> String {
        ValueExtractor::new().extract(raw, field)
    }

    mod headcount {
        use super::*;

        #[test]
        fn selects_numeric_max_not_first_occurrence() {
            assert_eq!(
                extract("신입 2명, 경력 1명, 총 3명 채용합니다", FieldKey::Headcount),
                "3명"
            );
            assert_eq!(extract("신입 2명 경력 1명", FieldKey::Headcount), "2명");
        }

        #[test]
        fn appends_unit_to_bare_number() {
            assert_eq!(extract("3", FieldKey::Headcount), "3명");
        }

        #[test]
        fn reads_spelled_out_numbers() {
            assert_eq!(extract("두 명 정도 생각하고 있어요", FieldKey::Headcount), "2명");
            assert_eq!(extract("세명이요", FieldKey::Headcount), "3명");
        }

        #[test]
        fn falls_back_to_trimmed_input() {
            assert_eq!(extract("  아직 미정  ", FieldKey::Headcount), "아직 미정");
        }
    }

    mod salary {
        use super::*;

        #[test]
        fn selects_largest_amount() {
            assert_eq!(
                extract("신입은 3000만원, 경력은 5000만원", FieldKey::Salary),
                "5000만원"
            );
        }

        #[test]
        fn appends_unit() {
            assert_eq!(extract("4000", FieldKey::Salary), "4000만원");
        }

        #[test]
        fn falls_back_without_numbers() {
            assert_eq!(extract("면접 후 협의", FieldKey::Salary), "면접 후 협의");
        }
    }

    mod department {
        use super::*;

        #[test]
        fn team_name_wins_over_broad_term() {
            assert_eq!(extract("개발팀에서 일하게 됩니다", FieldKey::Department), "개발팀");
        }

        #[test]
        fn broad_term_gains_team_suffix() {
            assert_eq!(extract("마케팅 쪽이요", FieldKey::Department), "마케팅팀");
        }

        #[test]
        fn earliest_listed_term_wins_ties() {
            // Both 개발 and 디자인 appear; 개발 is listed first.
            assert_eq!(extract("개발 겸 디자인", FieldKey::Department), "개발팀");
        }

        #[test]
        fn falls_back_verbatim() {
            assert_eq!(extract("총무", FieldKey::Department), "총무");
        }
    }

    mod main_duties {
        use super::*;

        #[test]
        fn specific_compound_beats_generic() {
            assert_eq!(
                extract("웹개발 업무를 담당합니다", FieldKey::MainDuties),
                "웹개발"
            );
            assert_eq!(
                extract("프론트엔드 웹 서비스 개발을 담당", FieldKey::MainDuties),
                "프론트엔드"
            );
        }

        #[test]
        fn generic_term_returned_without_suffix() {
            assert_eq!(extract("운영 업무입니다", FieldKey::MainDuties), "운영");
        }

        #[test]
        fn latin_terms_match_case_insensitively() {
            assert_eq!(extract("ui/ux 전반", FieldKey::MainDuties), "UI/UX");
        }
    }

    mod work_hours {
        use super::*;

        #[test]
        fn explicit_range_literal_wins() {
            assert_eq!(
                extract("근무는 09:00-18:00 입니다", FieldKey::WorkHours),
                "09:00-18:00"
            );
        }

        #[test]
        fn named_regime_short_circuits() {
            assert_eq!(extract("유연근무제로 운영해요", FieldKey::WorkHours), "유연근무");
        }

        #[test]
        fn morning_afternoon_pair_is_reassembled() {
            assert_eq!(
                extract("오전 9시부터 오후 6시까지", FieldKey::WorkHours),
                "09:00-18:00"
            );
        }

        #[test]
        fn hour_range_normalizes_pm() {
            assert_eq!(extract("9시부터 6시까지", FieldKey::WorkHours), "09:00-18:00");
            assert_eq!(extract("from 9 to 6", FieldKey::WorkHours), "09:00-18:00");
        }

        #[test]
        fn ascending_range_is_kept_as_is() {
            assert_eq!(extract("10시부터 19시까지", FieldKey::WorkHours), "10:00-19:00");
        }

        #[test]
        fn falls_back_verbatim() {
            assert_eq!(extract("협의 가능", FieldKey::WorkHours), "협의 가능");
        }
    }

    mod location {
        use super::*;

        #[test]
        fn first_place_name_wins() {
            assert_eq!(extract("서울 강남 사무실입니다", FieldKey::LocationCity), "서울");
        }

        #[test]
        fn district_names_match() {
            assert_eq!(extract("강남역 근처예요", FieldKey::LocationCity), "강남");
        }
    }

    mod deadline {
        use super::*;

        #[test]
        fn korean_long_form_wins() {
            assert_eq!(
                extract("2025년 12월 31일까지 받습니다", FieldKey::Deadline),
                "2025년 12월 31일"
            );
        }

        #[test]
        fn iso_form_matches() {
            assert_eq!(extract("2025-12-31 마감", FieldKey::Deadline), "2025-12-31");
        }

        #[test]
        fn short_form_matches() {
            assert_eq!(extract("12월 31일 마감이에요", FieldKey::Deadline), "12월 31일");
        }

        #[test]
        fn rolling_tokens_match() {
            assert_eq!(extract("상시채용입니다", FieldKey::Deadline), "상시채용");
            assert_eq!(extract("채용 시 마감", FieldKey::Deadline), "채용시마감");
        }
    }

    mod contact_email {
        use super::*;

        #[test]
        fn pulls_email_out_of_sentence() {
            assert_eq!(
                extract("지원은 hr@company.com 으로 보내주세요", FieldKey::ContactEmail),
                "hr@company.com"
            );
        }

        #[test]
        fn falls_back_without_email() {
            assert_eq!(extract("전화로 문의", FieldKey::ContactEmail), "전화로 문의");
        }
    }

    mod totality {
        use super::*;

        #[test]
        fn empty_input_yields_empty_string() {
            for key in FieldKey::ALL {
                assert_eq!(extract("   ", key), "");
            }
        }

        #[test]
        fn extraction_is_deterministic() {
            let input = "개발팀에서 두 명, 연봉 4000만원";
            for key in FieldKey::ALL {
                assert_eq!(extract(input, key), extract(input, key));
            }
        }
    }
}
