//! Field identity and per-field static specification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The target fields of a job posting, in canonical collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    #[serde(rename = "department")]
    Department,
    #[serde(rename = "headcount")]
    Headcount,
    #[serde(rename = "mainDuties")]
    MainDuties,
    #[serde(rename = "workHours")]
    WorkHours,
    #[serde(rename = "locationCity")]
    LocationCity,
    #[serde(rename = "salary")]
    Salary,
    #[serde(rename = "deadline")]
    Deadline,
    #[serde(rename = "contactEmail")]
    ContactEmail,
}

impl FieldKey {
    /// All fields in canonical collection order.
    pub const ALL: [FieldKey; 8] = [
        FieldKey::Department,
        FieldKey::Headcount,
        FieldKey::MainDuties,
        FieldKey::WorkHours,
        FieldKey::LocationCity,
        FieldKey::Salary,
        FieldKey::Deadline,
        FieldKey::ContactEmail,
    ];

    /// Returns the wire name used in API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Department => "department",
            FieldKey::Headcount => "headcount",
            FieldKey::MainDuties => "mainDuties",
            FieldKey::WorkHours => "workHours",
            FieldKey::LocationCity => "locationCity",
            FieldKey::Salary => "salary",
            FieldKey::Deadline => "deadline",
            FieldKey::ContactEmail => "contactEmail",
        }
    }

    /// Returns true if answers for this field must contain a digit.
    pub fn extracts_number(&self) -> bool {
        matches!(self, FieldKey::Headcount | FieldKey::Salary)
    }

    /// Canonical unit appended to numeric values for this field.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            FieldKey::Headcount => Some("명"),
            FieldKey::Salary => Some("만원"),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown field key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field key: {0}")]
pub struct UnknownFieldKey(pub String);

impl FromStr for FieldKey {
    type Err = UnknownFieldKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownFieldKey(s.to_string()))
    }
}

/// Static specification of one target field.
///
/// Immutable after process start. `keywords` is the trigger list used for
/// classification, ordered most specific first; `specific_terms` and
/// `generic_terms` are the two extraction tiers for keyword-scan fields.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Unique field id.
    pub key: FieldKey,
    /// Human label shown in prompts (e.g. "구인 부서").
    pub label: &'static str,
    /// Trigger keywords for classification, most specific first.
    pub keywords: &'static [&'static str],
    /// Extraction tier 1: compound/technical terms, returned verbatim.
    pub specific_terms: &'static [&'static str],
    /// Extraction tier 2: broad single terms.
    pub generic_terms: &'static [&'static str],
    /// Suffix appended to a generic-tier match (e.g. "개발" → "개발팀").
    pub generic_suffix: Option<&'static str>,
    /// True if a valid answer must contain a digit.
    pub extracts_number: bool,
    /// Prompt used to elicit this field.
    pub prompt: &'static str,
    /// Example values offered alongside the prompt.
    pub suggestions: &'static [&'static str],
}

impl FieldSpec {
    /// Returns true if any trigger keyword occurs in the lowercased text.
    ///
    /// Latin-script keywords are matched case-insensitively; callers pass
    /// the utterance lowercased once.
    pub fn matches(&self, text_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| text_lower.contains(kw.to_lowercase().as_str()))
    }
}
