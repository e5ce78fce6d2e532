//! Static field catalog.
//!
//! Pure data with no runtime mutation: the eight job-posting fields, their
//! trigger keyword tables, elicitation prompts, example values, and the
//! shared marker tables (question indicators, uncertainty markers, small
//! talk). The catalog is fully constructed before the first classification;
//! an incomplete registry is a construction-time error, not a silent
//! fallback.

mod field;
mod keywords;

pub use field::{FieldKey, FieldSpec, UnknownFieldKey};
pub use keywords::{
    catalog, contains_question_indicator, contains_uncertainty_marker, is_small_talk,
    CatalogError, FieldCatalog,
};
