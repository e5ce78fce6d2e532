//! FieldSuggestions query handler - example values per field.

use crate::domain::catalog::FieldKey;
use crate::domain::dialogue::ResponseComposer;

/// Query for a field's example values.
#[derive(Debug, Clone)]
pub struct FieldSuggestionsQuery {
    pub field: FieldKey,
}

/// Handler returning example values from the static catalog.
#[derive(Debug, Clone, Default)]
pub struct FieldSuggestionsHandler {
    composer: ResponseComposer,
}

impl FieldSuggestionsHandler {
    /// Creates a new handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the example values for the field.
    pub fn handle(&self, query: FieldSuggestionsQuery) -> Vec<String> {
        self.composer.suggestions_for(query.field)
    }
}
