//! Dialogue handlers - one per operation on the turn-processing boundary.

mod end_session;
mod field_suggestions;
mod get_session;
mod process_turn;
mod prompts;
mod start_session;
mod update_field;
mod validate_field;

pub use end_session::{EndSessionCommand, EndSessionError, EndSessionHandler, EndSessionResult};
pub use field_suggestions::{FieldSuggestionsHandler, FieldSuggestionsQuery};
pub use get_session::{GetSessionError, GetSessionHandler, GetSessionQuery, SessionView};
pub use process_turn::{
    ProcessTurnCommand, ProcessTurnError, ProcessTurnHandler, ProcessTurnResult,
};
pub use start_session::{StartSessionCommand, StartSessionError, StartSessionHandler, StartSessionResult};
pub use update_field::{UpdateFieldCommand, UpdateFieldError, UpdateFieldHandler};
pub use validate_field::{ValidateFieldHandler, ValidateFieldQuery, ValidationOutcome};
