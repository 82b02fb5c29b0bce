use thiserror::Error;

use crate::navigation::View;

#[derive(Error, Debug)]
pub enum CuraError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Cannot {action} while on the {from} view")]
    InvalidTransition { from: View, action: &'static str },

    #[error("Action {action} is not available on the current screen")]
    ScreenMismatch { action: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forum post not found: {0}")]
    UnknownPost(String),

    #[error("No {category} with id {id}")]
    UnknownItem { category: &'static str, id: String },

    #[error("AI service error: {0}")]
    AiService(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, CuraError>;
