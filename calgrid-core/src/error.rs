//! Error types for calgrid.

use thiserror::Error;

use crate::event::Event;

/// Rejections from `EventStore::add_event`.
///
/// All of these come from user input and are expected: the caller shows them
/// and lets the user correct the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    MalformedTime(String),

    #[error("End time must be after start time")]
    InvalidRange,

    #[error("This event overlaps with '{}' ({})", .0.name(), .0.time_range())]
    OverlapConflict(Event),
}

/// Errors that can occur in calgrid operations.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not persist events: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalGridError {
    /// The validation rejection, if this error is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            CalGridError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
