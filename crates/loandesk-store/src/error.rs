use loandesk_shared::RecordId;
use thiserror::Error;

/// A mutation was rejected because the candidate record is not acceptable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent, blank, or an empty list.
    #[error("{field} is required")]
    MissingField { field: String },

    /// A unique field collides (case-insensitively) with another record.
    #[error("A record with {field} \"{value}\" already exists")]
    Duplicate { field: String, value: String },

    /// A field has the wrong type, an out-of-range value, or is not writable.
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Two records in a seed share the same id.
    #[error("Duplicate record id: {0}")]
    DuplicateId(RecordId),
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The offending field, for inline form errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::Duplicate { field, .. }
            | Self::InvalidField { field, .. } => Some(field),
            Self::DuplicateId(_) => None,
        }
    }
}

/// An operation referenced an id that is not in the collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Record not found: {id}")]
pub struct NotFoundError {
    pub id: RecordId,
}

/// Errors produced by controller mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// Invalid controller or page-size configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Items per page must be at least 1")]
    ZeroItemsPerPage,

    #[error("Items per page too large: {value} (max {max})")]
    ItemsPerPageTooLarge { value: usize, max: usize },

    #[error("Id namespace must be a non-empty word without whitespace: {0:?}")]
    InvalidNamespace(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ControllerError>;
