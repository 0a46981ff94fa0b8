use thiserror::Error;

/// Errors raised when parsing shared vocabulary from user or environment input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid sort order: {0} (expected \"asc\" or \"desc\")")]
    SortOrder(String),

    #[error("Invalid record id: {0}")]
    RecordId(String),

    #[error("Invalid value for {name}: {value}")]
    Value { name: &'static str, value: String },
}
