//! # loandesk-shared
//!
//! Vocabulary shared by the loandesk store and client crates: record
//! identifiers, sort direction, display formatting for the report views,
//! and a handful of constants.

pub mod constants;
pub mod error;
pub mod format;
pub mod types;

pub use error::ParseError;
pub use types::{RecordId, SortOrder};
