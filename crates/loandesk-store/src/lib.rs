//! # loandesk-store
//!
//! In-memory record collections behind every dashboard screen.
//!
//! Each screen owns one [`TabularCollectionController`] over a typed field
//! shape (branches, castes, talukas, ...). The controller keeps the
//! collection unique by id, validates mutations against the screen's
//! required and unique fields, and derives the filtered, sorted and
//! paginated page the presentation layer renders. The derivation itself is
//! the pure [`view::derive_view`] function so it can be tested on its own.

pub mod clock;
pub mod collection;
pub mod config;
pub mod controller;
pub mod fields;
pub mod id;
pub mod mock;
pub mod models;
pub mod record;
pub mod view;

mod error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collection::Collection;
pub use config::{ControllerConfig, ControllerConfigBuilder, IdStrategy};
pub use controller::TabularCollectionController;
pub use error::{ConfigError, ControllerError, NotFoundError, Result, ValidationError};
pub use fields::{FieldValue, Patch, RecordFields};
pub use mock::{MockDataService, Seed};
pub use models::*;
pub use record::Record;
pub use view::{derive_view, PageView, SortSpec, ViewState};
