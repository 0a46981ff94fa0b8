//! JSON command surface for the presentation layer.
//!
//! A [`Command`] names a screen and an operation; [`dispatch`] routes it to
//! the handler module for its domain and returns the JSON the UI renders.
//! Errors come back as a serializable [`CommandError`].

pub mod forms;
pub mod records;
pub mod reports;
pub mod view;

use loandesk_shared::{ParseError, RecordId, SortOrder};
use loandesk_store::{ConfigError, ControllerError, NotFoundError, Patch, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::reports::{ReportError, ReportRequest};
use crate::screen::ScreenError;
use crate::screens::ScreenKind;
use crate::state::Dashboard;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    List { screen: ScreenKind },
    Search { screen: ScreenKind, query: String },
    /// Without `order` the direction toggles when `key` is already sorted.
    Sort {
        screen: ScreenKind,
        key: String,
        #[serde(default)]
        order: Option<SortOrder>,
    },
    ClearSort { screen: ScreenKind },
    SetPage { screen: ScreenKind, page: usize },
    NextPage { screen: ScreenKind },
    PreviousPage { screen: ScreenKind },
    SetItemsPerPage { screen: ScreenKind, size: usize },

    Create { screen: ScreenKind, fields: Value },
    Update { screen: ScreenKind, id: RecordId, patch: Patch },
    Delete { screen: ScreenKind, id: RecordId },
    Toggle { screen: ScreenKind, id: RecordId, field: String },

    OpenAdd { screen: ScreenKind },
    OpenEdit { screen: ScreenKind, id: RecordId },
    EditDraft { screen: ScreenKind, patch: Patch },
    Submit { screen: ScreenKind },
    RequestDelete { screen: ScreenKind, id: RecordId },
    ConfirmDelete { screen: ScreenKind },
    CloseModal { screen: ScreenKind },

    Report { report: ReportRequest },
    DrainNotices,
}

/// Error payload returned to the presentation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommandError {
    #[error("{message}")]
    Validation {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },

    #[error("{message}")]
    NotFound { message: String, id: RecordId },

    #[error("{message}")]
    BadRequest { message: String },
}

impl CommandError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(e: ValidationError) -> Self {
        Self::Validation {
            message: e.to_string(),
            field: e.field().map(str::to_string),
        }
    }
}

impl From<NotFoundError> for CommandError {
    fn from(e: NotFoundError) -> Self {
        Self::NotFound {
            message: e.to_string(),
            id: e.id,
        }
    }
}

impl From<ControllerError> for CommandError {
    fn from(e: ControllerError) -> Self {
        match e {
            ControllerError::Validation(e) => e.into(),
            ControllerError::NotFound(e) => e.into(),
        }
    }
}

impl From<ConfigError> for CommandError {
    fn from(e: ConfigError) -> Self {
        Self::Validation {
            message: e.to_string(),
            field: Some("itemsPerPage".to_string()),
        }
    }
}

impl From<ScreenError> for CommandError {
    fn from(e: ScreenError) -> Self {
        match e {
            ScreenError::Controller(e) => e.into(),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl From<ReportError> for CommandError {
    fn from(e: ReportError) -> Self {
        Self::Validation {
            message: e.to_string(),
            field: Some("period".to_string()),
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(e: ParseError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        Self::bad_request(e.to_string())
    }
}

/// One line of bridge output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl Response {
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: CommandError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

impl From<Result<Value, CommandError>> for Response {
    fn from(result: Result<Value, CommandError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e),
        }
    }
}

pub fn dispatch(dashboard: &mut Dashboard, command: Command) -> Result<Value, CommandError> {
    debug!(?command, "Dispatching command");
    match command {
        Command::List { screen } => view::list(dashboard, screen),
        Command::Search { screen, query } => view::search(dashboard, screen, &query),
        Command::Sort { screen, key, order } => view::sort(dashboard, screen, &key, order),
        Command::ClearSort { screen } => view::clear_sort(dashboard, screen),
        Command::SetPage { screen, page } => view::set_page(dashboard, screen, page),
        Command::NextPage { screen } => view::next_page(dashboard, screen),
        Command::PreviousPage { screen } => view::previous_page(dashboard, screen),
        Command::SetItemsPerPage { screen, size } => {
            view::set_items_per_page(dashboard, screen, size)
        }

        Command::Create { screen, fields } => records::create(dashboard, screen, fields),
        Command::Update { screen, id, patch } => records::update(dashboard, screen, &id, &patch),
        Command::Delete { screen, id } => records::delete(dashboard, screen, &id),
        Command::Toggle { screen, id, field } => records::toggle(dashboard, screen, &id, &field),

        Command::OpenAdd { screen } => forms::open_add(dashboard, screen),
        Command::OpenEdit { screen, id } => forms::open_edit(dashboard, screen, &id),
        Command::EditDraft { screen, patch } => forms::edit_draft(dashboard, screen, &patch),
        Command::Submit { screen } => forms::submit(dashboard, screen),
        Command::RequestDelete { screen, id } => forms::request_delete(dashboard, screen, &id),
        Command::ConfirmDelete { screen } => forms::confirm_delete(dashboard, screen),
        Command::CloseModal { screen } => forms::close_modal(dashboard, screen),

        Command::Report { report } => reports::report(dashboard, &report),
        Command::DrainNotices => reports::drain_notices(dashboard),
    }
}

/// Parse one bridge line and run it. Malformed input becomes a `badRequest`
/// response rather than an error, so the bridge loop keeps going.
pub fn handle_line(dashboard: &mut Dashboard, line: &str) -> Response {
    let command = match serde_json::from_str::<Command>(line) {
        Ok(command) => command,
        Err(e) => {
            warn!(error = %e, "Malformed command");
            return Response::failure(e.into());
        }
    };
    dispatch(dashboard, command).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use loandesk_store::MockDataService;
    use serde_json::json;

    fn dashboard() -> Dashboard {
        Dashboard::mount(&DashboardConfig::default(), &MockDataService::new()).unwrap()
    }

    #[test]
    fn test_command_wire_format() {
        let cmd: Command = serde_json::from_value(json!({
            "action": "sort", "screen": "talukas", "key": "name"
        }))
        .unwrap();
        assert_eq!(
            cmd,
            Command::Sort {
                screen: ScreenKind::Talukas,
                key: "name".into(),
                order: None,
            }
        );

        let cmd: Command = serde_json::from_value(json!({
            "action": "setItemsPerPage", "screen": "action-codes", "size": 5
        }))
        .unwrap();
        assert_eq!(
            cmd,
            Command::SetItemsPerPage {
                screen: ScreenKind::ActionCodes,
                size: 5,
            }
        );

        let cmd: Command = serde_json::from_str(r#"{"action":"drainNotices"}"#).unwrap();
        assert_eq!(cmd, Command::DrainNotices);
    }

    #[test]
    fn test_error_wire_format() {
        let err = CommandError::from(ValidationError::missing("name"));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"kind": "validation", "message": "name is required", "field": "name"})
        );

        let err = CommandError::from(NotFoundError {
            id: RecordId::from("caste-0099"),
        });
        assert_eq!(serde_json::to_value(&err).unwrap()["kind"], "notFound");

        let err = CommandError::bad_request("nope");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"kind": "badRequest", "message": "nope"})
        );
    }

    #[test]
    fn test_handle_line_malformed() {
        let mut dashboard = dashboard();
        for line in ["not json", r#"{"action":"fly"}"#, r#"{"action":"list","screen":"nowhere"}"#] {
            let response = handle_line(&mut dashboard, line);
            assert!(!response.ok);
            assert!(matches!(response.error, Some(CommandError::BadRequest { .. })));
        }
    }

    #[test]
    fn test_handle_line_success_shape() {
        let mut dashboard = dashboard();
        let response = handle_line(&mut dashboard, r#"{"action":"list","screen":"branches"}"#);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ok"], true);
        assert!(json.get("error").is_none());
        assert_eq!(json["data"]["page"]["totalCount"], 12);
    }
}
