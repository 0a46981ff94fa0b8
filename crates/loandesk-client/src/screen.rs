//! Per-screen state: the collection controller plus the modal and the single
//! form draft bound to it.

use loandesk_shared::{RecordId, SortOrder};
use loandesk_store::{
    ControllerError, NotFoundError, PageView, Patch, Record, RecordFields,
    TabularCollectionController, ValidationError, ViewState,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::commands::CommandError;
use crate::notice::{Notice, NoticeSequence};
use crate::screens::ScreenKind;

/// Which dialog, if any, is open over the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Modal {
    #[default]
    Closed,
    Add,
    Edit { id: RecordId },
    ConfirmDelete { id: RecordId },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("No add or edit form is open")]
    NoOpenForm,

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,
}

impl From<ValidationError> for ScreenError {
    fn from(e: ValidationError) -> Self {
        Self::Controller(e.into())
    }
}

impl From<NotFoundError> for ScreenError {
    fn from(e: NotFoundError) -> Self {
        Self::Controller(e.into())
    }
}

pub struct ScreenState<T> {
    kind: ScreenKind,
    controller: TabularCollectionController<T>,
    modal: Modal,
    draft: T,
    notices: Vec<Notice>,
    sequence: NoticeSequence,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScreenSnapshot<'a, T> {
    screen: ScreenKind,
    page: PageView<'a, T>,
    view: &'a ViewState,
    modal: &'a Modal,
    draft: &'a T,
}

impl<T: RecordFields> ScreenState<T> {
    pub fn new(kind: ScreenKind, controller: TabularCollectionController<T>) -> Self {
        Self {
            kind,
            controller,
            modal: Modal::Closed,
            draft: T::default(),
            notices: Vec::new(),
            sequence: NoticeSequence::new(),
        }
    }

    /// Stamp this screen's notices from `sequence`, so notices drained from
    /// several screens can be put back in the order they were raised.
    pub fn with_notice_sequence(mut self, sequence: NoticeSequence) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn kind(&self) -> ScreenKind {
        self.kind
    }

    pub fn controller(&self) -> &TabularCollectionController<T> {
        &self.controller
    }

    /// View-state changes only; mutations should go through the screen so
    /// they produce notices.
    pub fn controller_mut(&mut self) -> &mut TabularCollectionController<T> {
        &mut self.controller
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    // ------------------------------------------------------------------
    // Modal + draft
    // ------------------------------------------------------------------

    pub fn open_add(&mut self) {
        self.draft = T::default();
        self.modal = Modal::Add;
    }

    /// Open the edit form with the record's current fields in the draft.
    pub fn open_edit(&mut self, id: &RecordId) -> Result<(), ScreenError> {
        let record = self
            .controller
            .get(id)
            .ok_or_else(|| NotFoundError { id: id.clone() })?;
        self.draft = record.fields.clone();
        self.modal = Modal::Edit { id: id.clone() };
        Ok(())
    }

    pub fn edit_draft(&mut self, patch: &Patch) -> Result<(), ScreenError> {
        if !matches!(self.modal, Modal::Add | Modal::Edit { .. }) {
            return Err(ScreenError::NoOpenForm);
        }
        self.draft = patch.apply_to(&self.draft)?;
        Ok(())
    }

    /// Save the draft. The form closes on success and stays open, draft
    /// intact, on failure.
    pub fn submit(&mut self) -> Result<Record<T>, ScreenError> {
        let result = match self.modal.clone() {
            Modal::Add => self.controller.create(self.draft.clone()),
            Modal::Edit { id } => match Patch::from_fields(&self.draft) {
                Ok(patch) => self.controller.update(&id, &patch),
                Err(e) => Err(e.into()),
            },
            Modal::Closed | Modal::ConfirmDelete { .. } => return Err(ScreenError::NoOpenForm),
        };
        let verb = if self.modal == Modal::Add { "created" } else { "updated" };

        let record = self.record_result(result, verb)?;
        self.modal = Modal::Closed;
        self.draft = T::default();
        Ok(record)
    }

    pub fn request_delete(&mut self, id: &RecordId) -> Result<(), ScreenError> {
        if self.controller.get(id).is_none() {
            return Err(NotFoundError { id: id.clone() }.into());
        }
        self.modal = Modal::ConfirmDelete { id: id.clone() };
        Ok(())
    }

    pub fn confirm_delete(&mut self) -> Result<Record<T>, ScreenError> {
        let Modal::ConfirmDelete { id } = self.modal.clone() else {
            return Err(ScreenError::NoPendingDelete);
        };
        self.modal = Modal::Closed;
        self.delete(&id)
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.draft = T::default();
    }

    // ------------------------------------------------------------------
    // Direct mutations
    // ------------------------------------------------------------------

    pub fn create(&mut self, fields: T) -> Result<Record<T>, ScreenError> {
        let result = self.controller.create(fields);
        self.record_result(result, "created")
    }

    pub fn update(&mut self, id: &RecordId, patch: &Patch) -> Result<Record<T>, ScreenError> {
        let result = self.controller.update(id, patch);
        self.record_result(result, "updated")
    }

    pub fn delete(&mut self, id: &RecordId) -> Result<Record<T>, ScreenError> {
        let result = self.controller.delete(id);
        self.record_result(result, "deleted")
    }

    pub fn toggle(&mut self, id: &RecordId, field: &str) -> Result<Record<T>, ScreenError> {
        let result = self.controller.toggle_field(id, field);
        self.record_result(result, "updated")
    }

    /// Notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn push_notice(&mut self, notice: Notice) {
        let notice = self.sequence.stamp(notice);
        self.notices.push(notice);
    }

    /// Queue the notice for a finished mutation and pass the result through.
    fn record_result(
        &mut self,
        result: Result<Record<T>, ControllerError>,
        verb: &str,
    ) -> Result<Record<T>, ScreenError> {
        match result {
            Ok(record) => {
                let message = format!("{} {} {verb}", self.kind.label(), self.describe(&record));
                self.push_notice(Notice::success(self.kind, message));
                Ok(record)
            }
            Err(e) => {
                debug!(screen = %self.kind, error = %e, "Screen operation failed");
                self.push_notice(Notice::error(self.kind, e.to_string()));
                Err(e.into())
            }
        }
    }

    fn describe(&self, record: &Record<T>) -> String {
        self.kind
            .title_field()
            .and_then(|f| record.field(f))
            .map(|v| format!("\"{}\"", v.display()))
            .unwrap_or_else(|| record.id.to_string())
    }
}

/// Object-safe, JSON-facing view of a screen, so the command layer can
/// address every screen through one type.
pub trait ScreenHandle {
    fn kind(&self) -> ScreenKind;
    fn snapshot(&self) -> Result<Value, CommandError>;
    fn search(&mut self, query: &str);
    /// `None` toggles the direction when the column is already sorted.
    fn sort(&mut self, key: &str, order: Option<SortOrder>);
    fn clear_sort(&mut self);
    fn set_page(&mut self, page: usize) -> usize;
    fn next_page(&mut self) -> usize;
    fn previous_page(&mut self) -> usize;
    fn set_items_per_page(&mut self, n: usize) -> Result<(), CommandError>;
    fn create_json(&mut self, fields: Value) -> Result<Value, CommandError>;
    fn update_json(&mut self, id: &RecordId, patch: &Patch) -> Result<Value, CommandError>;
    fn delete_json(&mut self, id: &RecordId) -> Result<Value, CommandError>;
    fn toggle_json(&mut self, id: &RecordId, field: &str) -> Result<Value, CommandError>;
    fn open_add(&mut self);
    fn open_edit(&mut self, id: &RecordId) -> Result<(), CommandError>;
    fn edit_draft(&mut self, patch: &Patch) -> Result<(), CommandError>;
    fn submit_json(&mut self) -> Result<Value, CommandError>;
    fn request_delete(&mut self, id: &RecordId) -> Result<(), CommandError>;
    fn confirm_delete_json(&mut self) -> Result<Value, CommandError>;
    fn close_modal(&mut self);
    fn take_notices(&mut self) -> Vec<Notice>;
}

fn to_json<S: Serialize>(value: &S) -> Result<Value, CommandError> {
    serde_json::to_value(value).map_err(CommandError::from)
}

impl<T: RecordFields> ScreenHandle for ScreenState<T> {
    fn kind(&self) -> ScreenKind {
        self.kind
    }

    fn snapshot(&self) -> Result<Value, CommandError> {
        to_json(&ScreenSnapshot {
            screen: self.kind,
            page: self.controller.view(),
            view: self.controller.view_state(),
            modal: &self.modal,
            draft: &self.draft,
        })
    }

    fn search(&mut self, query: &str) {
        self.controller.set_search_query(query);
    }

    fn sort(&mut self, key: &str, order: Option<SortOrder>) {
        match order {
            Some(order) => self.controller.set_sort(key, order),
            None => self.controller.toggle_sort(key),
        }
    }

    fn clear_sort(&mut self) {
        self.controller.clear_sort();
    }

    fn set_page(&mut self, page: usize) -> usize {
        self.controller.set_page(page)
    }

    fn next_page(&mut self) -> usize {
        self.controller.next_page()
    }

    fn previous_page(&mut self) -> usize {
        self.controller.previous_page()
    }

    fn set_items_per_page(&mut self, n: usize) -> Result<(), CommandError> {
        self.controller.set_items_per_page(n).map_err(CommandError::from)
    }

    fn create_json(&mut self, fields: Value) -> Result<Value, CommandError> {
        let Value::Object(map) = fields else {
            return Err(CommandError::bad_request("fields must be a JSON object"));
        };
        let fields = Patch::from(map)
            .apply_to(&T::default())
            .map_err(|e| {
                self.push_notice(Notice::error(self.kind, e.to_string()));
                CommandError::from(e)
            })?;
        let record = ScreenState::create(self, fields)?;
        to_json(&record)
    }

    fn update_json(&mut self, id: &RecordId, patch: &Patch) -> Result<Value, CommandError> {
        let record = ScreenState::update(self, id, patch)?;
        to_json(&record)
    }

    fn delete_json(&mut self, id: &RecordId) -> Result<Value, CommandError> {
        let record = ScreenState::delete(self, id)?;
        to_json(&record)
    }

    fn toggle_json(&mut self, id: &RecordId, field: &str) -> Result<Value, CommandError> {
        let record = ScreenState::toggle(self, id, field)?;
        to_json(&record)
    }

    fn open_add(&mut self) {
        ScreenState::open_add(self);
    }

    fn open_edit(&mut self, id: &RecordId) -> Result<(), CommandError> {
        ScreenState::open_edit(self, id).map_err(CommandError::from)
    }

    fn edit_draft(&mut self, patch: &Patch) -> Result<(), CommandError> {
        ScreenState::edit_draft(self, patch).map_err(CommandError::from)
    }

    fn submit_json(&mut self) -> Result<Value, CommandError> {
        let record = ScreenState::submit(self)?;
        to_json(&record)
    }

    fn request_delete(&mut self, id: &RecordId) -> Result<(), CommandError> {
        ScreenState::request_delete(self, id).map_err(CommandError::from)
    }

    fn confirm_delete_json(&mut self) -> Result<Value, CommandError> {
        let record = ScreenState::confirm_delete(self)?;
        to_json(&record)
    }

    fn close_modal(&mut self) {
        ScreenState::close_modal(self);
    }

    fn take_notices(&mut self) -> Vec<Notice> {
        ScreenState::take_notices(self)
    }
}
