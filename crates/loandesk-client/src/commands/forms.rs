//! Modal and draft commands for the add/edit form and delete confirmation.
//!
//! Opening, editing, and closing return the screen snapshot so the UI can
//! render the modal; `submit` and `confirmDelete` return the affected record.

use loandesk_shared::RecordId;
use loandesk_store::Patch;
use serde_json::Value;

use super::CommandError;
use crate::screens::ScreenKind;
use crate::state::Dashboard;

pub fn open_add(dashboard: &mut Dashboard, screen: ScreenKind) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.open_add();
    handle.snapshot()
}

pub fn open_edit(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    id: &RecordId,
) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.open_edit(id)?;
    handle.snapshot()
}

pub fn edit_draft(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    patch: &Patch,
) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.edit_draft(patch)?;
    handle.snapshot()
}

pub fn submit(dashboard: &mut Dashboard, screen: ScreenKind) -> Result<Value, CommandError> {
    dashboard.screen_mut(screen).submit_json()
}

pub fn request_delete(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    id: &RecordId,
) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.request_delete(id)?;
    handle.snapshot()
}

pub fn confirm_delete(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
) -> Result<Value, CommandError> {
    dashboard.screen_mut(screen).confirm_delete_json()
}

pub fn close_modal(dashboard: &mut Dashboard, screen: ScreenKind) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.close_modal();
    handle.snapshot()
}
