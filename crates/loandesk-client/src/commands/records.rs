//! Direct record mutations. Each returns the affected record.

use loandesk_shared::RecordId;
use loandesk_store::Patch;
use serde_json::Value;

use super::CommandError;
use crate::screens::ScreenKind;
use crate::state::Dashboard;

pub fn create(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    fields: Value,
) -> Result<Value, CommandError> {
    dashboard.screen_mut(screen).create_json(fields)
}

pub fn update(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    id: &RecordId,
    patch: &Patch,
) -> Result<Value, CommandError> {
    dashboard.screen_mut(screen).update_json(id, patch)
}

/// Returns the removed record.
pub fn delete(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    id: &RecordId,
) -> Result<Value, CommandError> {
    dashboard.screen_mut(screen).delete_json(id)
}

pub fn toggle(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    id: &RecordId,
    field: &str,
) -> Result<Value, CommandError> {
    dashboard.screen_mut(screen).toggle_json(id, field)
}
