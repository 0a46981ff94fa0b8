//! Table view commands: search, sort, and pagination. Each returns the
//! screen's snapshot after the change.

use loandesk_shared::SortOrder;
use serde_json::Value;

use super::CommandError;
use crate::screens::ScreenKind;
use crate::state::Dashboard;

pub fn list(dashboard: &mut Dashboard, screen: ScreenKind) -> Result<Value, CommandError> {
    dashboard.screen(screen).snapshot()
}

pub fn search(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    query: &str,
) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.search(query);
    handle.snapshot()
}

pub fn sort(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    key: &str,
    order: Option<SortOrder>,
) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.sort(key, order);
    handle.snapshot()
}

pub fn clear_sort(dashboard: &mut Dashboard, screen: ScreenKind) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.clear_sort();
    handle.snapshot()
}

pub fn set_page(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    page: usize,
) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.set_page(page);
    handle.snapshot()
}

pub fn next_page(dashboard: &mut Dashboard, screen: ScreenKind) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.next_page();
    handle.snapshot()
}

pub fn previous_page(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.previous_page();
    handle.snapshot()
}

pub fn set_items_per_page(
    dashboard: &mut Dashboard,
    screen: ScreenKind,
    size: usize,
) -> Result<Value, CommandError> {
    let handle = dashboard.screen_mut(screen);
    handle.set_items_per_page(size)?;
    handle.snapshot()
}
