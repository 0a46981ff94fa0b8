//! Report and notice commands.

use serde_json::Value;
use tracing::info;

use super::CommandError;
use crate::reports::{self, ReportRequest};
use crate::state::Dashboard;

/// Reports always cover the whole loan collection, whatever the loan
/// screen's search or page.
pub fn report(dashboard: &mut Dashboard, request: &ReportRequest) -> Result<Value, CommandError> {
    let loans = dashboard.loans.controller().records();
    let report = reports::run(request, loans)?;
    info!(loans = loans.len(), "Report generated");
    Ok(serde_json::to_value(&report)?)
}

pub fn drain_notices(dashboard: &mut Dashboard) -> Result<Value, CommandError> {
    Ok(serde_json::to_value(dashboard.drain_notices())?)
}
