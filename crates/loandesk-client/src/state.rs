//! Dashboard state: one screen per collection, mounted once at start-up.

use loandesk_store::{
    ActionCode, Branch, Caste, ConfigEntry, ConfigError, DatabaseAccess, LoanApplication,
    Organization, RecordFields, RejectionReason, Seed, Taluka, TabularCollectionController,
    ValidationError, Workflow,
};
use thiserror::Error;
use tracing::info;

use crate::config::DashboardConfig;
use crate::notice::{Notice, NoticeSequence};
use crate::screen::{ScreenHandle, ScreenState};
use crate::screens::ScreenKind;

/// A data source able to seed every screen.
pub trait DashboardSeed:
    Seed<Branch>
    + Seed<Caste>
    + Seed<Taluka>
    + Seed<ActionCode>
    + Seed<Organization>
    + Seed<RejectionReason>
    + Seed<DatabaseAccess>
    + Seed<Workflow>
    + Seed<ConfigEntry>
    + Seed<LoanApplication>
{
}

impl<S> DashboardSeed for S where
    S: Seed<Branch>
        + Seed<Caste>
        + Seed<Taluka>
        + Seed<ActionCode>
        + Seed<Organization>
        + Seed<RejectionReason>
        + Seed<DatabaseAccess>
        + Seed<Workflow>
        + Seed<ConfigEntry>
        + Seed<LoanApplication>
{
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to seed {screen}: {source}")]
    Seed {
        screen: ScreenKind,
        source: ValidationError,
    },
}

pub struct Dashboard {
    pub branches: ScreenState<Branch>,
    pub castes: ScreenState<Caste>,
    pub talukas: ScreenState<Taluka>,
    pub action_codes: ScreenState<ActionCode>,
    pub organizations: ScreenState<Organization>,
    pub rejection_reasons: ScreenState<RejectionReason>,
    pub database_access: ScreenState<DatabaseAccess>,
    pub workflows: ScreenState<Workflow>,
    pub configuration: ScreenState<ConfigEntry>,
    pub loans: ScreenState<LoanApplication>,
}

fn mount_screen<T, S>(
    kind: ScreenKind,
    config: &DashboardConfig,
    source: &S,
    notices: &NoticeSequence,
) -> Result<ScreenState<T>, DashboardError>
where
    T: RecordFields,
    S: Seed<T>,
{
    let controller_config = kind.controller_config(config)?;
    let controller = TabularCollectionController::mount(controller_config, source)
        .map_err(|source| DashboardError::Seed {
            screen: kind,
            source,
        })?;
    Ok(ScreenState::new(kind, controller).with_notice_sequence(notices.clone()))
}

impl Dashboard {
    /// Build every screen and seed it from `source`.
    pub fn mount(config: &DashboardConfig, source: &impl DashboardSeed) -> Result<Self, DashboardError> {
        let notices = NoticeSequence::new();
        let dashboard = Self {
            branches: mount_screen(ScreenKind::Branches, config, source, &notices)?,
            castes: mount_screen(ScreenKind::Castes, config, source, &notices)?,
            talukas: mount_screen(ScreenKind::Talukas, config, source, &notices)?,
            action_codes: mount_screen(ScreenKind::ActionCodes, config, source, &notices)?,
            organizations: mount_screen(ScreenKind::Organizations, config, source, &notices)?,
            rejection_reasons: mount_screen(
                ScreenKind::RejectionReasons,
                config,
                source,
                &notices,
            )?,
            database_access: mount_screen(ScreenKind::DatabaseAccess, config, source, &notices)?,
            workflows: mount_screen(ScreenKind::Workflows, config, source, &notices)?,
            configuration: mount_screen(ScreenKind::Configuration, config, source, &notices)?,
            loans: mount_screen(ScreenKind::LoanApplications, config, source, &notices)?,
        };
        info!(
            screens = ScreenKind::ALL.len(),
            items_per_page = config.items_per_page,
            "Dashboard mounted"
        );
        Ok(dashboard)
    }

    pub fn screen(&self, kind: ScreenKind) -> &dyn ScreenHandle {
        match kind {
            ScreenKind::Branches => &self.branches,
            ScreenKind::Castes => &self.castes,
            ScreenKind::Talukas => &self.talukas,
            ScreenKind::ActionCodes => &self.action_codes,
            ScreenKind::Organizations => &self.organizations,
            ScreenKind::RejectionReasons => &self.rejection_reasons,
            ScreenKind::DatabaseAccess => &self.database_access,
            ScreenKind::Workflows => &self.workflows,
            ScreenKind::Configuration => &self.configuration,
            ScreenKind::LoanApplications => &self.loans,
        }
    }

    pub fn screen_mut(&mut self, kind: ScreenKind) -> &mut dyn ScreenHandle {
        match kind {
            ScreenKind::Branches => &mut self.branches,
            ScreenKind::Castes => &mut self.castes,
            ScreenKind::Talukas => &mut self.talukas,
            ScreenKind::ActionCodes => &mut self.action_codes,
            ScreenKind::Organizations => &mut self.organizations,
            ScreenKind::RejectionReasons => &mut self.rejection_reasons,
            ScreenKind::DatabaseAccess => &mut self.database_access,
            ScreenKind::Workflows => &mut self.workflows,
            ScreenKind::Configuration => &mut self.configuration,
            ScreenKind::LoanApplications => &mut self.loans,
        }
    }

    /// Collect pending notices from every screen, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut notices: Vec<Notice> = ScreenKind::ALL
            .into_iter()
            .flat_map(|kind| self.screen_mut(kind).take_notices())
            .collect();
        notices.sort_by_key(|n| n.seq);
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loandesk_store::mock::EmptySeed;
    use loandesk_store::{MockDataService, Patch};

    use crate::notice::NoticeLevel;

    #[test]
    fn test_mount_with_mock_data() {
        let dashboard = Dashboard::mount(&DashboardConfig::default(), &MockDataService::new()).unwrap();
        assert_eq!(dashboard.castes.controller().len(), 10);
        assert_eq!(dashboard.loans.controller().len(), 36);
        for kind in ScreenKind::ALL {
            assert_eq!(dashboard.screen(kind).kind(), kind);
        }
    }

    #[test]
    fn test_mount_empty() {
        let dashboard = Dashboard::mount(&DashboardConfig::default(), &EmptySeed).unwrap();
        assert!(dashboard.branches.controller().is_empty());
        assert_eq!(dashboard.branches.controller().total_pages(), 1);
    }

    #[test]
    fn test_drain_notices_across_screens() {
        let mut dashboard = Dashboard::mount(&DashboardConfig::default(), &EmptySeed).unwrap();
        dashboard
            .castes
            .create(Caste {
                name: "Koli".into(),
                ..Caste::default()
            })
            .unwrap();
        let missing = loandesk_shared::RecordId::from("branch-0042");
        assert!(dashboard
            .branches
            .update(&missing, &Patch::new().set("name", "x"))
            .is_err());

        dashboard
            .castes
            .create(Caste {
                name: "Mali".into(),
                ..Caste::default()
            })
            .unwrap();

        let notices = dashboard.drain_notices();
        let order: Vec<(ScreenKind, NoticeLevel)> =
            notices.iter().map(|n| (n.screen, n.level)).collect();
        assert_eq!(
            order,
            vec![
                (ScreenKind::Castes, NoticeLevel::Success),
                (ScreenKind::Branches, NoticeLevel::Error),
                (ScreenKind::Castes, NoticeLevel::Success),
            ]
        );
        assert!(notices.windows(2).all(|w| w[0].seq < w[1].seq));
        assert!(dashboard.drain_notices().is_empty());
    }
}
