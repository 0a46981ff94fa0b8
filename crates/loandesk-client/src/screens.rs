//! The dashboard's screens and what each one searches, requires, and keeps unique.

use std::str::FromStr;

use loandesk_shared::ParseError;
use loandesk_store::{ConfigError, ControllerConfig};
use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenKind {
    Branches,
    Castes,
    Talukas,
    ActionCodes,
    Organizations,
    RejectionReasons,
    DatabaseAccess,
    Workflows,
    Configuration,
    LoanApplications,
}

struct ScreenProfile {
    namespace: &'static str,
    label: &'static str,
    search: &'static [&'static str],
    unique: &'static [&'static str],
    required: &'static [&'static str],
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 10] = [
        Self::Branches,
        Self::Castes,
        Self::Talukas,
        Self::ActionCodes,
        Self::Organizations,
        Self::RejectionReasons,
        Self::DatabaseAccess,
        Self::Workflows,
        Self::Configuration,
        Self::LoanApplications,
    ];

    fn profile(&self) -> ScreenProfile {
        match self {
            Self::Branches => ScreenProfile {
                namespace: "branch",
                label: "Branch",
                search: &["name", "code", "district", "taluka"],
                unique: &["name", "code"],
                required: &[],
            },
            Self::Castes => ScreenProfile {
                namespace: "caste",
                label: "Caste",
                search: &["name", "category", "description"],
                unique: &["name"],
                required: &[],
            },
            Self::Talukas => ScreenProfile {
                namespace: "taluka",
                label: "Taluka",
                search: &["name", "district", "pinCode"],
                unique: &["name"],
                required: &["district"],
            },
            Self::ActionCodes => ScreenProfile {
                namespace: "action",
                label: "Action code",
                search: &["code", "description"],
                unique: &["code"],
                required: &["description"],
            },
            Self::Organizations => ScreenProfile {
                namespace: "org",
                label: "Organization",
                search: &["name", "orgType", "city"],
                unique: &["name"],
                required: &[],
            },
            Self::RejectionReasons => ScreenProfile {
                namespace: "rejection",
                label: "Rejection reason",
                search: &["code", "reason", "category"],
                unique: &["code"],
                required: &["reason"],
            },
            Self::DatabaseAccess => ScreenProfile {
                namespace: "dbaccess",
                label: "Database access",
                search: &["userName", "role", "database", "permissions"],
                unique: &["userName"],
                required: &["role", "database"],
            },
            Self::Workflows => ScreenProfile {
                namespace: "workflow",
                label: "Workflow",
                search: &["name", "approverRole", "stages"],
                unique: &["name"],
                required: &["approverRole"],
            },
            Self::Configuration => ScreenProfile {
                namespace: "config",
                label: "Configuration",
                search: &["key", "value", "category", "description"],
                unique: &["key"],
                required: &["value"],
            },
            Self::LoanApplications => ScreenProfile {
                namespace: "loan",
                label: "Loan application",
                search: &["applicantName", "bank", "region", "branch", "status"],
                unique: &[],
                required: &["applicantName", "bank", "region"],
            },
        }
    }

    /// Human-readable singular name used in notices.
    pub fn label(&self) -> &'static str {
        self.profile().label
    }

    pub fn namespace(&self) -> &'static str {
        self.profile().namespace
    }

    /// Field used to name a record in notices: the first unique field.
    pub fn title_field(&self) -> Option<&'static str> {
        self.profile().unique.first().copied()
    }

    pub fn controller_config(
        &self,
        config: &DashboardConfig,
    ) -> Result<ControllerConfig, ConfigError> {
        let profile = self.profile();
        ControllerConfig::builder(profile.namespace)
            .search_fields(profile.search.iter().copied())
            .unique_fields(profile.unique.iter().copied())
            .required_fields(profile.required.iter().copied())
            .items_per_page(config.items_per_page)
            .id_strategy(config.id_strategy)
            .build()
    }
}

impl FromStr for ScreenKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s.trim())
            .ok_or_else(|| ParseError::Value {
                name: "screen",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Branches => "branches",
            Self::Castes => "castes",
            Self::Talukas => "talukas",
            Self::ActionCodes => "action-codes",
            Self::Organizations => "organizations",
            Self::RejectionReasons => "rejection-reasons",
            Self::DatabaseAccess => "database-access",
            Self::Workflows => "workflows",
            Self::Configuration => "configuration",
            Self::LoanApplications => "loan-applications",
        };
        f.write_str(name)
    }
}
