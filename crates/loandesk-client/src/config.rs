//! Dashboard configuration loaded from environment variables.
//!
//! Every setting has a default so the dashboard starts with zero
//! configuration.

use std::str::FromStr;

use loandesk_shared::constants::DEFAULT_ITEMS_PER_PAGE;
use loandesk_shared::ParseError;
use loandesk_store::config::check_items_per_page;
use loandesk_store::IdStrategy;
use serde::Serialize;

pub const ENV_ITEMS_PER_PAGE: &str = "LOANDESK_ITEMS_PER_PAGE";
pub const ENV_ID_STRATEGY: &str = "LOANDESK_ID_STRATEGY";
pub const ENV_SEED: &str = "LOANDESK_SEED";

/// Where the screens get their initial records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// Built-in sample data.
    #[default]
    Mock,
    /// Start every screen empty.
    Empty,
}

impl FromStr for SeedMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "empty" | "none" => Ok(Self::Empty),
            _ => Err(ParseError::Value {
                name: "seed mode",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Rows per table page on every screen.
    /// Env: `LOANDESK_ITEMS_PER_PAGE`
    /// Default: `10`
    pub items_per_page: usize,

    /// Suffix scheme for new record ids.
    /// Env: `LOANDESK_ID_STRATEGY` (`sequential` | `uuid`)
    /// Default: `sequential`
    pub id_strategy: IdStrategy,

    /// Env: `LOANDESK_SEED` (`mock` | `empty`)
    /// Default: `mock`
    pub seed: SeedMode,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            id_strategy: IdStrategy::default(),
            seed: SeedMode::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup(ENV_ITEMS_PER_PAGE) {
            match val.trim().parse::<usize>() {
                Ok(n) if check_items_per_page(n).is_ok() => config.items_per_page = n,
                _ => {
                    tracing::warn!(value = %val, "Invalid {ENV_ITEMS_PER_PAGE}, using default");
                }
            }
        }

        if let Some(val) = lookup(ENV_ID_STRATEGY) {
            match val.parse::<IdStrategy>() {
                Ok(strategy) => config.id_strategy = strategy,
                Err(e) => tracing::warn!(error = %e, "Invalid {ENV_ID_STRATEGY}, using default"),
            }
        }

        if let Some(val) = lookup(ENV_SEED) {
            match val.parse::<SeedMode>() {
                Ok(seed) => config.seed = seed,
                Err(e) => tracing::warn!(error = %e, "Invalid {ENV_SEED}, using default"),
            }
        }

        config
    }
}
