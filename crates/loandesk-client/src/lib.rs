//! # loandesk-client
//!
//! The dashboard side of loandesk: one [`ScreenState`] per screen (its
//! collection controller plus the modal and form draft around it), the
//! [`Dashboard`] that owns all of them, the JSON command surface the
//! presentation layer talks to, and the report views.

pub mod commands;
pub mod config;
pub mod notice;
pub mod reports;
pub mod screen;
pub mod screens;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use commands::{dispatch, handle_line, Command, CommandError, Response};
pub use config::{DashboardConfig, SeedMode};
pub use notice::{Notice, NoticeLevel, NoticeSequence};
pub use screen::{Modal, ScreenError, ScreenHandle, ScreenState};
pub use screens::ScreenKind;
pub use state::{Dashboard, DashboardError, DashboardSeed};

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// free for command responses. Respects `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("loandesk=info,loandesk_client=info,loandesk_store=info,warn")
    });

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
