//! # loandesk
//!
//! Line-oriented bridge between a presentation layer and the dashboard.
//!
//! Reads one JSON command per line on stdin and writes one JSON response per
//! line on stdout. Logs go to stderr. EOF ends the session.

use std::io::{self, BufRead, Write};

use loandesk_client::{handle_line, init_tracing, Dashboard, DashboardConfig, SeedMode};
use loandesk_store::mock::EmptySeed;
use loandesk_store::MockDataService;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    init_tracing();
    info!("Starting loandesk v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration and mount every screen
    // -----------------------------------------------------------------------
    let config = DashboardConfig::from_env();
    info!(?config, "Loaded configuration");

    let mut dashboard = match config.seed {
        SeedMode::Mock => Dashboard::mount(&config, &MockDataService::new())?,
        SeedMode::Empty => Dashboard::mount(&config, &EmptySeed)?,
    };

    // -----------------------------------------------------------------------
    // 3. Serve commands until stdin closes
    // -----------------------------------------------------------------------
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut handled = 0usize;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&mut dashboard, &line);
        serde_json::to_writer(&mut stdout, &response)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
        handled += 1;
    }

    info!(commands = handled, "Input closed, shutting down");
    Ok(())
}
