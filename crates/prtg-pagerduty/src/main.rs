//! PRTG notification program that forwards sensor alerts to `PagerDuty`.
//!
//! Run `prtg-pagerduty --help` for usage information.

use anyhow::Result;
use prtg_pagerduty::cli::Cli;
use prtg_pagerduty::{dispatch, PagerDutyClient};
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let client = PagerDutyClient::with_endpoint(&cli.events_url);
    let alert = cli.into_alert();

    match dispatch(&client, &alert).await {
        Ok(outcome) => {
            debug!(outcome = ?outcome, "Done");
            Ok(())
        }
        Err(e) => {
            error!(
                incident_key = %alert.incident_key,
                error = %e,
                "Failed to send PagerDuty event"
            );
            Err(e.into())
        }
    }
}
