//! # `ghcontrib`
//!
//! `ghcontrib` charts where the contributors of a GitHub repository come from.
//! It pages through the repository's contributor list with the GitHub CLI,
//! fetches every named contributor's profile, and draws a pie chart grouped
//! by one profile attribute (`location` unless told otherwise).
//!
//! ## Usage
//!
//! ```sh
//! GH_TOKEN=... ghcontrib --org apache --repo cassandra
//! USER_CHART_BASED_ON=company ghcontrib --org apache --repo cassandra
//! ```
//!
//! Three files are written to the output directory, named after the
//! organization, repository and date:
//! - `{org}_{repo}_contributors_{YYYYMMDD}.json`
//! - `{org}_{repo}_login_details_{YYYYMMDD}.json`
//! - `{org}_{repo}_pie_chart_{YYYYMMDD}.png`
//!
//! See `ghcontrib --help` for all options.

use anyhow::Result;
use clap::Parser as _;
use ghcontrib::cli::Args;
use ghcontrib::error::ContribError;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    match ghcontrib::run(&args) {
        Ok(_) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<ContribError>()
                    .map_or(1, ContribError::exit_code),
            );
        }
    }
}
