//! `ghcontrib` - A CLI tool for charting where a GitHub repository's contributors come from
//!
//! This library downloads a repository's contributor list through the `gh`
//! CLI, fetches the profile of every named contributor, and renders a pie
//! chart of the contributors grouped by one profile attribute.

pub mod cli;
pub mod config;
pub mod error;
pub mod operations;
pub mod platform;
pub mod source;
pub mod system;

use anyhow::Result;
use cli::Args;
use config::{PipelineConfig, resolve_config};
use operations::{
    AggregationSummary, ChartSummary, PieRenderer, PlottersRenderer, draw_pie_chart,
    ensure_cli_available, fetch_contributors, prepare_user_data,
};
use source::{GhCliSource, RepositoryDataSource};
use system::{RealSystem, System};
use tracing::info;

/// What a complete pipeline run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub contributors: usize,
    pub users: AggregationSummary,
    pub chart: ChartSummary,
}

/// Main entry point for the ghcontrib library
pub fn run(args: &Args) -> Result<PipelineReport> {
    let system = RealSystem::new();
    let today = chrono::Local::now().date_naive();
    let config = resolve_config(&system, args, today)?;

    ensure_cli_available(&system)?;

    let source = GhCliSource::new(&system, config.token.clone(), config.per_page, config.start_page);
    run_pipeline(&system, &source, &PlottersRenderer::default(), &config)
}

/// Fetch, aggregate and chart with the given collaborators
///
/// # Errors
///
/// Returns the first error raised by any stage; later stages do not run.
pub fn run_pipeline(
    system: &dyn System,
    source: &dyn RepositoryDataSource,
    renderer: &dyn PieRenderer,
    config: &PipelineConfig,
) -> Result<PipelineReport> {
    let contributors = fetch_contributors(system, source, config)?;
    let users = prepare_user_data(system, source, config)?;
    let chart = draw_pie_chart(system, renderer, config)?;

    info!("End of program");
    Ok(PipelineReport {
        contributors,
        users,
        chart,
    })
}
