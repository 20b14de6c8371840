use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_PER_PAGE, DEFAULT_START_PAGE};

/// Command-line arguments for ghcontrib
#[derive(Parser, Debug, Clone)]
#[command(name = "ghcontrib")]
#[command(about = "A CLI tool for charting where a GitHub repository's contributors come from")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// GitHub organization id, e.g. 'apache' in github.com/apache/cassandra [env: GH_ORG]
    #[arg(long, value_name = "ORG")]
    pub org: Option<String>,

    /// GitHub repository id, e.g. 'cassandra' in github.com/apache/cassandra [env: GH_REPO]
    #[arg(long, value_name = "REPO")]
    pub repo: Option<String>,

    /// User profile attribute to chart by [env: USER_CHART_BASED_ON] [default: location]
    #[arg(short, long, value_name = "NAME")]
    pub attribute: Option<String>,

    /// Directory the JSON files and the chart are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Contributors requested per page
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,

    /// First contributors page requested; later pages are followed automatically
    #[arg(long, value_name = "N", default_value_t = DEFAULT_START_PAGE)]
    pub start_page: u32,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}
