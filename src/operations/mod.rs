//! Operations module
//!
//! The pipeline stages: CLI presence check, contributor download, profile
//! aggregation and chart rendering, plus the shared command runner

pub mod chart;
pub mod contributors;
pub mod guard;
pub mod runner;
pub mod users;

pub use chart::{ChartDataset, ChartSlice, ChartSummary, PieRenderer, PlottersRenderer, draw_pie_chart};
pub use contributors::fetch_contributors;
pub use guard::{CliGuard, GuardState, ensure_cli_available};
pub use runner::run_command;
pub use users::{AggregationSummary, prepare_user_data};
