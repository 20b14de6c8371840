//! User profile aggregation
//!
//! Turns the stored contributor list into a JSON array holding the full
//! profile of every named contributor.

use crate::config::PipelineConfig;
use crate::config::validation::validate_login;
use crate::error::ContribError;
use crate::source::RepositoryDataSource;
use crate::system::System;
use anyhow::{Context as _, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use serde_json::Value;
use serde_json::value::RawValue;
use std::path::Path;
use tracing::{debug, info, warn};

/// The only contributor field the pipeline reads
#[derive(Debug, Deserialize)]
struct ContributorRecord {
    #[serde(default)]
    login: Option<String>,
}

/// Counts from one aggregation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    /// Entries in the contributor list
    pub total: usize,
    /// Profiles fetched and written
    pub fetched: usize,
    /// Entries without a login
    pub anonymous: usize,
    /// Entries that were not JSON objects
    pub skipped: usize,
}

/// Fetch every named contributor's profile into the user-data file
///
/// The profiles are collected in contributor order and written once, as a
/// single JSON array, after all of them have been fetched.
///
/// # Errors
///
/// Returns an error if:
/// - The contributor file is missing or is not a JSON array
/// - A login is malformed
/// - A profile request fails or returns malformed JSON
/// - The user-data file cannot be written
pub fn prepare_user_data(
    system: &dyn System,
    source: &dyn RepositoryDataSource,
    config: &PipelineConfig,
) -> Result<AggregationSummary> {
    info!("Begin preparing user data");
    let files = config.output_files();
    let contributors = load_contributors(system, &files.contributors)?;

    let mut summary = AggregationSummary {
        total: contributors.len(),
        ..AggregationSummary::default()
    };
    info!("Total contributors fetched: {}", summary.total);

    let progress = ProgressBar::new(contributors.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut profiles: Vec<Box<RawValue>> = Vec::with_capacity(contributors.len());
    for item in contributors {
        progress.inc(1);

        if !item.is_object() {
            warn!("Item is not a JSON object: {}. Skipping...", item);
            summary.skipped += 1;
            continue;
        }

        let login = serde_json::from_value::<ContributorRecord>(item.clone())
            .ok()
            .and_then(|record| record.login)
            .filter(|login| !login.is_empty());

        let Some(login) = login else {
            debug!("Skipping user data for {}...", item);
            summary.anonymous += 1;
            continue;
        };

        progress.set_message(login.clone());
        validate_login(&login)?;
        let body = source.get_user(&login)?;
        let profile = RawValue::from_string(body.trim().to_owned()).map_err(|e| {
            ContribError::data(format!("Malformed profile JSON for user [{login}]: {e}"))
        })?;
        progress.suspend(|| {
            info!(
                "Fetched contributor [{}] ({}/{})",
                login,
                summary.fetched + 1,
                summary.total
            );
        });
        profiles.push(profile);
        summary.fetched += 1;
    }
    progress.finish_and_clear();

    let json = serde_json::to_string(&profiles).context("Failed to serialize user profiles")?;
    info!(
        "Writing {} user profiles to [{}] file",
        profiles.len(),
        files.users.display()
    );
    system.write(&files.users, json.as_bytes()).map_err(|e| {
        ContribError::filesystem(format!(
            "Unable to write user data to [{}]: {e}",
            files.users.display()
        ))
    })?;

    info!(
        "There were a total of {} anonymous contributors that will be excluded from this analysis!",
        summary.anonymous
    );
    info!("End preparing user data");

    Ok(summary)
}

/// Load the stored contributor list
fn load_contributors(system: &dyn System, path: &Path) -> Result<Vec<Value>> {
    if !system.exists(path) {
        return Err(ContribError::data(format!(
            "File [{}] not found. Please check the file existence in the output directory.",
            path.display()
        ))
        .into());
    }
    let content = system.read_to_string(path).map_err(|e| {
        ContribError::data(format!("Unable to read [{}]: {e}", path.display()))
    })?;

    serde_json::from_str::<Vec<Value>>(&content).map_err(|e| {
        ContribError::data(format!(
            "Parsing error in the JSON file [{}]: {e}. Check for formatting issues.",
            path.display()
        ))
        .into()
    })
}
