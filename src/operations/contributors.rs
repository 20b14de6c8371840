//! Contributor list download

use crate::config::PipelineConfig;
use crate::config::validation::validate_repository_ids;
use crate::error::ContribError;
use crate::source::RepositoryDataSource;
use crate::system::System;
use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

/// Download the contributor list and store the response body verbatim
///
/// Returns the number of contributors in the response.
///
/// # Errors
///
/// Returns an error if:
/// - The organization or repository id is empty or invalid
/// - The request fails
/// - The contributor file cannot be written
pub fn fetch_contributors(
    system: &dyn System,
    source: &dyn RepositoryDataSource,
    config: &PipelineConfig,
) -> Result<usize> {
    info!(
        "Begin fetching contributors - GH_ORG: {} - GH_REPO: {}",
        config.org, config.repo
    );
    validate_repository_ids(&config.org, &config.repo)?;

    let body = source.list_contributors(&config.org, &config.repo)?;
    info!("Request to fetch GH contributors succeeded");

    let contributors_file = config.output_files().contributors;
    info!("Writing to [{}] file", contributors_file.display());
    system
        .write(&contributors_file, body.as_bytes())
        .map_err(|e| {
            ContribError::filesystem(format!(
                "Unable to write contributor data to [{}]: {e}",
                contributors_file.display()
            ))
        })?;

    let count = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Array(items)) => items.len(),
        Ok(_) | Err(_) => {
            warn!("Contributor response is not a JSON array");
            0
        }
    };
    info!("End fetching contributors: {} fetched", count);

    Ok(count)
}
