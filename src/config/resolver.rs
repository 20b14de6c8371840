//! Environment & credential resolution
//!
//! Every value comes from a CLI flag, then the process environment, then an
//! interactive prompt. Nothing is validated here beyond what the user
//! supplies; the contributor fetch rejects empty ids.

use crate::cli::Args;
use crate::config::{DEFAULT_CHART_ATTRIBUTE, PipelineConfig, Token};
use crate::system::System;
use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Token variables, in priority order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

pub const ORG_ENV_VAR: &str = "GH_ORG";
pub const REPO_ENV_VAR: &str = "GH_REPO";
pub const CHART_ATTRIBUTE_ENV_VAR: &str = "USER_CHART_BASED_ON";

const PAT_DOCS_URL: &str = "https://docs.github.com/en/authentication/keeping-your-account-and-data-secure/managing-your-personal-access-tokens";

/// Build the pipeline configuration for a run on `today`
///
/// # Errors
///
/// Returns an error if an interactive prompt is needed and cannot be read
pub fn resolve_config(system: &dyn System, args: &Args, today: NaiveDate) -> Result<PipelineConfig> {
    let token = resolve_token(system)?;

    let org = match args.org.clone() {
        Some(org) => org,
        None => env_or_prompt(
            system,
            ORG_ENV_VAR,
            "Enter the GitHub Organization ID. E.g. in github.com/apache/cassandra, 'apache' is the GH org",
        )?,
    };

    let repo = match args.repo.clone() {
        Some(repo) => repo,
        None => env_or_prompt(
            system,
            REPO_ENV_VAR,
            "Enter the GitHub Repository ID. E.g. in github.com/apache/cassandra, 'cassandra' is the GH repo",
        )?,
    };

    let chart_attribute = args
        .attribute
        .clone()
        .or_else(|| non_empty_env(system, CHART_ATTRIBUTE_ENV_VAR))
        .unwrap_or_else(|| DEFAULT_CHART_ATTRIBUTE.to_owned());

    let config = PipelineConfig {
        org,
        repo,
        token,
        chart_attribute,
        output_dir: args.output_dir.clone(),
        run_date: today,
        per_page: args.per_page,
        start_page: args.start_page,
    };
    debug!("Resolved configuration: {:?}", config);

    Ok(config)
}

/// First non-empty token variable, else a hidden prompt
fn resolve_token(system: &dyn System) -> Result<Token> {
    if let Some(token) = TOKEN_ENV_VARS
        .iter()
        .find_map(|key| non_empty_env(system, key))
    {
        return Ok(Token::new(token));
    }

    warn!("GitHub Personal Access Token not found. Create a PAT by following the instructions at {PAT_DOCS_URL}");
    let token = system
        .prompt_secret("Enter your GitHub Personal Access Token")
        .context("Failed to read the GitHub token")?;

    Ok(Token::new(token.trim()))
}

/// A set variable is used as-is, even when empty
fn env_or_prompt(system: &dyn System, key: &str, prompt: &str) -> Result<String> {
    if let Ok(value) = system.env_var(key) {
        return Ok(value);
    }

    let value = system
        .prompt_line(prompt)
        .with_context(|| format!("Failed to read {key} from the terminal"))?;

    Ok(value.trim().to_owned())
}

fn non_empty_env(system: &dyn System, key: &str) -> Option<String> {
    system.env_var(key).ok().filter(|value| !value.is_empty())
}
