//! Repository data sources
//!
//! The pipeline only needs two requests from the hosting platform. They are
//! expressed as a trait so the `gh`-backed implementation can be swapped
//! without touching the pipeline stages.

pub mod gh;

pub use gh::GhCliSource;

use anyhow::Result;

/// Read access to a repository's contributors and their profiles
///
/// Both methods return the raw JSON response body.
pub trait RepositoryDataSource {
    /// Every contributor page of `org/repo`, anonymous contributors included,
    /// as one JSON array
    fn list_contributors(&self, org: &str, repo: &str) -> Result<String>;

    /// The public profile of `login`
    fn get_user(&self, login: &str) -> Result<String>;
}
