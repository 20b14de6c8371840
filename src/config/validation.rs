//! Identifier validation logic
//!
//! Organization, repository and login values end up inside shell command
//! lines, so they are restricted to the characters GitHub allows.

use crate::error::ContribError;
use anyhow::Result;
use regex::Regex;

/// Validate the organization and repository ids
///
/// # Errors
///
/// Returns a configuration error if:
/// - Either id is empty
/// - Either id contains characters GitHub does not allow
#[inline]
pub fn validate_repository_ids(org: &str, repo: &str) -> Result<()> {
    if org.trim().is_empty() || repo.trim().is_empty() {
        return Err(ContribError::configuration(
            "Non-empty GitHub Organization and Repository IDs are required.",
        )
        .into());
    }

    let pattern = Regex::new(r"^[A-Za-z0-9_.-]+$")?;
    for (kind, value) in [("Organization", org), ("Repository", repo)] {
        if !pattern.is_match(value) {
            return Err(ContribError::configuration(format!(
                "Invalid GitHub {kind} ID: '{value}'. Only letters, digits, '-', '_' and '.' are allowed"
            ))
            .into());
        }
    }

    Ok(())
}

/// Validate a contributor login before it is used in a request path
///
/// Accepts anything GitHub serves as a login: regular and legacy names
/// (`legacy-`), enterprise-managed names (`mona-cat_octo`) and GitHub App
/// accounts such as `dependabot[bot]`. Only characters that could escape
/// the quoted request path are rejected.
///
/// # Errors
///
/// Returns a data error if the login holds characters outside that set
#[inline]
pub fn validate_login(login: &str) -> Result<()> {
    let pattern = Regex::new(r"^[A-Za-z0-9_.-]+(?:\[bot\])?$")?;
    if pattern.is_match(login) {
        Ok(())
    } else {
        Err(ContribError::data(format!("Invalid contributor login: '{login}'")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_ids() {
        assert!(validate_repository_ids("apache", "cassandra").is_ok());
        assert!(validate_repository_ids("my-org", "repo.rs").is_ok());
        assert!(validate_repository_ids("my_org", "a-b_c.d").is_ok());
    }

    #[test]
    fn rejects_empty_ids() {
        assert!(validate_repository_ids("", "cassandra").is_err());
        assert!(validate_repository_ids("apache", "").is_err());
        assert!(validate_repository_ids("  ", "cassandra").is_err());
    }

    #[test]
    fn rejects_shell_metacharacters() {
        assert!(validate_repository_ids("apache; rm -rf ~", "cassandra").is_err());
        assert!(validate_repository_ids("apache", "cass&andra").is_err());
        assert!(validate_repository_ids("apache", "a/b").is_err());
    }

    #[test]
    fn login_shapes() {
        assert!(validate_login("alice").is_ok());
        assert!(validate_login("a").is_ok());
        assert!(validate_login("alice-smith").is_ok());
        assert!(validate_login("dependabot[bot]").is_ok());
        assert!(validate_login("mona-cat_octo").is_ok());
        assert!(validate_login("legacy-").is_ok());
        assert!(validate_login("a--b").is_ok());

        assert!(validate_login("").is_err());
        assert!(validate_login("alice$(id)").is_err());
        assert!(validate_login("alice bob").is_err());
        assert!(validate_login("alice\"; id; \"").is_err());
        assert!(validate_login("[bot]").is_err());
    }
}
