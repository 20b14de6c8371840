//! `gh api` backed data source

use super::RepositoryDataSource;
use crate::config::Token;
use crate::error::ContribError;
use crate::operations::runner::run_command;
use crate::system::{ShellCommand, System};
use anyhow::Result;

const ACCEPT_HEADER: &str = "Accept: application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version: 2022-11-28";

/// Fetches data by shelling out to the authenticated GitHub CLI
///
/// The token is handed to `gh` through the `GH_TOKEN` variable of the child
/// process, never on the command line.
pub struct GhCliSource<'src> {
    system: &'src dyn System,
    token: Token,
    per_page: u32,
    start_page: u32,
}

impl<'src> GhCliSource<'src> {
    #[must_use]
    pub const fn new(system: &'src dyn System, token: Token, per_page: u32, start_page: u32) -> Self {
        Self {
            system,
            token,
            per_page,
            start_page,
        }
    }

    /// Command line listing contributors, following every page after `start_page`
    #[must_use]
    pub fn contributors_command_line(&self, org: &str, repo: &str) -> String {
        format!(
            "gh api --paginate --method GET -H \"{ACCEPT_HEADER}\" -H \"{API_VERSION_HEADER}\" \"/repos/{org}/{repo}/contributors?anon=1&per_page={}&page={}\"",
            self.per_page, self.start_page
        )
    }

    /// Command line fetching one user profile
    #[must_use]
    pub fn user_command_line(login: &str) -> String {
        format!(
            "gh api --method GET -H \"{ACCEPT_HEADER}\" -H \"{API_VERSION_HEADER}\" \"/users/{login}\""
        )
    }

    fn command(&self, line: String) -> ShellCommand {
        let command = ShellCommand::new(line);
        if self.token.is_empty() {
            command
        } else {
            command.with_env("GH_TOKEN", self.token.expose())
        }
    }
}

impl RepositoryDataSource for GhCliSource<'_> {
    fn list_contributors(&self, org: &str, repo: &str) -> Result<String> {
        let command = self.command(self.contributors_command_line(org, repo));
        let output = run_command(self.system, &command).ok_or_else(|| {
            ContribError::command(format!(
                "Unable to fetch contributor data for [{org}/{repo}] from GitHub API. Please check the GitHub Organization [{org}] and Repository [{repo}] IDs."
            ))
        })?;
        Ok(output.stdout)
    }

    fn get_user(&self, login: &str) -> Result<String> {
        let command = self.command(Self::user_command_line(login));
        let output = run_command(self.system, &command).ok_or_else(|| {
            ContribError::command(format!(
                "Unable to fetch user [{login}] data from GitHub API."
            ))
        })?;
        Ok(output.stdout)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::system::{CommandOutput, MockSystem};

    #[test]
    fn contributors_request_is_quoted_and_paginated() {
        let system = MockSystem::new();
        let source = GhCliSource::new(&system, Token::new("t"), 100, 1);

        assert_eq!(
            source.contributors_command_line("apache", "cassandra"),
            "gh api --paginate --method GET -H \"Accept: application/vnd.github+json\" -H \"X-GitHub-Api-Version: 2022-11-28\" \"/repos/apache/cassandra/contributors?anon=1&per_page=100&page=1\""
        );
    }

    #[test]
    fn token_travels_in_environment_only() {
        let line = GhCliSource::user_command_line("alice");
        let system = MockSystem::new().with_command(&line, CommandOutput::success("{\"login\":\"alice\"}"));
        let source = GhCliSource::new(&system, Token::new("ghp_secret"), 100, 1);

        let body = source.get_user("alice").unwrap();
        assert_eq!(body, "{\"login\":\"alice\"}");

        let history = system.command_history();
        assert_eq!(history.len(), 1);
        assert!(!history[0].line.contains("ghp_secret"));
        assert_eq!(
            history[0].envs,
            vec![("GH_TOKEN".to_owned(), "ghp_secret".to_owned())]
        );
        assert!(!format!("{:?}", history[0]).contains("ghp_secret"));
    }

    #[test]
    fn failed_request_is_a_command_error() {
        let system = MockSystem::new();
        let source = GhCliSource::new(&system, Token::new(""), 100, 1);

        let err = source.list_contributors("o", "r").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContribError>(),
            Some(ContribError::Command { .. })
        ));
        assert!(system.command_history()[0].envs.is_empty());
    }
}
