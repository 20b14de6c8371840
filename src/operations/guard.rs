//! `gh` CLI presence check with a single automatic install attempt
//!
//! The check is a small state machine:
//!
//! | From       | Condition                                   | To         |
//! |------------|---------------------------------------------|------------|
//! | Checking   | `gh --version` succeeds                     | Ready      |
//! | Checking   | `gh --version` fails                        | Missing    |
//! | Missing    | platform can auto-install, no attempt yet   | Installing |
//! | Missing    | otherwise                                   | Failed     |
//! | Installing | install command succeeds                    | Checking   |
//! | Installing | install command fails                       | Failed     |

use crate::error::ContribError;
use crate::operations::runner::run_command;
use crate::platform::{Platform, detect_platform};
use crate::system::{ShellCommand, System};
use anyhow::Result;
use tracing::{debug, error, info, warn};

pub const GH_VERSION_COMMAND: &str = "gh --version";
pub const GH_CLI_HOME: &str = "https://cli.github.com/";
pub const GH_CLI_LATEST: &str = "https://github.com/cli/cli/releases/latest";

/// Automatic installs allowed per run
const MAX_INSTALL_ATTEMPTS: u32 = 1;

/// State of the presence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Missing,
    Installing,
    Ready,
    Failed,
}

/// Drives the presence check for one run
pub struct CliGuard<'src> {
    system: &'src dyn System,
    state: GuardState,
    platform: Option<Platform>,
    install_attempts: u32,
}

impl<'src> CliGuard<'src> {
    #[must_use]
    pub const fn new(system: &'src dyn System) -> Self {
        Self {
            system,
            state: GuardState::Checking,
            platform: None,
            install_attempts: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GuardState {
        self.state
    }

    #[must_use]
    pub const fn install_attempts(&self) -> u32 {
        self.install_attempts
    }

    /// Perform the work of the current state and move to the next one
    pub fn step(&mut self) -> GuardState {
        let next = match self.state {
            GuardState::Checking => {
                if run_command(self.system, &ShellCommand::new(GH_VERSION_COMMAND)).is_some() {
                    GuardState::Ready
                } else {
                    GuardState::Missing
                }
            }
            GuardState::Missing => {
                warn!("GitHub CLI is not installed. Please install it from {GH_CLI_HOME}");
                let platform = self
                    .platform
                    .get_or_insert_with(|| detect_platform(self.system))
                    .clone();
                print_install_guidance(&platform);

                if install_command(&platform).is_some()
                    && self.install_attempts < MAX_INSTALL_ATTEMPTS
                {
                    GuardState::Installing
                } else {
                    GuardState::Failed
                }
            }
            GuardState::Installing => {
                self.install_attempts += 1;
                let platform = self.platform.clone().unwrap_or_else(|| detect_platform(self.system));
                match install_command(&platform) {
                    Some(command) => {
                        info!("Attempting to install...");
                        if run_command(self.system, &ShellCommand::new(command)).is_some() {
                            info!("GitHub CLI installed successfully!");
                            GuardState::Checking
                        } else {
                            error!(
                                "Attempt to install failed. Please refer to above steps, install gh CLI and re-try again."
                            );
                            GuardState::Failed
                        }
                    }
                    None => GuardState::Failed,
                }
            }
            terminal @ (GuardState::Ready | GuardState::Failed) => terminal,
        };

        debug!("CLI guard: {:?} -> {:?}", self.state, next);
        self.state = next;
        next
    }

    /// Step until the check reaches `Ready` or `Failed`
    ///
    /// # Errors
    ///
    /// Returns a missing dependency error if the CLI is absent and could not
    /// be installed
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                GuardState::Ready => return Ok(()),
                GuardState::Failed => {
                    let platform = self
                        .platform
                        .as_ref()
                        .map_or_else(|| "unknown".to_owned(), ToString::to_string);
                    return Err(ContribError::missing_dependency(format!(
                        "GitHub CLI is required and could not be installed on [{platform}]. Install it from {GH_CLI_LATEST} and re-run this program."
                    ))
                    .into());
                }
                GuardState::Checking | GuardState::Missing | GuardState::Installing => {}
            }
        }
    }
}

/// Make sure the `gh` CLI can be run
///
/// # Errors
///
/// Returns a missing dependency error if the CLI is absent and could not be
/// installed
pub fn ensure_cli_available(system: &dyn System) -> Result<()> {
    info!("Begin check for GitHub CLI");
    CliGuard::new(system).run()?;
    info!("End check for GitHub CLI");
    Ok(())
}

/// Package-manager command used for the automatic install, if any
#[must_use]
pub const fn install_command(platform: &Platform) -> Option<&'static str> {
    match platform {
        Platform::MacOs => Some("brew install gh --quiet"),
        Platform::Linux | Platform::Windows | Platform::Other(_) => None,
    }
}

/// Manual install steps for a platform
#[must_use]
pub fn install_guidance(platform: &Platform) -> Vec<String> {
    match platform {
        Platform::Linux => vec![
            "Please run the following commands to install the GitHub CLI:".to_owned(),
            "\tsudo apt-key adv --keyserver keyserver.ubuntu.com --recv-key C99B11DEB97541F0"
                .to_owned(),
            "\tsudo apt-add-repository https://cli.github.com/packages".to_owned(),
            "\tsudo apt update".to_owned(),
            "\tsudo apt install gh".to_owned(),
        ],
        Platform::MacOs => vec![
            "Please run the following command to install the GitHub CLI:".to_owned(),
            "\tbrew install gh".to_owned(),
        ],
        Platform::Windows => vec![
            "Please run the following command to install the GitHub CLI:".to_owned(),
            "\twinget install --id GitHub.cli".to_owned(),
        ],
        Platform::Other(name) => vec![format!(
            "Please install the GitHub CLI from {GH_CLI_LATEST} appropriate for your OS [{name}] and re-run this program."
        )],
    }
}

fn print_install_guidance(platform: &Platform) {
    for line in install_guidance(platform) {
        info!("{}", line);
    }
}
