//! External command execution with diagnostic logging

use crate::system::{CommandOutput, ShellCommand, System};
use tracing::{error, info};

/// Run a command through the host shell
///
/// The full command line (and stdin text, if any) is logged before the call
/// and the exit code after it. Environment values are never logged.
///
/// Returns the output only when the command exits with status 0. A non-zero
/// exit or a failure to start the process is logged and yields `None`.
pub fn run_command(system: &dyn System, command: &ShellCommand) -> Option<CommandOutput> {
    info!(
        "Begin run command: [{}] with inputs: [{}]",
        command.line,
        command.input.as_deref().unwrap_or("")
    );

    match system.run_shell(command) {
        Ok(output) if output.succeeded() => {
            info!("Request succeeded. Returncode: 0");
            Some(output)
        }
        Ok(output) => {
            error!(
                "Error Returncode: {} and Error: {}",
                output
                    .code
                    .map_or_else(|| "terminated by signal".to_owned(), |code| code.to_string()),
                output.stderr.trim()
            );
            None
        }
        Err(err) => {
            error!("Error: failed to start [{}]: {}", command.line, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn returns_output_on_success() {
        let system =
            MockSystem::new().with_command("gh --version", CommandOutput::success("gh version 2.40.0\n"));

        let output = run_command(&system, &ShellCommand::new("gh --version"));
        assert_eq!(
            output.map(|out| out.stdout),
            Some("gh version 2.40.0\n".to_owned())
        );
    }

    #[test]
    fn returns_none_on_non_zero_exit() {
        let system = MockSystem::new()
            .with_command("gh api /users/ghost", CommandOutput::failure(1, "HTTP 404: Not Found"));

        assert!(run_command(&system, &ShellCommand::new("gh api /users/ghost")).is_none());
        assert_eq!(system.commands_run(), vec!["gh api /users/ghost".to_owned()]);
    }

    #[test]
    fn unknown_command_is_absent() {
        let system = MockSystem::new();
        assert!(run_command(&system, &ShellCommand::new("gh --version")).is_none());
    }
}
