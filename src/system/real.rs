//! Real system implementation using `std` and `dialoguer`

use super::{CommandOutput, ShellCommand, System};
use dialoguer::{Input, Password};
use std::env::VarError;
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use std::process::{Command, Stdio};

/// Production implementation of System trait
///
/// This implementation directly delegates to the standard library's
/// environment, filesystem and process functions.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RealSystem {
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }

    fn os_name(&self) -> String {
        std::env::consts::OS.to_owned()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn run_shell(&self, command: &ShellCommand) -> io::Result<CommandOutput> {
        let (shell, shell_flag) = get_shell_command();

        let mut child = Command::new(shell)
            .arg(shell_flag)
            .arg(&command.line)
            .envs(command.envs.iter().map(|(key, value)| (key, value)))
            .stdin(if command.input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(input) = command.input.as_ref()
            && let Some(mut stdin) = child.stdin.take()
        {
            stdin.write_all(input.as_bytes())?;
            // stdin is dropped here so the child sees EOF
        }

        let output = child.wait_with_output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn prompt_line(&self, prompt: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
    }

    fn prompt_secret(&self, prompt: &str) -> io::Result<String> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(io::Error::other)
    }
}

/// Get the appropriate shell for the current platform
const fn get_shell_command() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}
