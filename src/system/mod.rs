//! System abstraction for environment, filesystem and process operations
//!
//! This module provides a unified trait for all external system interactions,
//! allowing for easy testing with mock implementations.

use std::env::VarError;
use std::fmt;
use std::io;
use std::path::Path;

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// A command line to run through the host shell
#[derive(Clone, Default)]
pub struct ShellCommand {
    /// Full command text handed to the shell
    pub line: String,
    /// Text written to the child's stdin
    pub input: Option<String>,
    /// Extra environment variables for the child process
    pub envs: Vec<(String, String)>,
}

impl ShellCommand {
    /// Create a command from its full command-line text
    #[must_use]
    pub fn new<S: Into<String>>(line: S) -> Self {
        Self {
            line: line.into(),
            input: None,
            envs: Vec::new(),
        }
    }

    /// Feed `input` to the command's stdin
    #[must_use]
    pub fn with_input<S: Into<String>>(mut self, input: S) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Set an environment variable for the child process only
    #[must_use]
    pub fn with_env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

// Environment values may hold credentials, so only their names are shown.
impl fmt::Debug for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_keys: Vec<&str> = self.envs.iter().map(|(key, _)| key.as_str()).collect();
        f.debug_struct("ShellCommand")
            .field("line", &self.line)
            .field("input", &self.input)
            .field("envs", &env_keys)
            .finish()
    }
}

/// Captured result of a finished shell command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful output with the given stdout
    #[must_use]
    pub fn success<S: Into<String>>(stdout: S) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given exit code and stderr
    #[must_use]
    pub fn failure<S: Into<String>>(code: i32, stderr: S) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status 0
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Unified trait for system operations
///
/// This trait abstracts all interactions with the operating system,
/// including environment variables, files, child processes and the
/// interactive terminal.
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std` and `dialoguer`
/// - `MockSystem`: Test implementation using in-memory storage and scripted responses
pub trait System {
    // ==================== Environment Operations ====================

    /// Get an environment variable
    fn env_var(&self, key: &str) -> Result<String, VarError>;

    /// Identifier of the host operating system (`linux`, `macos`, `windows`, ...)
    fn os_name(&self) -> String;

    // ==================== Filesystem Operations ====================

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write bytes to a file, creating or truncating it
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    // ==================== Process Operations ====================

    /// Run a command line through the host shell and wait for it to finish
    ///
    /// Returns an error only when the process could not be started; a
    /// non-zero exit is reported through [`CommandOutput::code`].
    fn run_shell(&self, command: &ShellCommand) -> io::Result<CommandOutput>;

    // ==================== Terminal Operations ====================

    /// Prompt for a line of text
    fn prompt_line(&self, prompt: &str) -> io::Result<String>;

    /// Prompt for a secret without echoing the input
    fn prompt_secret(&self, prompt: &str) -> io::Result<String>;
}
