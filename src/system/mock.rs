//! Mock system implementation for testing

use super::{CommandOutput, ShellCommand, System};
use std::collections::{HashMap, VecDeque};
use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Directory relative paths resolve against
const MOCK_ROOT: &str = "/";

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides an in-memory filesystem and environment, scripted
/// shell command responses and scripted prompt answers, perfect for fast,
/// isolated unit tests without side effects.
///
/// Commands are matched on their exact command-line text. A command can be
/// given a sequence of responses; each call consumes one and the last one
/// repeats. Unscripted commands fail with exit code 127.
///
/// # Example
/// ```
/// use ghcontrib::system::{mock::MockSystem, CommandOutput, ShellCommand, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_env("GH_ORG", "apache")
///     .with_file("/work/data.json", b"[]")
///     .with_command("gh --version", CommandOutput::success("gh version 2.40.0"));
///
/// assert_eq!(system.env_var("GH_ORG").unwrap(), "apache");
/// assert!(system.exists(Path::new("/work/data.json")));
/// assert!(system.run_shell(&ShellCommand::new("gh --version")).unwrap().succeeded());
/// assert_eq!(system.commands_run(), vec!["gh --version".to_owned()]);
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    env_vars: HashMap<String, String>,
    os_name: String,
    files: HashMap<PathBuf, Vec<u8>>,
    responses: HashMap<String, VecDeque<CommandOutput>>,
    history: Vec<ShellCommand>,
    prompt_answers: VecDeque<String>,
    prompts_shown: Vec<String>,
}

impl MockSystem {
    /// Create a new `MockSystem` with default state
    ///
    /// Relative paths resolve against `/` and the OS name is `linux`.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                env_vars: HashMap::new(),
                os_name: "linux".to_owned(),
                files: HashMap::new(),
                responses: HashMap::new(),
                history: Vec::new(),
                prompt_answers: VecDeque::new(),
                prompts_shown: Vec::new(),
            })),
        }
    }

    fn with_state<F: FnOnce(&mut MockSystemState)>(self, update: F) -> Self {
        {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            update(&mut state);
        }
        self
    }

    fn read_state<T, F: FnOnce(&MockSystemState) -> T>(&self, read: F) -> T {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        read(&state)
    }

    /// Set an environment variable (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_env(self, key: &str, value: &str) -> Self {
        self.with_state(|state| {
            state.env_vars.insert(key.to_owned(), value.to_owned());
        })
    }

    /// Set the reported operating system (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_os(self, os_name: &str) -> Self {
        self.with_state(|state| state.os_name = os_name.to_owned())
    }

    /// Add a file with contents (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> Self {
        let path = path.as_ref().to_path_buf();
        self.with_state(|state| {
            state.files.insert(path, contents.to_vec());
        })
    }

    /// Script a single response for a command line (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_command(self, line: &str, output: CommandOutput) -> Self {
        self.with_command_sequence(line, vec![output])
    }

    /// Script successive responses for a command line (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_command_sequence(self, line: &str, outputs: Vec<CommandOutput>) -> Self {
        self.with_state(|state| {
            state
                .responses
                .insert(line.to_owned(), outputs.into_iter().collect());
        })
    }

    /// Queue an answer for the next interactive prompt (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_prompt_answer(self, answer: &str) -> Self {
        self.with_state(|state| state.prompt_answers.push_back(answer.to_owned()))
    }

    /// Command lines run so far, in order
    #[must_use]
    pub fn commands_run(&self) -> Vec<String> {
        self.read_state(|state| state.history.iter().map(|cmd| cmd.line.clone()).collect())
    }

    /// Full commands run so far, including their environment
    #[must_use]
    pub fn command_history(&self) -> Vec<ShellCommand> {
        self.read_state(|state| state.history.clone())
    }

    /// Prompts shown so far, in order
    #[must_use]
    pub fn prompts_shown(&self) -> Vec<String> {
        self.read_state(|state| state.prompts_shown.clone())
    }

    /// Contents of an in-memory file, if present
    #[must_use]
    pub fn file_contents<P: AsRef<Path>>(&self, path: P) -> Option<Vec<u8>> {
        self.read_state(|state| state.files.get(path.as_ref()).cloned())
    }

    fn resolve(path: &Path) -> PathBuf {
        Path::new(MOCK_ROOT).join(path)
    }

    fn next_prompt_answer(&self, prompt: &str) -> io::Result<String> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.prompts_shown.push(prompt.to_owned());
        state.prompt_answers.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("No scripted answer for prompt: {prompt}"),
            )
        })
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        self.read_state(|state| state.env_vars.get(key).cloned())
            .ok_or(VarError::NotPresent)
    }

    #[inline]
    fn os_name(&self) -> String {
        self.read_state(|state| state.os_name.clone())
    }

    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self
            .read_state(|state| state.files.get(&Self::resolve(path)).cloned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                )
            })?;
        String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {e}")))
    }

    #[inline]
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let path = Self::resolve(path);
        state.files.insert(path, contents.to_vec());
        drop(state);
        Ok(())
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        self.read_state(|state| state.files.contains_key(&Self::resolve(path)))
    }

    #[inline]
    fn run_shell(&self, command: &ShellCommand) -> io::Result<CommandOutput> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.history.push(command.clone());

        let output = match state.responses.get_mut(&command.line) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        drop(state);

        Ok(output.unwrap_or_else(|| {
            CommandOutput::failure(127, format!("sh: command not found: {}", command.line))
        }))
    }

    #[inline]
    fn prompt_line(&self, prompt: &str) -> io::Result<String> {
        self.next_prompt_answer(prompt)
    }

    #[inline]
    fn prompt_secret(&self, prompt: &str) -> io::Result<String> {
        self.next_prompt_answer(prompt)
    }
}
