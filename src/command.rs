use crate::error::CommandError;
use crate::state::ShellState;
use anyhow::Result;
use nix::sys::signal::Signal;
use std::ffi::CString;
use std::fmt;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// One resolved command line: the program to run and its arguments.
///
/// `executable` is never empty. Construct through [`Command::new`] or
/// [`parse_command`](crate::parse_command).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    executable: String,
    arguments: Vec<String>,
}

impl Command {
    pub fn new(
        executable: impl Into<String>,
        arguments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, CommandError> {
        let executable = executable.into();
        if executable.is_empty() {
            return Err(CommandError::Empty);
        }
        Ok(Self {
            executable,
            arguments: arguments.into_iter().map(Into::into).collect(),
        })
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Argument vector handed to `execvp`: the executable name duplicated as
    /// argument zero, followed by the arguments in order.
    pub fn argv(&self) -> Result<Vec<CString>, CommandError> {
        std::iter::once(&self.executable)
            .chain(&self.arguments)
            .map(|arg| CString::new(arg.as_str()).map_err(|_| CommandError::InteriorNul(arg.clone())))
            .collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.executable)?;
        for arg in &self.arguments {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a launched command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The program exited on its own with this code.
    Exited(ExitCode),
    /// The program was killed by a signal.
    Signaled(Signal),
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }

    /// Exit code if the program exited normally.
    pub fn code(&self) -> Option<ExitCode> {
        match self {
            ExitOutcome::Exited(code) => Some(*code),
            ExitOutcome::Signaled(_) => None,
        }
    }

    /// Shell-style status: the exit code, or `128 + signo` for a signal death.
    pub fn status_code(&self) -> ExitCode {
        match self {
            ExitOutcome::Exited(code) => *code,
            ExitOutcome::Signaled(signal) => 128 + *signal as i32,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Exited(code) => write!(f, "exited with status {code}"),
            ExitOutcome::Signaled(signal) => write!(f, "terminated by {}", signal.as_str()),
        }
    }
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// Implemented by builtins via a blanket impl and by external commands.
pub trait ExecutableCommand {
    fn execute(self: Box<Self>, state: &mut ShellState) -> Result<ExitOutcome>;
}

/// Factory that tries to create a command from a parsed [`Command`].
///
/// Returns `None` when the factory doesn't recognize the name.
pub trait CommandFactory {
    fn try_create(&self, command: &Command) -> Option<Box<dyn ExecutableCommand>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_executable() {
        let err = Command::new("", ["x"]).unwrap_err();
        assert_eq!(err, CommandError::Empty);
    }

    #[test]
    fn test_argv_duplicates_executable_as_argument_zero() {
        let cmd = Command::new("echo", ["hello"]).unwrap();
        let argv: Vec<String> = cmd
            .argv()
            .unwrap()
            .into_iter()
            .map(|arg| arg.into_string().unwrap())
            .collect();
        assert_eq!(argv, vec!["echo", "hello"]);
    }

    #[test]
    fn test_argv_without_arguments() {
        let cmd = Command::new("true", Vec::<String>::new()).unwrap();
        assert_eq!(cmd.argv().unwrap(), vec![CString::new("true").unwrap()]);
    }

    #[test]
    fn test_argv_rejects_interior_nul() {
        let cmd = Command::new("echo", ["a\0b"]).unwrap();
        assert_eq!(
            cmd.argv().unwrap_err(),
            CommandError::InteriorNul("a\0b".to_string())
        );
    }

    #[test]
    fn test_status_code_for_signal_death() {
        assert_eq!(ExitOutcome::Signaled(Signal::SIGINT).status_code(), 130);
        assert_eq!(ExitOutcome::Exited(3).status_code(), 3);
        assert_eq!(ExitOutcome::Signaled(Signal::SIGKILL).code(), None);
        assert!(ExitOutcome::Exited(0).success());
        assert!(!ExitOutcome::Exited(1).success());
    }

    #[test]
    fn test_display() {
        let cmd = Command::new("ls", ["-l", "/tmp"]).unwrap();
        assert_eq!(cmd.to_string(), "ls -l /tmp");
        assert_eq!(
            ExitOutcome::Signaled(Signal::SIGINT).to_string(),
            "terminated by SIGINT"
        );
    }
}
