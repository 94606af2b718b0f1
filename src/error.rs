use nix::errno::Errno;
use nix::unistd::Pid;
use thiserror::Error;

/// A line or value that cannot become a [`Command`](crate::command::Command).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("argument contains an interior NUL byte: {0:?}")]
    InteriorNul(String),
}

/// Failure of a single launch. None of these abort the prompt loop.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Command(#[from] CommandError),
    /// The child process could not be created; nothing was waited for.
    #[error("fork failed: {0}")]
    Fork(#[source] Errno),
    /// Waiting failed. The interrupt disposition was already restored.
    #[error("waiting for child {pid} failed: {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: Errno,
    },
}
