//! Fork/exec of one external command.

use crate::command::{Command, ExitOutcome};
use crate::error::LaunchError;
use crate::wait::{self, ChildHandle};
use log::{debug, warn};
use nix::libc;
use nix::unistd::{ForkResult, execvp, fork, getpid, write};
use std::ffi::CString;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Exit status of a child whose `execvp` failed. Indistinguishable from a
/// program that exits with the same code on its own.
pub const EXEC_FAILURE_STATUS: i32 = 255;

/// Serialises launches: at most one child exists and the `SIGINT`
/// disposition has a single writer.
static LAUNCH: Mutex<()> = Mutex::new(());

/// Which side of the fork the current process is on.
enum Continuation {
    Parent(ChildHandle),
    Child,
}

impl Continuation {
    fn from_fork(result: nix::Result<ForkResult>) -> Result<Self, LaunchError> {
        match result {
            Ok(ForkResult::Parent { child }) => Ok(Continuation::Parent(ChildHandle::new(child))),
            Ok(ForkResult::Child) => Ok(Continuation::Child),
            Err(errno) => Err(LaunchError::Fork(errno)),
        }
    }
}

/// Everything the child needs, prepared before forking so the child does not
/// allocate before exec.
struct ExecRequest {
    argv: Vec<CString>,
    diagnostic_prefix: String,
}

impl ExecRequest {
    fn new(command: &Command) -> Result<Self, LaunchError> {
        Ok(Self {
            argv: command.argv()?,
            diagnostic_prefix: format!("{}: ", command.executable()),
        })
    }

    /// Replaces the process image, or reports the OS error and exits with
    /// [`EXEC_FAILURE_STATUS`]. Never returns to the caller.
    ///
    /// The error text is nix's `Errno::desc` table, which mirrors glibc's
    /// `strerror` messages.
    fn exec_or_exit(&self) -> ! {
        let Err(errno) = execvp(&self.argv[0], &self.argv);
        // Raw writes: the std stderr lock may be held by another parent thread.
        let stderr = io::stderr();
        let _ = write(&stderr, self.diagnostic_prefix.as_bytes());
        let _ = write(&stderr, errno.desc().as_bytes());
        let _ = write(&stderr, b"\n");
        // SAFETY: _exit skips atexit handlers and std buffer flushes, which
        // belong to the parent's copy of the process state.
        unsafe { libc::_exit(EXEC_FAILURE_STATUS) }
    }
}

/// Forks with `fork` and sends the child straight into `request`. Only the
/// parent returns.
fn spawn_child(
    request: &ExecRequest,
    fork: impl FnOnce() -> nix::Result<ForkResult>,
) -> Result<ChildHandle, LaunchError> {
    match Continuation::from_fork(fork())? {
        Continuation::Child => request.exec_or_exit(),
        Continuation::Parent(handle) => Ok(handle),
    }
}

fn launch_with(
    command: &Command,
    fork: impl FnOnce() -> nix::Result<ForkResult>,
) -> Result<ExitOutcome, LaunchError> {
    let _serial = LAUNCH.lock().unwrap_or_else(PoisonError::into_inner);
    let request = ExecRequest::new(command)?;
    debug!(
        "[{}] command is: file = {}, args = {:?}",
        getpid(),
        command.executable(),
        command.arguments()
    );
    if let Err(err) = io::stdout().flush() {
        warn!("could not flush stdout before fork: {err}");
    }

    let handle = spawn_child(&request, fork)?;
    let pid = handle.pid();
    debug!("[{}] forked child {pid}", getpid());
    let status = wait::await_child(handle)?;
    debug!("[{}] child {pid} finished: {status:?}", getpid());
    Ok(status.into())
}

/// Runs `command` as a foreground child and waits for it.
///
/// The executable is looked up through `PATH` unless it contains a `/`.
/// An executable that cannot be started shows up as
/// `ExitOutcome::Exited(EXEC_FAILURE_STATUS)` plus a diagnostic on stderr,
/// not as an error.
pub fn launch(command: &Command) -> Result<ExitOutcome, LaunchError> {
    // SAFETY: the child side of the fork runs only exec_or_exit, which calls
    // execvp, write and _exit.
    launch_with(command, || unsafe { fork() })
}
