//! Parent-side wait for the one outstanding child.

use crate::command::{ExitCode, ExitOutcome};
use crate::error::LaunchError;
use crate::signal;
use log::{debug, trace, warn};
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::Pid;

/// The running child created by a successful fork.
///
/// Not `Clone`: [`await_child`] consumes it once the child has been reaped.
#[derive(Debug, PartialEq, Eq)]
pub struct ChildHandle(Pid);

impl ChildHandle {
    pub(crate) fn new(pid: Pid) -> Self {
        Self(pid)
    }

    pub fn pid(&self) -> Pid {
        self.0
    }
}

/// Termination status collected by `waitpid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationStatus {
    Exited(ExitCode),
    Signaled { signal: Signal, core_dumped: bool },
}

impl From<TerminationStatus> for ExitOutcome {
    fn from(status: TerminationStatus) -> Self {
        match status {
            TerminationStatus::Exited(code) => ExitOutcome::Exited(code),
            TerminationStatus::Signaled { signal, .. } => ExitOutcome::Signaled(signal),
        }
    }
}

/// Blocks until the child behind `handle` terminates.
///
/// `SIGINT` is ignored by the caller for the duration of the wait so that an
/// interactive interrupt reaches the foreground child only. The previous
/// disposition is back in place before this returns, including on error.
pub fn await_child(handle: ChildHandle) -> Result<TerminationStatus, LaunchError> {
    let pid = handle.pid();
    let _interrupts = match signal::ignore_interrupts() {
        Ok(guard) => Some(guard),
        Err(errno) => {
            warn!("could not ignore SIGINT while waiting for {pid}: {errno}");
            None
        }
    };

    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(TerminationStatus::Exited(code)),
            Ok(WaitStatus::Signaled(_, signal, core_dumped)) => {
                debug!("child {pid} killed by {}", signal.as_str());
                return Ok(TerminationStatus::Signaled {
                    signal,
                    core_dumped,
                });
            }
            Ok(other) => trace!("child {pid} not terminated yet: {other:?}"),
            Err(source) => return Err(LaunchError::Wait { pid, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::tests::set_interrupt_handler;
    use crate::signal::{Disposition, interrupt_disposition};
    use crate::test_support::serial;
    use nix::errno::Errno;
    use nix::sys::signal::SigHandler;
    use nix::libc;
    use nix::unistd::{ForkResult, fork};

    fn fork_exiting_with(code: i32) -> ChildHandle {
        match unsafe { fork() }.unwrap() {
            ForkResult::Child => unsafe { libc::_exit(code) },
            ForkResult::Parent { child } => ChildHandle::new(child),
        }
    }

    #[test]
    fn test_collects_exit_code_of_the_awaited_child() {
        let _lock = serial();
        let status = await_child(fork_exiting_with(42)).unwrap();
        assert_eq!(status, TerminationStatus::Exited(42));
        assert_eq!(ExitOutcome::from(status), ExitOutcome::Exited(42));
    }

    #[test]
    fn test_waits_for_the_handle_not_any_child() {
        let _lock = serial();
        let first = fork_exiting_with(1);
        let second = fork_exiting_with(2);

        assert_eq!(await_child(second).unwrap(), TerminationStatus::Exited(2));
        assert_eq!(await_child(first).unwrap(), TerminationStatus::Exited(1));
    }

    #[test]
    fn test_wait_failure_restores_disposition() {
        let _lock = serial();
        set_interrupt_handler(SigHandler::SigDfl);

        let handle = fork_exiting_with(0);
        let pid = handle.pid();
        await_child(handle).unwrap();

        // Already reaped: the second wait has nothing to collect.
        let err = await_child(ChildHandle::new(pid)).unwrap_err();
        assert!(matches!(err, LaunchError::Wait { source: Errno::ECHILD, .. }));
        assert_eq!(interrupt_disposition().unwrap(), Disposition::Default);
    }
}
