//! Process-wide handling of the terminal-interrupt signal (`SIGINT`).
//!
//! The only legal transition driven by this crate is `Default -> Ignore -> Default`
//! (more precisely: prior -> `Ignore` -> prior) around one child's lifetime.
//! The change is held by an [`InterruptGuard`] which restores the prior action
//! when dropped, so every exit path out of a wait puts the disposition back.

use log::error;
use nix::errno::Errno;
use nix::libc;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use scopeguard::ScopeGuard;
use std::ptr;

/// Observable disposition of `SIGINT` for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Default,
    Ignore,
    Custom,
}

/// Restores the interrupt action it replaced when dropped.
pub(crate) type InterruptGuard = ScopeGuard<SigAction, fn(SigAction)>;

/// Reads the current `SIGINT` disposition without changing it.
pub fn interrupt_disposition() -> nix::Result<Disposition> {
    // SAFETY: an all-zero `sigaction` is a valid out-parameter, and a null `act`
    // makes the call read-only.
    let mut current: libc::sigaction = unsafe { std::mem::zeroed() };
    Errno::result(unsafe { libc::sigaction(libc::SIGINT, ptr::null(), &mut current) })?;
    Ok(match current.sa_sigaction {
        libc::SIG_DFL => Disposition::Default,
        libc::SIG_IGN => Disposition::Ignore,
        _ => Disposition::Custom,
    })
}

/// Ignores `SIGINT` until the returned guard is dropped.
///
/// Must only be called in the parent after the fork point: an ignored
/// disposition survives `execve` and would leave the child uninterruptible.
pub(crate) fn ignore_interrupts() -> nix::Result<InterruptGuard> {
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    // SAFETY: SIG_IGN installs no handler code.
    let previous = unsafe { sigaction(Signal::SIGINT, &ignore) }?;
    Ok(scopeguard::guard(previous, restore_interrupts as fn(SigAction)))
}

fn restore_interrupts(previous: SigAction) {
    // SAFETY: `previous` was returned by the kernel for this very signal.
    if let Err(errno) = unsafe { sigaction(Signal::SIGINT, &previous) } {
        error!("failed to restore SIGINT disposition: {errno}");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::serial;

    extern "C" fn noop(_: libc::c_int) {}

    pub(crate) fn set_interrupt_handler(handler: SigHandler) {
        let action = SigAction::new(handler, SaFlags::empty(), SigSet::empty());
        unsafe { sigaction(Signal::SIGINT, &action) }.unwrap();
    }

    #[test]
    fn test_guard_ignores_then_restores_default() {
        let _lock = serial();
        set_interrupt_handler(SigHandler::SigDfl);

        let guard = ignore_interrupts().unwrap();
        assert_eq!(interrupt_disposition().unwrap(), Disposition::Ignore);
        drop(guard);

        assert_eq!(interrupt_disposition().unwrap(), Disposition::Default);
    }

    #[test]
    fn test_guard_restores_custom_handler() {
        let _lock = serial();
        set_interrupt_handler(SigHandler::Handler(noop));
        assert_eq!(interrupt_disposition().unwrap(), Disposition::Custom);

        {
            let _guard = ignore_interrupts().unwrap();
            assert_eq!(interrupt_disposition().unwrap(), Disposition::Ignore);
        }

        assert_eq!(interrupt_disposition().unwrap(), Disposition::Custom);
        set_interrupt_handler(SigHandler::SigDfl);
    }

    #[test]
    fn test_guard_restores_on_unwind() {
        let _lock = serial();
        set_interrupt_handler(SigHandler::SigDfl);

        let result = std::panic::catch_unwind(|| {
            let _guard = ignore_interrupts().unwrap();
            if interrupt_disposition().unwrap() == Disposition::Ignore {
                panic!("wait blew up");
            }
        });

        assert!(result.is_err());
        assert_eq!(interrupt_disposition().unwrap(), Disposition::Default);
    }
}
