//! A minimal interactive command interpreter.
//!
//! Each input line is split on whitespace into an executable name and its
//! arguments. The executable is started as a child process with fork/exec and
//! the interpreter blocks until it terminates. While the child runs, the
//! interpreter ignores the terminal-interrupt signal (`SIGINT`) so that Ctrl-C
//! reaches the child and not the shell; the previous disposition is restored
//! as soon as the child has been reaped.
//!
//! The main entry point is [`Interpreter`]. The process machinery is also usable
//! on its own through [`launch`], [`await_child`] and [`interrupt_disposition`].

mod builtin;
pub mod command;
pub mod error;
mod external;
mod interpreter;
pub mod launcher;
mod parser;
pub mod signal;
pub mod state;
pub mod wait;

pub use command::{Command, ExitOutcome};
pub use error::{CommandError, LaunchError};
pub use interpreter::Interpreter;
pub use launcher::launch;
pub use parser::parse_command;
pub use signal::{Disposition, interrupt_disposition};
pub use wait::{ChildHandle, TerminationStatus, await_child};
