use crate::command::{Command, CommandFactory, ExecutableCommand, ExitCode, ExitOutcome};
use crate::interpreter::Factory;
use crate::state::ShellState;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::{self, Write};

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without forking.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "exit".
    fn name() -> &'static str;

    /// Executes the command, writing any output to `stdout`.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, state: &mut ShellState) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, state: &mut ShellState) -> Result<ExitOutcome> {
        let mut stdout = io::stdout().lock();
        let code = match T::execute(*self, &mut stdout, state) {
            Ok(code) => code,
            Err(e) => {
                writeln!(stdout, "{e}")?;
                1
            }
        };
        Ok(ExitOutcome::Exited(code))
    }
}

/// Usage text or a parse error produced by argh instead of a command.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, _state: &mut ShellState) -> Result<ExitOutcome> {
        writeln!(io::stdout(), "{}", self.output.trim_end())?;
        Ok(ExitOutcome::Exited(if self.is_error { 1 } else { 0 }))
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, command: &Command) -> Option<Box<dyn ExecutableCommand>> {
        if command.executable() != T::name() {
            return None;
        }
        let args: Vec<&str> = command.arguments().iter().map(String::as_str).collect();
        Some(match T::from_args(&[T::name()], &args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        })
    }
}

#[derive(FromArgs)]
/// Exit the shell.
pub struct Exit {
    #[argh(positional)]
    /// status to exit with, 0 when omitted.
    pub code: Option<u8>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, stdout: &mut dyn Write, state: &mut ShellState) -> Result<ExitCode> {
        writeln!(stdout, "exiting!")?;
        let code = ExitCode::from(self.code.unwrap_or(0));
        state.request_exit(code);
        Ok(code)
    }
}
