use crate::command::{Command, CommandFactory, ExecutableCommand, ExitOutcome};
use crate::interpreter::Factory;
use crate::launcher;
use crate::state::ShellState;
use anyhow::{Context, Result};

/// Command that is not a builtin: run through fork/exec.
pub struct ExternalCommand {
    command: Command,
}

impl ExternalCommand {
    pub fn new(command: Command) -> Self {
        Self { command }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    /// Accepts every name. Lookup happens in the child via `execvp`, which
    /// reports unknown programs itself.
    fn try_create(&self, command: &Command) -> Option<Box<dyn ExecutableCommand>> {
        Some(Box::new(ExternalCommand::new(command.clone())))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(self: Box<Self>, _state: &mut ShellState) -> Result<ExitOutcome> {
        launcher::launch(&self.command).with_context(|| format!("cannot run `{}`", self.command))
    }
}
