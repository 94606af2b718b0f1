use crate::command::{Command, CommandFactory, ExitOutcome};
use crate::error::CommandError;
use crate::parser;
use crate::state::ShellState;
use log::{debug, info};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate: BuiltinCommand and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal interactive interpreter: one line, one command, one child.
///
/// The interpreter keeps a [`ShellState`] and a list of [`CommandFactory`] objects
/// that are queried in order to create a command by name. See [`Default`] for the
/// factories included out of the box.
///
/// Example
/// ```
/// use minish::{ExitOutcome, Interpreter};
/// let mut sh = Interpreter::default();
/// let outcome = sh.execute_line("true").unwrap();
/// assert_eq!(outcome, Some(ExitOutcome::Exited(0)));
/// ```
pub struct Interpreter {
    state: ShellState,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            state: ShellState::new(),
            commands,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Run a single parsed command.
    ///
    /// Returns how the command ended, or an error if it could not be launched
    /// or waited for.
    pub fn run(&mut self, command: Command) -> anyhow::Result<ExitOutcome> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&command) {
                return cmd.execute(&mut self.state);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", command.executable()))
    }

    /// Tokenize and run one line. Blank lines run nothing and return `None`.
    pub fn execute_line(&mut self, line: &str) -> anyhow::Result<Option<ExitOutcome>> {
        let command = match parser::parse_command(line) {
            Ok(command) => command,
            Err(CommandError::Empty) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let outcome = self.run(command)?;
        debug!("{outcome}");
        Ok(Some(outcome))
    }

    /// Read-Eval-Print Loop.
    ///
    /// Errors from a single line are reported and the loop keeps prompting. Stops
    /// after `exit`, at end of input, or when the line editor is interrupted.
    pub fn repl(&mut self, prompt: &str) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.state.should_exit {
            match rl.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    if let Err(err) = self.execute_line(&line) {
                        eprintln!("minish: {err:#}");
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    info!("end of input");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - built-in: `exit`
    /// - external command launcher
    fn default() -> Self {
        use crate::builtin::Exit;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
