use crate::command::ExitCode;

/// Mutable session state shared between the prompt loop and the commands it runs.
///
/// - `should_exit`: set by the `exit` builtin; the loop stops before the next prompt.
/// - `exit_status`: status the shell process itself exits with.
#[derive(Debug, Clone, Default)]
pub struct ShellState {
    pub should_exit: bool,
    pub exit_status: ExitCode,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop and exit with `status`.
    pub fn request_exit(&mut self, status: ExitCode) {
        self.should_exit = true;
        self.exit_status = status;
    }
}
