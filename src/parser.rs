use crate::command::Command;
use crate::error::CommandError;

/// Splits one input line into a [`Command`].
///
/// Tokens are separated by runs of whitespace. There is no quoting, escaping,
/// globbing or variable expansion: every non-whitespace run is taken literally.
///
/// # Arguments
///
/// * `line` - A single line of input, with or without its trailing newline.
///
/// # Returns
///
/// * `Result<Command, CommandError>` - The first token as the executable and the
///   rest as arguments, or [`CommandError::Empty`] when the line has no tokens.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let executable = tokens.next().ok_or(CommandError::Empty)?;
    Command::new(executable, tokens)
}
