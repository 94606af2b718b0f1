use anyhow::{Context, Result};
use argh::FromArgs;
use env_logger::Env;
use minish::Interpreter;

#[derive(FromArgs)]
/// A minimal interactive command interpreter.
struct Args {
    #[argh(switch, short = 'v')]
    /// log launches and waits at debug level.
    verbose: bool,

    #[argh(option, short = 'c')]
    /// run a single command line and exit with its status.
    command: Option<String>,

    #[argh(option, default = "String::from(\"> \")")]
    /// prompt shown before each line.
    prompt: String,
}

fn run(args: Args) -> Result<i32> {
    let mut sh = Interpreter::default();

    if let Some(line) = args.command {
        let outcome = sh.execute_line(&line)?;
        if sh.state().should_exit {
            return Ok(sh.state().exit_status);
        }
        return Ok(outcome.map_or(0, |outcome| outcome.status_code()));
    }

    sh.repl(&args.prompt).context("line editor failed")?;
    Ok(sh.state().exit_status)
}

fn main() {
    let args: Args = argh::from_env();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Fatal error: {err:#}");
            std::process::exit(1);
        }
    }
}
