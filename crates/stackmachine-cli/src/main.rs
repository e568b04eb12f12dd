use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stackmachine_cli::output::{
    format_trace_step, render_error, render_outcome, trace, OutputFormat,
};
use stackmachine_cli::terminal::ColorPalette;
use stackmachine_lib::evaluate;

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate bounded RPN stack machine commands")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a command and print the value left on top of the stack.
    Eval {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Print the stack after every token (to stderr).
        #[arg(long)]
        trace: bool,
        /// Command words, joined with spaces. `-` or nothing reads stdin.
        #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
        words: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Eval {
            format,
            trace,
            words,
        } => handle_eval(&words, format, trace),
    }
}

fn handle_eval(words: &[String], format: OutputFormat, trace_steps: bool) -> Result<ExitCode> {
    let command = read_command(words)?;
    let palette = ColorPalette::detect();
    debug!(tokens = command.split_whitespace().count(), "evaluating command");

    let outcome = if trace_steps {
        let (steps, outcome) = trace(&command);
        for step in &steps {
            eprintln!("{}", format_trace_step(step, &palette));
        }
        outcome
    } else {
        evaluate(&command)
    };

    if let Some(rendered) = render_outcome(&outcome, format) {
        println!("{}", rendered);
    }

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("{}", render_error(&err, &palette));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn read_command(words: &[String]) -> Result<String> {
    match words {
        [] => read_stdin(),
        [only] if only == "-" => read_stdin(),
        _ => Ok(words.join(" ")),
    }
}

fn read_stdin() -> Result<String> {
    let mut command = String::new();
    io::stdin()
        .read_to_string(&mut command)
        .context("failed to read command from stdin")?;
    Ok(command)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
