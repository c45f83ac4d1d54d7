//! aicommit - CLI entry point.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use aicommit::{App, AppError, Config, OllamaBackend, RunOutcome, ShellRunner, TerminalPrompter};

/// Exit status after a user interrupt.
const INTERRUPTED_EXIT: u8 = 130;

/// Generate a commit message for the staged changes with a local LLM.
#[derive(Parser, Debug)]
#[command(name = "aicommit")]
#[command(about = "Generate commit messages for staged changes with a local LLM")]
#[command(version)]
struct Cli {
    /// Log composed commands, the diff and backend details
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the streamed message
    let default_filter = if cli.debug { "aicommit=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = Config::new(cli.debug);

    // Ctrl-C is checked first so it wins over the failure of a child it killed
    let result = tokio::select! {
        biased;
        _ = tokio::signal::ctrl_c() => Err(AppError::Interrupted.into()),
        result = run(&config) => result,
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if is_interrupt(&e) => {
            println!("\n❌ AI commit exited.");
            ExitCode::from(INTERRUPTED_EXIT)
        }
        Err(e) => {
            eprintln!("❌ Unexpected error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<RunOutcome> {
    let shell = ShellRunner::new(config.debug);
    let backend = OllamaBackend::from_config(config);
    let prompter = TerminalPrompter;

    let mut stdout = io::stdout();
    let outcome = App::new(config, &shell, &backend, &prompter)
        .run(&mut stdout)
        .await?;

    Ok(outcome)
}

fn is_interrupt(err: &anyhow::Error) -> bool {
    err.downcast_ref::<AppError>()
        .is_some_and(AppError::is_interrupt)
}
