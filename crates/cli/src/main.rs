//! wev CLI - run shell actions when files change

use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod cmd;
mod exit;
mod logging;
mod registrar;

/// wev - run shell actions when watched files change
#[derive(Parser)]
#[command(name = "wev")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file
    #[arg(short, long)]
    config: PathBuf,

    /// Directory to be watched, recursively (repeatable)
    #[arg(short = 'd', long = "directory")]
    directories: Vec<PathBuf>,

    /// Validate the config, print its actions and exit
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Held until exit so buffered log lines are flushed
    let _log_guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {:#}", "[error]".red(), e);
            return ExitCode::FAILURE;
        }
    };

    let result = if cli.check {
        cmd::check::run(&cli.config)
    } else {
        cmd::watch::run(&cli.config, &cli.directories).await
    };

    let code = match result {
        Ok(code) => code,
        Err(fatal) => {
            eprintln!("{} {:#}", "[error]".red(), fatal.error);
            fatal.code
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
