//! quill - a minimal text editor
//!
//! This is the main entry point. It parses CLI arguments, loads the
//! configuration and hands off to the terminal or GUI front-end.

use std::process::ExitCode;

use quill::cli::{Cli, CliAction, USAGE};
use quill::config::{Config, config_path};
use quill::error::{EditorError, Result};
use quill::{logging, run, user_config};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("quill: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let cli = match Cli::parse()? {
        CliAction::Run(cli) => cli,
        CliAction::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliAction::Version => {
            println!("quill {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    // Built-in defaults, then the user's file on top
    let mut config = Config::default();
    user_config::configure(&mut config);
    match &cli.config {
        Some(path) => {
            if !path.is_file() {
                return Err(EditorError::Cli(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            config.load_file(path)?;
        }
        None => {
            if let Some(path) = config_path(|name| std::env::var(name).ok()) {
                if path.is_file() {
                    config.load_file(&path)?;
                }
            }
        }
    }

    logging::init(&config)?;

    let mode = run::detect_mode(cli.mode)?;
    run::run(mode, &config)
}
