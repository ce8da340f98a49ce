//! Command-line argument parsing for quill.
//!
//! The editor always starts with an empty buffer; files are opened from the
//! File menu, so positional arguments are rejected.

use std::path::PathBuf;

use crate::error::{EditorError, Result};

pub const USAGE: &str = "\
quill - a minimal text editor

Usage: quill [OPTIONS]

Options:
  -g, --gui          Force the GUI window
  -t, --terminal     Force the terminal front-end
  -c, --config PATH  Read settings from PATH
  -h, --help         Show this help message
  -V, --version      Show version";

/// Front-end forced on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedMode {
    Gui,
    Terminal,
}

/// Command-line interface configuration.
#[derive(Debug, Default, PartialEq)]
pub struct Cli {
    pub mode: Option<ForcedMode>,
    /// Config file given with `--config`
    pub config: Option<PathBuf>,
}

/// What `main` should do after parsing
#[derive(Debug, PartialEq)]
pub enum CliAction {
    Run(Cli),
    Help,
    Version,
}

impl Cli {
    /// Parse the process arguments
    pub fn parse() -> Result<CliAction> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse arguments (without the program name)
    pub fn parse_from<I, S>(args: I) -> Result<CliAction>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-g" | "--gui" => cli.force(ForcedMode::Gui)?,
                "-t" | "--terminal" => cli.force(ForcedMode::Terminal)?,
                "-c" | "--config" => match args.next() {
                    Some(path) => cli.config = Some(PathBuf::from(path)),
                    None => return Err(EditorError::Cli("--config requires a value".into())),
                },
                "-h" | "--help" => return Ok(CliAction::Help),
                "-V" | "--version" => return Ok(CliAction::Version),
                flag if flag.starts_with('-') => {
                    return Err(EditorError::Cli(format!(
                        "Unknown flag: {}. Use --help for usage.",
                        flag
                    )));
                }
                other => {
                    return Err(EditorError::Cli(format!(
                        "unexpected argument `{}`: open files from the File menu",
                        other
                    )));
                }
            }
        }

        Ok(CliAction::Run(cli))
    }

    fn force(&mut self, mode: ForcedMode) -> Result<()> {
        match self.mode {
            Some(existing) if existing != mode => Err(EditorError::Cli(
                "--gui and --terminal are mutually exclusive".into(),
            )),
            _ => {
                self.mode = Some(mode);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Cli {
        match Cli::parse_from(args.iter().copied()).unwrap() {
            CliAction::Run(cli) => cli,
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(run(&[]), Cli::default());
    }

    #[test]
    fn test_flags() {
        let cli = run(&["-t", "--config", "/tmp/q.conf"]);
        assert_eq!(cli.mode, Some(ForcedMode::Terminal));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/q.conf")));
        assert_eq!(run(&["--gui"]).mode, Some(ForcedMode::Gui));
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(Cli::parse_from(["-h"]).unwrap(), CliAction::Help);
        assert_eq!(Cli::parse_from(["--version", "-x"]).unwrap(), CliAction::Version);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(Cli::parse_from(["notes.txt"]), Err(EditorError::Cli(_))));
        assert!(matches!(Cli::parse_from(["--bogus"]), Err(EditorError::Cli(_))));
        assert!(matches!(Cli::parse_from(["-c"]), Err(EditorError::Cli(_))));
        assert!(matches!(Cli::parse_from(["-g", "-t"]), Err(EditorError::Cli(_))));
    }
}
