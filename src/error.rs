//! Error types shared by the core and both front-ends.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Editor error
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("cannot open device or special file: {}", .0.display())]
    SpecialFile(PathBuf),

    #[error("config line {line}: {message}")]
    Config { line: usize, message: String },

    #[error("{0}")]
    Cli(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[cfg(feature = "gui")]
    #[error("GUI error: {0}")]
    Gui(String),
}

impl EditorError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_includes_path() {
        let err = EditorError::io(
            "/tmp/missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("/tmp/missing.txt"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_config_error_message() {
        let err = EditorError::Config {
            line: 3,
            message: "unknown directive 'sett'".to_string(),
        };
        assert_eq!(err.to_string(), "config line 3: unknown directive 'sett'");
    }
}
