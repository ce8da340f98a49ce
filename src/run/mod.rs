//! Front-end selection and the two event loops.

mod tui;

#[cfg(feature = "gui")]
mod gui;

use std::io::IsTerminal;

use tracing::info;

use crate::cli::ForcedMode;
use crate::config::Config;
use crate::error::{EditorError, Result};

pub use tui::run_terminal_mode;

#[cfg(feature = "gui")]
pub use gui::run_gui_mode;

#[cfg(not(feature = "gui"))]
pub fn run_gui_mode(_config: &Config) -> Result<()> {
    Err(EditorError::Cli(
        "GUI mode requires the 'gui' feature to be enabled. \
         Rebuild with: cargo build --features gui"
            .into(),
    ))
}

/// Editor front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Terminal,
    Gui,
}

/// Pick the front-end for this process.
pub fn detect_mode(forced: Option<ForcedMode>) -> Result<EditorMode> {
    let is_stdin_tty = std::io::stdin().is_terminal();
    detect_mode_internal(forced, is_stdin_tty, cfg!(feature = "gui"), |k| {
        std::env::var(k).ok()
    })
}

/// Mode detection with the environment injected.
///
/// A GUI is used when it is built in and a display is available (always on
/// macOS and Windows); otherwise the terminal, which needs a tty on stdin.
pub fn detect_mode_internal<F>(
    forced: Option<ForcedMode>,
    is_stdin_tty: bool,
    gui_built: bool,
    get_env: F,
) -> Result<EditorMode>
where
    F: Fn(&str) -> Option<String>,
{
    let terminal = || {
        if is_stdin_tty {
            Ok(EditorMode::Terminal)
        } else {
            Err(EditorError::Cli("stdin is not a terminal".into()))
        }
    };

    match forced {
        Some(ForcedMode::Terminal) => terminal(),
        Some(ForcedMode::Gui) if gui_built => Ok(EditorMode::Gui),
        Some(ForcedMode::Gui) => Err(EditorError::Cli(
            "GUI mode requires the 'gui' feature to be enabled".into(),
        )),
        None => {
            let has_display = cfg!(any(target_os = "macos", target_os = "windows"))
                || get_env("DISPLAY").is_some_and(|v| !v.is_empty())
                || get_env("WAYLAND_DISPLAY").is_some_and(|v| !v.is_empty());
            if gui_built && has_display {
                Ok(EditorMode::Gui)
            } else {
                terminal()
            }
        }
    }
}

/// Run the editor in `mode` until Exit
pub fn run(mode: EditorMode, config: &Config) -> Result<()> {
    info!(?mode, "starting quill {}", env!("CARGO_PKG_VERSION"));
    match mode {
        EditorMode::Terminal => run_terminal_mode(config),
        EditorMode::Gui => run_gui_mode(config),
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    fn mock_env<'a>(vars: &'a [(&str, &str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_display_selects_gui() {
        let env = mock_env(&[("WAYLAND_DISPLAY", "wayland-0")]);
        assert_eq!(detect_mode_internal(None, true, true, env).unwrap(), EditorMode::Gui);
    }

    #[test]
    fn test_terminal_fallback() {
        let env = mock_env(&[]);
        assert_eq!(
            detect_mode_internal(None, true, true, env).unwrap(),
            EditorMode::Terminal
        );
        // Display present but GUI not built
        let env = mock_env(&[("DISPLAY", ":0")]);
        assert_eq!(
            detect_mode_internal(None, true, false, env).unwrap(),
            EditorMode::Terminal
        );
    }

    #[test]
    fn test_no_tty_no_display_fails() {
        assert!(detect_mode_internal(None, false, true, mock_env(&[])).is_err());
    }

    #[test]
    fn test_forced_modes() {
        let env = mock_env(&[("DISPLAY", ":0")]);
        assert_eq!(
            detect_mode_internal(Some(ForcedMode::Terminal), true, true, &env).unwrap(),
            EditorMode::Terminal
        );
        assert!(detect_mode_internal(Some(ForcedMode::Terminal), false, true, &env).is_err());
        assert_eq!(
            detect_mode_internal(Some(ForcedMode::Gui), false, true, &env).unwrap(),
            EditorMode::Gui
        );
        assert!(detect_mode_internal(Some(ForcedMode::Gui), true, false, &env).is_err());
    }
}
