//! This module defines `EditorApp`, the whole state of the editor window:
//! the document buffer, the text-area view over it, the menu bar, the file
//! dialog while one is open, and the status line.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::core::buffer::Buffer;
use crate::core::command::Command;
use crate::core::dialog::{DialogLayout, DialogMode, DialogResult, FileDialog};
use crate::core::dispatcher::{DispatchResult, InputAction};
use crate::core::keymap::Keymap;
use crate::core::menu::{MENU_BAR_HEIGHT_CELLS, MenuBar};
use crate::core::window::Window;
use crate::error::Result;

/// Height of the status line in cells
pub const STATUS_HEIGHT_CELLS: usize = 1;

/// Largest accepted `tab_width` setting
pub const MAX_TAB_WIDTH: i64 = 16;

/// EditorApp: the root application state shared by both front-ends.
pub struct EditorApp {
    /// The document. Replaced wholesale by Open.
    pub buffer: Buffer,
    /// The text area (cursor and scroll state)
    pub window: Window,
    pub menu_bar: MenuBar,
    /// File dialog, while Open or Save is choosing a file
    pub dialog: Option<FileDialog>,
    /// Registry of commands implementing the Command pattern
    pub command_registry: HashMap<String, Box<dyn Command>>,
    pub keymap: Keymap,
    /// Status message shown on the bottom line
    pub message: Option<String>,
    /// Show dot-files in the file dialog
    pub show_hidden: bool,
    /// Screen size in cells (columns, rows)
    pub screen_size: (usize, usize),
    exit_requested: bool,
}

impl EditorApp {
    /// Create an editor with an empty buffer and no commands registered
    pub fn new() -> Self {
        let mut app = Self {
            buffer: Buffer::new(),
            window: Window::new(4),
            menu_bar: MenuBar::new(),
            dialog: None,
            command_registry: HashMap::new(),
            keymap: Keymap::new(),
            message: None,
            show_hidden: false,
            screen_size: (80, 24),
            exit_requested: false,
        };
        app.resize(80, 24);
        app
    }

    /// Build a ready-to-run editor from `config`: settings applied,
    /// key bindings parsed and all commands registered.
    pub fn initialize_with_config(config: &Config) -> Self {
        let mut app = Self::new();

        if let Some(tab_width) = config.get_int("tab_width") {
            app.window.tab_width = tab_width.clamp(1, MAX_TAB_WIDTH) as usize;
        }
        if let Some(show_hidden) = config.get_bool("show_hidden") {
            app.show_hidden = show_hidden;
        }

        app.keymap = Keymap::from_config(config);
        crate::core::commands::register_all(&mut app);
        app
    }

    /// Screen resized to `cols` x `rows` cells
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.screen_size = (cols, rows);
        let text_rows = rows.saturating_sub(MENU_BAR_HEIGHT_CELLS + STATUS_HEIGHT_CELLS);
        self.window.set_dimensions(cols, text_rows);
        self.window.ensure_cursor_valid(&self.buffer);
        self.window.update_visual_cursor(&self.buffer);
        self.window.ensure_cursor_visible();

        let list_rows = self.dialog_layout().list_rows();
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.set_page_rows(list_rows);
        }
    }

    /// First screen row of the text area
    pub fn text_area_top(&self) -> usize {
        MENU_BAR_HEIGHT_CELLS
    }

    /// Placement of the file dialog on the current screen
    pub fn dialog_layout(&self) -> DialogLayout {
        DialogLayout::compute(self.screen_size.0, self.screen_size.1)
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        info!("exit requested");
        self.exit_requested = true;
    }

    /// Act on what a command returned
    pub fn apply_result(&mut self, result: DispatchResult) {
        match result {
            DispatchResult::Exit => self.request_exit(),
            DispatchResult::NeedsInput(action) => self.open_dialog(action),
            DispatchResult::Info(msg) => self.message = Some(msg),
            DispatchResult::Success | DispatchResult::NotHandled => {}
        }
    }

    /// Show the file dialog for an Open or Save, starting in the current
    /// working directory
    pub fn open_dialog(&mut self, action: InputAction) {
        let start = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.open_dialog_in(action, start);
    }

    /// Show the file dialog starting in `dir`
    pub fn open_dialog_in(&mut self, action: InputAction, dir: impl AsRef<Path>) {
        let mode = match action {
            InputAction::OpenFile => DialogMode::Open,
            InputAction::SaveFile => DialogMode::Save,
        };
        self.menu_bar.close();
        let mut dialog = FileDialog::new(mode, dir, self.show_hidden);
        dialog.set_page_rows(self.dialog_layout().list_rows());
        self.dialog = Some(dialog);
    }

    /// Close the dialog and carry out what the user chose.
    /// Cancelling leaves the buffer and status untouched.
    pub fn finish_dialog(&mut self, result: DialogResult) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        match result {
            DialogResult::Continue => self.dialog = Some(dialog),
            DialogResult::Cancelled => {}
            DialogResult::Confirmed(path) => match dialog.mode {
                DialogMode::Open => {
                    if let Err(e) = self.open_file(&path) {
                        warn!(path = %path.display(), "open failed: {}", e);
                        self.message = Some(format!("Cannot open {}", e));
                    }
                }
                DialogMode::Save => {
                    if let Err(e) = self.save_file(&path) {
                        warn!(path = %path.display(), "save failed: {}", e);
                        self.message = Some(format!("Cannot save {}", e));
                    }
                }
            },
        }
    }

    /// Replace the buffer with the contents of `path`.
    ///
    /// The file is read completely before the buffer is touched; on error the
    /// buffer, cursor and status are exactly as before.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loaded = Buffer::from_file(path)?;

        self.buffer = loaded.buffer;
        self.window.reset();
        self.window.update_visual_cursor(&self.buffer);

        info!(path = %path.display(), bytes = self.buffer.len_bytes(), "opened file");
        self.message = Some(if loaded.lossy {
            warn!(path = %path.display(), "invalid UTF-8 replaced while loading");
            format!(
                "Opened {} (invalid UTF-8 replaced with U+FFFD)",
                path.display()
            )
        } else {
            format!("Opened {}", path.display())
        });
        Ok(())
    }

    /// Write the whole buffer to `path`, overwriting it. Returns bytes written.
    pub fn save_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let written = self.buffer.save_to(path)?;
        info!(path = %path.display(), bytes = written, "saved file");
        self.message = Some(format!("Wrote {} bytes to {}", written, path.display()));
        Ok(written)
    }
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_app_new() {
        let app = EditorApp::new();
        assert!(app.buffer.is_empty());
        assert!(app.dialog.is_none());
        assert!(!app.should_exit());
        assert_eq!(app.window.height, 22);
    }

    #[test]
    fn test_initialize_with_config() {
        let mut config = Config::default();
        crate::user_config::configure(&mut config);
        config.set("tab_width", 2i64);
        config.set("show_hidden", true);

        let app = EditorApp::initialize_with_config(&config);
        assert_eq!(app.window.tab_width, 2);
        assert!(app.show_hidden);
        assert!(app.command_registry.contains_key("open-file"));
    }

    #[test]
    fn test_open_replaces_buffer_and_resets_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "first\nsecond\n").unwrap();

        let mut app = EditorApp::new();
        app.buffer.insert(0, "old\nold\nold");
        app.window.move_down(&app.buffer);
        app.window.end_of_line(&app.buffer);

        app.open_file(&path).unwrap();
        assert_eq!(app.buffer.to_string(), "first\nsecond\n");
        assert_eq!((app.window.cursor_x, app.window.cursor_y), (0, 0));
        assert!(!app.buffer.modified);
        assert!(app.message.as_deref().unwrap().starts_with("Opened"));
    }

    #[test]
    fn test_failed_open_keeps_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = EditorApp::new();
        app.buffer.insert(0, "keep me");

        assert!(app.open_file(dir.path().join("missing.txt")).is_err());
        assert_eq!(app.buffer.to_string(), "keep me");
    }

    #[test]
    fn test_lossy_open_warns_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xE9\n").unwrap();

        let mut app = EditorApp::new();
        app.open_file(&path).unwrap();
        assert_eq!(app.buffer.to_string(), "caf\u{FFFD}\n");
        let message = app.message.as_deref().unwrap();
        assert!(message.starts_with("Opened"));
        assert!(message.contains("invalid UTF-8 replaced"));
    }

    #[test]
    fn test_tab_width_is_clamped() {
        let mut config = Config::default();
        config.set("tab_width", 1_000_000_000_000i64);
        let app = EditorApp::initialize_with_config(&config);
        assert_eq!(app.window.tab_width, 16);

        config.set("tab_width", -3i64);
        let app = EditorApp::initialize_with_config(&config);
        assert_eq!(app.window.tab_width, 1);
    }

    #[test]
    fn test_failed_save_reports_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = EditorApp::new();
        app.buffer.insert(0, "data");
        app.open_dialog_in(InputAction::SaveFile, dir.path());
        app.finish_dialog(DialogResult::Confirmed(dir.path().join("no/such/file")));

        assert!(app.dialog.is_none());
        assert!(app.message.as_deref().unwrap().starts_with("Cannot save"));
        assert_eq!(app.buffer.to_string(), "data");
    }

    #[test]
    fn test_apply_result() {
        let mut app = EditorApp::new();
        app.apply_result(DispatchResult::Info("hello".to_string()));
        assert_eq!(app.message.as_deref(), Some("hello"));

        app.apply_result(DispatchResult::NeedsInput(InputAction::OpenFile));
        assert_eq!(app.dialog.as_ref().map(|d| d.mode), Some(DialogMode::Open));

        app.apply_result(DispatchResult::Exit);
        assert!(app.should_exit());
    }

    #[test]
    fn test_cancel_dialog_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = EditorApp::new();
        app.buffer.insert(0, "text");
        app.message = Some("before".to_string());
        app.open_dialog_in(InputAction::OpenFile, dir.path());
        app.finish_dialog(DialogResult::Cancelled);

        assert!(app.dialog.is_none());
        assert_eq!(app.buffer.to_string(), "text");
        assert_eq!(app.message.as_deref(), Some("before"));
    }
}
