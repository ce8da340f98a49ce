//! File dialog
//!
//! The chooser behind File ▸ Open and File ▸ Save: a modal panel drawn over
//! the text area that browses the real filesystem.
//!
//! - Listing order is deterministic: `..` first, then directories, then files,
//!   each group sorted by name
//! - Enter on a directory enters it, Enter on a file (or a typed name) confirms
//! - In Save mode a typed name that does not exist yet is accepted
//! - Esc or Ctrl-G cancels
//!
//! All state is explicit so the dialog can be driven entirely from tests.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::core::input::{InputEvent, Key};

/// Step used by PageUp/PageDown when no viewport height is known
const DEFAULT_PAGE_ROWS: usize = 10;

/// Which operation the dialog is choosing a file for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Open,
    Save,
}

impl DialogMode {
    pub fn title(self) -> &'static str {
        match self {
            DialogMode::Open => "Open File",
            DialogMode::Save => "Save File",
        }
    }
}

/// Outcome of feeding one event to the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// Still browsing
    Continue,
    /// User chose this path
    Confirmed(PathBuf),
    Cancelled,
}

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEntry {
    /// Name as shown; lossy for names that are not valid UTF-8
    pub name: String,
    /// Name on disk
    pub os_name: OsString,
    pub is_dir: bool,
}

impl DialogEntry {
    fn parent() -> Self {
        Self {
            name: "..".to_string(),
            os_name: OsString::from(".."),
            is_dir: true,
        }
    }

    /// Name as shown in the listing (directories get a trailing slash)
    pub fn display_name(&self) -> String {
        if self.is_dir && self.name != ".." {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Read a directory into sorted dialog entries
pub fn list_directory(dir: &Path, show_hidden: bool) -> std::io::Result<Vec<DialogEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let os_name = entry.file_name();
        let name = os_name.to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        // Follow symlinks so a link to a directory can be entered
        let is_dir = match fs::metadata(entry.path()) {
            Ok(meta) => meta.is_dir(),
            Err(_) => entry.file_type().map(|t| t.is_dir()).unwrap_or(false),
        };
        entries.push(DialogEntry {
            name,
            os_name,
            is_dir,
        });
    }

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));

    if dir.parent().is_some() {
        entries.insert(0, DialogEntry::parent());
    }
    Ok(entries)
}

/// Screen placement of the dialog box, shared by drawing and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl DialogLayout {
    /// Center the box in a screen of `cols` x `rows`, below the menu bar
    /// and above the status line
    pub fn compute(cols: usize, rows: usize) -> Self {
        let width = cols.saturating_sub(4).clamp(20, 72).min(cols);
        let height = rows.saturating_sub(4).max(6).min(rows);
        let left = (cols - width) / 2;
        let top = if rows >= height + 2 { 2 } else { 0 };
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Current directory row
    pub fn dir_row(&self) -> usize {
        self.top + 1
    }

    /// First listing row
    pub fn list_top(&self) -> usize {
        self.top + 2
    }

    /// Rows available for the listing
    pub fn list_rows(&self) -> usize {
        self.height.saturating_sub(5).max(1)
    }

    /// Error/hint row
    pub fn message_row(&self) -> usize {
        self.top + self.height.saturating_sub(3)
    }

    /// File name input row
    pub fn name_row(&self) -> usize {
        self.top + self.height.saturating_sub(2)
    }

    /// Listing index under screen cell (col, row), before scrolling
    pub fn list_row_at(&self, col: usize, row: usize) -> Option<usize> {
        let inside_x = col > self.left && col + 1 < self.left + self.width;
        let inside_y = row >= self.list_top() && row < self.list_top() + self.list_rows();
        (inside_x && inside_y).then(|| row - self.list_top())
    }

    pub fn contains(&self, col: usize, row: usize) -> bool {
        col >= self.left
            && col < self.left + self.width
            && row >= self.top
            && row < self.top + self.height
    }
}

#[derive(Debug, Clone)]
pub struct FileDialog {
    pub mode: DialogMode,
    /// Directory being listed (absolute)
    pub dir: PathBuf,
    pub entries: Vec<DialogEntry>,
    /// Highlighted entry index
    pub selected: usize,
    /// First visible entry index
    pub scroll: usize,
    /// File name input
    pub name: String,
    /// Cursor position in `name` (chars)
    pub name_cursor: usize,
    /// Last listing error, shown inside the dialog
    pub error: Option<String>,
    pub show_hidden: bool,
    page_rows: usize,
}

impl FileDialog {
    /// Open a dialog listing `start_dir`
    pub fn new(mode: DialogMode, start_dir: impl AsRef<Path>, show_hidden: bool) -> Self {
        let start_dir = absolute(start_dir.as_ref());
        let mut dialog = Self {
            mode,
            dir: start_dir.clone(),
            entries: Vec::new(),
            selected: 0,
            scroll: 0,
            name: String::new(),
            name_cursor: 0,
            error: None,
            show_hidden,
            page_rows: DEFAULT_PAGE_ROWS,
        };
        if !dialog.change_dir(start_dir.clone()) {
            // Nothing listed yet: keep at least a way up
            if start_dir.parent().is_some() {
                dialog.entries = vec![DialogEntry::parent()];
            }
        }
        dialog
    }

    /// Tell the dialog how many listing rows are visible
    pub fn set_page_rows(&mut self, rows: usize) {
        self.page_rows = rows.max(1);
        self.ensure_selected_visible();
    }

    pub fn page_rows(&self) -> usize {
        self.page_rows
    }

    /// List `dir` and make it current. On failure the previous listing is kept
    /// and the error is recorded.
    pub fn change_dir(&mut self, dir: PathBuf) -> bool {
        match list_directory(&dir, self.show_hidden) {
            Ok(entries) => {
                self.dir = dir;
                self.entries = entries;
                self.selected = 0;
                self.scroll = 0;
                self.error = None;
                true
            }
            Err(e) => {
                warn!(dir = %dir.display(), "cannot list directory: {}", e);
                self.error = Some(format!("{}: {}", dir.display(), e));
                false
            }
        }
    }

    pub fn selected_entry(&self) -> Option<&DialogEntry> {
        self.entries.get(self.selected)
    }

    /// Path a confirmed name resolves to (absolute names stay as they are)
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Feed a key event to the dialog
    pub fn handle_key(&mut self, event: &InputEvent) -> DialogResult {
        match event.key {
            Key::Esc | Key::Ctrl('g') => DialogResult::Cancelled,
            Key::Enter => self.activate(),
            Key::Up => {
                self.move_selection(-1);
                DialogResult::Continue
            }
            Key::Down => {
                self.move_selection(1);
                DialogResult::Continue
            }
            Key::PageUp => {
                self.move_selection(-(self.page_rows as isize));
                DialogResult::Continue
            }
            Key::PageDown => {
                self.move_selection(self.page_rows as isize);
                DialogResult::Continue
            }
            _ => {
                self.edit_name(event);
                DialogResult::Continue
            }
        }
    }

    /// Click on listing index `idx`.
    /// A click on the already highlighted entry activates it.
    pub fn click_entry(&mut self, idx: usize) -> DialogResult {
        if idx >= self.entries.len() {
            return DialogResult::Continue;
        }
        if idx == self.selected {
            return self.activate();
        }
        self.select(idx);
        DialogResult::Continue
    }

    /// Scroll the listing with the mouse wheel (selection follows)
    pub fn scroll_by(&mut self, delta: isize) {
        self.move_selection(delta);
    }

    fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        let idx = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta as usize).min(last)
        };
        self.select(idx);
    }

    fn select(&mut self, idx: usize) {
        self.selected = idx;
        if let Some(entry) = self.entries.get(idx) {
            if entry.is_dir {
                self.set_name(String::new());
            } else {
                let name = entry.name.clone();
                self.set_name(name);
            }
        }
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.page_rows {
            self.scroll = self.selected + 1 - self.page_rows;
        }
    }

    fn set_name(&mut self, name: String) {
        self.name_cursor = name.chars().count();
        self.name = name;
    }

    /// Enter: use the typed name if there is one, else the highlighted entry
    fn activate(&mut self) -> DialogResult {
        if !self.name.is_empty() {
            let target = self.typed_target();
            if target.is_dir() {
                self.enter(target);
                return DialogResult::Continue;
            }
            return DialogResult::Confirmed(target);
        }

        let Some(entry) = self.selected_entry().cloned() else {
            return DialogResult::Continue;
        };
        if entry.is_dir {
            let target = if entry.name == ".." {
                self.dir.parent().map(Path::to_path_buf)
            } else {
                Some(self.dir.join(&entry.os_name))
            };
            if let Some(target) = target {
                self.enter(target);
            }
            DialogResult::Continue
        } else {
            DialogResult::Confirmed(self.dir.join(&entry.os_name))
        }
    }

    /// Path for the typed name. A name copied from the highlighted file
    /// uses that file's on-disk name, which may not be valid UTF-8.
    fn typed_target(&self) -> PathBuf {
        match self.selected_entry() {
            Some(entry) if !entry.is_dir && entry.name == self.name => {
                self.dir.join(&entry.os_name)
            }
            _ => self.resolve(&self.name),
        }
    }

        fn enter(&mut self, dir: PathBuf) {
        if self.change_dir(dir) {
            self.set_name(String::new());
        }
    }

    fn edit_name(&mut self, event: &InputEvent) {
        let len = self.name.chars().count();
        match event.key {
            Key::Char(c) if !event.ctrl && !event.alt && !c.is_control() => {
                let byte = byte_index(&self.name, self.name_cursor);
                self.name.insert(byte, c);
                self.name_cursor += 1;
            }
            Key::Backspace if self.name_cursor > 0 => {
                self.name_cursor -= 1;
                let byte = byte_index(&self.name, self.name_cursor);
                self.name.remove(byte);
            }
            Key::Delete if self.name_cursor < len => {
                let byte = byte_index(&self.name, self.name_cursor);
                self.name.remove(byte);
            }
            Key::Left => self.name_cursor = self.name_cursor.saturating_sub(1),
            Key::Right => self.name_cursor = (self.name_cursor + 1).min(len),
            Key::Home | Key::Ctrl('a') => self.name_cursor = 0,
            Key::End | Key::Ctrl('e') => self.name_cursor = len,
            _ => {}
        }
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
