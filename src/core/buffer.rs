//! Buffer: the document text and nothing else.
//! No cursor or scrolling state (those belong to Window).
//!
//! Text lives in a ropey Rope. Positions in the public API are char indices,
//! which is what the cursor works in.

use ropey::Rope;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{EditorError, Result};

/// Outcome of loading a file into a buffer
#[derive(Debug)]
pub struct Loaded {
    pub buffer: Buffer,
    /// True if invalid UTF-8 sequences were replaced with U+FFFD
    pub lossy: bool,
}

/// Buffer: pure data structure holding the document text
#[derive(Debug, Default)]
pub struct Buffer {
    rope: Rope,
    /// Dirty flag (true if edited since the last Open or Save)
    pub modified: bool,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            modified: false,
        }
    }

    /// Create a buffer from a string
    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self {
            rope: Rope::from_str(content.as_ref()),
            modified: false,
        }
    }

    /// Read a whole file into a new buffer.
    ///
    /// Nothing is returned until the read has fully succeeded, so a failed
    /// Open never leaves a half-filled buffer behind.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Loaded> {
        let path = validate_file_path(path.as_ref())?;
        let bytes = fs::read(&path).map_err(|e| EditorError::io(&path, e))?;

        let (text, lossy) = match String::from_utf8(bytes) {
            Ok(s) => (s, false),
            Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
        };

        Ok(Loaded {
            buffer: Self::from_string(text),
            lossy,
        })
    }

    /// Write the whole buffer to `path`, overwriting it.
    ///
    /// Content goes to a temp file in the target directory first and is
    /// renamed over the target once synced. A symlink is written through:
    /// the file it points to is replaced and the link stays.
    /// Returns the number of bytes written.
    pub fn save_to(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(EditorError::NotAFile(path.to_path_buf()));
        }

        // Fails for a file that does not exist yet (or a dangling link)
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| EditorError::io(path, e))?;

        for chunk in self.rope.chunks() {
            temp_file
                .write_all(chunk.as_bytes())
                .map_err(|e| EditorError::io(path, e))?;
        }
        temp_file.flush().map_err(|e| EditorError::io(path, e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| EditorError::io(path, e))?;

        // Keep the permissions of a file we are overwriting
        if let Ok(meta) = fs::metadata(&target) {
            if let Err(e) = fs::set_permissions(temp_file.path(), meta.permissions()) {
                warn!(path = %target.display(), "cannot keep file permissions: {}", e);
            }
        }

        temp_file
            .persist(&target)
            .map_err(|e| EditorError::io(path, e.error))?;

        self.modified = false;
        Ok(self.rope.len_bytes())
    }

    // ==================== Content Access ====================

    /// Total length in bytes
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Total length in chars
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Entire content as a string
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Number of lines. An empty buffer has one line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line terminator (`\n`, `\r\n` or `\r`).
    /// ropey is built without `unicode_lines`, so no other char ends a line.
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        let s = s.strip_suffix('\n').unwrap_or(&s);
        let s = s.strip_suffix('\r').unwrap_or(s);
        Some(s.to_string())
    }

    /// Number of chars on a line, excluding the line terminator
    pub fn line_len_chars(&self, line_idx: usize) -> usize {
        match self.line(line_idx) {
            Some(l) => l.chars().count(),
            None => 0,
        }
    }

    /// Char index of the start of a line (clamped to the last line)
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        let line_idx = line_idx.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line_idx)
    }

    /// Char index for a (line, column) pair, clamped to the buffer
    pub fn char_index(&self, line: usize, col: usize) -> usize {
        let start = self.line_to_char(line);
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        start + col.min(self.line_len_chars(line))
    }

    // ==================== Editing Operations ====================

    /// Insert text at a char index
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let char_idx = char_idx.min(self.rope.len_chars());
        self.rope.insert(char_idx, text);
        self.modified = true;
    }

    /// Insert a single character at a char index
    pub fn insert_char(&mut self, char_idx: usize, ch: char) {
        let char_idx = char_idx.min(self.rope.len_chars());
        self.rope.insert_char(char_idx, ch);
        self.modified = true;
    }

    /// Delete `len` chars starting at a char index
    pub fn delete(&mut self, char_idx: usize, len: usize) {
        let total = self.rope.len_chars();
        if len == 0 || char_idx >= total {
            return;
        }
        let end = (char_idx + len).min(total);
        self.rope.remove(char_idx..end);
        self.modified = true;
    }

    /// Character at a char index
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        self.rope.get_char(char_idx)
    }
}

/// Resolve a path for reading and reject things that are not regular files.
///
/// Opening a FIFO or device would block the UI thread forever.
pub fn validate_file_path(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| EditorError::io(path, e))?
            .join(path)
    };

    let metadata = fs::metadata(&path).map_err(|e| EditorError::io(&path, e))?;
    if metadata.is_dir() {
        return Err(EditorError::NotAFile(path));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        let ft = metadata.file_type();
        if ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket() {
            return Err(EditorError::SpecialFile(path));
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = Buffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.line_count(), 1); // Empty buffer has 1 line
        assert!(!buf.modified);
    }

    #[test]
    fn test_insert_and_delete() {
        let mut buf = Buffer::new();
        buf.insert(0, "Hello, World!");
        assert_eq!(buf.to_string(), "Hello, World!");
        assert!(buf.modified);

        buf.delete(0, 7);
        assert_eq!(buf.to_string(), "World!");
    }

    #[test]
    fn test_delete_past_end_is_clamped() {
        let mut buf = Buffer::from_string("abc");
        buf.delete(1, 100);
        assert_eq!(buf.to_string(), "a");
        buf.delete(5, 1);
        assert_eq!(buf.to_string(), "a");
    }

    #[test]
    fn test_line_operations() {
        let buf = Buffer::from_string("Line 1\nLine 2\r\nLine 3");

        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line(0), Some("Line 1".to_string()));
        assert_eq!(buf.line(1), Some("Line 2".to_string()));
        assert_eq!(buf.line(2), Some("Line 3".to_string()));
        assert_eq!(buf.line(3), None);

        assert_eq!(buf.line_to_char(1), 7);
        assert_eq!(buf.line_len_chars(1), 6);
    }

    #[test]
    fn test_char_index_round_trip() {
        let buf = Buffer::from_string("héllo\nwörld");
        let idx = buf.char_index(1, 2);
        assert_eq!(buf.char_at(idx), Some('r'));
        assert_eq!(idx, buf.line_to_char(1) + 2);
        // Column past the end of the line clamps to the line end
        assert_eq!(buf.char_index(0, 99), 5);
    }

    #[test]
    fn test_save_and_load_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        let content = "one\r\ntwo\r\n\tthree\n";

        let mut buf = Buffer::from_string(content);
        buf.insert_char(0, 'x');
        buf.delete(0, 1);
        let written = buf.save_to(&path).unwrap();
        assert_eq!(written, content.len());
        assert!(!buf.modified);
        assert_eq!(std::fs::read(&path).unwrap(), content.as_bytes());

        let loaded = Buffer::from_file(&path).unwrap();
        assert!(!loaded.lossy);
        assert_eq!(loaded.buffer.to_string(), content);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Buffer::from_file(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
    }

    #[test]
    fn test_load_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Buffer::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, EditorError::NotAFile(_)));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = Buffer::from_string("data");
        let result = buf.save_to(dir.path().join("no/such/dir/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_file_with_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.txt");
        std::fs::write(&path, b"Hello \xFF\xFE World").unwrap();

        let loaded = Buffer::from_file(&path).unwrap();
        assert!(loaded.lossy);
        let content = loaded.buffer.to_string();
        assert!(content.contains("Hello"));
        assert!(content.contains("World"));
        assert!(content.contains('\u{FFFD}'));
    }

    #[test]
    fn test_form_feed_is_not_a_line_break() {
        let buf = Buffer::from_string("a\u{0C}b\u{2028}c\nd");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(0), Some("a\u{0C}b\u{2028}c".to_string()));
        assert_eq!(buf.line_len_chars(0), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_load_device_fails() {
        let err = Buffer::from_file("/dev/null").unwrap_err();
        assert!(matches!(err, EditorError::SpecialFile(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_writes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        std::fs::write(&real, "old").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut buf = Buffer::from_string("new");
        buf.save_to(&link).unwrap();

        let link_meta = std::fs::symlink_metadata(&link).unwrap();
        assert!(link_meta.file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "new");
        assert_eq!(std::fs::read_to_string(&link).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.sh");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o750)).unwrap();

        let mut buf = Buffer::from_string("new");
        buf.save_to(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }
}
