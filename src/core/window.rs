use crate::core::buffer::Buffer;
use crate::core::utf8;

/// `Window` is the text area: a viewport into the `Buffer`.
///
/// It owns the cursor position, the scroll offsets and the viewport
/// dimensions, and performs cursor movement and edits at the cursor.
#[derive(Debug, Clone)]
pub struct Window {
    /// Cursor column position (chars, not bytes)
    pub cursor_x: usize,
    /// Cursor line position
    pub cursor_y: usize,
    /// Visual cursor column (accounts for tab width and wide chars)
    pub visual_cursor_x: usize,
    /// Vertical scroll offset (top visible line)
    pub scroll_offset: usize,
    /// Horizontal scroll offset (leftmost visible column)
    pub scroll_x: usize,
    /// Viewport width (columns)
    pub width: usize,
    /// Viewport height (rows)
    pub height: usize,
    /// Tab width for display
    pub tab_width: usize,
}

impl Window {
    pub fn new(tab_width: usize) -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            visual_cursor_x: 0,
            scroll_offset: 0,
            scroll_x: 0,
            width: 80,
            height: 24,
            tab_width: tab_width.max(1),
        }
    }

    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Put the cursor and both scroll offsets back at the origin
    pub fn reset(&mut self) {
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.visual_cursor_x = 0;
        self.scroll_offset = 0;
        self.scroll_x = 0;
    }

    /// Move cursor forward one char, wrapping to the next line
    pub fn move_forward(&mut self, buffer: &Buffer) {
        if self.cursor_x < buffer.line_len_chars(self.cursor_y) {
            self.cursor_x += 1;
        } else if self.cursor_y + 1 < buffer.line_count() {
            self.cursor_y += 1;
            self.cursor_x = 0;
        }
        self.after_move(buffer);
    }

    /// Move cursor backward one char.
    /// Returns true if moved, false if already at start.
    pub fn move_backward(&mut self, buffer: &Buffer) -> bool {
        let moved = if self.cursor_x > 0 {
            self.cursor_x -= 1;
            true
        } else if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.cursor_x = buffer.line_len_chars(self.cursor_y);
            true
        } else {
            false
        };

        if moved {
            self.after_move(buffer);
        }
        moved
    }

    pub fn move_down(&mut self, buffer: &Buffer) {
        if self.cursor_y + 1 < buffer.line_count() {
            self.cursor_y += 1;
        }
        self.after_move(buffer);
    }

    pub fn move_up(&mut self, buffer: &Buffer) {
        self.cursor_y = self.cursor_y.saturating_sub(1);
        self.after_move(buffer);
    }

    pub fn beginning_of_line(&mut self, buffer: &Buffer) {
        self.cursor_x = 0;
        self.after_move(buffer);
    }

    pub fn end_of_line(&mut self, buffer: &Buffer) {
        self.cursor_x = buffer.line_len_chars(self.cursor_y);
        self.after_move(buffer);
    }

    /// Move the cursor one page down, keeping it on screen
    pub fn page_down(&mut self, buffer: &Buffer) {
        let page = self.height.saturating_sub(1).max(1);
        let last = buffer.line_count().saturating_sub(1);
        self.cursor_y = (self.cursor_y + page).min(last);
        self.scroll_by(page as isize, buffer);
        self.after_move(buffer);
    }

    /// Move the cursor one page up, keeping it on screen
    pub fn page_up(&mut self, buffer: &Buffer) {
        let page = self.height.saturating_sub(1).max(1);
        self.cursor_y = self.cursor_y.saturating_sub(page);
        self.scroll_by(-(page as isize), buffer);
        self.after_move(buffer);
    }

    /// Place the cursor at a cell inside the viewport (mouse click).
    /// `col` and `row` are relative to the text area.
    pub fn click_at(&mut self, buffer: &Buffer, col: usize, row: usize) {
        let last = buffer.line_count().saturating_sub(1);
        self.cursor_y = (self.scroll_offset + row).min(last);
        let line_text = buffer.line(self.cursor_y).unwrap_or_default();
        self.cursor_x = utf8::char_col_at_visual(&line_text, self.scroll_x + col, self.tab_width);
        self.after_move(buffer);
    }

    /// Scroll by a number of lines (positive = down, negative = up).
    /// The cursor is dragged along so it stays inside the viewport.
    pub fn scroll_by(&mut self, lines: isize, buffer: &Buffer) {
        let max_scroll = buffer.line_count().saturating_sub(self.height);

        if lines > 0 {
            self.scroll_offset = self
                .scroll_offset
                .saturating_add(lines as usize)
                .min(max_scroll);
        } else {
            self.scroll_offset = self.scroll_offset.saturating_sub(lines.unsigned_abs());
        }

        if self.cursor_y < self.scroll_offset {
            self.cursor_y = self.scroll_offset;
        } else if self.cursor_y >= self.scroll_offset + self.height {
            self.cursor_y = self.scroll_offset + self.height - 1;
        }
        self.ensure_cursor_valid(buffer);
        self.update_visual_cursor(buffer);
    }

    /// Visible line range (start, end exclusive)
    pub fn visible_range(&self, buffer: &Buffer) -> (usize, usize) {
        let start = self.scroll_offset;
        let end = (self.scroll_offset + self.height).min(buffer.line_count());
        (start, end)
    }

    /// Update the visual cursor position based on content width (tabs, wide chars)
    pub fn update_visual_cursor(&mut self, buffer: &Buffer) {
        let line_text = buffer.line(self.cursor_y).unwrap_or_default();
        self.visual_cursor_x = utf8::visual_width_up_to(&line_text, self.cursor_x, self.tab_width);
    }

    /// Clamp the cursor to the buffer
    pub fn ensure_cursor_valid(&mut self, buffer: &Buffer) {
        self.cursor_y = self.cursor_y.min(buffer.line_count().saturating_sub(1));
        self.cursor_x = self.cursor_x.min(buffer.line_len_chars(self.cursor_y));
    }

    /// Scroll just enough to keep the cursor in the viewport
    pub fn ensure_cursor_visible(&mut self) {
        if self.cursor_y < self.scroll_offset {
            self.scroll_offset = self.cursor_y;
        } else if self.cursor_y >= self.scroll_offset + self.height {
            self.scroll_offset = self.cursor_y + 1 - self.height;
        }

        if self.visual_cursor_x < self.scroll_x {
            self.scroll_x = self.visual_cursor_x;
        } else if self.visual_cursor_x >= self.scroll_x + self.width {
            self.scroll_x = self.visual_cursor_x + 1 - self.width;
        }
    }

    fn after_move(&mut self, buffer: &Buffer) {
        self.ensure_cursor_valid(buffer);
        self.update_visual_cursor(buffer);
        self.ensure_cursor_visible();
    }

    /// Char index of the cursor in the buffer
    pub fn char_offset(&self, buffer: &Buffer) -> usize {
        buffer.char_index(self.cursor_y, self.cursor_x)
    }

    // ==================== Editing at the cursor ====================

    /// Insert a character at the cursor position
    pub fn insert_char(&mut self, buffer: &mut Buffer, c: char) {
        let pos = self.char_offset(buffer);
        buffer.insert_char(pos, c);

        if c == '\n' {
            self.cursor_y += 1;
            self.cursor_x = 0;
        } else {
            self.cursor_x += 1;
        }
        self.after_move(buffer);
    }

    /// Delete before the cursor (Backspace).
    /// At the start of a line this joins it with the previous line,
    /// removing a whole `\r\n` terminator when there is one.
    pub fn delete_backward(&mut self, buffer: &mut Buffer) {
        let pos = self.char_offset(buffer);
        if pos == 0 {
            return;
        }

        if self.cursor_x == 0 {
            self.cursor_y -= 1;
            self.cursor_x = buffer.line_len_chars(self.cursor_y);
            let start = self.char_offset(buffer);
            buffer.delete(start, pos - start);
        } else {
            self.cursor_x -= 1;
            buffer.delete(pos - 1, 1);
        }
        self.after_move(buffer);
    }

    /// Delete at the cursor (Delete).
    /// At the end of a line this removes the whole line terminator.
    pub fn delete_forward(&mut self, buffer: &mut Buffer) {
        let pos = self.char_offset(buffer);
        if self.cursor_x < buffer.line_len_chars(self.cursor_y) {
            buffer.delete(pos, 1);
        } else if self.cursor_y + 1 < buffer.line_count() {
            let next = buffer.line_to_char(self.cursor_y + 1);
            buffer.delete(pos, next - pos);
        }
        self.after_move(buffer);
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_new() {
        let window = Window::new(4);
        assert_eq!(window.cursor_x, 0);
        assert_eq!(window.cursor_y, 0);
        assert_eq!(window.scroll_offset, 0);
        assert_eq!(window.width, 80);
        assert_eq!(window.height, 24);
        assert_eq!(window.tab_width, 4);
    }

    #[test]
    fn test_movement_wraps_lines() {
        let buffer = Buffer::from_string("ab\ncd");
        let mut window = Window::new(4);

        window.end_of_line(&buffer);
        assert_eq!(window.cursor_x, 2);
        window.move_forward(&buffer);
        assert_eq!((window.cursor_x, window.cursor_y), (0, 1));
        assert!(window.move_backward(&buffer));
        assert_eq!((window.cursor_x, window.cursor_y), (2, 0));

        window.beginning_of_line(&buffer);
        assert!(!window.move_backward(&buffer));
    }

    #[test]
    fn test_vertical_move_clamps_column() {
        let buffer = Buffer::from_string("long line\nab");
        let mut window = Window::new(4);
        window.end_of_line(&buffer);
        window.move_down(&buffer);
        assert_eq!((window.cursor_x, window.cursor_y), (2, 1));
        window.move_down(&buffer);
        assert_eq!(window.cursor_y, 1);
    }

    #[test]
    fn test_typing_and_newline() {
        let mut buffer = Buffer::new();
        let mut window = Window::new(4);
        for c in "hi\nyo".chars() {
            window.insert_char(&mut buffer, c);
        }
        assert_eq!(buffer.to_string(), "hi\nyo");
        assert_eq!((window.cursor_x, window.cursor_y), (2, 1));
    }

    #[test]
    fn test_backspace_joins_crlf_lines() {
        let mut buffer = Buffer::from_string("ab\r\ncd");
        let mut window = Window::new(4);
        window.move_down(&buffer);
        window.delete_backward(&mut buffer);
        assert_eq!(buffer.to_string(), "abcd");
        assert_eq!((window.cursor_x, window.cursor_y), (2, 0));
    }

    #[test]
    fn test_delete_forward_at_line_end() {
        let mut buffer = Buffer::from_string("ab\r\ncd");
        let mut window = Window::new(4);
        window.end_of_line(&buffer);
        window.delete_forward(&mut buffer);
        assert_eq!(buffer.to_string(), "abcd");

        window.end_of_line(&buffer);
        window.delete_forward(&mut buffer);
        assert_eq!(buffer.to_string(), "abcd");
    }

    #[test]
    fn test_cursor_scrolls_into_view() {
        let text: String = (0..50).map(|i| format!("line {}\n", i)).collect();
        let buffer = Buffer::from_string(text);
        let mut window = Window::new(4);
        window.set_dimensions(20, 10);
        for _ in 0..15 {
            window.move_down(&buffer);
        }
        assert_eq!(window.cursor_y, 15);
        assert_eq!(window.scroll_offset, 6);
        let (start, end) = window.visible_range(&buffer);
        assert!(start <= 15 && 15 < end);
    }

    #[test]
    fn test_click_places_cursor() {
        let buffer = Buffer::from_string("a\tb\nsecond");
        let mut window = Window::new(4);
        window.click_at(&buffer, 4, 0);
        assert_eq!((window.cursor_x, window.cursor_y), (2, 0));
        window.click_at(&buffer, 99, 5);
        assert_eq!((window.cursor_x, window.cursor_y), (6, 1));
    }

    #[test]
    fn test_page_down_and_up() {
        let text: String = (0..100).map(|i| format!("{}\n", i)).collect();
        let buffer = Buffer::from_string(text);
        let mut window = Window::new(4);
        window.set_dimensions(20, 10);
        window.page_down(&buffer);
        assert_eq!(window.cursor_y, 9);
        window.page_up(&buffer);
        assert_eq!(window.cursor_y, 0);
        assert_eq!(window.scroll_offset, 0);
    }

    #[test]
    fn test_form_feed_stays_inside_the_line() {
        let mut buffer = Buffer::from_string("a\u{0C}b");
        let mut window = Window::new(4);
        window.end_of_line(&buffer);
        assert_eq!((window.cursor_x, window.cursor_y), (3, 0));

        window.insert_char(&mut buffer, 'X');
        assert_eq!(buffer.to_string(), "a\u{0C}bX");
        assert_eq!((window.cursor_x, window.cursor_y), (4, 0));

        window.beginning_of_line(&buffer);
        window.move_forward(&buffer);
        window.delete_forward(&mut buffer);
        assert_eq!(buffer.to_string(), "abX");
    }
}
