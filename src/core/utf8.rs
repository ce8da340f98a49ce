//! Display-width helpers for laying text out on a monospace cell grid.
//!
//! Columns in the editor are counted in chars; these helpers convert between
//! a char column and the visual column it lands on once tabs and wide
//! characters are expanded.

use unicode_width::UnicodeWidthChar;

/// Display width of a single character.
/// 0 for control characters, 1 for most text, 2 for wide CJK and emoji.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Width a character occupies when it starts at `visual_x`
pub fn advance(c: char, visual_x: usize, tab_width: usize) -> usize {
    if c == '\t' {
        let tab_width = tab_width.max(1);
        (visual_x / tab_width + 1) * tab_width - visual_x
    } else {
        char_width(c)
    }
}

/// Visual width of `text` up to (not including) the char at `char_idx`
pub fn visual_width_up_to(text: &str, char_idx: usize, tab_width: usize) -> usize {
    let mut visual_x = 0;
    for c in text.chars().take(char_idx) {
        visual_x += advance(c, visual_x, tab_width);
    }
    visual_x
}

/// Char column whose cell covers `target` visual column.
/// Clicking past the end of the line lands on the end of the line.
pub fn char_col_at_visual(text: &str, target: usize, tab_width: usize) -> usize {
    let mut visual_x = 0;
    for (i, c) in text.chars().enumerate() {
        let w = advance(c, visual_x, tab_width);
        if target < visual_x + w.max(1) {
            return i;
        }
        visual_x += w;
    }
    text.chars().count()
}
