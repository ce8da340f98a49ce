//! File dialog rendering
//!
//! Row layout inside the box comes from `DialogLayout`: title border, current
//! directory, listing, error or hint line, name field, bottom border.

use crate::core::dialog::{DialogLayout, DialogMode, FileDialog};
use crate::core::utf8;
use crate::terminal::color::Palette;
use crate::terminal::display::{Cell, ScreenBuffer};

const NAME_LABEL: &str = "Name: ";

pub struct DialogRenderer;

impl DialogRenderer {
    /// Draw the dialog and return the screen cell for the text cursor
    /// (inside the name field)
    pub fn render(
        screen: &mut ScreenBuffer,
        dialog: &FileDialog,
        layout: &DialogLayout,
        palette: &Palette,
    ) -> (usize, usize) {
        let fg = palette.dialog_fg;
        let bg = palette.dialog_bg;
        let border = palette.dialog_border;
        let left = layout.left;
        let right = layout.left + layout.width;
        let inner_left = left + 1;
        let inner_right = right.saturating_sub(1);
        let bottom = layout.top + layout.height.saturating_sub(1);

        for y in layout.top..=bottom {
            let (l, fill, r) = if y == layout.top {
                ('┌', '─', '┐')
            } else if y == bottom {
                ('└', '─', '┘')
            } else {
                ('│', ' ', '│')
            };
            screen.set(left as u16, y as u16, Cell::new(l, border, bg));
            screen.fill(inner_left, inner_right, y, fill, if fill == ' ' { fg } else { border }, bg);
            screen.set(inner_right as u16, y as u16, Cell::new(r, border, bg));
        }

        let title = format!(" {} ", dialog.mode.title());
        screen.put_str(left + 2, layout.top, inner_right, &title, border, bg);

        let dir = dialog.dir.display().to_string();
        let avail = inner_right.saturating_sub(inner_left + 1);
        screen.put_str(inner_left + 1, layout.dir_row(), inner_right, &tail(&dir, avail), fg, bg);

        let list_top = layout.list_top();
        for row in 0..layout.list_rows() {
            let idx = dialog.scroll + row;
            let Some(entry) = dialog.entries.get(idx) else {
                break;
            };
            let y = list_top + row;
            let selected = idx == dialog.selected;
            let (efg, ebg) = if selected {
                (palette.selection_fg, palette.selection_bg)
            } else if entry.is_dir {
                (palette.directory, bg)
            } else {
                (fg, bg)
            };
            if selected {
                screen.fill(inner_left, inner_right, y, ' ', efg, ebg);
            }
            screen.put_str(inner_left + 1, y, inner_right, &entry.display_name(), efg, ebg);
        }

        let message_row = layout.message_row();
        match dialog.error.as_deref() {
            Some(error) => {
                screen.put_str(inner_left + 1, message_row, inner_right, error, palette.error, bg);
            }
            None => {
                let hint = match dialog.mode {
                    DialogMode::Open => "Enter open  Esc cancel",
                    DialogMode::Save => "Enter save  Esc cancel",
                };
                screen.put_str(inner_left + 1, message_row, inner_right, hint, border, bg);
            }
        }

        // Name field, scrolled so the cursor stays inside the box
        let name_row = layout.name_row();
        let field_start = screen.put_str(inner_left + 1, name_row, inner_right, NAME_LABEL, fg, bg);
        let field_width = inner_right.saturating_sub(field_start + 1).max(1);
        let cursor_visual = utf8::visual_width_up_to(&dialog.name, dialog.name_cursor, 1);
        let skip = cursor_visual.saturating_sub(field_width - 1);
        let mut visual = 0;
        let shown: String = dialog
            .name
            .chars()
            .filter(|c| {
                let start = visual;
                visual += utf8::char_width(*c);
                start >= skip
            })
            .collect();
        screen.put_str(field_start, name_row, field_start + field_width, &shown, fg, bg);

        (field_start + cursor_visual - skip, name_row)
    }
}

/// Last `width` columns of `text`, with a leading ellipsis when cut
fn tail(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(utf8::char_width).sum();
    if total <= width {
        return text.to_string();
    }
    let mut kept = Vec::new();
    let mut used = 1;
    for c in text.chars().rev() {
        let w = utf8::char_width(c);
        if used + w > width {
            break;
        }
        used += w;
        kept.push(c);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, Key};

    fn setup() -> (tempfile::TempDir, FileDialog) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        let dialog = FileDialog::new(DialogMode::Save, dir.path(), false);
        (dir, dialog)
    }

    #[test]
    fn test_listing_rows() {
        let (_dir, dialog) = setup();
        let layout = DialogLayout::compute(80, 24);
        let mut screen = ScreenBuffer::new(80, 24);
        DialogRenderer::render(&mut screen, &dialog, &layout, &Palette::default());

        let top = layout.list_top() as u16;
        assert!(screen.row_text(top).contains(".."));
        assert!(screen.row_text(top + 1).contains("sub/"));
        assert!(screen.row_text(top + 2).contains("a.txt"));
        assert!(screen.row_text(layout.top as u16).contains("Save File"));
    }

    #[test]
    fn test_cursor_follows_typed_name() {
        let (_dir, mut dialog) = setup();
        let layout = DialogLayout::compute(80, 24);
        let mut screen = ScreenBuffer::new(80, 24);
        let (x0, y) = DialogRenderer::render(&mut screen, &dialog, &layout, &Palette::default());
        assert_eq!(y, layout.name_row());

        for c in "new.txt".chars() {
            dialog.handle_key(&InputEvent::new(Key::Char(c)));
        }
        let (x1, _) = DialogRenderer::render(&mut screen, &dialog, &layout, &Palette::default());
        assert_eq!(x1, x0 + 7);
        assert!(screen.row_text(y as u16).contains("Name: new.txt"));
    }

    #[test]
    fn test_tail_truncates_from_left() {
        assert_eq!(tail("/home/user", 20), "/home/user");
        assert_eq!(tail("/very/long/path/name", 6), "…/name");
    }
}
