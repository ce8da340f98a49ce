//! Menubar rendering
//!
//! The bar on row 0 and, when a menu is open, its bordered dropdown under
//! the title. Geometry matches `MenuBar::hit_test`.

use crate::core::menu::{MENU_BAR_HEIGHT_CELLS, MenuBar, MenuItem};
use crate::terminal::color::Palette;
use crate::terminal::display::{Cell, ScreenBuffer};

/// Renders the menu bar
pub struct MenuRenderer;

impl MenuRenderer {
    /// Render the menu bar to a screen buffer
    pub fn render(
        buffer: &mut ScreenBuffer,
        menu_bar: &MenuBar,
        palette: &Palette,
        width: usize,
        height: usize,
    ) {
        let menu_fg = palette.menu_fg;
        let menu_bg = palette.menu_bg;
        let active_fg = palette.selection_fg;
        let active_bg = palette.selection_bg;

        // Draw menu bar background
        buffer.fill(0, width, 0, ' ', menu_fg, menu_bg);

        // Draw menu titles
        let layout = menu_bar.layout();
        for (i, (title, start, end)) in layout.iter().enumerate() {
            let is_active = menu_bar.active_menu == Some(i);
            let fg = if is_active { active_fg } else { menu_fg };
            let bg = if is_active { active_bg } else { menu_bg };

            buffer.fill(*start, *end, 0, ' ', fg, bg);
            buffer.put_str(start + 1, 0, *end, title, fg, bg);
        }

        let Some(active_idx) = menu_bar.active_menu else {
            return;
        };
        let Some((_, left, _)) = layout.get(active_idx) else {
            return;
        };
        let menu = &menu_bar.menus[active_idx];
        let left = *left;
        let right = (left + menu.render_width()).min(width);
        if right <= left + 1 {
            return;
        }
        let top = MENU_BAR_HEIGHT_CELLS;
        let bottom = top + menu.items.len() + 1;
        let border = palette.menu_fg;

        for y in top..=bottom.min(height.saturating_sub(1)) {
            let (l, fill, r) = if y == top {
                ('┌', '─', '┐')
            } else if y == bottom {
                ('└', '─', '┘')
            } else {
                ('│', ' ', '│')
            };
            buffer.set(left as u16, y as u16, Cell::new(l, border, menu_bg));
            buffer.fill(left + 1, right - 1, y, fill, border, menu_bg);
            buffer.set((right - 1) as u16, y as u16, Cell::new(r, border, menu_bg));
        }

        for (item_idx, item) in menu.items.iter().enumerate() {
            let y = top + 1 + item_idx;
            if y >= height {
                break;
            }
            match item {
                MenuItem::Separator => {
                    buffer.set(left as u16, y as u16, Cell::new('├', border, menu_bg));
                    buffer.fill(left + 1, right - 1, y, '─', border, menu_bg);
                    buffer.set((right - 1) as u16, y as u16, Cell::new('┤', border, menu_bg));
                }
                MenuItem::Action { label, hotkey, .. } => {
                    let is_selected = menu.selected == Some(item_idx);
                    let fg = if is_selected { active_fg } else { menu_fg };
                    let bg = if is_selected { active_bg } else { menu_bg };

                    buffer.fill(left + 1, right - 1, y, ' ', fg, bg);
                    buffer.put_str(left + 2, y, right - 1, label, fg, bg);
                    if let Some(hk) = hotkey {
                        let hk_start = (right - 2).saturating_sub(hk.len());
                        buffer.put_str(hk_start, y, right - 1, hk, fg, bg);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(menu_bar: &MenuBar) -> ScreenBuffer {
        let mut screen = ScreenBuffer::new(40, 10);
        MenuRenderer::render(&mut screen, menu_bar, &Palette::default(), 40, 10);
        screen
    }

    #[test]
    fn test_closed_menu_draws_only_bar() {
        let screen = draw(&MenuBar::new());
        assert_eq!(screen.row_text(0).trim(), "File");
        assert_eq!(screen.row_text(1).trim(), "");
    }

    #[test]
    fn test_dropdown_matches_hit_test() {
        let mut menu_bar = MenuBar::new();
        menu_bar.open_menu(0);
        let screen = draw(&menu_bar);

        assert!(screen.row_text(1).contains('┌'));
        for (row, label) in [(2, "Open..."), (3, "Save..."), (5, "Exit")] {
            assert!(screen.row_text(row).contains(label), "row {}", row);
        }
        assert!(screen.row_text(2).contains("^O"));
        assert!(screen.row_text(4).contains('├'));
        assert!(screen.row_text(6).contains('└'));

        // The highlighted first item uses the selection colors
        let palette = Palette::default();
        assert_eq!(screen.get(3, 2).map(|c| c.bg), Some(palette.selection_bg));
    }
}
