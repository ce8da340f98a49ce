use crate::core::buffer::Buffer;
use crate::core::utf8;
use crate::core::window::Window;
use crate::terminal::color::{Color, Palette};
use crate::terminal::display::{Cell, ScreenBuffer};

/// Renders the visible part of the document into the text area
pub struct TextRenderer;

impl TextRenderer {
    /// Draw the window's lines starting at screen row `top`
    pub fn render(
        screen: &mut ScreenBuffer,
        buffer: &Buffer,
        window: &Window,
        top: usize,
        palette: &Palette,
    ) {
        let fg = palette.fg;
        let bg = palette.bg;
        let width = window.width.min(screen.width as usize);

        for row in 0..window.height {
            screen.fill(0, width, top + row, ' ', fg, bg);
        }

        let (start, end) = window.visible_range(buffer);
        for (row, line_idx) in (start..end).enumerate() {
            let Some(line) = buffer.line(line_idx) else {
                break;
            };
            Self::render_line(screen, &line, window, top + row, width, fg, bg);
        }
    }

    /// Lay one line out on the grid: tabs expand to the next stop, wide
    /// characters cover two cells and everything left of `scroll_x` is
    /// skipped.
    fn render_line(
        screen: &mut ScreenBuffer,
        line: &str,
        window: &Window,
        y: usize,
        width: usize,
        fg: Color,
        bg: Color,
    ) {
        let mut visual_x = 0;
        for ch in line.chars() {
            let w = utf8::advance(ch, visual_x, window.tab_width);
            let start = visual_x;
            visual_x += w;
            if w == 0 || visual_x <= window.scroll_x {
                continue;
            }
            if start < window.scroll_x {
                // Cut by the left edge
                continue;
            }
            let x = start - window.scroll_x;
            if x >= width {
                break;
            }

            if ch == '\t' {
                // Already blank
                continue;
            }
            if w == 2 && x + 1 >= width {
                break;
            }
            screen.set(x as u16, y as u16, Cell::new(ch, fg, bg));
            if w == 2 {
                screen.set((x + 1) as u16, y as u16, Cell::hidden(fg, bg));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(text: &str, scroll_x: usize) -> ScreenBuffer {
        let buffer = Buffer::from_string(text);
        let mut window = Window::new(4);
        window.set_dimensions(10, 3);
        window.scroll_x = scroll_x;
        let mut screen = ScreenBuffer::new(10, 3);
        TextRenderer::render(&mut screen, &buffer, &window, 0, &Palette::default());
        screen
    }

    #[test]
    fn test_crlf_terminators_not_drawn() {
        let screen = draw("ab\r\ncd\r\n", 0);
        assert_eq!(screen.row_text(0).trim_end(), "ab");
        assert_eq!(screen.row_text(1).trim_end(), "cd");
    }

    #[test]
    fn test_horizontal_scroll() {
        let screen = draw("0123456789abcdef", 6);
        assert_eq!(screen.row_text(0), "6789abcdef");
    }

    #[test]
    fn test_long_line_is_clipped() {
        let screen = draw("0123456789abcdef", 0);
        assert_eq!(screen.row_text(0), "0123456789");
    }

    #[test]
    fn test_wide_char_at_right_edge_is_dropped() {
        let screen = draw("012345678中", 0);
        assert_eq!(screen.row_text(0), "012345678 ");
    }
}
