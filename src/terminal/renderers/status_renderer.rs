use crate::core::app::EditorApp;
use crate::terminal::color::Palette;
use crate::terminal::display::ScreenBuffer;

/// Shown when there is no message
const HINT: &str = "F10 menu  ^O open  ^S save  ^Q exit";

/// Renders the bottom status line
pub struct StatusRenderer;

impl StatusRenderer {
    /// Render status line on row `y`
    pub fn render(
        screen_buffer: &mut ScreenBuffer,
        app: &EditorApp,
        y: usize,
        width: usize,
        palette: &Palette,
    ) {
        let fg = palette.status_fg;
        let bg = palette.status_bg;
        screen_buffer.fill(0, width, y, ' ', fg, bg);

        let modified = if app.buffer.modified { " [+]" } else { "" };
        let left = format!(" quill{} ", modified);
        let middle = match app.message.as_deref() {
            Some(message) => format!(" {} ", message),
            None => format!(" {} ", HINT),
        };
        let right = format!(
            " Ln {}, Col {} ",
            app.window.cursor_y + 1,
            app.window.cursor_x + 1
        );

        let x = screen_buffer.put_str(0, y, width, &left, fg, bg);
        let right_start = width.saturating_sub(right.chars().count());
        if right_start > x {
            screen_buffer.put_str(x, y, right_start, &middle, fg, bg);
            screen_buffer.put_str(right_start, y, width, &right, fg, bg);
        } else {
            screen_buffer.put_str(x, y, width, &middle, fg, bg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(app: &EditorApp) -> String {
        let mut screen = ScreenBuffer::new(80, 1);
        StatusRenderer::render(&mut screen, app, 0, 80, &Palette::default());
        screen.row_text(0)
    }

    #[test]
    fn test_hint_and_position() {
        let app = EditorApp::new();
        let line = draw(&app);
        assert!(line.contains("F10 menu"));
        assert!(line.trim_end().ends_with("Ln 1, Col 1"));
        assert!(!line.contains("[+]"));
    }

    #[test]
    fn test_message_replaces_hint() {
        let mut app = EditorApp::new();
        app.buffer.modified = true;
        app.message = Some("Wrote 5 bytes to /tmp/a".to_string());
        let line = draw(&app);
        assert!(line.contains("[+]"));
        assert!(line.contains("Wrote 5 bytes"));
        assert!(!line.contains("F10 menu"));
    }
}
