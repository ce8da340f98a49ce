use crate::core::app::EditorApp;
use crate::core::utf8;
use crate::terminal::renderers::{DialogRenderer, MenuRenderer, StatusRenderer, TextRenderer};

pub use crate::terminal::color::{Color, Palette};

/// Represents a single cell on the screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    /// Covered by the wide character in the previous cell; not drawn
    pub hidden: bool,
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self {
            ch,
            fg,
            bg,
            hidden: false,
        }
    }

    pub fn hidden(fg: Color, bg: Color) -> Self {
        Self {
            ch: ' ',
            fg,
            bg,
            hidden: true,
        }
    }

    pub fn empty() -> Self {
        Self::new(' ', Color::Reset, Color::Reset)
    }
}

/// Grid of cells drawn by both front-ends
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenBuffer {
    pub cells: Vec<Cell>,
    pub width: u16,
    pub height: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::empty(); (width as usize) * (height as usize)];
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::empty();
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            self.cells[idx] = cell;
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            Some(&self.cells[idx])
        } else {
            None
        }
    }

    pub fn get_cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.width as usize && y < self.height as usize {
            let idx = (y * self.width as usize) + x;
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Paint cells `x_start..x_end` of row `y`
    pub fn fill(&mut self, x_start: usize, x_end: usize, y: usize, ch: char, fg: Color, bg: Color) {
        for x in x_start..x_end.min(self.width as usize) {
            self.set(x as u16, y as u16, Cell::new(ch, fg, bg));
        }
    }

    /// Write `text` starting at column `x`, clipped at `x_end`.
    /// Wide characters take two cells; one that would straddle `x_end` is
    /// dropped. Returns the column after the last cell written.
    pub fn put_str(
        &mut self,
        x: usize,
        y: usize,
        x_end: usize,
        text: &str,
        fg: Color,
        bg: Color,
    ) -> usize {
        let x_end = x_end.min(self.width as usize);
        let mut col = x;
        for ch in text.chars() {
            let w = utf8::char_width(ch);
            if w == 0 {
                continue;
            }
            if col + w > x_end {
                break;
            }
            self.set(col as u16, y as u16, Cell::new(ch, fg, bg));
            if w == 2 {
                self.set((col + 1) as u16, y as u16, Cell::hidden(fg, bg));
            }
            col += w;
        }
        col
    }

    /// Row `y` as a string, for tests and debugging
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.hidden)
            .map(|c| c.ch)
            .collect()
    }
}

/// Composes the editor window into a `ScreenBuffer` and keeps the previous
/// frame for diffing.
pub struct Display {
    /// Screen dimensions in cells (cols, rows)
    pub terminal_size: (u16, u16),
    /// Whether a full screen clear is needed (e.g. after resize)
    pub needs_full_redraw: bool,
    /// Front buffer (currently displayed)
    pub front_buffer: ScreenBuffer,
    /// Back buffer (being drawn to)
    pub back_buffer: ScreenBuffer,
    pub palette: Palette,
    /// Where the text cursor goes, None when it should be hidden
    pub cursor_pos: Option<(usize, usize)>,
}

impl Display {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            terminal_size: (width, height),
            needs_full_redraw: true,
            front_buffer: ScreenBuffer::new(width, height),
            back_buffer: ScreenBuffer::new(width, height),
            palette: Palette::default(),
            cursor_pos: None,
        }
    }

    /// Sized to the current terminal
    pub fn new_terminal() -> crate::error::Result<Self> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Self::new(cols, rows))
    }

    /// Resize both buffers. Zero dimensions are ignored.
    pub fn update_size(&mut self, cols: u16, rows: u16) {
        if cols == 0 || rows == 0 {
            return;
        }
        self.terminal_size = (cols, rows);
        self.front_buffer = ScreenBuffer::new(cols, rows);
        self.back_buffer = ScreenBuffer::new(cols, rows);
        self.needs_full_redraw = true;
    }

    /// Draw the whole window into the back buffer: menu bar, text area,
    /// status line, then the open dropdown or dialog on top.
    pub fn render(&mut self, app: &EditorApp) {
        let (cols, rows) = (
            self.terminal_size.0 as usize,
            self.terminal_size.1 as usize,
        );
        self.back_buffer.clear();

        let text_top = app.text_area_top();
        TextRenderer::render(
            &mut self.back_buffer,
            &app.buffer,
            &app.window,
            text_top,
            &self.palette,
        );
        StatusRenderer::render(
            &mut self.back_buffer,
            app,
            rows.saturating_sub(1),
            cols,
            &self.palette,
        );
        MenuRenderer::render(&mut self.back_buffer, &app.menu_bar, &self.palette, cols, rows);

        self.cursor_pos = if let Some(dialog) = app.dialog.as_ref() {
            Some(DialogRenderer::render(
                &mut self.back_buffer,
                dialog,
                &app.dialog_layout(),
                &self.palette,
            ))
        } else if app.menu_bar.is_open() {
            None
        } else {
            let window = &app.window;
            let y = text_top + window.cursor_y.saturating_sub(window.scroll_offset);
            let x = window.visual_cursor_x.saturating_sub(window.scroll_x);
            Some((x.min(cols.saturating_sub(1)), y.min(rows.saturating_sub(1))))
        };

        // Block cursor, also what the GUI shows since it has no native cursor
        if let Some((x, y)) = self.cursor_pos {
            if let Some(cell) = self.back_buffer.get_cell_mut(x, y) {
                cell.fg = self.palette.cursor_fg;
                cell.bg = self.palette.cursor_bg;
            }
        }
    }

    /// Make the back buffer the displayed frame
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front_buffer, &mut self.back_buffer);
        self.back_buffer.clear();
        self.needs_full_redraw = false;
    }
}
