//! Terminal rendering
//!
//! Writes the display's back buffer to the terminal with ANSI escapes,
//! diffing against the front buffer so only changed cells are sent.

use std::io::Write;

use crossterm::{QueueableCommand, cursor};

use crate::error::Result;
use crate::terminal::display::Display;

/// Write the back buffer to `out`.
///
/// On a full redraw (first frame, after resize) the screen is cleared and
/// every cell is written; otherwise only cells that differ from the front
/// buffer are. Call `Display::swap_buffers` afterwards.
pub fn render_display_to_terminal(display: &Display, out: &mut impl Write) -> Result<()> {
    // Hide cursor during update to prevent flickering
    write!(out, "\x1b[?25l")?;

    let needs_full = display.needs_full_redraw;
    if needs_full {
        write!(out, "\x1b[2J\x1b[H")?;
    }

    let front_buffer = &display.front_buffer;
    let back_buffer = &display.back_buffer;

    let mut last_fg = String::new();
    let mut last_bg = String::new();
    let mut wrote_cells = false;

    for y in 0..display.terminal_size.1 {
        for x in 0..display.terminal_size.0 {
            let Some(new_cell) = back_buffer.get(x, y) else {
                continue;
            };
            if !needs_full && front_buffer.get(x, y) == Some(new_cell) {
                continue;
            }
            if new_cell.hidden {
                continue;
            }

            write!(out, "\x1b[{};{}H", y + 1, x + 1)?;
            wrote_cells = true;

            let fg_code = new_cell.fg.to_ansi_fg_code();
            let bg_code = new_cell.bg.to_ansi_bg_code();
            if fg_code != last_fg || bg_code != last_bg {
                write!(out, "\x1b[{}m\x1b[{}m", fg_code, bg_code)?;
                last_fg = fg_code;
                last_bg = bg_code;
            }

            write!(out, "{}", new_cell.ch)?;
        }
    }

    if wrote_cells {
        write!(out, "\x1b[0m")?;
    }

    match display.cursor_pos {
        Some((cx, cy)) => {
            out.queue(cursor::MoveTo(cx as u16, cy as u16))?;
            out.queue(cursor::Show)?;
        }
        None => {
            out.queue(cursor::Hide)?;
        }
    }

    out.flush()?;
    Ok(())
}
