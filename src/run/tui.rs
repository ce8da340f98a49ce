//! Terminal (TUI) mode implementation.

use std::io;
use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::core::app::EditorApp;
use crate::core::input_router::{route_key, route_mouse};
use crate::error::Result;
use crate::terminal::display::Display;
use crate::terminal::events::{EditorEvent, EventHandler};
use crate::terminal::raw::RawMode;
use crate::terminal::render::render_display_to_terminal;

/// How long to wait for input before checking again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run in terminal (TUI) mode.
pub fn run_terminal_mode(config: &Config) -> Result<()> {
    let mut app = EditorApp::initialize_with_config(config);
    let mut display = Display::new_terminal()?;
    let (cols, rows) = display.terminal_size;
    app.resize(cols as usize, rows as usize);

    let _raw_mode = RawMode::new()?;
    let mut stdout = io::stdout();
    let mut event_handler = EventHandler::new();
    let mut dirty = true;

    loop {
        if dirty {
            display.render(&app);
            render_display_to_terminal(&display, &mut stdout)?;
            display.swap_buffers();
            dirty = false;
        }

        if !event_handler.poll(POLL_INTERVAL)? {
            continue;
        }

        match event_handler.read()? {
            EditorEvent::Input(event) => route_key(&mut app, &event),
            EditorEvent::Mouse(event) => route_mouse(&mut app, &event),
            EditorEvent::Resize(cols, rows) => {
                debug!(cols, rows, "terminal resized");
                display.update_size(cols, rows);
                app.resize(display.terminal_size.0 as usize, display.terminal_size.1 as usize);
            }
            EditorEvent::None => continue,
        }

        if app.should_exit() {
            break;
        }
        dirty = true;
    }

    Ok(())
}
