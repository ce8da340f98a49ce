//! Unified Input Router
//!
//! Both front-ends hand every translated key and mouse event to this module,
//! which sends it to whichever part of the window has focus: the file dialog
//! if one is open, else the menu if it is open, else the text area.

use crate::core::app::EditorApp;
use crate::core::dispatcher::{DispatchResult, dispatch};
use crate::core::input::{InputEvent, Key, MouseButton, MouseEvent, MouseEventKind};
use crate::core::keymap::LookupResult;
use crate::core::menu::MenuHit;

/// Lines moved per mouse wheel notch
pub const WHEEL_LINES: isize = 3;

/// Route a key press
pub fn route_key(app: &mut EditorApp, event: &InputEvent) {
    app.message = None;

    if let Some(dialog) = app.dialog.as_mut() {
        let result = dialog.handle_key(event);
        app.finish_dialog(result);
        return;
    }

    if app.menu_bar.is_open() {
        route_menu_key(app, event);
        return;
    }

    match app.keymap.lookup(event) {
        LookupResult::Command(cmd) => run_command(app, &cmd),
        LookupResult::InsertChar(c) => {
            let result = dispatch(app, None, Some(c), 1);
            app.apply_result(result);
        }
        LookupResult::Unbound => {
            if let Key::Alt(c) = event.key {
                app.menu_bar.open_by_mnemonic(c);
            }
        }
    }
}

/// Run a named command and act on its result
pub fn run_command(app: &mut EditorApp, command: &str) {
    let result = dispatch(app, Some(command), None, 1);
    if result == DispatchResult::NotHandled {
        app.message = Some(format!("Unknown command: {}", command));
    }
    app.apply_result(result);
}

fn route_menu_key(app: &mut EditorApp, event: &InputEvent) {
    match event.key {
        Key::Esc | Key::Ctrl('g') | Key::F(10) => app.menu_bar.close(),
        Key::Up => {
            if let Some(menu) = app.menu_bar.active() {
                menu.select_prev();
            }
        }
        Key::Down => {
            if let Some(menu) = app.menu_bar.active() {
                menu.select_next();
            }
        }
        Key::Left => app.menu_bar.prev_menu(),
        Key::Right => app.menu_bar.next_menu(),
        Key::Enter => {
            if let Some(cmd) = app.menu_bar.execute_selected() {
                run_command(app, cmd);
            }
        }
        Key::Alt(c) => {
            app.menu_bar.open_by_mnemonic(c);
        }
        _ => {}
    }
}

/// Route a mouse event given in screen cells
pub fn route_mouse(app: &mut EditorApp, event: &MouseEvent) {
    let col = event.column as usize;
    let row = event.row as usize;

    match event.kind {
        MouseEventKind::ScrollUp => scroll(app, -WHEEL_LINES),
        MouseEventKind::ScrollDown => scroll(app, WHEEL_LINES),
        MouseEventKind::Down(MouseButton::Left) => click(app, col, row),
        _ => {}
    }
}

fn scroll(app: &mut EditorApp, lines: isize) {
    if let Some(dialog) = app.dialog.as_mut() {
        dialog.scroll_by(lines);
    } else if !app.menu_bar.is_open() {
        app.window.scroll_by(lines, &app.buffer);
    }
}

fn click(app: &mut EditorApp, col: usize, row: usize) {
    if app.dialog.is_some() {
        let layout = app.dialog_layout();
        let Some(list_row) = layout.list_row_at(col, row) else {
            // Modal: clicks outside the listing do nothing
            return;
        };
        if let Some(dialog) = app.dialog.as_mut() {
            let result = dialog.click_entry(dialog.scroll + list_row);
            app.finish_dialog(result);
        }
        return;
    }

    match app.menu_bar.hit_test(col, row) {
        MenuHit::Title(idx) => {
            if app.menu_bar.active_menu == Some(idx) {
                app.menu_bar.close();
            } else {
                app.menu_bar.open_menu(idx);
            }
        }
        MenuHit::Item(idx) => {
            if let Some(menu) = app.menu_bar.active() {
                menu.select(idx);
            }
            if let Some(cmd) = app.menu_bar.execute_selected() {
                run_command(app, cmd);
            }
        }
        MenuHit::Inert => {}
        MenuHit::Outside if app.menu_bar.is_open() => app.menu_bar.close(),
        MenuHit::Outside => {
            let top = app.text_area_top();
            if row >= top && row < top + app.window.height {
                app.window.click_at(&app.buffer, col, row - top);
            }
        }
    }
}
