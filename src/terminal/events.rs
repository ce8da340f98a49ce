use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::core::input::{InputEvent, Key, MouseButton, MouseEvent, MouseEventKind};
use crate::error::Result;

/// Editor events
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Input(InputEvent),
    Resize(u16, u16),
    Mouse(MouseEvent),
    None,
}

/// Reads crossterm events and translates them for the core
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Check for available events with a timeout
    pub fn poll(&self, timeout: Duration) -> Result<bool> {
        Ok(event::poll(timeout)?)
    }

    /// Read the next event, or `EditorEvent::None` if nothing is pending
    pub fn read(&mut self) -> Result<EditorEvent> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(EditorEvent::None);
        }
        Ok(translate(event::read()?))
    }
}

/// Translate one crossterm event
pub fn translate(event: Event) -> EditorEvent {
    match event {
        // Release events (reported on some platforms) are ignored
        Event::Key(key_event) if key_event.kind == KeyEventKind::Release => EditorEvent::None,
        Event::Key(key_event) => convert_key(key_event)
            .map(EditorEvent::Input)
            .unwrap_or(EditorEvent::None),
        Event::Resize(cols, rows) => EditorEvent::Resize(cols, rows),
        Event::Mouse(mouse_event) => convert_mouse(mouse_event)
            .map(EditorEvent::Mouse)
            .unwrap_or(EditorEvent::None),
        _ => EditorEvent::None,
    }
}

fn convert_key(key_event: event::KeyEvent) -> Option<InputEvent> {
    let modifiers = key_event.modifiers;
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    let key = match key_event.code {
        KeyCode::Char(c) => {
            if ctrl && !alt {
                Key::Ctrl(c.to_ascii_lowercase())
            } else if alt && !ctrl {
                Key::Alt(c)
            } else {
                Key::Char(c)
            }
        }
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };

    Some(InputEvent {
        key,
        shift,
        alt,
        ctrl,
    })
}

fn convert_mouse(event: event::MouseEvent) -> Option<MouseEvent> {
    let kind = match event.kind {
        event::MouseEventKind::Down(btn) => MouseEventKind::Down(convert_button(btn)),
        event::MouseEventKind::Up(btn) => MouseEventKind::Up(convert_button(btn)),
        event::MouseEventKind::Drag(btn) => MouseEventKind::Drag(convert_button(btn)),
        event::MouseEventKind::Moved => MouseEventKind::Moved,
        event::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        event::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        _ => return None,
    };
    Some(MouseEvent::new(event.column, event.row, kind))
}

fn convert_button(btn: event::MouseButton) -> MouseButton {
    match btn {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_ctrl_and_alt_chars() {
        assert_eq!(
            translate(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            EditorEvent::Input(InputEvent::new(Key::Ctrl('s')))
        );
        assert_eq!(
            translate(key(KeyCode::Char('f'), KeyModifiers::ALT)),
            EditorEvent::Input(InputEvent::new(Key::Alt('f')))
        );
        let EditorEvent::Input(upper) = translate(key(KeyCode::Char('A'), KeyModifiers::SHIFT))
        else {
            panic!("expected input");
        };
        assert_eq!(upper.key, Key::Char('A'));
        assert!(upper.shift);
    }

    #[test]
    fn test_release_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(release), EditorEvent::None);
    }

    #[test]
    fn test_mouse_and_resize() {
        let click = Event::Mouse(event::MouseEvent {
            kind: event::MouseEventKind::Down(event::MouseButton::Left),
            column: 10,
            row: 3,
            modifiers: KeyModifiers::empty(),
        });
        assert_eq!(
            translate(click),
            EditorEvent::Mouse(MouseEvent::new(10, 3, MouseEventKind::Down(MouseButton::Left)))
        );
        assert_eq!(translate(Event::Resize(100, 40)), EditorEvent::Resize(100, 40));
    }
}
