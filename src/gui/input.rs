//! Input translation layer for GUI mode
//!
//! Translates winit keyboard/mouse events to the editor's input events.
//! Keys are read from the logical key so the platform keyboard layout and
//! shift state are already applied to printable characters.

use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{Key as LogicalKey, ModifiersState, NamedKey};

use crate::core::input::{InputEvent, Key, MouseButton, MouseEventKind};

/// Pixels of touchpad scrolling treated as one wheel notch
const PIXELS_PER_NOTCH: f64 = 20.0;

/// Translate a pressed key into an editor input event
pub fn translate_key(key: &LogicalKey, mods: ModifiersState) -> Option<InputEvent> {
    let key = match key {
        LogicalKey::Named(named) => named_key(*named, mods)?,
        LogicalKey::Character(text) => {
            let mut chars = text.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if mods.control_key() {
                Key::Ctrl(ch.to_ascii_lowercase())
            } else if mods.alt_key() {
                Key::Alt(ch)
            } else {
                Key::Char(ch)
            }
        }
        _ => return None,
    };

    Some(InputEvent {
        key,
        shift: mods.shift_key(),
        alt: mods.alt_key(),
        ctrl: mods.control_key(),
    })
}

fn named_key(named: NamedKey, mods: ModifiersState) -> Option<Key> {
    Some(match named {
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Escape => Key::Esc,
        NamedKey::Insert => Key::Insert,
        NamedKey::ArrowUp => Key::Up,
        NamedKey::ArrowDown => Key::Down,
        NamedKey::ArrowLeft => Key::Left,
        NamedKey::ArrowRight => Key::Right,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::Space if mods.control_key() => Key::Ctrl(' '),
        NamedKey::Space => Key::Char(' '),
        NamedKey::F1 => Key::F(1),
        NamedKey::F2 => Key::F(2),
        NamedKey::F3 => Key::F(3),
        NamedKey::F4 => Key::F(4),
        NamedKey::F5 => Key::F(5),
        NamedKey::F6 => Key::F(6),
        NamedKey::F7 => Key::F(7),
        NamedKey::F8 => Key::F(8),
        NamedKey::F9 => Key::F(9),
        NamedKey::F10 => Key::F(10),
        NamedKey::F11 => Key::F(11),
        NamedKey::F12 => Key::F(12),
        _ => return None,
    })
}

/// Check if a key event should be processed (key down only)
pub fn should_process(state: ElementState) -> bool {
    state == ElementState::Pressed
}

pub fn mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Wheel direction and number of notches. None for a zero delta.
pub fn wheel_scroll(delta: MouseScrollDelta) -> Option<(MouseEventKind, usize)> {
    let (y, notches) = match delta {
        MouseScrollDelta::LineDelta(_, y) => (y as f64, (y.abs() as f64).round()),
        MouseScrollDelta::PixelDelta(pos) => (pos.y, (pos.y.abs() / PIXELS_PER_NOTCH).round()),
    };
    if y == 0.0 {
        return None;
    }
    let kind = if y > 0.0 {
        MouseEventKind::ScrollUp
    } else {
        MouseEventKind::ScrollDown
    };
    Some((kind, (notches as usize).max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_characters() {
        let ev = translate_key(&LogicalKey::Character("a".into()), ModifiersState::empty()).unwrap();
        assert_eq!(ev.key, Key::Char('a'));

        let ev = translate_key(&LogicalKey::Character("A".into()), ModifiersState::SHIFT).unwrap();
        assert_eq!(ev.key, Key::Char('A'));
        assert!(ev.shift);

        let ev = translate_key(&LogicalKey::Character("é".into()), ModifiersState::empty()).unwrap();
        assert_eq!(ev.key, Key::Char('é'));

        assert!(translate_key(&LogicalKey::Character("ab".into()), ModifiersState::empty()).is_none());
    }

    #[test]
    fn test_modified_characters() {
        let ev = translate_key(&LogicalKey::Character("O".into()), ModifiersState::CONTROL).unwrap();
        assert_eq!(ev.key, Key::Ctrl('o'));
        assert!(ev.ctrl);

        let ev = translate_key(&LogicalKey::Character("f".into()), ModifiersState::ALT).unwrap();
        assert_eq!(ev.key, Key::Alt('f'));
    }

    #[test]
    fn test_named_keys() {
        let none = ModifiersState::empty();
        let key = |named| translate_key(&LogicalKey::Named(named), none).map(|ev| ev.key);
        assert_eq!(key(NamedKey::Enter), Some(Key::Enter));
        assert_eq!(key(NamedKey::F10), Some(Key::F(10)));
        assert_eq!(key(NamedKey::Space), Some(Key::Char(' ')));
        assert_eq!(key(NamedKey::PageDown), Some(Key::PageDown));
        assert_eq!(key(NamedKey::Shift), None);
    }

    #[test]
    fn test_wheel_scroll() {
        assert_eq!(
            wheel_scroll(MouseScrollDelta::LineDelta(0.0, 2.0)),
            Some((MouseEventKind::ScrollUp, 2))
        );
        assert_eq!(
            wheel_scroll(MouseScrollDelta::LineDelta(0.0, -0.3)),
            Some((MouseEventKind::ScrollDown, 1))
        );
        assert_eq!(wheel_scroll(MouseScrollDelta::LineDelta(0.0, 0.0)), None);
    }
}
