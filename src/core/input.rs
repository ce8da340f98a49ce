//! Front-end independent key and mouse events.
//!
//! The terminal and GUI layers translate their native events into these
//! types; everything in `core` consumes only these.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    F(u8),
    Esc,
    Enter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Insert,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "^{}", c.to_ascii_uppercase()),
            Key::Alt(c) => write!(f, "M-{}", c),
            Key::F(n) => write!(f, "F{}", n),
            Key::Esc => write!(f, "Esc"),
            Key::Enter => write!(f, "Enter"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Tab => write!(f, "Tab"),
            Key::Delete => write!(f, "Delete"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Insert => write!(f, "Insert"),
        }
    }
}

/// Error returned when a binding string names no key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(pub String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key: {}", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

/// Single char following a two-char modifier prefix ("^X", "C-x", "M-f")
fn modified_char(rest: &str) -> Option<char> {
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(c) = s.strip_prefix('^').and_then(modified_char) {
            return Ok(Key::Ctrl(c));
        }
        if let Some(c) = s.strip_prefix("C-").and_then(modified_char) {
            return Ok(Key::Ctrl(c));
        }
        if let Some(c) = s
            .strip_prefix("M-")
            .or_else(|| s.strip_prefix("ESC-"))
            .and_then(modified_char)
        {
            return Ok(Key::Alt(c));
        }

        match s.to_ascii_uppercase().as_str() {
            "ENTER" | "RET" => return Ok(Key::Enter),
            "TAB" => return Ok(Key::Tab),
            "BACKSPACE" | "BS" => return Ok(Key::Backspace),
            "ESC" | "ESCAPE" => return Ok(Key::Esc),
            "DELETE" | "DEL" => return Ok(Key::Delete),
            "HOME" => return Ok(Key::Home),
            "END" => return Ok(Key::End),
            "PAGEUP" | "PGUP" => return Ok(Key::PageUp),
            "PAGEDOWN" | "PGDN" => return Ok(Key::PageDown),
            "UP" => return Ok(Key::Up),
            "DOWN" => return Ok(Key::Down),
            "LEFT" => return Ok(Key::Left),
            "RIGHT" => return Ok(Key::Right),
            "INSERT" | "INS" => return Ok(Key::Insert),
            _ => {}
        }

        if let Some(n) = s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
            if (1..=24).contains(&n) {
                return Ok(Key::F(n));
            }
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Key::Char(c)),
            _ => Err(ParseKeyError(s.to_string())),
        }
    }
}

/// A key press with modifier state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl InputEvent {
    /// Key press with the modifier flags implied by the key itself
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: matches!(key, Key::Alt(_)),
            ctrl: matches!(key, Key::Ctrl(_)),
        }
    }
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        InputEvent::new(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollDown,
    ScrollUp,
}

/// A mouse event in screen cell coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    pub column: u16,
    pub row: u16,
    pub kind: MouseEventKind,
}

impl MouseEvent {
    pub fn new(column: u16, row: u16, kind: MouseEventKind) -> Self {
        Self { column, row, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ctrl_keys() {
        assert_eq!("^O".parse::<Key>(), Ok(Key::Ctrl('o')));
        assert_eq!("C-q".parse::<Key>(), Ok(Key::Ctrl('q')));
    }

    #[test]
    fn test_parse_alt_keys() {
        assert_eq!("M-f".parse::<Key>(), Ok(Key::Alt('f')));
        assert_eq!("ESC-F".parse::<Key>(), Ok(Key::Alt('f')));
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!("PageDown".parse::<Key>(), Ok(Key::PageDown));
        assert_eq!("pgup".parse::<Key>(), Ok(Key::PageUp));
        assert_eq!("Enter".parse::<Key>(), Ok(Key::Enter));
        assert_eq!("F10".parse::<Key>(), Ok(Key::F(10)));
        assert_eq!("Esc".parse::<Key>(), Ok(Key::Esc));
    }

    #[test]
    fn test_parse_plain_char_and_errors() {
        assert_eq!("a".parse::<Key>(), Ok(Key::Char('a')));
        assert_eq!("é".parse::<Key>(), Ok(Key::Char('é')));
        assert!("F99".parse::<Key>().is_err());
        assert!("nonsense".parse::<Key>().is_err());
        assert!("^XY".parse::<Key>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for key in [Key::Ctrl('s'), Key::Alt('f'), Key::F(10), Key::PageDown] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_input_event_modifiers() {
        let ev = InputEvent::new(Key::Ctrl('o'));
        assert!(ev.ctrl);
        assert!(!ev.alt);
        let ev: InputEvent = Key::Char('x').into();
        assert!(!ev.ctrl && !ev.alt);
    }
}
