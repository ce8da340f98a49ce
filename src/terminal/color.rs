//! Cell colors and the editor palette
//!
//! `Color` is what a `Cell` carries. The terminal writes it as an ANSI SGR
//! code; the GUI turns it into RGBA floats for the shader.

/// Cell color: the terminal default or an exact RGB value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Reset,
    Rgb { r: u8, g: u8, b: u8 },
}

/// Build an RGB `Color`
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

impl Color {
    /// ANSI foreground color code
    pub fn to_ansi_fg_code(self) -> String {
        match self {
            Color::Reset => "39".to_string(),
            Color::Rgb { r, g, b } => format!("38;2;{};{};{}", r, g, b),
        }
    }

    /// ANSI background color code
    pub fn to_ansi_bg_code(self) -> String {
        match self {
            Color::Reset => "49".to_string(),
            Color::Rgb { r, g, b } => format!("48;2;{};{};{}", r, g, b),
        }
    }

    /// GPU-compatible RGBA floats (0.0-1.0). `Reset` resolves to `default`.
    pub fn to_rgba_f32(self, default: Color) -> [f32; 4] {
        match self {
            Color::Rgb { r, g, b } => [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0],
            Color::Reset => match default {
                Color::Reset => [0.0, 0.0, 0.0, 1.0],
                rgb => rgb.to_rgba_f32(Color::Reset),
            },
        }
    }
}

/// Colors for each part of the window
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub menu_fg: Color,
    pub menu_bg: Color,
    /// Highlighted menu title/item and dialog selection
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub status_fg: Color,
    pub status_bg: Color,
    pub dialog_fg: Color,
    pub dialog_bg: Color,
    pub dialog_border: Color,
    pub directory: Color,
    pub error: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fg: rgb(0xdc, 0xdf, 0xe4),
            bg: rgb(0x28, 0x2c, 0x34),
            menu_fg: rgb(0xdc, 0xdf, 0xe4),
            menu_bg: rgb(0x21, 0x25, 0x2b),
            selection_fg: rgb(0x28, 0x2c, 0x34),
            selection_bg: rgb(0x61, 0xaf, 0xef),
            status_fg: rgb(0x28, 0x2c, 0x34),
            status_bg: rgb(0x98, 0xc3, 0x79),
            dialog_fg: rgb(0xdc, 0xdf, 0xe4),
            dialog_bg: rgb(0x31, 0x36, 0x40),
            dialog_border: rgb(0x61, 0xaf, 0xef),
            directory: rgb(0xe5, 0xc0, 0x7b),
            error: rgb(0xe0, 0x6c, 0x75),
            cursor_fg: rgb(0x28, 0x2c, 0x34),
            cursor_bg: rgb(0xdc, 0xdf, 0xe4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truecolor_codes() {
        assert_eq!(rgb(255, 0, 0).to_ansi_fg_code(), "38;2;255;0;0");
        assert_eq!(rgb(128, 64, 32).to_ansi_bg_code(), "48;2;128;64;32");
        assert_eq!(Color::Reset.to_ansi_fg_code(), "39");
        assert_eq!(Color::Reset.to_ansi_bg_code(), "49");
    }

    #[test]
    fn test_rgba_conversion() {
        assert_eq!(
            rgb(255, 0, 51).to_rgba_f32(Color::Reset),
            [1.0, 0.0, 0.2, 1.0]
        );
        assert_eq!(
            Color::Reset.to_rgba_f32(rgb(255, 255, 255)),
            [1.0, 1.0, 1.0, 1.0]
        );
        assert_eq!(
            Color::Reset.to_rgba_f32(Color::Reset),
            [0.0, 0.0, 0.0, 1.0]
        );
    }
}
