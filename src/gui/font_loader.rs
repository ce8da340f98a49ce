//! Font loading for GUI mode
//!
//! font-kit finds fonts through the platform (fontconfig on Linux, Core Text
//! on macOS, DirectWrite on Windows); fontdue rasterizes glyphs. The primary
//! font is the `font` setting (a file path or family name) or the system
//! monospace font. Fallback fonts are loaded lazily the first time a
//! character is missing from every loaded font.

use std::collections::HashSet;

use font_kit::family_name::FamilyName;
use font_kit::properties::{Properties, Weight};
use font_kit::source::SystemSource;
use fontdue::{Font, FontSettings};
use tracing::{debug, info};

use crate::error::{EditorError, Result};

/// Families tried when the system has no default monospace font
const MONOSPACE_CANDIDATES: &[&str] = &[
    "DejaVu Sans Mono",
    "Noto Sans Mono",
    "Liberation Mono",
    "Consolas",
    "Menlo",
];

/// Families tried, in order, for characters the primary font lacks
const FALLBACK_FAMILIES: &[&str] = &[
    "Noto Sans Mono",
    "DejaVu Sans Mono",
    "DejaVu Sans",
    "Noto Sans Mono CJK SC",
    "Noto Sans CJK JP",
    "Noto Sans Symbols",
    "Noto Sans Symbols 2",
    "Symbola",
    "Unifont",
    "Noto Color Emoji",
];

/// Cell size and baseline derived from the primary font, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
    /// Distance from the top of the cell to the baseline
    pub baseline: f32,
}

/// Primary font plus lazily loaded fallbacks
pub struct FontLoader {
    source: SystemSource,
    pub primary: Font,
    fallbacks: Vec<Font>,
    next_fallback_index: usize,
    /// Characters known to have no font available (negative cache)
    missing_chars: HashSet<char>,
}

impl FontLoader {
    /// Load the primary font from `configured` (path or family) or the
    /// system monospace font
    pub fn new(configured: Option<&str>) -> Result<Self> {
        let source = SystemSource::new();
        let data = load_primary_font(&source, configured)?;
        let primary = Font::from_bytes(data.as_slice(), FontSettings::default())
            .map_err(|e| EditorError::Gui(format!("failed to parse font: {}", e)))?;

        Ok(Self {
            source,
            primary,
            fallbacks: Vec::new(),
            next_fallback_index: 0,
            missing_chars: HashSet::new(),
        })
    }

    /// Cell dimensions for `px`-sized text
    pub fn cell_size(&self, px: f32) -> CellSize {
        let width = self.primary.metrics('M', px).advance_width.round().max(1.0);
        match self.primary.horizontal_line_metrics(px) {
            Some(line) => CellSize {
                width,
                height: line.new_line_size.round().max(1.0),
                baseline: line.ascent.round(),
            },
            None => CellSize {
                width,
                height: (px * 1.2).round(),
                baseline: px.round(),
            },
        }
    }

    /// A font that has a glyph for `ch`, loading fallbacks as needed
    pub fn font_for_char(&mut self, ch: char) -> Option<&Font> {
        if is_known_missing(ch) || self.missing_chars.contains(&ch) {
            return None;
        }
        if self.primary.lookup_glyph_index(ch) != 0 {
            return Some(&self.primary);
        }

        let loaded = self
            .fallbacks
            .iter()
            .position(|f| f.lookup_glyph_index(ch) != 0);
        let idx = match loaded {
            Some(idx) => Some(idx),
            None => self.load_fallback_for(ch),
        };
        match idx {
            Some(idx) => self.fallbacks.get(idx),
            None => {
                debug!("no font has a glyph for {:?}", ch);
                self.missing_chars.insert(ch);
                None
            }
        }
    }

    /// Load fallbacks until one covers `ch`; returns its index
    fn load_fallback_for(&mut self, ch: char) -> Option<usize> {
        while let Some(name) = FALLBACK_FAMILIES.get(self.next_fallback_index) {
            self.next_fallback_index += 1;
            let Some(data) = load_family(&self.source, name) else {
                continue;
            };
            let Ok(font) = Font::from_bytes(data.as_slice(), FontSettings::default()) else {
                continue;
            };
            debug!(family = name, "loaded fallback font");
            let covers = font.lookup_glyph_index(ch) != 0;
            self.fallbacks.push(font);
            if covers {
                return Some(self.fallbacks.len() - 1);
            }
        }
        None
    }
}

/// Rasterize `ch` from `font` into a `width` x `height` coverage bitmap
/// with the glyph placed on `baseline`
pub fn rasterize_cell(font: &Font, ch: char, px: f32, width: u32, height: u32, baseline: f32) -> Vec<u8> {
    let mut bitmap = vec![0u8; (width * height) as usize];
    let (metrics, coverage) = font.rasterize(ch, px);
    let top = baseline as i32 - (metrics.ymin + metrics.height as i32);
    let left = metrics.xmin.max(0);

    for gy in 0..metrics.height {
        let y = top + gy as i32;
        if y < 0 || y >= height as i32 {
            continue;
        }
        for gx in 0..metrics.width {
            let x = left + gx as i32;
            if x < 0 || x >= width as i32 {
                continue;
            }
            let dst = y as usize * width as usize + x as usize;
            bitmap[dst] = coverage[gy * metrics.width + gx];
        }
    }
    bitmap
}

/// Characters no font will ever draw: controls and Unicode noncharacters
pub fn is_known_missing(ch: char) -> bool {
    let code = ch as u32;
    let control = code <= 0x1F || (0x7F..=0x9F).contains(&code);
    let nonchar = (0xFDD0..=0xFDEF).contains(&code) || (code & 0xFFFE) == 0xFFFE;
    control || nonchar
}

fn load_primary_font(source: &SystemSource, configured: Option<&str>) -> Result<Vec<u8>> {
    if let Some(font) = configured {
        if let Ok(data) = std::fs::read(font) {
            info!(path = font, "using configured font file");
            return Ok(data);
        }
        if let Some(data) = load_family(source, font) {
            info!(family = font, "using configured font");
            return Ok(data);
        }
        debug!(font, "configured font not found, using system monospace");
    }

    if let Some(data) = load_by_name(source, FamilyName::Monospace) {
        info!("using system monospace font");
        return Ok(data);
    }

    for name in MONOSPACE_CANDIDATES {
        if let Some(data) = load_family(source, name) {
            info!(family = name, "using monospace font");
            return Ok(data);
        }
    }

    Err(EditorError::Gui(
        "no monospace font found; install one (e.g. noto-fonts-mono) or set `font`".into(),
    ))
}

fn load_family(source: &SystemSource, name: &str) -> Option<Vec<u8>> {
    load_by_name(source, FamilyName::Title(name.to_string()))
}

fn load_by_name(source: &SystemSource, family: FamilyName) -> Option<Vec<u8>> {
    let mut props = Properties::new();
    props.weight(Weight::NORMAL);
    let handle = source.select_best_match(&[family], &props).ok()?;
    let font = handle.load().ok()?;
    Some(font.copy_font_data()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_missing() {
        assert!(is_known_missing('\u{0}'));
        assert!(is_known_missing('\u{1b}'));
        assert!(is_known_missing('\u{9f}'));
        assert!(is_known_missing('\u{fdd0}'));
        assert!(is_known_missing('\u{fffe}'));
        assert!(is_known_missing('\u{1ffff}'));
        assert!(!is_known_missing('a'));
        assert!(!is_known_missing('中'));
        assert!(!is_known_missing('─'));
    }
}
