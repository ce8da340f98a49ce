//! GUI front-end: a winit window drawn with wgpu
//!
//! The GUI shows the same cell grid as the terminal. `Display` composes the
//! window into a `ScreenBuffer`; `GridRenderer` draws that buffer with one
//! instanced quad per cell, using glyphs rasterized by fontdue from fonts
//! found through font-kit.

pub mod font_loader;
pub mod grid_renderer;
pub mod input;

pub use grid_renderer::GridRenderer;

/// Default font size in pixels
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
