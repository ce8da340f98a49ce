//! Renderers for each part of the window
//!
//! Each one paints into the shared `ScreenBuffer`; `Display::render` calls
//! them in stacking order.

pub mod dialog_renderer;
pub mod menu_renderer;
pub mod status_renderer;
pub mod text_renderer;

pub use dialog_renderer::DialogRenderer;
pub use menu_renderer::MenuRenderer;
pub use status_renderer::StatusRenderer;
pub use text_renderer::TextRenderer;
