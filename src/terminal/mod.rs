//! Terminal front-end: the cell grid, its renderers, raw mode and input
//! translation. `Display` is also what the GUI draws from.

pub mod color;
pub mod display;
pub mod events;
pub mod raw;
pub mod render;
pub mod renderers;
