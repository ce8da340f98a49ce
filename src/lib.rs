//! quill - a minimal text editor
//!
//! One window: a menu bar with a File menu, a text area and a status line.
//! The editing engine in [`core`] is front-end agnostic; [`terminal`] draws
//! it with crossterm and, with the `gui` feature, [`gui`] draws the same
//! cell grid in a wgpu window.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod run;
pub mod terminal;
pub mod user_config;

#[cfg(feature = "gui")]
pub mod gui;

pub use error::{EditorError, Result};
