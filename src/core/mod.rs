//! The headless, front-end agnostic editing engine: the document buffer,
//! the text-area view over it, the menu bar, the file dialog, commands and
//! input routing. Both the terminal and GUI front-ends drive this module.

pub mod app;
pub mod buffer;
pub mod command;
pub mod commands;
pub mod dialog;
pub mod dispatcher;
pub mod geometry;
pub mod input;
pub mod input_router;
pub mod keymap;
pub mod menu;
pub mod utf8;
pub mod window;
