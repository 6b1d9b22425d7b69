//! Presentation adapter: turns entries into list fragments for the UI.
//!
//! Rendering is a pure function of the entries and display settings. Every
//! fragment carries the entry id on each of its actions so key presses can be
//! resolved back to the entry that was drawn.

mod display;
mod view;

pub use view::*;
