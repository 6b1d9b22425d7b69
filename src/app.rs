//! Application module: the interaction controller behind the TUI.
//!
//! `app::model` holds the explicit state (collection, selection, forms and
//! outstanding remote work); `app::controller` implements the transitions.

mod controller;
mod model;

pub use model::*;

#[cfg(test)]
mod tests;
