//! Board module: the votable entries and the ranked view over them.
//!
//! `board::model` holds `Entry` and its identifier, `board::ranking` holds the
//! canonical in-memory collection and the top-slice ordering.

mod model;
mod ranking;

pub use model::*;
pub use ranking::*;
