//! Discovery and ordering of simulation time series files
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod entry;
mod error;
mod locate;
mod parsers;

// Inline anything important for a nice public API
#[doc(inline)]
pub use entry::{SeriesEntry, SeriesOrder};

#[doc(inline)]
pub use locate::{locate, locate_ordered, remove_solver_outputs, solver_outputs, step_id};

#[doc(inline)]
pub use error::{Error, Result};
