//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, writing floats back to ASCII data arrays without losing
//! precision, or prettier formatting for scientific numbers in summary tables.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod value_ext;

// Flatten
pub use value_ext::{FloatExt, ValueExt};
