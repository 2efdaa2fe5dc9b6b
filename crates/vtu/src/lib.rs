//! Reading, modifying, and writing VTU files produced by FEAP
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod cells;
mod decode;
mod document;
mod error;
mod field;

pub mod vtk;

// Inline anything important for a nice public API
#[doc(inline)]
pub use document::MeshDocument;

#[doc(inline)]
pub use cells::{CellKind, Cells};

#[doc(inline)]
pub use field::{DataField, FieldMap};

#[doc(inline)]
pub use decode::has_dropped_exponent;

#[doc(inline)]
pub use vtk::{document_to_vtk, write_vtk};

#[doc(inline)]
pub use error::{Error, Result};
