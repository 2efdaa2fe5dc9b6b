//! Restructuring of packed FEAP point fields
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod batch;
mod eigen;
mod engine;
mod error;
mod layout;

// Inline anything important for a nice public API
#[doc(inline)]
pub use layout::{ExtractionRule, FieldLayout, SourceLayout, EIGENVALUE_SUFFIX};

#[doc(inline)]
pub use engine::refactor;

#[doc(inline)]
pub use eigen::symmetric_eigenvalues;

#[doc(inline)]
pub use batch::{
    output_path, refactor_directory, refactor_file, refactor_files, BatchOptions, BatchReport,
    FileOutcome,
};

#[doc(inline)]
pub use error::{Error, Result};
