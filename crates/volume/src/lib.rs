//! Volume of hexahedral meshes over a simulation time series
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod engine;
mod error;
mod geometry;
mod series;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use engine::{compute_volume, Configuration, DISPLACEMENT_FIELD};

#[doc(inline)]
pub use geometry::{hexahedron_volume, tetrahedron_volume, HEX_TO_TETS};

#[doc(inline)]
pub use series::{
    compute_volume_file, compute_volume_series, volume_series, SeriesOptions, StepFailure,
    VolumeSeries, VolumeStep,
};

#[doc(inline)]
pub use writer::{write_ascii, write_json};

#[doc(inline)]
pub use error::{Error, Result};
