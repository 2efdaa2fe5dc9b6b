//! Result and Error types for feapost-volume

/// Type alias for Result<T, volume::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `feapost-volume` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to serialise volume series")]
    FailedSerde(#[from] serde_json::Error),

    #[error(transparent)]
    VtuError(#[from] feapost_vtu::Error),

    #[error(transparent)]
    SeriesError(#[from] feapost_series::Error),

    #[error("deformed volume requested but there is no \"Displacements\" point field")]
    MissingDisplacementField,

    #[error("\"Displacements\" needs at least 3 components, found {0}")]
    InvalidDisplacementField(usize),

    #[error("mesh has no hexahedral cells")]
    NoHexahedra,

    #[error("hexahedron {index} has {nodes} nodes, expected 8")]
    InvalidHexahedron { index: usize, nodes: usize },

    #[error("reference volume is zero, unable to normalise")]
    ZeroReferenceVolume,

    #[error("no time step could be evaluated")]
    EmptySeries,
}
