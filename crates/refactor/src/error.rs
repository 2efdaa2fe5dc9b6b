//! Result and Error types for feapost-refactor

/// Type alias for Result<T, refactor::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `feapost-refactor` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to deserialise field layout")]
    FailedSerde(#[from] serde_json::Error),

    #[error(transparent)]
    VtuError(#[from] feapost_vtu::Error),

    #[error(transparent)]
    SeriesError(#[from] feapost_series::Error),

    #[error("field \"{0}\" not found in point data")]
    FieldNotFound(String),

    #[error("field \"{0}\" is declared more than once in the layout")]
    DuplicateSource(String),

    #[error("rule \"{target}\" takes components {start}..{end} of \"{source_name}\", which has {available}")]
    ComponentsOutOfRange {
        source_name: String,
        target: String,
        start: usize,
        end: usize,
        available: usize,
    },

    #[error("eigenvalues of \"{target}\" need 6 symmetric tensor components, found {length}")]
    UnsupportedEigenLength { target: String, length: usize },

    #[error("eigenvalues of \"{target}\" are undefined, node {node} has a non-finite component")]
    NonFiniteTensor { target: String, node: usize },

    #[error("field name \"{0}\" is ambiguous, it would be written more than once or collides with an existing field")]
    AmbiguousTargetName(String),

    #[error("output file name could not be derived from {0}")]
    InvalidOutputPath(String),
}
