//! Result and Error types for the series module

/// Type alias for `Result<T, series::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `feapost-series`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// No numeric time step id could be found in the file name
    #[error("no time step id found in file name \"{0}\"")]
    MalformedFilename(String),
}
