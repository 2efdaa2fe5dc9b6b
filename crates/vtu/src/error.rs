//! Result and Error types for feapost-vtu

/// Type alias for Result<T, vtu::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `feapost-vtu` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("file is not well-formed XML")]
    MalformedXml(#[from] xmltree::ParseError),

    #[error("failed to write XML tree")]
    XmlWriteError(#[from] xmltree::Error),

    #[error("vtkio error")]
    VtkioError(#[from] vtkio::Error),

    #[error("malformed VTU document: {0}")]
    MalformedDocument(String),

    #[error("field \"{name}\" has {found} values, expected {expected}")]
    FieldLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{length} values can not be split into tuples of {components} components")]
    InvalidFieldShape { components: usize, length: usize },

    #[error("cell type {0} has no VTK model equivalent")]
    UnsupportedCellType(u8),
}
