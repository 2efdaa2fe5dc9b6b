//! Conversion of documents to vtkio types for other VTK formats
//!
//! A [MeshDocument](crate::MeshDocument) can always be written back as VTU
//! with [export()](crate::MeshDocument::export). This module is for everything
//! else, such as legacy `.vtk` files for older tools, or passing the data on to
//! other code built on [vtkio].
//!
//! ```rust, no_run
//! # use feapost_vtu::MeshDocument;
//! # use feapost_vtu::vtk::{write_vtk, DocumentToVtk, VtkFormat};
//! let document = MeshDocument::parse("Pblock00010.vtu").unwrap();
//!
//! let vtk = DocumentToVtk::new().convert(&document).unwrap();
//! write_vtk(vtk, "Pblock00010.vtk", VtkFormat::LegacyAscii).unwrap();
//! ```

mod builder;
mod convert;

#[doc(inline)]
pub use builder::DocumentToVtkBuilder;

#[doc(inline)]
pub use convert::DocumentToVtk;

// standard library
use std::path::Path;

// crate modules
use crate::error::Result;

// external crates
use log::debug;
use vtkio::model::Vtk;

/// Supported output formats for [write_vtk()]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VtkFormat {
    /// XML format, the flavour is decided by the file extension, e.g. `.vtu`
    #[default]
    Xml,
    /// Legacy `.vtk` text format
    LegacyAscii,
    /// Legacy `.vtk` binary format, always big endian
    LegacyBinary,
}

/// Convert a document to a vtkio [Vtk] with the default settings
///
/// Shorthand for `DocumentToVtk::default().convert(document)`.
pub fn document_to_vtk(document: &crate::MeshDocument) -> Result<Vtk> {
    DocumentToVtk::default().convert(document)
}

/// Write a [Vtk] to `path` in the requested format
pub fn write_vtk<P: AsRef<Path>>(vtk: Vtk, path: P, format: VtkFormat) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing {} as {format:?}", path.display());

    match format {
        VtkFormat::Xml => vtk.export(path)?,
        VtkFormat::LegacyAscii => vtk.export_ascii(path)?,
        VtkFormat::LegacyBinary => vtk.export_be(path)?,
    }

    Ok(())
}
