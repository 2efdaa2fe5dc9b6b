// crate modules
use crate::cells::CellKind;
use crate::error::{Error, Result};
use crate::field::FieldMap;
use crate::vtk::DocumentToVtkBuilder;
use crate::MeshDocument;

// external crates
use vtkio::model::{
    Attribute, Attributes, ByteOrder, CellType, Cells, DataArray, DataSet, ElementType, IOBuffer,
    UnstructuredGridPiece, Version, VertexNumbers, Vtk,
};

/// Convert a [MeshDocument] to vtkio types for writing in other formats
///
/// Every point and cell field becomes a generic data array with the same name
/// and number of components. Cell types map one to one, but any
/// [CellKind::Other] fails with [Error::UnsupportedCellType] since vtkio only
/// knows the standard linear and quadratic types.
///
/// ```rust
/// # use feapost_vtu::vtk::DocumentToVtk;
/// # use vtkio::model::ByteOrder;
/// let converter = DocumentToVtk::default();
/// assert_eq!(converter.byte_order, ByteOrder::BigEndian);
/// assert!(converter.include_point_data);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentToVtk {
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
    /// Title written to the vtk header
    pub title: String,
    /// Include point fields
    pub include_point_data: bool,
    /// Include cell fields
    pub include_cell_data: bool,
}

// Public API
impl DocumentToVtk {
    /// Start with the default configuration
    pub fn new() -> DocumentToVtk {
        Default::default()
    }

    /// Get an instance of the [DocumentToVtkBuilder]
    pub fn builder() -> DocumentToVtkBuilder {
        DocumentToVtkBuilder::default()
    }

    /// Convert a [MeshDocument] to a vtkio::Vtk object
    pub fn convert(&self, document: &MeshDocument) -> Result<Vtk> {
        let cells = document.cells();

        let types = cells
            .types()
            .iter()
            .map(|kind| cell_type(*kind))
            .collect::<Result<Vec<CellType>>>()?;

        Ok(Vtk {
            version: Version::Auto,
            title: self.title.clone(),
            byte_order: self.byte_order,
            file_path: None,
            data: DataSet::inline(UnstructuredGridPiece {
                points: IOBuffer::F64(document.points().iter().flatten().copied().collect()),
                cells: Cells {
                    cell_verts: VertexNumbers::XML {
                        connectivity: cells.connectivity().iter().map(|&n| n as u64).collect(),
                        offsets: cells.offsets().iter().map(|&n| n as u64).collect(),
                    },
                    types,
                },
                data: self.collect_attributes(document),
            }),
        })
    }
}

impl Default for DocumentToVtk {
    fn default() -> Self {
        DocumentToVtkBuilder::default().build()
    }
}

impl DocumentToVtk {
    /// Collect every requested field as generic vtk data arrays
    fn collect_attributes(&self, document: &MeshDocument) -> Attributes {
        let mut attributes = Attributes::new();

        if self.include_point_data {
            attributes.point = data_arrays(document.point_data());
        }

        if self.include_cell_data {
            attributes.cell = data_arrays(document.cell_data());
        }

        attributes
    }
}

fn data_arrays(fields: &FieldMap) -> Vec<Attribute> {
    fields
        .iter()
        .map(|(name, field)| {
            Attribute::DataArray(DataArray {
                name: name.clone(),
                elem: ElementType::Generic(field.components() as u32),
                data: IOBuffer::F64(field.values().to_vec()),
            })
        })
        .collect()
}

fn cell_type(kind: CellKind) -> Result<CellType> {
    let cell_type = match kind {
        CellKind::Vertex => CellType::Vertex,
        CellKind::Line => CellType::Line,
        CellKind::Triangle => CellType::Triangle,
        CellKind::Quad => CellType::Quad,
        CellKind::Tetra => CellType::Tetra,
        CellKind::Hexahedron => CellType::Hexahedron,
        CellKind::Wedge => CellType::Wedge,
        CellKind::Pyramid => CellType::Pyramid,
        CellKind::Other(code) => return Err(Error::UnsupportedCellType(code)),
    };

    Ok(cell_type)
}
