// crate modules
use crate::vtk::DocumentToVtk;

// external crates
use vtkio::model::ByteOrder;

/// Builder implementation for [DocumentToVtk] configuration
///
/// The fields of [DocumentToVtk] are left public for direct use, but chained
/// setters are often easier to read.
///
/// ```rust
/// # use feapost_vtu::vtk::DocumentToVtk;
/// # use vtkio::model::ByteOrder;
/// let converter = DocumentToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .title("Block under compression")
///     .include_cell_data(false)
///     .build();
///
/// assert_eq!(converter.byte_order, ByteOrder::LittleEndian);
/// assert!(!converter.include_cell_data);
/// ```
#[derive(Debug)]
pub struct DocumentToVtkBuilder {
    /// Byte ordering as big or little endian
    byte_order: ByteOrder,
    /// Title written to the vtk header
    title: String,
    /// Include point fields
    include_point_data: bool,
    /// Include cell fields
    include_cell_data: bool,
}

impl DocumentToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [DocumentToVtk] type
    pub fn build(self) -> DocumentToVtk {
        DocumentToVtk {
            byte_order: self.byte_order,
            title: self.title,
            include_point_data: self.include_point_data,
            include_cell_data: self.include_cell_data,
        }
    }

    /// Set the byte ordering
    ///
    /// Only relevant to binary outputs. Defaults to big endian, which every
    /// reader understands.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Title written to the vtk header
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Include point fields, enabled by default
    pub fn include_point_data(mut self, include: bool) -> Self {
        self.include_point_data = include;
        self
    }

    /// Include cell fields, enabled by default
    pub fn include_cell_data(mut self, include: bool) -> Self {
        self.include_cell_data = include;
        self
    }
}

impl Default for DocumentToVtkBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            title: "FEAP results".to_string(),
            include_point_data: true,
            include_cell_data: true,
        }
    }
}
