//! Cell connectivity of an unstructured grid

// crate modules
use crate::error::{Error, Result};

// feapost modules
use feapost_utils::f;

/// VTK cell types relevant to FEAP output
///
/// The discriminants are the VTK cell type codes found in the `types` array.
/// Anything not listed is kept as [CellKind::Other] so that the connectivity
/// can still be iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// 1 node point element
    Vertex,
    /// 2 node line element
    Line,
    /// 3 node triangle
    Triangle,
    /// 4 node quadrilateral
    Quad,
    /// 4 node tetrahedron
    Tetra,
    /// 8 node hexahedron (brick)
    Hexahedron,
    /// 6 node wedge (prism)
    Wedge,
    /// 5 node pyramid
    Pyramid,
    /// Any other VTK cell type code
    Other(u8),
}

impl CellKind {
    /// VTK cell type code
    pub fn code(&self) -> u8 {
        match self {
            CellKind::Vertex => 1,
            CellKind::Line => 3,
            CellKind::Triangle => 5,
            CellKind::Quad => 9,
            CellKind::Tetra => 10,
            CellKind::Hexahedron => 12,
            CellKind::Wedge => 13,
            CellKind::Pyramid => 14,
            CellKind::Other(code) => *code,
        }
    }

    /// Expected number of nodes, if fixed for this cell type
    pub fn number_of_nodes(&self) -> Option<usize> {
        match self {
            CellKind::Vertex => Some(1),
            CellKind::Line => Some(2),
            CellKind::Triangle => Some(3),
            CellKind::Quad => Some(4),
            CellKind::Tetra => Some(4),
            CellKind::Hexahedron => Some(8),
            CellKind::Wedge => Some(6),
            CellKind::Pyramid => Some(5),
            CellKind::Other(_) => None,
        }
    }
}

impl From<u8> for CellKind {
    fn from(code: u8) -> Self {
        match code {
            1 => CellKind::Vertex,
            3 => CellKind::Line,
            5 => CellKind::Triangle,
            9 => CellKind::Quad,
            10 => CellKind::Tetra,
            12 => CellKind::Hexahedron,
            13 => CellKind::Wedge,
            14 => CellKind::Pyramid,
            _ => CellKind::Other(code),
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CellKind::Other(code) => write!(f, "Other({code})"),
            kind => write!(f, "{kind:?}"),
        }
    }
}

/// Cell connectivity in the VTK XML layout
///
/// - `connectivity` is every node index of every cell, one after another
/// - `offsets` is the end position of each cell in `connectivity`
/// - `types` is the [CellKind] of each cell
///
/// For example, a single hexahedron followed by a single tetrahedron:
///
/// ```text
/// connectivity = [0 1 2 3 4 5 6 7 8 9 10 11]
/// offsets      = [8 12]
/// types        = [12 10]
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cells {
    connectivity: Vec<usize>,
    offsets: Vec<usize>,
    types: Vec<CellKind>,
}

impl Cells {
    /// Build the connectivity, checking it is consistent with the mesh size
    ///
    /// Offsets must be non-decreasing and end exactly at the length of the
    /// connectivity array, there must be one offset and type per cell, and
    /// every node index must refer to an existing point.
    pub fn new(
        connectivity: Vec<usize>,
        offsets: Vec<usize>,
        types: Vec<CellKind>,
        number_of_points: usize,
    ) -> Result<Self> {
        if offsets.len() != types.len() {
            return Err(Error::MalformedDocument(f!(
                "{} cell offsets but {} cell types",
                offsets.len(),
                types.len()
            )));
        }

        if offsets.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(Error::MalformedDocument(
                "cell offsets are not in ascending order".to_string(),
            ));
        }

        let end = offsets.last().copied().unwrap_or(0);
        if end != connectivity.len() {
            return Err(Error::MalformedDocument(f!(
                "last cell offset {end} does not match connectivity length {}",
                connectivity.len()
            )));
        }

        if let Some(node) = connectivity.iter().find(|&&n| n >= number_of_points) {
            return Err(Error::MalformedDocument(f!(
                "node index {node} out of range for {number_of_points} points"
            )));
        }

        Ok(Self {
            connectivity,
            offsets,
            types,
        })
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if there are no cells
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Flat list of node indices for every cell
    pub fn connectivity(&self) -> &[usize] {
        &self.connectivity
    }

    /// End position of each cell in the connectivity list
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Type of each cell
    pub fn types(&self) -> &[CellKind] {
        &self.types
    }

    /// Iterate over the type and node indices of every cell in order
    pub fn iter(&self) -> impl Iterator<Item = (CellKind, &[usize])> + '_ {
        let starts = std::iter::once(0).chain(self.offsets.iter().copied());
        self.types
            .iter()
            .zip(starts.zip(self.offsets.iter().copied()))
            .map(|(kind, (start, end))| (*kind, &self.connectivity[start..end]))
    }

    /// Iterate over the node indices of every cell of one type
    pub fn of_kind(&self, kind: CellKind) -> impl Iterator<Item = &[usize]> + '_ {
        self.iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, nodes)| nodes)
    }
}
