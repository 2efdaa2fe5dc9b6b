//! Volume of a single document

// crate modules
use crate::error::{Error, Result};
use crate::geometry::hexahedron_volume;

// feapost modules
use feapost_vtu::{CellKind, MeshDocument};

// external crates
use serde::Serialize;

/// Name of the point field holding nodal displacements
pub const DISPLACEMENT_FIELD: &str = "Displacements";

/// Geometry used for volume calculations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    /// Undeformed node coordinates as written in the mesh
    #[default]
    Reference,
    /// Node coordinates plus the `Displacements` point field
    Deformed,
}

impl From<bool> for Configuration {
    /// `true` for [Configuration::Deformed]
    fn from(deformed: bool) -> Self {
        if deformed {
            Configuration::Deformed
        } else {
            Configuration::Reference
        }
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Configuration::Reference => write!(f, "reference"),
            Configuration::Deformed => write!(f, "deformed"),
        }
    }
}

/// Total volume of every hexahedron in a document
///
/// Other cell types are ignored, but there must be at least one hexahedron.
/// For the [Configuration::Deformed] geometry, the first 3 components of the
/// `Displacements` point field are added to every node.
pub fn compute_volume(document: &MeshDocument, configuration: Configuration) -> Result<f64> {
    let nodes = node_coordinates(document, configuration)?;

    let mut total = 0.0;
    let mut count = 0;

    for (index, (kind, connectivity)) in document.cells().iter().enumerate() {
        if kind != CellKind::Hexahedron {
            continue;
        }

        let corners: &[usize; 8] = connectivity
            .try_into()
            .map_err(|_| Error::InvalidHexahedron {
                index,
                nodes: connectivity.len(),
            })?;

        total += hexahedron_volume(&corners.map(|n| nodes[n]));
        count += 1;
    }

    if count == 0 {
        return Err(Error::NoHexahedra);
    }

    Ok(total)
}

/// Effective coordinates of every node for the requested geometry
fn node_coordinates(
    document: &MeshDocument,
    configuration: Configuration,
) -> Result<Vec<[f64; 3]>> {
    let points = document.points();

    if configuration == Configuration::Reference {
        return Ok(points.to_vec());
    }

    let displacements = document
        .point_field(DISPLACEMENT_FIELD)
        .ok_or(Error::MissingDisplacementField)?;

    if displacements.components() < 3 {
        return Err(Error::InvalidDisplacementField(displacements.components()));
    }

    Ok(points
        .iter()
        .zip(displacements.tuples())
        .map(|(x, u)| [x[0] + u[0], x[1] + u[1], x[2] + u[2]])
        .collect())
}
