//! Named data arrays attached to points or cells

// standard library
use std::collections::BTreeMap;
use std::slice::ChunksExact;

// crate modules
use crate::error::{Error, Result};

/// Mapping of field names to their data, e.g. point data or cell data
pub type FieldMap = BTreeMap<String, DataField>;

/// A flat array of values with a fixed number of components per entity
///
/// The values are stored entity-major, i.e. every component of point 0, then
/// every component of point 1, and so on. A displacement field for 3 points
/// with 3 components therefore looks like:
///
/// ```text
/// [ux0, uy0, uz0, ux1, uy1, uz1, ux2, uy2, uz2]
/// ```
///
/// The number of components is always at least 1 and always divides the
/// number of values exactly.
///
/// ```rust
/// # use feapost_vtu::DataField;
/// let field = DataField::new(3, vec![0.0, 0.1, 0.2, 1.0, 1.1, 1.2]).unwrap();
///
/// assert_eq!(field.len(), 2);
/// assert_eq!(field.tuple(1), Some(&[1.0, 1.1, 1.2][..]));
///
/// // 5 values can not be split into groups of 3
/// assert!(DataField::new(3, vec![0.0; 5]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataField {
    components: usize,
    values: Vec<f64>,
}

impl DataField {
    /// Create a new field, checking the shape is consistent
    pub fn new(components: usize, values: Vec<f64>) -> Result<Self> {
        if components == 0 || values.len() % components != 0 {
            return Err(Error::InvalidFieldShape {
                components,
                length: values.len(),
            });
        }

        Ok(Self { components, values })
    }

    /// Number of components per entity
    pub fn components(&self) -> usize {
        self.components
    }

    /// Flat, entity-major list of every value
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the field and take ownership of the values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of entities (tuples) in the field
    pub fn len(&self) -> usize {
        self.values.len() / self.components
    }

    /// True if the field holds no values at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Components of a single entity
    pub fn tuple(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.components)?;
        let end = start.checked_add(self.components)?;
        self.values.get(start..end)
    }

    /// Iterate over the components of every entity in order
    pub fn tuples(&self) -> ChunksExact<'_, f64> {
        self.values.chunks_exact(self.components)
    }
}
