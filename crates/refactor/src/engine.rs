//! Application of a field layout to a single document

// crate modules
use crate::eigen::symmetric_eigenvalues;
use crate::error::{Error, Result};
use crate::layout::{ExtractionRule, FieldLayout};

// feapost modules
use feapost_vtu::{DataField, MeshDocument};

// external crates
use log::debug;

/// Split up the packed point fields of a document according to `layout`
///
/// This is all or nothing. The layout is validated and every new field is
/// computed before the document is touched, so any error leaves the document
/// exactly as it was.
///
/// Once everything is staged, the new fields are added in declaration order,
/// each rule immediately followed by its eigenvalue field if requested. Only
/// then are the source fields removed. Fields not named in the layout are left
/// alone.
///
/// ```rust
/// # use feapost_refactor::{refactor, ExtractionRule, FieldLayout};
/// # use feapost_vtu::MeshDocument;
/// # let xml = r#"<VTKFile type="UnstructuredGrid"><UnstructuredGrid>
/// #   <Piece NumberOfPoints="1" NumberOfCells="1">
/// #     <PointData>
/// #       <DataArray type="Float64" Name="Packed" NumberOfComponents="3" format="ascii">1 2 3</DataArray>
/// #     </PointData>
/// #     <Points><DataArray type="Float64" NumberOfComponents="3" format="ascii">0 0 0</DataArray></Points>
/// #     <Cells>
/// #       <DataArray type="Int32" Name="connectivity" format="ascii">0</DataArray>
/// #       <DataArray type="Int32" Name="offsets" format="ascii">1</DataArray>
/// #       <DataArray type="UInt8" Name="types" format="ascii">1</DataArray>
/// #     </Cells>
/// #   </Piece>
/// # </UnstructuredGrid></VTKFile>"#;
/// let mut document = MeshDocument::parse_str(xml).unwrap();
///
/// // "Packed" has 3 components per node, split it into 1 + 2
/// let layout = FieldLayout::new().source(
///     "Packed",
///     vec![ExtractionRule::new("First", 0, 1), ExtractionRule::new("Rest", 1, 2)],
/// );
/// refactor(&mut document, &layout).unwrap();
///
/// assert!(document.point_field("Packed").is_none());
/// assert_eq!(document.point_field("First").unwrap().values(), &[1.0]);
/// assert_eq!(document.point_field("Rest").unwrap().values(), &[2.0, 3.0]);
/// ```
pub fn refactor(document: &mut MeshDocument, layout: &FieldLayout) -> Result<()> {
    layout.validate(document)?;

    let staged = stage(document, layout)?;
    let added = staged.len();

    for (name, field) in staged {
        document.set_point_field(&name, field)?;
    }

    for source in layout.sources() {
        document.remove_point_field(&source.name);
    }

    debug!(
        "Refactored {} source field(s) into {added} new field(s)",
        layout.len()
    );
    Ok(())
}

/// Compute every new field without modifying the document
fn stage(document: &MeshDocument, layout: &FieldLayout) -> Result<Vec<(String, DataField)>> {
    let mut staged = Vec::new();

    for (source, rule) in layout.rules() {
        let field = document
            .point_field(&source.name)
            .ok_or_else(|| Error::FieldNotFound(source.name.clone()))?;

        let extracted = extract(field, rule)?;

        if rule.eigenvalues {
            let principal = eigenvalues(&extracted, rule)?;
            staged.push((rule.target.clone(), extracted));
            staged.push((rule.eigenvalue_target(), principal));
        } else {
            staged.push((rule.target.clone(), extracted));
        }
    }

    Ok(staged)
}

/// Copy the components of a rule out of every node of the source field
fn extract(field: &DataField, rule: &ExtractionRule) -> Result<DataField> {
    let values = field
        .tuples()
        .flat_map(|tuple| tuple[rule.start..rule.end()].iter().copied())
        .collect::<Vec<f64>>();

    Ok(DataField::new(rule.length, values)?)
}

/// Principal values of every 6 component tensor in an extracted field
fn eigenvalues(extracted: &DataField, rule: &ExtractionRule) -> Result<DataField> {
    let mut values = Vec::with_capacity(3 * extracted.len());

    for (node, tuple) in extracted.tuples().enumerate() {
        let tensor: &[f64; 6] = tuple
            .try_into()
            .map_err(|_| Error::UnsupportedEigenLength {
                target: rule.target.clone(),
                length: tuple.len(),
            })?;

        if !tensor.iter().all(|v| v.is_finite()) {
            return Err(Error::NonFiniteTensor {
                target: rule.target.clone(),
                node,
            });
        }

        values.extend(symmetric_eigenvalues(tensor));
    }

    Ok(DataField::new(3, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_slices_every_node() {
        let field = DataField::new(4, (0..12).map(|v| v as f64).collect()).unwrap();
        let rule = ExtractionRule::new("Middle", 1, 2);

        let extracted = extract(&field, &rule).unwrap();
        assert_eq!(extracted.components(), 2);
        assert_eq!(extracted.values(), &[1.0, 2.0, 5.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn eigenvalues_need_six_components() {
        let field = DataField::new(3, vec![1.0, 2.0, 3.0]).unwrap();
        let rule = ExtractionRule::new("Short", 0, 3).with_eigenvalues(true);

        assert!(matches!(
            eigenvalues(&field, &rule),
            Err(Error::UnsupportedEigenLength { length: 3, .. })
        ));
    }

    #[test]
    fn eigenvalues_reject_non_finite_tensors() {
        let rule = ExtractionRule::new("Sigma", 0, 6).with_eigenvalues(true);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let values = vec![1.0, 1.0, 2.0, 0.5, 0.0, 0.0, bad, 1.0, 2.0, 0.5, 0.0, 0.0];
            let field = DataField::new(6, values).unwrap();

            assert!(matches!(
                eigenvalues(&field, &rule),
                Err(Error::NonFiniteTensor { node: 1, .. })
            ));
        }
    }
}
