//! Integration tests for reading, modifying, and writing VTU documents

use approx::assert_relative_eq;
use feapost_vtu::{CellKind, DataField, Error, MeshDocument};
use rstest::{fixture, rstest};

#[fixture]
fn cube() -> MeshDocument {
    MeshDocument::parse("./data/cube.vtu").unwrap()
}

/// Minimal single point document with the Piece attributes and payload swapped in
fn single_point(piece_attributes: &str, point_data: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<VTKFile type="UnstructuredGrid">
  <UnstructuredGrid>
    <Piece {piece_attributes}>
      <PointData>{point_data}</PointData>
      <Points>
        <DataArray type="Float64" NumberOfComponents="3" format="ascii">0 0 0</DataArray>
      </Points>
      <Cells>
        <DataArray type="Int32" Name="connectivity" format="ascii">0</DataArray>
        <DataArray type="Int32" Name="offsets" format="ascii">1</DataArray>
        <DataArray type="UInt8" Name="types" format="ascii">1</DataArray>
      </Cells>
    </Piece>
  </UnstructuredGrid>
</VTKFile>"#
    )
}

#[rstest]
fn parse_cube(cube: MeshDocument) {
    assert_eq!(cube.number_of_points(), 8);
    assert_eq!(cube.number_of_cells(), 1);
    assert_eq!(cube.points()[6], [1.0, 1.0, 1.0]);

    let (kind, nodes) = cube.cells().iter().next().unwrap();
    assert_eq!(kind, CellKind::Hexahedron);
    assert_eq!(nodes, &[0, 1, 2, 3, 4, 5, 6, 7]);

    let names = cube.point_data().keys().cloned().collect::<Vec<String>>();
    assert_eq!(names, vec!["Displacements", "Stresses", "Temperature"]);

    let stresses = cube.point_field("Stresses").unwrap();
    assert_eq!(stresses.components(), 8);
    assert_eq!(stresses.len(), 8);
    assert_eq!(stresses.tuple(3).unwrap()[6..], [3.0, 13.0]);

    let material = cube.cell_field("Material").unwrap();
    assert_eq!(material.values(), &[1.0]);
}

#[rstest]
fn dropped_exponent_is_repaired(cube: MeshDocument) {
    let temperature = cube.point_field("Temperature").unwrap();
    assert_eq!(temperature.values()[2], 0.0);
    for (i, value) in temperature.values().iter().enumerate() {
        if i != 2 {
            assert_relative_eq!(*value, 293.15);
        }
    }
}

#[rstest]
fn unmodified_round_trip(cube: MeshDocument) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube_copy.vtu");

    cube.export(&path).unwrap();
    let copy = MeshDocument::parse(&path).unwrap();

    assert_eq!(copy.points(), cube.points());
    assert_eq!(copy.cells(), cube.cells());
    assert_eq!(copy.point_data(), cube.point_data());
    assert_eq!(copy.cell_data(), cube.cell_data());
}

#[rstest]
fn export_writes_declaration(cube: MeshDocument) {
    let xml = cube.to_xml_string().unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("Name=\"Stresses\""));
}

#[rstest]
fn set_and_remove_point_fields(mut cube: MeshDocument) {
    let values = (0..16).map(|v| v as f64 * 0.25).collect::<Vec<f64>>();
    let field = DataField::new(2, values.clone()).unwrap();

    cube.set_point_field("Pairs", field).unwrap();
    assert!(cube.remove_point_field("Stresses").is_some());
    assert!(cube.remove_point_field("Stresses").is_none());

    let xml = cube.to_xml_string().unwrap();
    assert!(!xml.contains("Name=\"Stresses\""));
    assert!(xml.contains(
        r#"<DataArray type="Float64" Name="Pairs" NumberOfComponents="2" format="ascii">"#
    ));

    let copy = MeshDocument::parse_str(&xml).unwrap();
    assert!(copy.point_field("Stresses").is_none());

    let pairs = copy.point_field("Pairs").unwrap();
    assert_eq!(pairs.components(), 2);
    assert_eq!(pairs.values(), values.as_slice());

    // untouched data is unchanged
    assert_eq!(copy.point_field("Displacements"), cube.point_field("Displacements"));
    assert_eq!(copy.cell_field("Material"), cube.cell_field("Material"));
}

#[rstest]
fn replace_existing_field(mut cube: MeshDocument) {
    let field = DataField::new(1, vec![1.0; 8]).unwrap();
    cube.set_point_field("Temperature", field).unwrap();

    let xml = cube.to_xml_string().unwrap();
    assert_eq!(xml.matches("Name=\"Temperature\"").count(), 1);

    let copy = MeshDocument::parse_str(&xml).unwrap();
    assert_eq!(copy.point_field("Temperature").unwrap().values(), &[1.0; 8]);
}

#[rstest]
fn set_field_with_wrong_length(mut cube: MeshDocument) {
    let field = DataField::new(3, vec![0.0; 9]).unwrap();
    let result = cube.set_point_field("Short", field);

    assert!(matches!(
        result,
        Err(Error::FieldLengthMismatch {
            expected: 24,
            found: 9,
            ..
        })
    ));
    assert!(cube.point_field("Short").is_none());
}

#[test]
fn point_data_section_is_created() {
    let xml = single_point(r#"NumberOfPoints="1" NumberOfCells="1""#, "")
        .replace("<PointData></PointData>", "");
    let mut document = MeshDocument::parse_str(&xml).unwrap();
    assert!(document.point_data().is_empty());

    let field = DataField::new(1, vec![5.0]).unwrap();
    document.set_point_field("New", field).unwrap();

    let copy = MeshDocument::parse_str(&document.to_xml_string().unwrap()).unwrap();
    assert_eq!(copy.point_field("New").unwrap().values(), &[5.0]);
}

#[test]
fn components_default_to_one() {
    let xml = single_point(
        r#"NumberOfPoints="1" NumberOfCells="1""#,
        r#"<DataArray type="Float64" Name="T" format="ascii">1.5</DataArray>"#,
    );
    let document = MeshDocument::parse_str(&xml).unwrap();
    assert_eq!(document.point_field("T").unwrap().components(), 1);
}

#[rstest]
#[case(r#"NumberOfCells="1""#, "")] // missing NumberOfPoints
#[case(r#"NumberOfPoints="1""#, "")] // missing NumberOfCells
#[case(r#"NumberOfPoints="one" NumberOfCells="1""#, "")] // not numeric
#[case(r#"NumberOfPoints="2" NumberOfCells="1""#, "")] // too few coordinates
#[case(
    r#"NumberOfPoints="1" NumberOfCells="1""#,
    r#"<DataArray type="Float64" Name="T" NumberOfComponents="2" format="ascii">1.0</DataArray>"#
)] // field length
#[case(
    r#"NumberOfPoints="1" NumberOfCells="1""#,
    r#"<DataArray type="Float64" NumberOfComponents="1" format="ascii">1.0</DataArray>"#
)] // no field name
#[case(
    r#"NumberOfPoints="1" NumberOfCells="1""#,
    r#"<DataArray type="Float64" Name="T" format="ascii">1.0</DataArray>
       <DataArray type="Float64" Name="T" format="ascii">2.0</DataArray>"#
)] // duplicate name
#[case(
    r#"NumberOfPoints="1" NumberOfCells="1""#,
    r#"<DataArray type="Float64" Name="T" format="binary">AAAA</DataArray>"#
)] // unsupported format
#[case(
    r#"NumberOfPoints="1" NumberOfCells="1""#,
    r#"<DataArray type="Float64" Name="T" format="ascii">1.0e</DataArray>"#
)] // bad number
fn malformed_documents(#[case] attributes: &str, #[case] point_data: &str) {
    let xml = single_point(attributes, point_data);
    let result = MeshDocument::parse_str(&xml);
    assert!(
        matches!(result, Err(Error::MalformedDocument(_))),
        "{result:?}"
    );
}

#[test]
fn missing_piece() {
    let xml = r#"<VTKFile type="UnstructuredGrid"><UnstructuredGrid/></VTKFile>"#;
    assert!(matches!(
        MeshDocument::parse_str(xml),
        Err(Error::MalformedDocument(_))
    ));
}

#[test]
fn not_xml() {
    assert!(matches!(
        MeshDocument::parse_str("<VTKFile><Piece></VTKFile>"),
        Err(Error::MalformedXml(_))
    ));
}

#[test]
fn missing_file() {
    assert!(matches!(
        MeshDocument::parse("./data/does_not_exist.vtu"),
        Err(Error::IOError(_))
    ));
}
