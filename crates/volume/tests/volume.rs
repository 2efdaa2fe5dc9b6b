//! Integration tests for document volumes and volume series

use std::fs;

use approx::assert_relative_eq;
use feapost_series::SeriesOrder;
use feapost_volume::{
    compute_volume, compute_volume_file, compute_volume_series, volume_series, Configuration,
    Error, SeriesOptions, VolumeSeries, VolumeStep,
};
use feapost_vtu::MeshDocument;
use rstest::rstest;

#[rstest]
#[case("./data/cube.vtu", Configuration::Reference, 1.0)]
#[case("./data/cube.vtu", Configuration::Deformed, 1.5)]
#[case("./data/series/Pcube00001.vtu", Configuration::Deformed, 1.2)]
#[case("./data/series/Pcube00002.vtu", Configuration::Deformed, 0.8)]
#[case("./data/mixed.vtu", Configuration::Reference, 2.0)] // only the hexahedron counts
fn document_volume(
    #[case] path: &str,
    #[case] configuration: Configuration,
    #[case] expected: f64,
) {
    let volume = compute_volume_file(path, configuration).unwrap();
    assert_relative_eq!(volume, expected, epsilon = 1e-12);
}

#[test]
fn deformed_needs_displacements() {
    let mut document = MeshDocument::parse("./data/cube.vtu").unwrap();
    document.remove_point_field("Displacements");

    assert_relative_eq!(
        compute_volume(&document, Configuration::Reference).unwrap(),
        1.0,
        epsilon = 1e-12
    );
    assert!(matches!(
        compute_volume(&document, Configuration::Deformed),
        Err(Error::MissingDisplacementField)
    ));
}

#[test]
fn deformed_needs_three_components() {
    assert!(matches!(
        compute_volume_file("./data/mixed.vtu", Configuration::Deformed),
        Err(Error::InvalidDisplacementField(2))
    ));
}

#[test]
fn no_hexahedra() {
    let xml = r#"<VTKFile type="UnstructuredGrid"><UnstructuredGrid>
      <Piece NumberOfPoints="4" NumberOfCells="1">
        <Points>
          <DataArray type="Float64" NumberOfComponents="3" format="ascii">0 0 0 1 0 0 0 1 0 0 0 1</DataArray>
        </Points>
        <Cells>
          <DataArray type="Int32" Name="connectivity" format="ascii">0 1 2 3</DataArray>
          <DataArray type="Int32" Name="offsets" format="ascii">4</DataArray>
          <DataArray type="UInt8" Name="types" format="ascii">10</DataArray>
        </Cells>
      </Piece>
    </UnstructuredGrid></VTKFile>"#;

    let document = MeshDocument::parse_str(xml).unwrap();
    assert!(matches!(
        compute_volume(&document, Configuration::Reference),
        Err(Error::NoHexahedra)
    ));
}

#[test]
fn hexahedron_with_wrong_node_count() {
    let xml = r#"<VTKFile type="UnstructuredGrid"><UnstructuredGrid>
      <Piece NumberOfPoints="4" NumberOfCells="1">
        <Points>
          <DataArray type="Float64" NumberOfComponents="3" format="ascii">0 0 0 1 0 0 0 1 0 0 0 1</DataArray>
        </Points>
        <Cells>
          <DataArray type="Int32" Name="connectivity" format="ascii">0 1 2 3</DataArray>
          <DataArray type="Int32" Name="offsets" format="ascii">4</DataArray>
          <DataArray type="UInt8" Name="types" format="ascii">12</DataArray>
        </Cells>
      </Piece>
    </UnstructuredGrid></VTKFile>"#;

    let document = MeshDocument::parse_str(xml).unwrap();
    assert!(matches!(
        compute_volume(&document, Configuration::Reference),
        Err(Error::InvalidHexahedron { index: 0, nodes: 4 })
    ));
}

#[rstest]
#[case(Configuration::Reference, false, [1.0, 1.0, 1.0])]
#[case(Configuration::Deformed, false, [1.0, 1.2, 0.8])]
#[case(Configuration::Deformed, true, [1.0, 1.2, 0.8])]
fn series_volumes(
    #[case] configuration: Configuration,
    #[case] normalize: bool,
    #[case] expected: [f64; 3],
) {
    let series = compute_volume_series("./data/series", configuration, normalize).unwrap();

    assert_eq!(series.ids(), vec![0, 1, 2]);
    assert_eq!(series.configuration, configuration);
    assert_eq!(series.normalized, normalize);
    assert!(series.failures.is_empty());
    assert_relative_eq!(series.volumes().as_slice(), expected.as_slice(), epsilon = 1e-12);
}

#[test]
fn normalization_rescales_every_entry() {
    let mut series = VolumeSeries::default();
    for (id, volume) in [(0, 10.0), (1, 12.0), (2, 8.0)] {
        series.steps.push(VolumeStep {
            id,
            path: format!("P{id:05}.vtu").into(),
            volume,
        });
    }

    series.normalize().unwrap();

    assert_eq!(series.steps[0].volume, 1.0);
    assert_eq!(series.volumes(), vec![1.0, 1.2, 0.8]);
    assert!(series.normalized);
}

#[test]
fn normalization_failures() {
    let mut empty = VolumeSeries::default();
    assert!(matches!(empty.normalize(), Err(Error::EmptySeries)));

    let mut zero = VolumeSeries::default();
    zero.steps.push(VolumeStep {
        id: 0,
        path: "P00000.vtu".into(),
        volume: 0.0,
    });
    assert!(matches!(zero.normalize(), Err(Error::ZeroReferenceVolume)));
}

#[test]
fn failed_steps_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Pcube00000.vtu"), "<VTKFile>").unwrap();
    for id in [1, 2] {
        let name = format!("Pcube{id:05}.vtu");
        fs::copy(format!("./data/series/{name}"), dir.path().join(&name)).unwrap();
    }

    let series = compute_volume_series(dir.path(), Configuration::Deformed, true).unwrap();

    assert_eq!(series.failures.len(), 1);
    assert_eq!(series.failures[0].id, 0);
    assert_eq!(series.ids(), vec![1, 2]);

    // normalised by the first step that could be evaluated
    assert_eq!(series.steps[0].volume, 1.0);
    assert_relative_eq!(series.steps[1].volume, 0.8 / 1.2, epsilon = 1e-12);
}

#[test]
fn empty_series() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        compute_volume_series(dir.path(), Configuration::Reference, false),
        Err(Error::EmptySeries)
    ));

    fs::write(dir.path().join("Pcube00000.vtu"), "not xml").unwrap();
    assert!(matches!(
        compute_volume_series(dir.path(), Configuration::Reference, false),
        Err(Error::EmptySeries)
    ));
}

#[test]
fn series_in_time_step_order() {
    let dir = tempfile::tempdir().unwrap();
    // unpadded counters sort differently by path and by id
    for (source, name) in [
        ("Pcube00000.vtu", "cube_2.vtu"),
        ("Pcube00001.vtu", "cube_10.vtu"),
    ] {
        fs::copy(format!("./data/series/{source}"), dir.path().join(name)).unwrap();
    }

    let by_path = volume_series(dir.path(), &SeriesOptions::new()).unwrap();
    assert_eq!(by_path.ids(), vec![10, 2]);

    let options = SeriesOptions::new()
        .configuration(Configuration::Deformed)
        .order(SeriesOrder::TimeStep);
    let by_id = volume_series(dir.path(), &options).unwrap();
    assert_eq!(by_id.ids(), vec![2, 10]);
    assert_relative_eq!(by_id.volumes()[1], 1.2, epsilon = 1e-12);
}

#[test]
fn series_writers() {
    let series = compute_volume_series("./data/series", Configuration::Deformed, true).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let ascii = dir.path().join("volumes.txt");
    series.write_ascii(&ascii).unwrap();
    let text = fs::read_to_string(&ascii).unwrap();
    let lines = text.lines().collect::<Vec<&str>>();

    assert_eq!(lines[0], "# configuration: deformed");
    assert_eq!(lines[1], "# normalized: true");
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[3].split_whitespace().collect::<Vec<&str>>(),
        vec!["0", "1.00000000e+00"]
    );

    let json = dir.path().join("volumes.json");
    series.write_json(&json).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();

    assert_eq!(value["configuration"], "deformed");
    assert_eq!(value["normalized"], true);
    assert_eq!(value["steps"].as_array().unwrap().len(), 3);
    assert_eq!(value["steps"][0]["volume"], 1.0);
    assert!(value.get("failures").is_none());
}
