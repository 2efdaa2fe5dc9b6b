//! In-memory model of a VTU unstructured grid file

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// crate modules
use crate::cells::{CellKind, Cells};
use crate::decode;
use crate::error::{Error, Result};
use crate::field::{DataField, FieldMap};

// feapost modules
use feapost_utils::{f, FloatExt};

// external crates
use log::debug;
use xmltree::{Element, EmitterConfig, XMLNode};

/// A parsed VTU file, ready for inspection and modification
///
/// The full XML tree is retained, so anything that is not explicitly modified
/// is written back exactly as it was read. On top of the tree, the document
/// exposes decoded views of the first `Piece` in the file:
///
/// - `points` - coordinates of every node, indexed by node id
/// - `cells` - connectivity and type of every cell
/// - `point_data` - named fields with one tuple per point
/// - `cell_data` - named fields with one tuple per cell
///
/// Every field is checked when the file is parsed so that the number of
/// values is always `components * entities`.
///
/// ## Reading and writing
///
/// ```rust, no_run
/// # use feapost_vtu::{DataField, MeshDocument};
/// // Read a FEAP output file
/// let mut document = MeshDocument::parse("Pblock00010.vtu").unwrap();
///
/// // Look at a field
/// let displacements = document.point_field("Displacements").unwrap();
/// println!("{} components", displacements.components());
///
/// // Add a new one, and remove another
/// let n = document.number_of_points();
/// let marker = DataField::new(1, vec![1.0; n]).unwrap();
/// document.set_point_field("Marker", marker).unwrap();
/// document.remove_point_field("Stresses");
///
/// // Write everything back to a new file
/// document.export("Pblock00010_modified.vtu").unwrap();
/// ```
///
/// ## Data repair
///
/// FEAP drops the exponent marker for values with a three digit exponent, so
/// `6.89234E-310` is written as `6.89234-310`. Any token matching
/// `<digit>.<5 digits>-<3 digits>` that fails to parse as a number is read as
/// `0.0` instead of failing. The original text is left untouched in the tree.
#[derive(Debug, Clone)]
pub struct MeshDocument {
    /// Full XML tree of the file
    root: Element,
    /// Coordinates of every point
    points: Vec<[f64; 3]>,
    /// Connectivity and type of every cell
    cells: Cells,
    /// Fields with one tuple per point
    point_data: FieldMap,
    /// Fields with one tuple per cell
    cell_data: FieldMap,
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

/// Reading and writing
impl MeshDocument {
    /// Read and validate a VTU file at `path`
    ///
    /// Fails with [Error::MalformedXml] if the file is not XML at all, or
    /// [Error::MalformedDocument] if the `Piece`, `Points`, or `Cells` elements
    /// are missing, the `NumberOfPoints`/`NumberOfCells` attributes are missing
    /// or not numeric, or any data array is inconsistent with them.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = init_reader(path)?;
        let document = Self::from_element(Element::parse(reader)?)?;
        debug!("Parsed {}: {}", path.display(), document.summary());
        Ok(document)
    }

    /// Read and validate VTU content already held in memory
    ///
    /// ```rust
    /// # use feapost_vtu::MeshDocument;
    /// let xml = r#"<VTKFile type="UnstructuredGrid">
    ///   <UnstructuredGrid>
    ///     <Piece NumberOfPoints="1" NumberOfCells="1">
    ///       <PointData>
    ///         <DataArray type="Float64" Name="T" NumberOfComponents="1" format="ascii">
    ///           293.15
    ///         </DataArray>
    ///       </PointData>
    ///       <Points>
    ///         <DataArray type="Float64" NumberOfComponents="3" format="ascii">0 0 0</DataArray>
    ///       </Points>
    ///       <Cells>
    ///         <DataArray type="Int32" Name="connectivity" format="ascii">0</DataArray>
    ///         <DataArray type="Int32" Name="offsets" format="ascii">1</DataArray>
    ///         <DataArray type="UInt8" Name="types" format="ascii">1</DataArray>
    ///       </Cells>
    ///     </Piece>
    ///   </UnstructuredGrid>
    /// </VTKFile>"#;
    ///
    /// let document = MeshDocument::parse_str(xml).unwrap();
    /// assert_eq!(document.point_field("T").unwrap().values(), &[293.15]);
    /// ```
    pub fn parse_str(xml: &str) -> Result<Self> {
        Self::from_element(Element::parse(xml.as_bytes())?)
    }

    /// Write the current state of the document to a VTU file at `path`
    ///
    /// Everything that was not modified is written back as it was read. Fields
    /// added with [set_point_field()](MeshDocument::set_point_field) are
    /// written as ASCII `Float64` data arrays.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = init_writer(path)?;
        self.root.write_with_config(&mut writer, emitter_config())?;
        writer.flush()?;
        debug!("Exported {}", path.display());
        Ok(())
    }

    /// Serialise the current state of the document to an XML string
    pub fn to_xml_string(&self) -> Result<String> {
        let mut buffer: Vec<u8> = Vec::new();
        self.root.write_with_config(&mut buffer, emitter_config())?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Read access to the decoded data
impl MeshDocument {
    /// Number of points in the piece
    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    /// Number of cells in the piece
    pub fn number_of_cells(&self) -> usize {
        self.cells.len()
    }

    /// Coordinates of every point, indexed by node id
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Cell connectivity and types
    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Every field attached to points
    pub fn point_data(&self) -> &FieldMap {
        &self.point_data
    }

    /// Every field attached to cells
    pub fn cell_data(&self) -> &FieldMap {
        &self.cell_data
    }

    /// A single point field by name
    pub fn point_field(&self, name: &str) -> Option<&DataField> {
        self.point_data.get(name)
    }

    /// A single cell field by name
    pub fn cell_field(&self, name: &str) -> Option<&DataField> {
        self.cell_data.get(name)
    }

    /// Short description of the document contents
    pub fn summary(&self) -> String {
        f!(
            "{} points, {} cells, {} point fields, {} cell fields",
            self.number_of_points(),
            self.number_of_cells(),
            self.point_data.len(),
            self.cell_data.len()
        )
    }
}

/// Modification of point data
impl MeshDocument {
    /// Add a point field, replacing any existing field of the same name
    ///
    /// The field must have exactly one tuple per point, otherwise this fails
    /// with [Error::FieldLengthMismatch] and the document is unchanged.
    pub fn set_point_field(&mut self, name: &str, field: DataField) -> Result<()> {
        let expected = field.components() * self.number_of_points();
        if field.values().len() != expected {
            return Err(Error::FieldLengthMismatch {
                name: name.to_string(),
                expected,
                found: field.values().len(),
            });
        }

        let section = self.point_data_element()?;
        remove_data_arrays(section, name);
        section
            .children
            .push(XMLNode::Element(data_array_element(name, &field)));

        self.point_data.insert(name.to_string(), field);
        Ok(())
    }

    /// Remove a point field, returning it if it existed
    pub fn remove_point_field(&mut self, name: &str) -> Option<DataField> {
        let removed = self.point_data.remove(name)?;
        if let Some(section) = piece_mut(&mut self.root).and_then(|p| p.get_mut_child("PointData"))
        {
            remove_data_arrays(section, name);
        }
        Some(removed)
    }
}

impl std::fmt::Display for MeshDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "MeshDocument {\n".to_string();
        s += &f!("    points: {}\n", self.number_of_points());
        s += &f!("    cells: {}\n", self.number_of_cells());
        for (name, field) in &self.point_data {
            s += &f!("    point field: {name} ({})\n", field.components());
        }
        for (name, field) in &self.cell_data {
            s += &f!("    cell field: {name} ({})\n", field.components());
        }
        s += "}";

        write!(f, "{}", s)
    }
}

// ! ------------------------------------------------------------------------
// !                             Implementation
// ! ------------------------------------------------------------------------

impl MeshDocument {
    /// Decode and validate everything of interest in the tree
    fn from_element(root: Element) -> Result<Self> {
        let piece = piece(&root).ok_or_else(|| malformed("missing Piece element"))?;

        let number_of_points = count_attribute(piece, "NumberOfPoints")?;
        let number_of_cells = count_attribute(piece, "NumberOfCells")?;

        let points = parse_points(piece, number_of_points)?;
        let cells = parse_cells(piece, number_of_points, number_of_cells)?;
        let point_data = parse_fields(piece.get_child("PointData"), number_of_points)?;
        let cell_data = parse_fields(piece.get_child("CellData"), number_of_cells)?;

        Ok(Self {
            root,
            points,
            cells,
            point_data,
            cell_data,
        })
    }

    /// The `PointData` element of the piece, created if missing
    fn point_data_element(&mut self) -> Result<&mut Element> {
        let piece = piece_mut(&mut self.root).ok_or_else(|| malformed("missing Piece element"))?;

        if piece.get_child("PointData").is_none() {
            // VTK expects PointData to come first in a Piece
            piece
                .children
                .insert(0, XMLNode::Element(Element::new("PointData")));
        }

        piece
            .get_mut_child("PointData")
            .ok_or_else(|| malformed("missing PointData element"))
    }
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer(path: impl AsRef<Path>) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

/// Output settings shared by every export
fn emitter_config() -> EmitterConfig {
    EmitterConfig::new()
        .perform_indent(true)
        .write_document_declaration(true)
}

fn malformed(message: &str) -> Error {
    Error::MalformedDocument(message.to_string())
}

/// First `Piece` found below the dataset element, e.g. `UnstructuredGrid`
fn piece(root: &Element) -> Option<&Element> {
    child_elements(root).find_map(|dataset| dataset.get_child("Piece"))
}

/// Mutable version of [piece()]
fn piece_mut(root: &mut Element) -> Option<&mut Element> {
    root.children.iter_mut().find_map(|node| match node {
        XMLNode::Element(dataset) => dataset.get_mut_child("Piece"),
        _ => None,
    })
}

/// Every child element, skipping text, comments, etc...
fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

/// Every `DataArray` child element
fn data_arrays(element: &Element) -> impl Iterator<Item = &Element> {
    child_elements(element).filter(|child| child.name == "DataArray")
}

/// Remove every `DataArray` child with a matching `Name` attribute
fn remove_data_arrays(section: &mut Element, name: &str) {
    section.children.retain(|node| match node {
        XMLNode::Element(child) => {
            child.name != "DataArray"
                || child.attributes.get("Name").map(String::as_str) != Some(name)
        }
        _ => true,
    });
}

/// Parse a required non-negative integer attribute such as `NumberOfPoints`
fn count_attribute(element: &Element, attribute: &str) -> Result<usize> {
    let value = element
        .attributes
        .get(attribute)
        .ok_or_else(|| Error::MalformedDocument(f!("missing {attribute} attribute")))?;

    value.trim().parse::<usize>().map_err(|_| {
        Error::MalformedDocument(f!("{attribute}=\"{value}\" is not a valid count"))
    })
}

/// Number of components of a data array, 1 if not given
fn components(array: &Element) -> Result<usize> {
    match array.attributes.get("NumberOfComponents") {
        None => Ok(1),
        Some(_) => match count_attribute(array, "NumberOfComponents")? {
            0 => Err(malformed("NumberOfComponents must be at least 1")),
            n => Ok(n),
        },
    }
}

/// Raw text payload of an ASCII data array
fn ascii_payload(array: &Element) -> Result<String> {
    match array.attributes.get("format").map(String::as_str) {
        None | Some("ascii") => Ok(array.get_text().unwrap_or_default().into_owned()),
        Some(format) => Err(Error::MalformedDocument(f!(
            "only ascii data arrays are supported, found format=\"{format}\""
        ))),
    }
}

/// Decode the node coordinates from the `Points` element
fn parse_points(piece: &Element, number_of_points: usize) -> Result<Vec<[f64; 3]>> {
    let array = piece
        .get_child("Points")
        .and_then(|points| data_arrays(points).next())
        .ok_or_else(|| malformed("missing Points data array"))?;

    if components(array)? != 3 {
        return Err(malformed("points must have 3 components"));
    }

    let values = decode::floats(&ascii_payload(array)?)?;
    if values.len() != 3 * number_of_points {
        return Err(Error::MalformedDocument(f!(
            "expected {} point coordinates, found {}",
            3 * number_of_points,
            values.len()
        )));
    }

    Ok(values
        .chunks_exact(3)
        .map(|xyz| [xyz[0], xyz[1], xyz[2]])
        .collect())
}

/// Decode the connectivity, offsets, and types arrays from `Cells`
fn parse_cells(piece: &Element, number_of_points: usize, number_of_cells: usize) -> Result<Cells> {
    let section = piece
        .get_child("Cells")
        .ok_or_else(|| malformed("missing Cells element"))?;

    let named_array = |name: &str| -> Result<Vec<usize>> {
        let array = data_arrays(section)
            .find(|array| array.attributes.get("Name").map(String::as_str) == Some(name))
            .ok_or_else(|| Error::MalformedDocument(f!("missing \"{name}\" cell data array")))?;
        decode::indices(&ascii_payload(array)?)
    };

    let connectivity = named_array("connectivity")?;
    let offsets = named_array("offsets")?;
    let types = named_array("types")?
        .into_iter()
        .map(|code| {
            u8::try_from(code)
                .map(CellKind::from)
                .map_err(|_| Error::MalformedDocument(f!("invalid cell type {code}")))
        })
        .collect::<Result<Vec<CellKind>>>()?;

    if types.len() != number_of_cells {
        return Err(Error::MalformedDocument(f!(
            "expected {number_of_cells} cell types, found {}",
            types.len()
        )));
    }

    Cells::new(connectivity, offsets, types, number_of_points)
}

/// Decode every data array of a `PointData` or `CellData` section
fn parse_fields(section: Option<&Element>, number_of_tuples: usize) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    let Some(section) = section else {
        return Ok(fields);
    };

    for array in data_arrays(section) {
        let name = array
            .attributes
            .get("Name")
            .ok_or_else(|| malformed("data array without a Name attribute"))?;

        let components = components(array)?;
        let values = decode::floats(&ascii_payload(array)?)?;

        if values.len() != components * number_of_tuples {
            return Err(Error::MalformedDocument(f!(
                "field \"{name}\" has {} values, expected {} ({} x {components})",
                values.len(),
                components * number_of_tuples,
                number_of_tuples
            )));
        }

        if fields.contains_key(name) {
            return Err(Error::MalformedDocument(f!("duplicate field name \"{name}\"")));
        }

        fields.insert(name.clone(), DataField::new(components, values)?);
    }

    Ok(fields)
}

/// New ASCII `Float64` data array element for a field
///
/// One line of text is written per entity for readability.
fn data_array_element(name: &str, field: &DataField) -> Element {
    let mut array = Element::new("DataArray");
    array.attributes.insert("type".to_string(), "Float64".to_string());
    array.attributes.insert("Name".to_string(), name.to_string());
    array.attributes.insert(
        "NumberOfComponents".to_string(),
        field.components().to_string(),
    );
    array.attributes.insert("format".to_string(), "ascii".to_string());

    let mut text = String::from("\n");
    for tuple in field.tuples() {
        let line = tuple
            .iter()
            .map(|value| value.ascii())
            .collect::<Vec<String>>()
            .join(" ");
        text += &line;
        text.push('\n');
    }

    array.children.push(XMLNode::Text(text));
    array
}
