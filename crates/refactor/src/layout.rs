//! Declarative description of how packed fields are split up

// standard library
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::marker::PhantomData;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};

// feapost modules
use feapost_utils::f;
use feapost_vtu::MeshDocument;

// external crates
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// Suffix appended to a rule target for its eigenvalue field
pub const EIGENVALUE_SUFFIX: &str = "_EVal";

/// Extract a contiguous range of components into a new field
///
/// For every node, components `start..start + length` of the source field are
/// copied into a new point field called `target` with `length` components.
///
/// If `eigenvalues` is set, the slice is read as the 6 independent entries of
/// a symmetric 3x3 tensor `[xx, yy, zz, xy, xz, yz]` and an additional
/// `<target>_EVal` field is written with the 3 principal values in descending
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRule {
    /// Name of the new field
    pub target: String,
    /// First component taken from the source
    pub start: usize,
    /// Number of components taken from the source
    pub length: usize,
    /// Also derive the eigenvalues of the extracted tensor
    pub eigenvalues: bool,
}

impl ExtractionRule {
    /// New rule without eigenvalues
    pub fn new(target: &str, start: usize, length: usize) -> Self {
        Self {
            target: target.to_string(),
            start,
            length,
            eigenvalues: false,
        }
    }

    /// Set whether eigenvalues are derived from the extracted slice
    pub fn with_eigenvalues(mut self, eigenvalues: bool) -> Self {
        self.eigenvalues = eigenvalues;
        self
    }

    /// Name of the derived eigenvalue field, e.g. `Sigma_EVal`
    pub fn eigenvalue_target(&self) -> String {
        f!("{}{EIGENVALUE_SUFFIX}", self.target)
    }

    /// One past the last component taken from the source
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }
}

/// Every rule applied to a single source field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    /// Name of the existing point field
    pub name: String,
    /// Rules in declaration order
    pub rules: Vec<ExtractionRule>,
}

/// Complete description of how a document is to be refactored
///
/// A layout maps existing point fields to the rules that split them up. Source
/// fields and their rules are kept in declaration order, which is the order the
/// new fields are written in.
///
/// Layouts are usually read from JSON, where each source field maps new field
/// names to their `Start`, `Len`, and optional `Eigenvalues` keys:
///
/// ```rust
/// # use feapost_refactor::FieldLayout;
/// let layout = FieldLayout::from_json_str(r#"{
///     "Stresses": {
///         "Sigma": { "Start": 0, "Len": 6, "Eigenvalues": true },
///         "Damage": { "Start": 6, "Len": 1 }
///     }
/// }"#).unwrap();
///
/// let stresses = &layout.sources()[0];
/// assert_eq!(stresses.name, "Stresses");
/// assert_eq!(stresses.rules[1].target, "Damage");
/// assert!(!stresses.rules[1].eigenvalues);
/// ```
///
/// The same layout can be built directly:
///
/// ```rust
/// # use feapost_refactor::{ExtractionRule, FieldLayout};
/// let layout = FieldLayout::new().source(
///     "Stresses",
///     vec![
///         ExtractionRule::new("Sigma", 0, 6).with_eigenvalues(true),
///         ExtractionRule::new("Damage", 6, 1),
///     ],
/// );
/// assert_eq!(layout.len(), 1);
/// ```
///
/// Repeated keys are rejected when reading JSON rather than silently keeping
/// the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldLayout {
    sources: Vec<SourceLayout>,
}

impl FieldLayout {
    /// Empty layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the rules for a source field
    pub fn source(mut self, name: &str, rules: Vec<ExtractionRule>) -> Self {
        self.sources.push(SourceLayout {
            name: name.to_string(),
            rules,
        });
        self
    }

    /// Read a layout from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a layout from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Source fields in declaration order
    pub fn sources(&self) -> &[SourceLayout] {
        &self.sources
    }

    /// Iterate over every rule of every source, in declaration order
    pub fn rules(&self) -> impl Iterator<Item = (&SourceLayout, &ExtractionRule)> {
        self.sources
            .iter()
            .flat_map(|source| source.rules.iter().map(move |rule| (source, rule)))
    }

    /// Number of source fields
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True if there are no source fields
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Check the layout can be applied to a document without side effects
    ///
    /// - every source must be an existing point field, declared once
    /// - every rule must stay within the components of its source
    /// - eigenvalue rules must extract exactly 6 components
    /// - no new field name may be produced twice, or match an existing field
    pub fn validate(&self, document: &MeshDocument) -> Result<()> {
        let mut sources = HashSet::new();
        for source in &self.sources {
            if document.point_field(&source.name).is_none() {
                return Err(Error::FieldNotFound(source.name.clone()));
            }
            if !sources.insert(source.name.as_str()) {
                return Err(Error::DuplicateSource(source.name.clone()));
            }
        }

        let mut targets = HashSet::new();
        for (source, rule) in self.rules() {
            let field = document
                .point_field(&source.name)
                .ok_or_else(|| Error::FieldNotFound(source.name.clone()))?;

            if rule.length == 0 || rule.end() > field.components() {
                return Err(Error::ComponentsOutOfRange {
                    source_name: source.name.clone(),
                    target: rule.target.clone(),
                    start: rule.start,
                    end: rule.end(),
                    available: field.components(),
                });
            }

            if rule.eigenvalues && rule.length != 6 {
                return Err(Error::UnsupportedEigenLength {
                    target: rule.target.clone(),
                    length: rule.length,
                });
            }

            let mut names = vec![rule.target.clone()];
            if rule.eigenvalues {
                names.push(rule.eigenvalue_target());
            }

            for name in names {
                if document.point_field(&name).is_some() || !targets.insert(name.clone()) {
                    return Err(Error::AmbiguousTargetName(name));
                }
            }
        }

        Ok(())
    }
}

// ! ------------------------------------------------------------------------
// !                             Deserialisation
// ! ------------------------------------------------------------------------

/// Rule as written in JSON, the target name being the key
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    #[serde(rename = "Start")]
    start: usize,
    #[serde(rename = "Len")]
    length: usize,
    #[serde(rename = "Eigenvalues", default)]
    eigenvalues: bool,
}

/// JSON object kept in declaration order, rejecting repeated keys
struct OrderedMap<V>(Vec<(String, V)>);

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with unique keys")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> core::result::Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, V)> = Vec::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            if entries.iter().any(|(k, _)| k == &key) {
                return Err(de::Error::custom(f!("duplicate key \"{key}\"")));
            }
            entries.push((key, value));
        }
        Ok(OrderedMap(entries))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for FieldLayout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let OrderedMap(sources) = OrderedMap::<OrderedMap<RawRule>>::deserialize(deserializer)?;

        let sources = sources
            .into_iter()
            .map(|(name, OrderedMap(rules))| SourceLayout {
                name,
                rules: rules
                    .into_iter()
                    .map(|(target, raw)| ExtractionRule {
                        target,
                        start: raw.start,
                        length: raw.length,
                        eigenvalues: raw.eigenvalues,
                    })
                    .collect(),
            })
            .collect();

        Ok(FieldLayout { sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keeps_declaration_order() {
        let layout = FieldLayout::from_json_str(
            r#"{
                "B": { "z": { "Start": 0, "Len": 1 }, "a": { "Start": 1, "Len": 1 } },
                "A": { "m": { "Start": 0, "Len": 6, "Eigenvalues": true } }
            }"#,
        )
        .unwrap();

        let names = layout
            .rules()
            .map(|(s, r)| f!("{}.{}", s.name, r.target))
            .collect::<Vec<String>>();
        assert_eq!(names, vec!["B.z", "B.a", "A.m"]);
        assert!(layout.sources()[1].rules[0].eigenvalues);
    }

    #[test]
    fn json_duplicate_keys() {
        let sources = r#"{ "A": {}, "A": {} }"#;
        assert!(matches!(
            FieldLayout::from_json_str(sources),
            Err(Error::FailedSerde(_))
        ));

        let targets =
            r#"{ "A": { "x": { "Start": 0, "Len": 1 }, "x": { "Start": 1, "Len": 1 } } }"#;
        assert!(FieldLayout::from_json_str(targets).is_err());
    }

    #[test]
    fn json_rejects_bad_rules() {
        // missing Len
        assert!(FieldLayout::from_json_str(r#"{ "A": { "x": { "Start": 0 } } }"#).is_err());
        // negative start
        assert!(
            FieldLayout::from_json_str(r#"{ "A": { "x": { "Start": -1, "Len": 1 } } }"#).is_err()
        );
        // unknown key
        assert!(
            FieldLayout::from_json_str(r#"{ "A": { "x": { "Start": 0, "Len": 1, "Foo": 1 } } }"#)
                .is_err()
        );
    }

    #[test]
    fn eigenvalue_target() {
        let rule = ExtractionRule::new("Sigma", 0, 6).with_eigenvalues(true);
        assert_eq!(rule.eigenvalue_target(), "Sigma_EVal");
        assert_eq!(rule.end(), 6);
    }
}
