// standard library
use std::path::{Path, PathBuf};

/// A single file of a time series
///
/// The `id` is the time step counter embedded in the file name, e.g.
/// `Pblock00042.vtu` => `id = 42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesEntry {
    /// Full path to the file
    pub path: PathBuf,
    /// Time step id parsed from the file name
    pub id: u64,
}

impl SeriesEntry {
    /// File name component of the path, if any
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for SeriesEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.path.display())
    }
}

/// Ordering applied to located [SeriesEntry] lists
///
/// [SeriesOrder::Path] is the default and sorts lexicographically by path.
/// This is only chronological if every file name pads its counter to the same
/// width, but some callers pair two series by position and depend on it.
///
/// [SeriesOrder::TimeStep] sorts by the parsed id instead, with ties broken by
/// path so the result is always deterministic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOrder {
    /// Lexicographic order of the full path
    #[default]
    Path,
    /// Ascending time step id, then path
    TimeStep,
}

impl SeriesOrder {
    /// Sort a list of entries in place
    pub fn sort(&self, entries: &mut [SeriesEntry]) {
        match self {
            SeriesOrder::Path => entries.sort_by(|a, b| a.path.cmp(&b.path)),
            SeriesOrder::TimeStep => {
                entries.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, id: u64) -> SeriesEntry {
        SeriesEntry {
            path: PathBuf::from("results").join(name),
            id,
        }
    }

    #[test]
    fn path_order_is_lexicographic() {
        let mut entries = vec![entry("step10.vtu", 10), entry("step9.vtu", 9)];
        SeriesOrder::Path.sort(&mut entries);

        // "step10" < "step9" as text, which is the documented trap
        assert_eq!(entries[0].id, 10);
        assert_eq!(entries[1].id, 9);
    }

    #[test]
    fn time_step_order_uses_ids() {
        let mut entries = vec![
            entry("step10.vtu", 10),
            entry("b_step9.vtu", 9),
            entry("a_step9.vtu", 9),
        ];
        SeriesOrder::TimeStep.sort(&mut entries);

        assert_eq!(entries[0].file_name(), Some("a_step9.vtu"));
        assert_eq!(entries[1].file_name(), Some("b_step9.vtu"));
        assert_eq!(entries[2].file_name(), Some("step10.vtu"));
    }
}
