//! Directory scanning for time series files

// standard library
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

// crate modules
use crate::entry::{SeriesEntry, SeriesOrder};
use crate::error::{Error, Result};
use crate::parsers;

// external crates
use log::{debug, info, warn};

/// Find all files with a given extension, ordered by path
///
/// Scans `directory` (not recursively) for files whose name ends with
/// `.<extension>` and returns a [SeriesEntry] for each one. The id is the first
/// run of decimal digits in the file name.
///
/// Every matching file must contain a number, otherwise this fails with
/// [Error::MalformedFilename].
///
/// ```rust, no_run
/// # use feapost_series::locate;
/// let entries = locate("./results", "vtu").unwrap();
/// ```
///
/// The entries are sorted by path, see [SeriesOrder] for the implications.
pub fn locate<P: AsRef<Path>>(directory: P, extension: &str) -> Result<Vec<SeriesEntry>> {
    locate_ordered(directory, extension, SeriesOrder::Path)
}

/// Find all files with a given extension, in the requested order
///
/// Identical to [locate()] apart from the ordering of the result.
///
/// ```rust, no_run
/// # use feapost_series::{locate_ordered, SeriesOrder};
/// // Chronological, even if the counters are not zero-padded
/// let entries = locate_ordered("./results", "vtu", SeriesOrder::TimeStep).unwrap();
/// ```
pub fn locate_ordered<P: AsRef<Path>>(
    directory: P,
    extension: &str,
    order: SeriesOrder,
) -> Result<Vec<SeriesEntry>> {
    let directory = directory.as_ref();
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(directory)? {
        let dir_entry = dir_entry?;
        let Some(name) = regular_file_name(&dir_entry) else {
            continue;
        };

        if parsers::has_extension(&name, extension) {
            entries.push(SeriesEntry {
                path: dir_entry.path(),
                id: step_id(&name)?,
            });
        }
    }

    order.sort(&mut entries);
    debug!(
        "Located {} \"{extension}\" files in {}",
        entries.len(),
        directory.display()
    );
    Ok(entries)
}

/// Time step id from the first run of decimal digits in a file name
///
/// ```rust
/// # use feapost_series::step_id;
/// assert_eq!(step_id("Pblock00042.vtu").unwrap(), 42);
/// assert!(step_id("Pblock.vtu").is_err());
/// ```
pub fn step_id(file_name: &str) -> Result<u64> {
    parsers::first_digit_run(file_name)
        .map(|(_, id)| id)
        .map_err(|_| Error::MalformedFilename(file_name.to_string()))
}

/// Find the VTU output written by FEAP for a given input file
///
/// FEAP names output after the input file, replacing the leading `I` with `P`
/// and appending a five digit counter. An input file `Iblock` therefore
/// produces `Pblock00000.vtu`, `Pblock00001.vtu`, etc...
///
/// Only exact matches are returned, so previously refactored copies like
/// `Pblock00000_refactored.vtu` are ignored. The id is the five digit counter.
///
/// ```rust, no_run
/// # use feapost_series::solver_outputs;
/// let entries = solver_outputs("./results", "Iblock").unwrap();
/// ```
pub fn solver_outputs<P: AsRef<Path>>(directory: P, input_name: &str) -> Result<Vec<SeriesEntry>> {
    let directory = directory.as_ref();
    let stem = input_stem(input_name);
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(directory)? {
        let dir_entry = dir_entry?;
        let Some(name) = regular_file_name(&dir_entry) else {
            continue;
        };

        if let Ok((_, id)) = parsers::solver_output(stem)(&name) {
            entries.push(SeriesEntry {
                path: dir_entry.path(),
                id,
            });
        };
    }

    SeriesOrder::Path.sort(&mut entries);
    debug!(
        "Found {} output files for \"{input_name}\" in {}",
        entries.len(),
        directory.display()
    );
    Ok(entries)
}

/// Delete the VTU output of any previous FEAP run in a directory
///
/// Removes every file whose name starts with `P`, followed by any number of
/// letters, a five digit counter, and `.vtu`. Returns the removed paths.
///
/// Refactored copies and anything else that does not match are left alone.
pub fn remove_solver_outputs<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>> {
    let directory = directory.as_ref();
    let mut removed = Vec::new();

    for dir_entry in fs::read_dir(directory)? {
        let dir_entry = dir_entry?;
        let Some(name) = regular_file_name(&dir_entry) else {
            continue;
        };

        if parsers::any_solver_output(&name).is_ok() {
            let path = dir_entry.path();
            fs::remove_file(&path)?;
            removed.push(path);
        }
    }

    removed.sort();
    info!(
        "Removed {} old output files from {}",
        removed.len(),
        directory.display()
    );
    Ok(removed)
}

/// Input file name without its leading character, e.g. `Iblock` => `block`
fn input_stem(input_name: &str) -> &str {
    let skip = input_name.chars().next().map_or(0, char::len_utf8);
    &input_name[skip..]
}

/// Name of a regular file, or None for directories and non-unicode names
fn regular_file_name(dir_entry: &DirEntry) -> Option<String> {
    if !dir_entry.path().is_file() {
        return None;
    }

    match dir_entry.file_name().into_string() {
        Ok(name) => Some(name),
        Err(name) => {
            warn!("Skipping file with non-unicode name {name:?}");
            None
        }
    }
}
