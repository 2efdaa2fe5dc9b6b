//! Refactoring many files at once

// standard library
use std::fs;
use std::path::{Path, PathBuf};

// crate modules
use crate::engine::refactor;
use crate::error::{Error, Result};
use crate::layout::FieldLayout;

// feapost modules
use feapost_series::{locate, solver_outputs};
use feapost_utils::f;
use feapost_vtu::MeshDocument;

// external crates
use kdam::par_tqdm;
use log::{info, warn};
use rayon::prelude::*;

/// Options for batch refactoring
///
/// ```rust
/// # use feapost_refactor::BatchOptions;
/// let options = BatchOptions::new()
///     .suffix("_split")
///     .remove_originals(true)
///     .progress(false);
///
/// assert_eq!(options.suffix, "_split");
/// assert!(options.remove_originals);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Appended to the file stem of every output file
    pub suffix: String,
    /// Delete each input once its output is written successfully
    pub remove_originals: bool,
    /// Show a progress bar on stderr
    pub progress: bool,
}

impl BatchOptions {
    /// Start with the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Output file suffix, `_refactored` by default
    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Delete inputs after a successful refactor, off by default
    pub fn remove_originals(mut self, remove: bool) -> Self {
        self.remove_originals = remove;
        self
    }

    /// Show a progress bar, off by default
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            suffix: "_refactored".to_string(),
            remove_originals: false,
            progress: false,
        }
    }
}

/// Result of refactoring a single input file
#[derive(Debug)]
pub struct FileOutcome {
    /// The file that was read
    pub input: PathBuf,
    /// Path of the written output, or the reason it failed
    pub result: Result<PathBuf>,
}

impl FileOutcome {
    /// True if the output was written
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of every file in a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input file
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Outputs written successfully
    pub fn succeeded(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.is_ok())
    }

    /// Inputs that failed
    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    /// True if every file was refactored
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_ok)
    }
}

/// Output path for an input, i.e. `<stem><suffix>.vtu` in the same directory
///
/// ```rust
/// # use feapost_refactor::output_path;
/// # use std::path::Path;
/// let output = output_path(Path::new("results/Pblock00001.vtu"), "_refactored").unwrap();
/// assert_eq!(output, Path::new("results/Pblock00001_refactored.vtu"));
/// ```
pub fn output_path(input: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidOutputPath(input.display().to_string()))?;

    Ok(input.with_file_name(f!("{stem}{suffix}.vtu")))
}

/// Refactor a single file and write the result next to it
///
/// Returns the path of the new file.
pub fn refactor_file(input: &Path, layout: &FieldLayout, suffix: &str) -> Result<PathBuf> {
    let output = output_path(input, suffix)?;
    let mut document = MeshDocument::parse(input)?;
    refactor(&mut document, layout)?;
    document.export(&output)?;
    Ok(output)
}

/// Refactor every file in `inputs` in parallel
///
/// Files are independent, so a failure is recorded in the report and never
/// stops the rest of the batch. Originals are only removed if requested and
/// the output for that file was written.
pub fn refactor_files(
    inputs: &[PathBuf],
    layout: &FieldLayout,
    options: &BatchOptions,
) -> BatchReport {
    let process = |input: &PathBuf| process_file(input, layout, options);

    let outcomes: Vec<FileOutcome> = if options.progress {
        let outcomes = par_tqdm!(
            inputs.par_iter().map(process),
            bar_format = "Refactoring: {count}/{total} [{rate:.2} files/s]  "
        )
        .collect();
        eprintln!();
        outcomes
    } else {
        inputs.par_iter().map(process).collect()
    };

    let report = BatchReport { outcomes };
    info!(
        "Refactored {} of {} file(s)",
        report.succeeded().count(),
        report.outcomes.len()
    );
    report
}

/// Refactor the VTU files of a simulation in `directory`
///
/// With an `input_name` such as `Iblock`, only the solver outputs of that run
/// are processed (`Pblock00000.vtu`, `Pblock00001.vtu`, ...). Without one,
/// every `.vtu` file is processed apart from previous outputs, i.e. anything
/// whose stem already ends with the configured suffix.
pub fn refactor_directory<P: AsRef<Path>>(
    directory: P,
    input_name: Option<&str>,
    layout: &FieldLayout,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let entries = match input_name {
        Some(name) => solver_outputs(directory.as_ref(), name)?,
        None => locate(directory.as_ref(), "vtu")?,
    };

    let inputs = entries
        .into_iter()
        .filter(|entry| !is_previous_output(&entry.path, &options.suffix))
        .map(|entry| entry.path)
        .collect::<Vec<PathBuf>>();

    if inputs.is_empty() {
        warn!("No files to refactor in {}", directory.as_ref().display());
    }

    Ok(refactor_files(&inputs, layout, options))
}

fn is_previous_output(path: &Path, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(suffix))
}

fn process_file(input: &Path, layout: &FieldLayout, options: &BatchOptions) -> FileOutcome {
    let result = refactor_file(input, layout, &options.suffix);

    match &result {
        Ok(output) if options.remove_originals && output != input => {
            remove_original(input);
        }
        Ok(_) => {}
        Err(e) => warn!("Failed to refactor {}: {e}", input.display()),
    }

    FileOutcome {
        input: input.to_path_buf(),
        result,
    }
}

/// Delete an input once its output is written, the outcome stays successful
fn remove_original(input: &Path) -> bool {
    match fs::remove_file(input) {
        Ok(()) => true,
        Err(e) => {
            warn!("Refactored {} but could not remove it: {e}", input.display());
            false
        }
    }
}
