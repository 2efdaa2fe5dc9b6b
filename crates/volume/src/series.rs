//! Volume of every time step in a results directory

// standard library
use std::path::{Path, PathBuf};

// crate modules
use crate::engine::{compute_volume, Configuration};
use crate::error::{Error, Result};
use crate::writer;

// feapost modules
use feapost_series::{locate_ordered, SeriesEntry, SeriesOrder};
use feapost_vtu::MeshDocument;

// external crates
use kdam::par_tqdm;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

/// Options for evaluating a volume series
///
/// ```rust
/// # use feapost_volume::{Configuration, SeriesOptions};
/// # use feapost_series::SeriesOrder;
/// let options = SeriesOptions::new()
///     .configuration(Configuration::Deformed)
///     .normalize(true)
///     .order(SeriesOrder::TimeStep);
///
/// assert_eq!(options.extension, "vtu");
/// assert!(!options.progress);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesOptions {
    /// Reference or deformed geometry
    pub configuration: Configuration,
    /// Divide every volume by that of the first time step
    pub normalize: bool,
    /// Extension of the files making up the series
    pub extension: String,
    /// Ordering of the time steps
    pub order: SeriesOrder,
    /// Show a progress bar on stderr
    pub progress: bool,
}

impl SeriesOptions {
    /// Start with the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference or deformed geometry, reference by default
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Normalise by the first time step, off by default
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// File extension of the series, `vtu` by default
    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    /// Time step ordering, by path by default
    pub fn order(mut self, order: SeriesOrder) -> Self {
        self.order = order;
        self
    }

    /// Show a progress bar, off by default
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            configuration: Configuration::Reference,
            normalize: false,
            extension: "vtu".to_string(),
            order: SeriesOrder::Path,
            progress: false,
        }
    }
}

/// Volume of a single time step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeStep {
    /// Time step id taken from the file name
    pub id: u64,
    /// File the volume was calculated from
    pub path: PathBuf,
    /// Total hexahedral volume, or relative volume once normalised
    pub volume: f64,
}

/// A time step that could not be evaluated
#[derive(Debug)]
pub struct StepFailure {
    /// Time step id taken from the file name
    pub id: u64,
    /// File that failed
    pub path: PathBuf,
    /// Reason for the failure
    pub error: Error,
}

/// Volumes of a time series, in series order
///
/// Failed time steps do not stop the rest of the series from being evaluated,
/// they are collected in `failures` instead.
#[derive(Debug, Default, Serialize)]
pub struct VolumeSeries {
    /// Geometry the volumes were calculated for
    pub configuration: Configuration,
    /// Whether volumes are relative to the first step
    pub normalized: bool,
    /// Successfully evaluated time steps
    pub steps: Vec<VolumeStep>,
    /// Time steps that could not be evaluated
    #[serde(skip)]
    pub failures: Vec<StepFailure>,
}

impl VolumeSeries {
    /// Divide every volume by the volume of the first step
    ///
    /// The first step is exactly `1.0` afterwards.
    ///
    /// ```rust
    /// # use feapost_volume::{VolumeSeries, VolumeStep};
    /// let mut series = VolumeSeries::default();
    /// for (id, volume) in [(0, 10.0), (1, 12.0), (2, 8.0)] {
    ///     series.steps.push(VolumeStep { id, path: Default::default(), volume });
    /// }
    ///
    /// series.normalize().unwrap();
    /// assert_eq!(series.volumes(), vec![1.0, 1.2, 0.8]);
    /// ```
    pub fn normalize(&mut self) -> Result<()> {
        let reference = self.steps.first().ok_or(Error::EmptySeries)?.volume;

        if reference == 0.0 {
            return Err(Error::ZeroReferenceVolume);
        }

        for step in &mut self.steps {
            step.volume /= reference;
        }

        self.normalized = true;
        Ok(())
    }

    /// Time step ids in series order
    pub fn ids(&self) -> Vec<u64> {
        self.steps.iter().map(|step| step.id).collect()
    }

    /// Volumes in series order
    pub fn volumes(&self) -> Vec<f64> {
        self.steps.iter().map(|step| step.volume).collect()
    }

    /// Number of successfully evaluated steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if no steps were evaluated
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Write the series to a JSON file, see [write_json()](crate::write_json)
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        writer::write_json(self, path)
    }

    /// Write the series to a text file, see [write_ascii()](crate::write_ascii)
    pub fn write_ascii<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        writer::write_ascii(self, path)
    }
}

/// Parse a single file and calculate its volume
pub fn compute_volume_file<P: AsRef<Path>>(path: P, configuration: Configuration) -> Result<f64> {
    let document = MeshDocument::parse(path)?;
    compute_volume(&document, configuration)
}

/// Volume of every time step in `directory`
///
/// Shorthand for [volume_series()] with the default options apart from the
/// geometry and normalisation.
///
/// ```rust, no_run
/// # use feapost_volume::{compute_volume_series, Configuration};
/// let series = compute_volume_series("./results", Configuration::Deformed, true).unwrap();
/// for (id, volume) in series.ids().iter().zip(series.volumes()) {
///     println!("{id:>6} {volume:.6}");
/// }
/// ```
pub fn compute_volume_series<P: AsRef<Path>>(
    directory: P,
    configuration: Configuration,
    normalize: bool,
) -> Result<VolumeSeries> {
    let options = SeriesOptions::new()
        .configuration(configuration)
        .normalize(normalize);
    volume_series(directory, &options)
}

/// Volume of every time step in `directory` with full control over options
///
/// Files are evaluated in parallel but reported in series order. Any file that
/// fails is recorded in [VolumeSeries::failures] and skipped, so normalisation
/// is relative to the first step that was evaluated successfully.
///
/// Fails with [Error::EmptySeries] if nothing could be evaluated at all.
pub fn volume_series<P: AsRef<Path>>(
    directory: P,
    options: &SeriesOptions,
) -> Result<VolumeSeries> {
    let directory = directory.as_ref();
    let entries = locate_ordered(directory, &options.extension, options.order)?;
    let evaluate = |entry: &SeriesEntry| evaluate_entry(entry, options.configuration);

    let results: Vec<(u64, PathBuf, Result<f64>)> = if options.progress {
        let results = par_tqdm!(
            entries.par_iter().map(evaluate),
            bar_format = "Volumes: {count}/{total} [{rate:.2} files/s]  "
        )
        .collect();
        eprintln!();
        results
    } else {
        entries.par_iter().map(evaluate).collect()
    };

    let mut series = VolumeSeries {
        configuration: options.configuration,
        ..Default::default()
    };

    for (id, path, result) in results {
        match result {
            Ok(volume) => series.steps.push(VolumeStep { id, path, volume }),
            Err(error) => {
                warn!("Skipping {}: {error}", path.display());
                series.failures.push(StepFailure { id, path, error });
            }
        }
    }

    if series.is_empty() {
        return Err(Error::EmptySeries);
    }

    if options.normalize {
        series.normalize()?;
    }

    info!(
        "Evaluated {} {} volume(s) in {}, {} failed",
        series.len(),
        options.configuration,
        directory.display(),
        series.failures.len()
    );

    Ok(series)
}

fn evaluate_entry(
    entry: &SeriesEntry,
    configuration: Configuration,
) -> (u64, PathBuf, Result<f64>) {
    let result = compute_volume_file(&entry.path, configuration);
    (entry.id, entry.path.clone(), result)
}
