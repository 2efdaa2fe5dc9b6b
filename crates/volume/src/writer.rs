//! Write operations for volume series

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::series::VolumeSeries;

// feapost modules
use feapost_utils::ValueExt;

/// Write a [VolumeSeries] to a JSON file
///
/// A direct serialisation of the configuration, normalisation flag, and every
/// evaluated step with its id, path, and volume. Failed steps are not included.
///
/// ```rust, no_run
/// # use feapost_volume::{compute_volume_series, write_json, Configuration};
/// let series = compute_volume_series("./results", Configuration::Deformed, true).unwrap();
/// write_json(&series, "./volumes.json").unwrap();
/// ```
pub fn write_json<P: AsRef<Path>>(series: &VolumeSeries, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    serde_json::to_writer_pretty(&mut writer, series)?;
    writer.flush()?;
    Ok(())
}

/// Write a [VolumeSeries] to a column formatted text file
///
/// A short commented header is followed by one line per time step with the id
/// and volume, ready for plotting with gnuplot or numpy:
///
/// ```text
/// # configuration: deformed
/// # normalized: true
/// #       id           volume
///          0   1.00000000e+00
///          1   1.20000000e+00
/// ```
pub fn write_ascii<P: AsRef<Path>>(series: &VolumeSeries, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;

    writeln!(writer, "# configuration: {}", series.configuration)?;
    writeln!(writer, "# normalized: {}", series.normalized)?;
    writeln!(writer, "# {:>8} {:>16}", "id", "volume")?;

    for step in &series.steps {
        writeln!(writer, "{:>10} {:>16}", step.id, step.volume.sci(8, 2))?;
    }

    writer.flush()?;
    Ok(())
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
