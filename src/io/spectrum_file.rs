//! Plain-text spectrum tables for external plotting.
//!
//! # File Format
//!
//! ```text
//! # Zonal energy spectrum
//! # band: 30 60
//! # latitudes: 58
//! # batch_axes: time(2)
//! # columns: wavenumber time=0 time=1
//! 0 1.2045113307e6 1.19832e6
//! 1 3.310072841e4 3.2977114e4
//! ```
//!
//! One row per wavenumber; one column per batch slice of the spectrum.
//! Powers are written at full precision. Whitespace in axis names becomes
//! `_` in labels. A spectrum without batch axes has a single `power` column. Lines
//! starting with `#` carry `key: value` metadata.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::Axis;
use thiserror::Error;

use crate::analysis::ZonalSpectrum;

/// Error type for spectrum table files.
#[derive(Debug, Error)]
pub enum SpectrumFileError {
    /// IO error reading or writing the file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parse error in file content
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Spectrum table read back from a file.
#[derive(Clone, Debug, Default)]
pub struct SpectrumTable {
    /// Wavenumber of each row
    pub wavenumbers: Vec<f64>,
    /// Label of each power column
    pub labels: Vec<String>,
    /// Power columns, each with one value per wavenumber
    pub columns: Vec<Vec<f64>>,
    /// `key: value` metadata from comment lines (keys lowercased)
    pub metadata: HashMap<String, String>,
}

impl SpectrumTable {
    /// Number of power columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Power column by label.
    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.columns[i].as_slice())
    }

    /// Latitude band `(lo, hi)` from the metadata, if recorded.
    pub fn band(&self) -> Option<(f64, f64)> {
        let raw = self.metadata.get("band")?;
        let mut parts = raw.split_whitespace().map(str::parse::<f64>);
        match (parts.next(), parts.next()) {
            (Some(Ok(lo)), Some(Ok(hi))) => Some((lo, hi)),
            _ => None,
        }
    }
}

/// Axis name with whitespace replaced by `_`, so labels stay single tokens.
fn label_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Column label for batch slice `flat` of a spectrum.
fn slice_label(spectrum: &ZonalSpectrum, mut flat: usize) -> String {
    let axes = spectrum.batch_axes();
    if axes.is_empty() {
        return "power".to_string();
    }
    let mut parts = vec![String::new(); axes.len()];
    for (d, axis) in axes.iter().enumerate().rev() {
        let i = flat % axis.len();
        flat /= axis.len();
        parts[d] = format!("{}={}", label_name(&axis.name), axis.values[i]);
    }
    parts.join(",")
}

/// Write a spectrum as a whitespace-separated table.
pub fn write_spectrum_file(path: &Path, spectrum: &ZonalSpectrum) -> Result<(), SpectrumFileError> {
    let data = spectrum.data();
    let last = data.ndim() - 1;
    let lanes: Vec<_> = data.lanes(Axis(last)).into_iter().collect();

    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "# Zonal energy spectrum")?;
    let band = spectrum.band();
    writeln!(file, "# band: {} {}", band.lo(), band.hi())?;
    writeln!(file, "# latitudes: {}", spectrum.n_latitudes())?;
    if !spectrum.batch_axes().is_empty() {
        let axes: Vec<String> = spectrum
            .batch_axes()
            .iter()
            .map(|a| format!("{}({})", label_name(&a.name), a.len()))
            .collect();
        writeln!(file, "# batch_axes: {}", axes.join(" "))?;
    }

    let labels: Vec<String> = (0..lanes.len()).map(|b| slice_label(spectrum, b)).collect();
    writeln!(file, "# columns: wavenumber {}", labels.join(" "))?;

    for (k, wavenumber) in spectrum.wavenumbers().iter().enumerate() {
        write!(file, "{}", wavenumber)?;
        for lane in &lanes {
            write!(file, " {:e}", lane[k])?;
        }
        writeln!(file)?;
    }
    file.flush()?;

    Ok(())
}

/// Read a spectrum table written by [`write_spectrum_file`].
pub fn read_spectrum_file(path: &Path) -> Result<SpectrumTable, SpectrumFileError> {
    let reader = BufReader::new(File::open(path)?);
    parse_spectrum_table(reader)
}

/// Parse a spectrum table from any buffered reader.
pub fn parse_spectrum_table<R: BufRead>(reader: R) -> Result<SpectrumTable, SpectrumFileError> {
    let mut table = SpectrumTable::default();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            let content = line.trim_start_matches('#').trim();
            if let Some((key, value)) = content.split_once(':') {
                let key = key.trim().to_lowercase();
                if key == "columns" {
                    table.labels = value.split_whitespace().skip(1).map(String::from).collect();
                }
                table.metadata.insert(key, value.trim().to_string());
            }
            continue;
        }

        let values: Vec<f64> = line
            .split_whitespace()
            .map(|s| {
                s.parse::<f64>().map_err(|e| {
                    SpectrumFileError::ParseError(format!("Line {}: {}: {}", line_num + 1, s, e))
                })
            })
            .collect::<Result<_, _>>()?;

        let Some((&wavenumber, powers)) = values.split_first() else {
            continue;
        };

        if table.columns.is_empty() {
            if table.labels.is_empty() {
                table.labels = (0..powers.len()).map(|i| format!("column{}", i)).collect();
            }
            table.columns = vec![Vec::new(); table.labels.len()];
        }
        if powers.len() != table.columns.len() {
            return Err(SpectrumFileError::ParseError(format!(
                "Line {}: expected {} power columns, found {}",
                line_num + 1,
                table.columns.len(),
                powers.len()
            )));
        }

        table.wavenumbers.push(wavenumber);
        for (column, &p) in table.columns.iter_mut().zip(powers) {
            column.push(p);
        }
    }

    if table.wavenumbers.is_empty() {
        return Err(SpectrumFileError::InvalidFormat(
            "No data rows found".to_string(),
        ));
    }

    Ok(table)
}
