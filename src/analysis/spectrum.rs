//! Zonal energy spectrum over a latitude band.
//!
//! # Pipeline
//!
//! 1. Keep latitude rows with `lo < |φ| < hi`
//! 2. One-sided energy spectrum `S_k` of every longitude row (see [`super::dft`])
//! 3. Scale each row by the length of its parallel, `C(φ) = 2π R cos φ`
//! 4. Average the scaled spectra over the selected rows (equal weight)
//!
//! ```text
//! P_k = (1/N) Σ_φ C(φ) S_k(φ)
//! ```
//!
//! Every axis other than latitude and longitude is a batch axis and is
//! carried through unchanged. The result has the batch axes in their input
//! order followed by a `wavenumber` axis of length `⌊L/2⌋`.
//!
//! # Example
//!
//! ```ignore
//! use zonal_spectrum::analysis::{SpectrumConfig, ZonalSpectrumComputer};
//!
//! let computer = ZonalSpectrumComputer::new(SpectrumConfig::era5());
//! let spectrum = computer.compute(&z500)?;
//! for (k, p) in spectrum.wavenumbers().iter().zip(spectrum.data().iter()) {
//!     println!("{k} {p:.3e}");
//! }
//! ```

use ndarray::{ArrayD, ArrayView1, Axis, Ix1, IxDyn};
use tracing::{debug, info, warn};

use super::dft::ZonalDft;
use crate::error::SpectrumError;
use crate::grid::{CoordinateAxis, GriddedField, LATITUDE_NAMES, LONGITUDE_NAMES, LatitudeBand};
use crate::types::{EARTH_RADIUS, Latitude};

/// Name of the wavenumber axis on every spectrum.
pub const WAVENUMBER_AXIS: &str = "wavenumber";

/// Relative tolerance for the longitude spacing check.
const LON_SPACING_TOL: f64 = 1e-6;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for zonal spectrum computation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumConfig {
    /// Name of the latitude axis
    pub lat_axis: String,
    /// Name of the longitude axis
    pub lon_axis: String,
    /// Lower bound on |lat| in degrees (exclusive)
    pub lat_lo: f64,
    /// Upper bound on |lat| in degrees (exclusive)
    pub lat_hi: f64,
    /// Sphere radius in meters
    pub earth_radius: f64,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            lat_axis: "lat".to_string(),
            lon_axis: "lon".to_string(),
            lat_lo: 30.0,
            lat_hi: 60.0,
            earth_radius: EARTH_RADIUS,
        }
    }
}

impl SpectrumConfig {
    /// Configuration for `lat`/`lon` named axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for `latitude`/`longitude` named axes (ERA5, WeatherBench2).
    pub fn era5() -> Self {
        Self::default().with_axes("latitude", "longitude")
    }

    /// Configuration using whichever naming convention `field` carries.
    pub fn detect_axes(field: &GriddedField) -> Result<Self, SpectrumError> {
        let lat = field
            .find_axis(&LATITUDE_NAMES)
            .ok_or_else(|| SpectrumError::MissingAxis(LATITUDE_NAMES.join(" or ")))?;
        let lon = field
            .find_axis(&LONGITUDE_NAMES)
            .ok_or_else(|| SpectrumError::MissingAxis(LONGITUDE_NAMES.join(" or ")))?;
        Ok(Self::default().with_axes(lat, lon))
    }

    /// Set the latitude and longitude axis names.
    pub fn with_axes(mut self, lat_axis: impl Into<String>, lon_axis: impl Into<String>) -> Self {
        self.lat_axis = lat_axis.into();
        self.lon_axis = lon_axis.into();
        self
    }

    /// Set the latitude band bounds in degrees.
    pub fn with_band(mut self, lat_lo: f64, lat_hi: f64) -> Self {
        self.lat_lo = lat_lo;
        self.lat_hi = lat_hi;
        self
    }

    /// Set the sphere radius in meters.
    pub fn with_earth_radius(mut self, radius: f64) -> Self {
        self.earth_radius = radius;
        self
    }

    /// Validated latitude band.
    pub fn band(&self) -> Result<LatitudeBand, SpectrumError> {
        LatitudeBand::new(self.lat_lo, self.lat_hi)
    }

    /// Check the configuration without a field.
    pub fn validate(&self) -> Result<(), SpectrumError> {
        self.band()?;
        if self.lat_axis == self.lon_axis {
            return Err(SpectrumError::InvalidConfig(format!(
                "latitude and longitude both name axis '{}'",
                self.lat_axis
            )));
        }
        if !(self.earth_radius.is_finite() && self.earth_radius > 0.0) {
            return Err(SpectrumError::InvalidConfig(format!(
                "earth radius must be positive, got {}",
                self.earth_radius
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Circumference-weighted, latitude-averaged zonal energy spectrum.
///
/// Axes are the input's batch axes followed by the wavenumber axis.
#[derive(Clone, Debug)]
pub struct ZonalSpectrum {
    data: ArrayD<f64>,
    axes: Vec<CoordinateAxis>,
    band: LatitudeBand,
    n_latitudes: usize,
}

impl ZonalSpectrum {
    /// Spectral power, wavenumber last.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Consume the spectrum, returning the array.
    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    /// Axes in dimension order (wavenumber last).
    pub fn axes(&self) -> &[CoordinateAxis] {
        &self.axes
    }

    /// Batch axes carried over from the input field.
    pub fn batch_axes(&self) -> &[CoordinateAxis] {
        &self.axes[..self.axes.len() - 1]
    }

    /// Axis names in dimension order.
    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Array shape.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Wavenumbers `0, 1, ..., ⌊L/2⌋ - 1`.
    pub fn wavenumbers(&self) -> &[f64] {
        &self.axes[self.axes.len() - 1].values
    }

    /// Length of the wavenumber axis.
    pub fn n_wavenumbers(&self) -> usize {
        self.wavenumbers().len()
    }

    /// Latitude band the spectrum was averaged over.
    pub fn band(&self) -> LatitudeBand {
        self.band
    }

    /// Number of latitude rows averaged.
    pub fn n_latitudes(&self) -> usize {
        self.n_latitudes
    }

    /// The spectrum as a 1-D view, if no batch axes remain.
    pub fn as_1d(&self) -> Option<ArrayView1<'_, f64>> {
        self.data.view().into_dimensionality::<Ix1>().ok()
    }

    /// Average over a batch axis (e.g. a time mean), removing it.
    pub fn mean_over(&self, name: &str) -> Result<Self, SpectrumError> {
        let dim = self.batch_axis_index(name)?;
        let len = self.axes[dim].len();
        let data = self
            .data
            .mean_axis(Axis(dim))
            .ok_or_else(|| SpectrumError::DegenerateAxis {
                axis: name.to_string(),
                len,
                min: 1,
            })?;
        Ok(self.with_reduced(data, dim))
    }

    /// Take a single index along a batch axis (e.g. one time step), removing it.
    pub fn select(&self, name: &str, index: usize) -> Result<Self, SpectrumError> {
        let dim = self.batch_axis_index(name)?;
        let len = self.axes[dim].len();
        if index >= len {
            return Err(SpectrumError::IndexOutOfBounds {
                axis: name.to_string(),
                index,
                len,
            });
        }
        let data = self.data.index_axis(Axis(dim), index).to_owned();
        Ok(self.with_reduced(data, dim))
    }

    fn batch_axis_index(&self, name: &str) -> Result<usize, SpectrumError> {
        if name == WAVENUMBER_AXIS {
            return Err(SpectrumError::InvalidConfig(
                "the wavenumber axis cannot be reduced".to_string(),
            ));
        }
        self.batch_axes()
            .iter()
            .position(|a| a.name == name)
            .ok_or_else(|| SpectrumError::MissingAxis(name.to_string()))
    }

    fn with_reduced(&self, data: ArrayD<f64>, dim: usize) -> Self {
        let axes = self
            .axes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != dim)
            .map(|(_, a)| a.clone())
            .collect();
        Self {
            data,
            axes,
            band: self.band,
            n_latitudes: self.n_latitudes,
        }
    }
}

// ============================================================================
// Computation
// ============================================================================

/// Band-selected rows rearranged as `[batch, lat, lon]`, ready for transform.
struct ZonalRows {
    /// Row-major values, `n_batch * n_lat * lon_len`
    values: Vec<f64>,
    /// Parallel length C(φ) for each selected latitude
    weights: Vec<f64>,
    lon_len: usize,
    batch_axes: Vec<CoordinateAxis>,
    band: LatitudeBand,
}

impl ZonalRows {
    fn n_lat(&self) -> usize {
        self.weights.len()
    }

    fn n_batch(&self) -> usize {
        self.batch_axes.iter().map(CoordinateAxis::len).product()
    }

    /// Averaged, scaled spectrum of batch slice `b` into `out`.
    fn accumulate(
        &self,
        dft: &ZonalDft,
        b: usize,
        out: &mut [f64],
        buffer: &mut [rustfft::num_complex::Complex64],
        row_energy: &mut [f64],
    ) {
        let n_lat = self.n_lat();
        let slice = &self.values[b * n_lat * self.lon_len..(b + 1) * n_lat * self.lon_len];

        out.fill(0.0);
        for (row, &weight) in slice.chunks_exact(self.lon_len).zip(&self.weights) {
            dft.energy_into(row, buffer, row_energy);
            for (o, &s) in out.iter_mut().zip(row_energy.iter()) {
                *o += weight * s;
            }
        }

        let inv_n = 1.0 / n_lat as f64;
        for o in out.iter_mut() {
            *o *= inv_n;
        }
    }

    fn into_spectrum(self, values: Vec<f64>, n_k: usize) -> Result<ZonalSpectrum, SpectrumError> {
        let mut shape: Vec<usize> = self.batch_axes.iter().map(CoordinateAxis::len).collect();
        shape.push(n_k);
        let actual = values.len();
        let data = ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| {
            SpectrumError::shape_mismatch(format!("{:?}", shape), format!("{} values", actual))
        })?;

        let mut axes = self.batch_axes;
        axes.push(CoordinateAxis::arange(WAVENUMBER_AXIS, n_k));

        Ok(ZonalSpectrum {
            data,
            axes,
            band: self.band,
            n_latitudes: self.weights.len(),
        })
    }
}

/// Computes zonal energy spectra of gridded fields.
///
/// Stateless apart from its configuration; every call borrows the field
/// read-only and allocates a new result.
#[derive(Debug, Clone, Default)]
pub struct ZonalSpectrumComputer {
    config: SpectrumConfig,
}

impl ZonalSpectrumComputer {
    /// Create a computer with the given configuration.
    pub fn new(config: SpectrumConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// Compute the latitude-averaged zonal energy spectrum of `field`.
    ///
    /// # Errors
    ///
    /// All validation happens before any transform work:
    /// - `InvalidBand` / `InvalidConfig` for a bad configuration
    /// - `MissingAxis` if either named axis is absent
    /// - `DegenerateAxis` if the longitude axis has fewer than 2 points
    /// - `EmptySelection` if no latitude falls inside the band
    pub fn compute(&self, field: &GriddedField) -> Result<ZonalSpectrum, SpectrumError> {
        let rows = self.prepare(field)?;
        let dft = ZonalDft::new(rows.lon_len);
        let n_k = dft.n_wavenumbers();

        let mut values = vec![0.0; rows.n_batch() * n_k];
        let mut buffer = dft.make_buffer();
        let mut row_energy = vec![0.0; n_k];
        for (b, out) in values.chunks_exact_mut(n_k).enumerate() {
            rows.accumulate(&dft, b, out, &mut buffer, &mut row_energy);
        }

        let spectrum = rows.into_spectrum(values, n_k)?;
        info!(
            shape = ?spectrum.shape(),
            n_latitudes = spectrum.n_latitudes(),
            "zonal spectrum computed"
        );
        Ok(spectrum)
    }

    /// Compute the spectrum with batch slices distributed across threads.
    ///
    /// Each slice runs the same sequence of operations as [`Self::compute`],
    /// so the output is bit-identical. Enable with the `parallel` feature.
    #[cfg(feature = "parallel")]
    pub fn compute_parallel(&self, field: &GriddedField) -> Result<ZonalSpectrum, SpectrumError> {
        use rayon::prelude::*;

        let rows = self.prepare(field)?;
        let dft = ZonalDft::new(rows.lon_len);
        let n_k = dft.n_wavenumbers();

        let mut values = vec![0.0; rows.n_batch() * n_k];
        values
            .par_chunks_exact_mut(n_k)
            .enumerate()
            .for_each_init(
                || (dft.make_buffer(), vec![0.0; n_k]),
                |(buffer, row_energy), (b, out)| {
                    rows.accumulate(&dft, b, out, buffer, row_energy);
                },
            );

        let spectrum = rows.into_spectrum(values, n_k)?;
        info!(
            shape = ?spectrum.shape(),
            n_latitudes = spectrum.n_latitudes(),
            "zonal spectrum computed (parallel)"
        );
        Ok(spectrum)
    }

    /// Validate inputs and gather the band-selected rows.
    fn prepare(&self, field: &GriddedField) -> Result<ZonalRows, SpectrumError> {
        self.config.validate()?;
        let band = self.config.band()?;

        let lat_dim = field.axis_index(&self.config.lat_axis)?;
        let lon_dim = field.axis_index(&self.config.lon_axis)?;

        let lon_axis = &field.axes()[lon_dim];
        let lon_len = lon_axis.len();
        if lon_len < 2 {
            return Err(SpectrumError::DegenerateAxis {
                axis: lon_axis.name.clone(),
                len: lon_len,
                min: 2,
            });
        }
        if !lon_axis.is_uniform(LON_SPACING_TOL) {
            warn!(
                axis = %lon_axis.name,
                "longitude coordinates are not uniformly spaced"
            );
        }

        let latitudes = &field.axes()[lat_dim].values;
        let selected = band.select_nonempty(latitudes)?;
        debug!(
            lo = band.lo(),
            hi = band.hi(),
            selected = selected.len(),
            total = latitudes.len(),
            "latitude band selected"
        );

        let weights: Vec<f64> = selected
            .iter()
            .map(|&i| {
                Latitude::new(latitudes[i])
                    .circumference(self.config.earth_radius)
                    .meters()
            })
            .collect();

        let batch_dims: Vec<usize> = (0..field.ndim())
            .filter(|&d| d != lat_dim && d != lon_dim)
            .collect();
        let batch_axes: Vec<CoordinateAxis> = batch_dims
            .iter()
            .map(|&d| field.axes()[d].clone())
            .collect();
        if let Some(axis) = batch_axes.iter().find(|a| a.name == WAVENUMBER_AXIS) {
            return Err(SpectrumError::DuplicateAxis(axis.name.clone()));
        }

        let mut order = batch_dims;
        order.push(lat_dim);
        order.push(lon_dim);

        let banded = field.data().select(Axis(lat_dim), &selected);
        let values: Vec<f64> = banded.permuted_axes(IxDyn(&order)).iter().copied().collect();
        debug!(
            lon_len,
            n_batch = batch_axes.iter().map(CoordinateAxis::len).product::<usize>(),
            "rows gathered for transform"
        );

        Ok(ZonalRows {
            values,
            weights,
            lon_len,
            batch_axes,
            band,
        })
    }
}

/// Latitude-averaged zonal energy spectrum of `field` over `lat_lo < |lat| < lat_hi`.
///
/// Axis names are parameters so both `lat`/`lon` and `latitude`/`longitude`
/// conventions go through the same code.
pub fn compute_zonal_energy_spectrum(
    field: &GriddedField,
    lat_axis: &str,
    lon_axis: &str,
    lat_lo: f64,
    lat_hi: f64,
) -> Result<ZonalSpectrum, SpectrumError> {
    let config = SpectrumConfig::default()
        .with_axes(lat_axis, lon_axis)
        .with_band(lat_lo, lat_hi);
    ZonalSpectrumComputer::new(config).compute(field)
}
