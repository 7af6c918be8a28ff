//! # zonal-spectrum
//!
//! Zonal energy spectra of gridded geophysical fields.
//!
//! This crate provides the building blocks for WeatherBench2-style
//! power spectral density diagnostics:
//! - Gridded fields with named latitude/longitude/batch axes
//! - Symmetric latitude band selection
//! - One-sided energy spectra along longitude (FFT)
//! - Circumference weighting and latitude averaging
//! - Plain-text spectrum tables and NetCDF field input
//!
//! # Example
//!
//! ```
//! use zonal_spectrum::{CoordinateAxis, GriddedField, compute_zonal_energy_spectrum};
//!
//! let lat = CoordinateAxis::linspace("lat", -90.0, 90.0, 19);
//! let lon = CoordinateAxis::linspace("lon", 0.0, 350.0, 36);
//! let values = (0..19 * 36).map(|i| ((i % 36) as f64).sin()).collect();
//! let field = GriddedField::from_shape_vec(vec![lat, lon], values).unwrap();
//!
//! let psd = compute_zonal_energy_spectrum(&field, "lat", "lon", 30.0, 60.0).unwrap();
//! assert_eq!(psd.shape(), &[18]);
//! ```

pub mod analysis;
pub mod error;
pub mod grid;
pub mod io;
pub mod types;

pub use analysis::{
    SpectrumConfig, WAVENUMBER_AXIS, ZonalDft, ZonalSpectrum, ZonalSpectrumComputer,
    compute_zonal_energy_spectrum, one_sided_energy_spectrum,
};
pub use error::SpectrumError;
pub use grid::{CoordinateAxis, GriddedField, LatitudeBand};
pub use io::{SpectrumFileError, SpectrumTable, read_spectrum_file, write_spectrum_file};
#[cfg(feature = "netcdf")]
pub use io::{FieldReader, NetCDFError};
pub use types::{EARTH_RADIUS, Latitude, Meters};
