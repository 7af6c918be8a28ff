//! Zonal spectral analysis of gridded fields.
//!
//! This module provides tools for:
//! - Computing the one-sided energy spectrum of a single longitude row
//! - Averaging circumference-weighted spectra over a latitude band
//! - Reducing batch axes (time, ensemble member) of the result
//!
//! # Mathematical Background
//!
//! For each latitude φ in the band and each batch slice, with `L` longitudes:
//! ```text
//! X_k  = (1/L) Σⱼ x_j exp(-2πi jk/L)
//! S_k  = 2 |X_k|²   (S_0 = |X_0|²),   k = 0 .. ⌊L/2⌋ - 1
//! P_k  = (1/N) Σ_φ 2π R cos(φ) S_k(φ)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use zonal_spectrum::analysis::compute_zonal_energy_spectrum;
//!
//! let psd = compute_zonal_energy_spectrum(&field, "lat", "lon", 30.0, 60.0)?;
//! let snapshot = psd.select("time", 1)?;
//! let time_mean = psd.mean_over("time")?;
//! ```

mod dft;
mod spectrum;

pub use dft::{ZonalDft, one_sided_energy_spectrum};
pub use spectrum::{
    SpectrumConfig, WAVENUMBER_AXIS, ZonalSpectrum, ZonalSpectrumComputer,
    compute_zonal_energy_spectrum,
};
