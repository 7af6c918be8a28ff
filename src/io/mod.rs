//! I/O utilities for reading fields and writing spectra.
//!
//! This module provides:
//! - **Spectrum tables**: whitespace-separated wavenumber/power tables for
//!   external log-log plotting
//! - **NetCDF input**: load a gridded variable with named axes (requires
//!   the `netcdf` feature)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use zonal_spectrum::io::{read_spectrum_file, write_spectrum_file};
//!
//! write_spectrum_file(Path::new("psd.txt"), &spectrum)?;
//!
//! let table = read_spectrum_file(Path::new("psd.txt"))?;
//! for (k, p) in table.wavenumbers.iter().zip(&table.columns[0]) {
//!     println!("{k} {p:.3e}");
//! }
//! ```

#[cfg(feature = "netcdf")]
mod netcdf_io;
mod spectrum_file;

#[cfg(feature = "netcdf")]
pub use netcdf_io::{FieldReader, NetCDFError};
pub use spectrum_file::{
    SpectrumFileError, SpectrumTable, parse_spectrum_table, read_spectrum_file,
    write_spectrum_file,
};
