//! NetCDF input for gridded fields.
//!
//! Loads one variable of a NetCDF file as a [`GriddedField`], using the
//! variable's dimension names as axis names and the matching coordinate
//! variables as coordinates.
//!
//! # Packed Data
//!
//! CF packing is undone on read:
//! - `value = raw * scale_factor + add_offset`
//! - raw values equal to `_FillValue` or `missing_value`, non-finite, or
//!   beyond ±1e30 become NaN
//!
//! # Example
//!
//! ```rust,ignore
//! use zonal_spectrum::io::FieldReader;
//! use zonal_spectrum::analysis::{SpectrumConfig, ZonalSpectrumComputer};
//!
//! let reader = FieldReader::open("forecast.nc")?;
//! let z500 = reader
//!     .read_field("z")?
//!     .isel("ensemble_member", 1)?
//!     .isel("pressure_level", 1)?;
//!
//! let config = SpectrumConfig::detect_axes(&z500)?;
//! let psd = ZonalSpectrumComputer::new(config).compute(&z500)?;
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::SpectrumError;
use crate::grid::{CoordinateAxis, GriddedField};

/// Error type for NetCDF operations.
#[derive(Debug, Error)]
pub enum NetCDFError {
    /// NetCDF library error
    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),

    /// Missing variable
    #[error("Missing variable: {0}")]
    MissingVariable(String),

    /// Variable does not form a valid field
    #[error("Invalid field: {0}")]
    Field(#[from] SpectrumError),
}

/// Check if a value is valid (not a fill value).
#[inline]
fn is_valid_f64(v: f64) -> bool {
    v.is_finite() && v.abs() < 1.0e+30
}

/// Reader for gridded variables in a NetCDF file.
pub struct FieldReader {
    file: netcdf::File,
}

impl FieldReader {
    /// Open a NetCDF file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NetCDFError> {
        let file = netcdf::open(path)?;
        Ok(Self { file })
    }

    /// Names of all variables in the file.
    pub fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name()).collect()
    }

    /// Load a variable as a gridded field.
    ///
    /// Each dimension becomes an axis of the same name. Coordinates come
    /// from the 1-D variable named after the dimension when present, and
    /// default to `0, 1, ..., n - 1` otherwise.
    pub fn read_field(&self, name: &str) -> Result<GriddedField, NetCDFError> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| NetCDFError::MissingVariable(name.to_string()))?;

        let axes = var
            .dimensions()
            .iter()
            .map(|dim| self.read_coord(&dim.name(), dim.len()))
            .collect::<Result<Vec<_>, _>>()?;

        let scale = get_attr_f64(&var, "scale_factor").unwrap_or(1.0);
        let offset = get_attr_f64(&var, "add_offset").unwrap_or(0.0);
        let fill = get_attr_f64(&var, "_FillValue");
        let missing = get_attr_f64(&var, "missing_value");

        let raw: Vec<f64> = var.get_values::<f64, _>(..)?;
        let values: Vec<f64> = raw
            .into_iter()
            .map(|v| {
                if !is_valid_f64(v) || Some(v) == fill || Some(v) == missing {
                    f64::NAN
                } else {
                    v * scale + offset
                }
            })
            .collect();

        debug!(
            variable = name,
            axes = ?axes.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            "field loaded"
        );

        Ok(GriddedField::from_shape_vec(axes, values)?)
    }

    /// Read the coordinate variable for a dimension.
    fn read_coord(&self, name: &str, len: usize) -> Result<CoordinateAxis, NetCDFError> {
        match self.file.variable(name) {
            Some(var) if var.dimensions().len() == 1 => {
                let values: Vec<f64> = var.get_values::<f64, _>(..)?;
                Ok(CoordinateAxis::new(name, values))
            }
            _ => Ok(CoordinateAxis::arange(name, len)),
        }
    }
}

/// Get a numeric attribute as f64.
fn get_attr_f64(var: &netcdf::Variable, name: &str) -> Option<f64> {
    var.attribute_value(name)
        .and_then(|r| r.ok())
        .and_then(|v| match v {
            netcdf::AttributeValue::Double(d) => Some(d),
            netcdf::AttributeValue::Float(f) => Some(f as f64),
            netcdf::AttributeValue::Short(s) => Some(s as f64),
            netcdf::AttributeValue::Int(i) => Some(i as f64),
            _ => None,
        })
}
