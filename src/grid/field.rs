//! Gridded fields with named coordinate axes.

use ndarray::{ArrayD, Axis, IxDyn};

use super::CoordinateAxis;
use crate::error::SpectrumError;

/// Conventional latitude axis names, preferred first.
pub const LATITUDE_NAMES: [&str; 2] = ["latitude", "lat"];

/// Conventional longitude axis names, preferred first.
pub const LONGITUDE_NAMES: [&str; 2] = ["longitude", "lon"];

/// An N-dimensional field with one named coordinate axis per dimension.
///
/// Axis order follows array dimension order. A field is read-only input to
/// the spectrum pipeline; selections always allocate new fields.
///
/// # Example
///
/// ```
/// use ndarray::{ArrayD, IxDyn};
/// use zonal_spectrum::grid::{CoordinateAxis, GriddedField};
///
/// let lat = CoordinateAxis::linspace("lat", -45.0, 45.0, 4);
/// let lon = CoordinateAxis::linspace("lon", 0.0, 270.0, 4);
/// let data = ArrayD::zeros(IxDyn(&[4, 4]));
/// let field = GriddedField::new(data, vec![lat, lon]).unwrap();
///
/// assert_eq!(field.len_of("lon").unwrap(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct GriddedField {
    data: ArrayD<f64>,
    axes: Vec<CoordinateAxis>,
}

impl GriddedField {
    /// Create a field, checking that every dimension has a uniquely named
    /// axis of matching length.
    pub fn new(data: ArrayD<f64>, axes: Vec<CoordinateAxis>) -> Result<Self, SpectrumError> {
        if axes.len() != data.ndim() {
            return Err(SpectrumError::shape_mismatch(
                format!("{} axes", data.ndim()),
                format!("{} axes", axes.len()),
            ));
        }
        for (dim, axis) in axes.iter().enumerate() {
            if axis.len() != data.len_of(Axis(dim)) {
                return Err(SpectrumError::shape_mismatch(
                    format!("axis '{}' of length {}", axis.name, data.len_of(Axis(dim))),
                    format!("{} coordinates", axis.len()),
                ));
            }
            if axes[..dim].iter().any(|a| a.name == axis.name) {
                return Err(SpectrumError::DuplicateAxis(axis.name.clone()));
            }
        }
        Ok(Self { data, axes })
    }

    /// Create a field from a flat row-major buffer.
    pub fn from_shape_vec(
        axes: Vec<CoordinateAxis>,
        values: Vec<f64>,
    ) -> Result<Self, SpectrumError> {
        let shape: Vec<usize> = axes.iter().map(CoordinateAxis::len).collect();
        let expected: usize = shape.iter().product();
        let actual = values.len();
        let data = ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| {
            SpectrumError::shape_mismatch(format!("{} values", expected), format!("{} values", actual))
        })?;
        Self::new(data, axes)
    }

    /// The underlying array.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Consume the field, returning the underlying array.
    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    /// Coordinate axes in dimension order.
    pub fn axes(&self) -> &[CoordinateAxis] {
        &self.axes
    }

    /// Axis names in dimension order.
    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Array shape.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Dimension index of a named axis.
    pub fn axis_index(&self, name: &str) -> Result<usize, SpectrumError> {
        self.axes
            .iter()
            .position(|a| a.name == name)
            .ok_or_else(|| SpectrumError::MissingAxis(name.to_string()))
    }

    /// Coordinate axis by name.
    pub fn axis(&self, name: &str) -> Result<&CoordinateAxis, SpectrumError> {
        self.axis_index(name).map(|i| &self.axes[i])
    }

    /// Length of a named axis.
    pub fn len_of(&self, name: &str) -> Result<usize, SpectrumError> {
        self.axis(name).map(CoordinateAxis::len)
    }

    /// Check if the field carries an axis with this name.
    pub fn has_axis(&self, name: &str) -> bool {
        self.axes.iter().any(|a| a.name == name)
    }

    /// First name in `candidates` that names an axis of this field.
    pub fn find_axis<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|name| self.has_axis(name))
    }

    /// Take a single index along a named axis, dropping that axis.
    ///
    /// Used to pick one ensemble member or pressure level before computing
    /// a spectrum.
    pub fn isel(&self, name: &str, index: usize) -> Result<Self, SpectrumError> {
        let dim = self.axis_index(name)?;
        let len = self.axes[dim].len();
        if index >= len {
            return Err(SpectrumError::IndexOutOfBounds {
                axis: name.to_string(),
                index,
                len,
            });
        }
        let data = self.data.index_axis(Axis(dim), index).to_owned();
        let axes = self
            .axes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != dim)
            .map(|(_, a)| a.clone())
            .collect();
        Ok(Self { data, axes })
    }

    /// Keep only the given indices along a named axis, in the given order.
    pub fn select(&self, name: &str, indices: &[usize]) -> Result<Self, SpectrumError> {
        let dim = self.axis_index(name)?;
        let len = self.axes[dim].len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(SpectrumError::IndexOutOfBounds {
                axis: name.to_string(),
                index,
                len,
            });
        }
        let data = self.data.select(Axis(dim), indices);
        let mut axes = self.axes.clone();
        axes[dim] = self.axes[dim].take(indices);
        Ok(Self { data, axes })
    }
}
