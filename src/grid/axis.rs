//! Named coordinate axes.

/// A named coordinate axis: one coordinate value per grid index.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateAxis {
    /// Axis name (e.g. "lat", "longitude", "time")
    pub name: String,
    /// Coordinate value at each index
    pub values: Vec<f64>,
}

impl CoordinateAxis {
    /// Create an axis from explicit coordinate values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Evenly spaced coordinates from `start` to `stop`, both endpoints included.
    ///
    /// ```
    /// use zonal_spectrum::grid::CoordinateAxis;
    ///
    /// let lat = CoordinateAxis::linspace("lat", -90.0, 90.0, 181);
    /// assert_eq!(lat.len(), 181);
    /// assert_eq!(lat.values[90], 0.0);
    /// ```
    pub fn linspace(name: impl Into<String>, start: f64, stop: f64, n: usize) -> Self {
        let values = match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                    .collect()
            }
        };
        Self::new(name, values)
    }

    /// Integer index coordinates `0, 1, ..., n - 1`.
    pub fn arange(name: impl Into<String>, n: usize) -> Self {
        Self::new(name, (0..n).map(|i| i as f64).collect())
    }

    /// Number of coordinate values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the axis has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean spacing between consecutive coordinates.
    pub fn spacing(&self) -> Option<f64> {
        if self.values.len() < 2 {
            return None;
        }
        let first = self.values[0];
        let last = self.values[self.values.len() - 1];
        Some((last - first) / (self.values.len() - 1) as f64)
    }

    /// Check that consecutive coordinates are evenly spaced within `rel_tol`
    /// of the mean spacing.
    pub fn is_uniform(&self, rel_tol: f64) -> bool {
        let Some(mean) = self.spacing() else {
            return true;
        };
        let tol = rel_tol * mean.abs().max(f64::MIN_POSITIVE);
        self.values
            .windows(2)
            .all(|w| ((w[1] - w[0]) - mean).abs() <= tol)
    }

    /// Axis restricted to the given indices, in the given order.
    pub(crate) fn take(&self, indices: &[usize]) -> Self {
        Self::new(
            self.name.clone(),
            indices.iter().map(|&i| self.values[i]).collect(),
        )
    }
}
