//! One-sided energy spectrum of a single longitude row.
//!
//! # Mathematical Background
//!
//! For a real row `x_j`, `j = 0..L`, the normalized DFT is
//! ```text
//! X_k = (1/L) Σⱼ x_j exp(-2πi jk/L)
//! ```
//! Real input gives `X_{L-k} = conj(X_k)`, so the energy at `k` and `L-k`
//! is folded into one bin:
//! ```text
//! S_0 = |X_0|²
//! S_k = 2 |X_k|²,   k = 1 .. ⌊L/2⌋ - 1
//! ```
//! For a row without Nyquist content, `Σₖ S_k` equals the mean square
//! of the row.

use std::sync::Arc;

use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

/// Planned forward DFT for rows of a fixed length.
///
/// The plan is shared and immutable, so one `ZonalDft` can serve many
/// rows, on one thread or many.
#[derive(Clone)]
pub struct ZonalDft {
    fft: Arc<dyn Fft<f64>>,
    len: usize,
}

impl std::fmt::Debug for ZonalDft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZonalDft").field("len", &self.len).finish()
    }
}

impl ZonalDft {
    /// Plan a transform for rows of length `len`.
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(len);
        Self { fft, len }
    }

    /// Number of wavenumbers in the one-sided spectrum, `⌊L/2⌋`.
    pub fn n_wavenumbers(&self) -> usize {
        self.len / 2
    }

    /// Allocate a work buffer sized for this transform.
    pub fn make_buffer(&self) -> Vec<Complex64> {
        vec![Complex64::new(0.0, 0.0); self.len]
    }

    /// Compute the one-sided energy spectrum of `row` into `out`.
    ///
    /// `buffer` is scratch space of length `len()`; `out` must have length
    /// `n_wavenumbers()`.
    pub fn energy_into(&self, row: &[f64], buffer: &mut [Complex64], out: &mut [f64]) {
        debug_assert_eq!(row.len(), self.len);
        debug_assert_eq!(buffer.len(), self.len);
        debug_assert_eq!(out.len(), self.n_wavenumbers());

        for (b, &x) in buffer.iter_mut().zip(row) {
            *b = Complex64::new(x, 0.0);
        }
        self.fft.process(buffer);

        let inv_len = 1.0 / self.len as f64;
        for (k, s) in out.iter_mut().enumerate() {
            let amplitude = buffer[k] * inv_len;
            *s = 2.0 * amplitude.norm_sqr();
        }
        if let Some(s0) = out.first_mut() {
            *s0 /= 2.0;
        }
    }

    /// Compute the one-sided energy spectrum of `row`.
    pub fn energy(&self, row: &[f64]) -> Vec<f64> {
        let mut buffer = self.make_buffer();
        let mut out = vec![0.0; self.n_wavenumbers()];
        self.energy_into(row, &mut buffer, &mut out);
        out
    }
}

/// One-sided energy spectrum of a single row, planning a fresh transform.
///
/// # Example
///
/// ```
/// use zonal_spectrum::analysis::one_sided_energy_spectrum;
///
/// // Constant row: all energy in the mean
/// let s = one_sided_energy_spectrum(&[2.0; 8]);
/// assert_eq!(s.len(), 4);
/// assert!((s[0] - 4.0).abs() < 1e-12);
/// assert!(s[1..].iter().all(|&v| v < 1e-24));
/// ```
pub fn one_sided_energy_spectrum(row: &[f64]) -> Vec<f64> {
    ZonalDft::new(row.len()).energy(row)
}
