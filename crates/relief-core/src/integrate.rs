use std::sync::Arc;

use ndarray::Array2;
use num_complex::Complex;
use num_traits::Zero;
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

use crate::consts::{
    DENOMINATOR_EPSILON, FLAT_FIELD_VALUE, FLAT_RANGE_EPSILON, PARALLEL_PIXEL_THRESHOLD,
};
use crate::gradient::GradientField;

/// Integrate a gradient field into a height field (Frankot-Chellappa).
///
/// Solves for the field whose discrete gradients best match the input in a
/// least-squares sense over the 2D Fourier basis, assuming periodic
/// boundaries. With `normalize` the result is rescaled to [0,1]; a flat
/// field comes back as a constant 0.5 plane instead of dividing by zero.
pub fn frankot_chellappa(grad: &GradientField, normalize: bool) -> Array2<f32> {
    let (rows, cols) = grad.dim();

    let v = frequency_scale(rows);
    let u = frequency_scale(cols);

    let mut planner = FftPlanner::new();
    let gx_f = fft2d(grad.x(), &mut planner);
    let gy_f = fft2d(grad.y(), &mut planner);

    let mut z_f = Array2::<Complex<f64>>::zeros((rows, cols));
    for r in 0..rows {
        for c in 0..cols {
            let numerator =
                (gx_f[[r, c]] * u[c] + gy_f[[r, c]] * v[r]) * Complex::new(0.0, -1.0);
            let denominator = u[c] * u[c] + v[r] * v[r] + DENOMINATOR_EPSILON;
            z_f[[r, c]] = numerator / denominator;
        }
    }

    // The DC term of a gradient-derived spectrum is undefined; pinning it
    // to zero fixes the additive constant of integration.
    z_f[[0, 0]] = Complex::zero();

    let z = ifft2d(&z_f, &mut planner);

    if normalize {
        normalize_unit(&z)
    } else {
        z.mapv(|val| val as f32)
    }
}

/// Normalized 1D frequency coordinates for an axis of length `n`, laid out
/// to match the unshifted FFT bin order.
///
/// Index formula: (i - (n/2 + 1)) / (n - n%2), followed by an inverse
/// shift. The Nyquist convention matches an inverse-shifted spectrum.
fn frequency_scale(n: usize) -> Vec<f64> {
    let offset = (n / 2 + 1) as f64;
    let span = (n - n % 2) as f64;
    let centered: Vec<f64> = (0..n).map(|i| (i as f64 - offset) / span).collect();

    (0..n).map(|i| centered[(i + n / 2) % n]).collect()
}

/// Rescale to [0,1]. A range below `FLAT_RANGE_EPSILON` means the field is
/// flat; it maps to a constant mid-value plane rather than NaN.
fn normalize_unit(z: &Array2<f64>) -> Array2<f32> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &val in z.iter() {
        min = min.min(val);
        max = max.max(val);
    }

    let range = max - min;
    if range < FLAT_RANGE_EPSILON {
        return Array2::from_elem(z.dim(), FLAT_FIELD_VALUE);
    }

    z.mapv(|val| ((val - min) / range) as f32)
}

/// 2D FFT: row-wise pass, then column-wise pass.
fn fft2d(data: &Array2<f32>, planner: &mut FftPlanner<f64>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();

    let mut work = Array2::<Complex<f64>>::zeros((h, w));
    for r in 0..h {
        for c in 0..w {
            work[[r, c]] = Complex::new(data[[r, c]] as f64, 0.0);
        }
    }

    let row_fft = planner.plan_fft_forward(w);
    let col_fft = planner.plan_fft_forward(h);
    row_pass(&mut work, &row_fft);
    col_pass(&mut work, &col_fft);

    work
}

/// Inverse 2D FFT: column-wise pass, then row-wise pass, real part only.
fn ifft2d(data: &Array2<Complex<f64>>, planner: &mut FftPlanner<f64>) -> Array2<f64> {
    let (h, w) = data.dim();

    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();
    col_pass(&mut work, &ifft_col);
    row_pass(&mut work, &ifft_row);

    // rustfft leaves the inverse unscaled
    let scale = 1.0 / (h * w) as f64;
    work.mapv(|val| val.re * scale)
}

fn row_pass(work: &mut Array2<Complex<f64>>, fft: &Arc<dyn Fft<f64>>) {
    let (h, w) = work.dim();

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let src = &*work;
        let rows: Vec<Vec<Complex<f64>>> = (0..h)
            .into_par_iter()
            .map(|r| {
                let mut buf: Vec<Complex<f64>> = (0..w).map(|c| src[[r, c]]).collect();
                fft.process(&mut buf);
                buf
            })
            .collect();
        for (r, row) in rows.into_iter().enumerate() {
            for (c, val) in row.into_iter().enumerate() {
                work[[r, c]] = val;
            }
        }
    } else {
        for r in 0..h {
            let mut buf: Vec<Complex<f64>> = (0..w).map(|c| work[[r, c]]).collect();
            fft.process(&mut buf);
            for (c, val) in buf.into_iter().enumerate() {
                work[[r, c]] = val;
            }
        }
    }
}

fn col_pass(work: &mut Array2<Complex<f64>>, fft: &Arc<dyn Fft<f64>>) {
    let (h, w) = work.dim();

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let src = &*work;
        let cols: Vec<Vec<Complex<f64>>> = (0..w)
            .into_par_iter()
            .map(|c| {
                let mut buf: Vec<Complex<f64>> = (0..h).map(|r| src[[r, c]]).collect();
                fft.process(&mut buf);
                buf
            })
            .collect();
        for (c, col) in cols.into_iter().enumerate() {
            for (r, val) in col.into_iter().enumerate() {
                work[[r, c]] = val;
            }
        }
    } else {
        for c in 0..w {
            let mut buf: Vec<Complex<f64>> = (0..h).map(|r| work[[r, c]]).collect();
            fft.process(&mut buf);
            for (r, val) in buf.into_iter().enumerate() {
                work[[r, c]] = val;
            }
        }
    }
}
