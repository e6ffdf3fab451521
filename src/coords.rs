//! Physical pixel coordinates and their dual spatial-frequency coordinates.
//!
//! Both axes use the half-pixel convention: with `n` pixels the samples sit at
//! `i - n/2 + 0.5` pixels from the centre, so an even axis has no sample exactly on the centre.
use crate::error::{check_len, Result};
use ndarray::{Array1, ArrayView1};

/// Returns the positions of `number_pixels` pixel centres along one axis.
///
/// * `center` - The physical coordinate of the middle of the axis
/// * `pixel_size` - The sample pitch in physical units (e.g. arcsec). Zero collapses every position onto `center`.
pub fn generate_xy(number_pixels: usize, center: f64, pixel_size: f64) -> Array1<f64> {
    let half = number_pixels as f64 / 2.0;
    log::trace!(
        "generate_xy: n:{} center:{} pixel_size:{}",
        number_pixels,
        center,
        pixel_size
    );
    (0..number_pixels)
        .map(|i| (i as f64 - half + 0.5) * pixel_size + center)
        .collect()
}

/// Returns the spatial frequencies dual to a pixel axis, spaced `1 / (pixel_size * number_pixels)` apart.
///
/// A non-zero `center` shifts every frequency by `1 / center`. The comparison against zero is exact.
///
/// Degenerate inputs are not rejected: a zero `pixel_size` or zero `number_pixels` divides by zero
/// and the result holds infinities or NaNs.
pub fn generate_uv(number_pixels: usize, center: f64, pixel_size: f64) -> Array1<f64> {
    let half = number_pixels as f64 / 2.0;
    let freq_res = 1.0 / (pixel_size * number_pixels as f64);
    log::trace!(
        "generate_uv: n:{} center:{} freq_res:{}",
        number_pixels,
        center,
        freq_res
    );
    let mut uv: Array1<f64> = (0..number_pixels)
        .map(|i| (i as f64 - half + 0.5) * freq_res)
        .collect();
    if center != 0.0 {
        let offset = 1.0 / center;
        uv.map_inplace(|e| *e += offset);
    }
    uv
}

/// Builds the flattened pixel mesh for a map of `shape`, returning `(x, y)` each of length `m * n`.
///
/// The x axis has `shape[0]` samples and uses `center.0`/`pixel_size.0`, the y axis has `shape[1]`
/// samples and uses `center.1`/`pixel_size.1`. See [`mesh_from_axes`] for the pairing.
pub fn mesh(
    shape: [usize; 2],
    center: (f64, f64),
    pixel_size: (f64, f64),
) -> (Array1<f64>, Array1<f64>) {
    let x = generate_xy(shape[0], center.0, pixel_size.0);
    let y = generate_xy(shape[1], center.1, pixel_size.1);
    mesh_from_axes(x.view(), y.view())
}

/// Flattens two axes into a mesh of `x.len() * y.len()` points.
///
/// Flat index `p` is paired with `x[p % m]` and `y[p / m]` where `m = x.len()`: x varies fastest.
/// Images are flattened in row-major order, so for a square map x runs along columns and y along rows.
pub fn mesh_from_axes(x: ArrayView1<f64>, y: ArrayView1<f64>) -> (Array1<f64>, Array1<f64>) {
    let m = x.len();
    let size = m * y.len();
    let x_flat = (0..size).map(|p| x[p % m]).collect();
    let y_flat = (0..size).map(|p| y[p / m]).collect();
    (x_flat, y_flat)
}

/// Checks that a pair of axes can be flattened into a mesh for a map of `shape`.
pub(crate) fn check_axes(shape: &[usize], x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<()> {
    check_len("x", 0, shape[0], x.len())?;
    check_len("y", 0, shape[1], y.len())
}
