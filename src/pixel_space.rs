//! Transforms in pixel space, where the image carries no positional information.
//!
//! Pixel `(r, c)` of an `m x n` image sits at `(r / m, c / n)`, so on the integer frequency grid
//! `u in 0..m`, `v in 0..n` the pair reduces to the ordinary 2D DFT and its inverse.
use crate::error::{check_len, Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};
use num_complex::Complex;
use std::f64::consts::PI;

/// Fourier sum of `image` at each `(u, v)` column of `uv`, in cycles per image.
pub fn dft(image: ArrayView2<f64>, uv: ArrayView2<f64>) -> Result<Array1<Complex<f64>>> {
    check_len("uv", 0, 2, uv.nrows())?;
    let (m, n) = image.dim();
    log::debug!("dft: {}x{} pixels, {} visibilities", m, n, uv.ncols());

    let mut vis = Array1::zeros(uv.ncols());
    Zip::from(&mut vis)
        .and(uv.row(0))
        .and(uv.row(1))
        .par_for_each(|vis, &u, &v| {
            let (u, v) = (u / m as f64, v / n as f64);
            *vis = Zip::indexed(&image).fold(Complex::new(0.0, 0.0), |sum, (r, c), &value| {
                sum + Complex::new(0.0, -2.0 * PI * (u * r as f64 + v * c as f64)).exp() * value
            });
        });
    Ok(vis)
}

/// Back-projection of `vis` onto an image of `shape`, normalised by the number of visibilities.
pub fn idft(
    vis: ArrayView1<Complex<f64>>,
    shape: [usize; 2],
    uv: ArrayView2<f64>,
) -> Result<Array2<f64>> {
    check_len("uv", 0, 2, uv.nrows())?;
    check_len("vis", 0, uv.ncols(), vis.len())?;
    if vis.is_empty() {
        return Err(Error::Empty { argument: "vis" });
    }
    log::debug!(
        "idft: {} visibilities, {}x{} pixels",
        vis.len(),
        shape[0],
        shape[1]
    );

    let (m, n) = (shape[0] as f64, shape[1] as f64);
    let scale = 1.0 / vis.len() as f64;
    let u = uv.row(0);
    let v = uv.row(1);

    let mut image = Array2::zeros(shape);
    Zip::indexed(&mut image).par_for_each(|(r, c), e| {
        let (r, c) = (r as f64 / m, c as f64 / n);
        let sum = Zip::from(&vis).and(&u).and(&v).fold(
            Complex::new(0.0, 0.0),
            |sum, &value, &u, &v| sum + value * Complex::new(0.0, 2.0 * PI * (u * r + v * c)).exp(),
        );
        *e = sum.re * scale;
    });
    Ok(image)
}
