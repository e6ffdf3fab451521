//! Direct-sum non-uniform discrete Fourier transforms for aperture synthesis imaging.
//!
//! [`dft_map`] evaluates the Fourier sum of an image at arbitrary `(u, v)` spatial frequencies,
//! producing complex visibilities. [`idft_map`] is its adjoint: it back-projects visibilities onto
//! a pixel grid. Both are exact sums costing `O(pixels * visibilities)`, with the outer loop run in
//! parallel.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};
use num_complex::Complex;
use std::f64::consts::PI;

pub mod coords;
pub mod error;
#[cfg(test)]
mod fft2;
pub mod pixel_space;
pub mod stats;

use coords::{check_axes, generate_xy, mesh_from_axes};
pub use error::{Error, Result};
use error::check_len;

/// Calculates the complex visibilities of `image` at each `(u, v)` column of `uv`.
///
/// `vis_k = sum_p image_p * exp(-2πi (u_k x_p + v_k y_p))`, with pixel positions from [`coords::mesh`].
///
/// * `uv` - Spatial frequencies, shape `(2, K)`. Row 0 holds u, row 1 holds v.
/// * `center` - Physical coordinates of the map centre
/// * `pixel_size` - The size of a pixel on each axis
pub fn dft_map(
    image: ArrayView2<f64>,
    uv: ArrayView2<f64>,
    center: (f64, f64),
    pixel_size: (f64, f64),
) -> Result<Array1<Complex<f64>>> {
    let x = generate_xy(image.nrows(), center.0, pixel_size.0);
    let y = generate_xy(image.ncols(), center.1, pixel_size.1);
    dft_map_axes(image, x.view(), y.view(), uv)
}

/// As [`dft_map`], but with the pixel axes supplied by the caller.
///
/// `x` must have one entry per row of `image` and `y` one per column.
pub fn dft_map_axes(
    image: ArrayView2<f64>,
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    uv: ArrayView2<f64>,
) -> Result<Array1<Complex<f64>>> {
    check_len("uv", 0, 2, uv.nrows())?;
    check_axes(image.shape(), x, y)?;
    log::debug!(
        "dft_map: {}x{} pixels, {} visibilities",
        image.nrows(),
        image.ncols(),
        uv.ncols()
    );

    let (x, y) = mesh_from_axes(x, y);
    let values: Array1<f64> = image.iter().copied().collect();

    let mut vis = Array1::zeros(uv.ncols());
    Zip::from(&mut vis)
        .and(uv.row(0))
        .and(uv.row(1))
        .par_for_each(|vis, &u, &v| {
            *vis = Zip::from(&values).and(&x).and(&y).fold(
                Complex::new(0.0, 0.0),
                |sum, &value, &x, &y| {
                    sum + Complex::new(0.0, -2.0 * PI * (u * x + v * y)).exp() * value
                },
            );
        });
    Ok(vis)
}

/// Back-projects visibilities onto a real map of `shape`.
///
/// `image_p = (1/K) Re(sum_k vis_k * exp(2πi (u_k x_p + v_k y_p)))`
///
/// The kernel is the conjugate of [`dft_map`]'s and the sum is normalised by the number of
/// visibilities K, not the number of pixels. This is the adjoint (dirty map), not a matrix inverse:
/// `idft_map(dft_map(image))` only reproduces `image` when the uv coverage is dense and regular.
pub fn idft_map(
    vis: ArrayView1<Complex<f64>>,
    shape: [usize; 2],
    uv: ArrayView2<f64>,
    center: (f64, f64),
    pixel_size: (f64, f64),
) -> Result<Array2<f64>> {
    let x = generate_xy(shape[0], center.0, pixel_size.0);
    let y = generate_xy(shape[1], center.1, pixel_size.1);
    idft_map_axes(vis, x.view(), y.view(), uv)
}

/// As [`idft_map`], but with the pixel axes supplied by the caller. The map has shape `(x.len(), y.len())`.
pub fn idft_map_axes(
    vis: ArrayView1<Complex<f64>>,
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    uv: ArrayView2<f64>,
) -> Result<Array2<f64>> {
    check_len("uv", 0, 2, uv.nrows())?;
    check_len("vis", 0, uv.ncols(), vis.len())?;
    if vis.is_empty() {
        return Err(Error::Empty { argument: "vis" });
    }
    let shape = [x.len(), y.len()];
    log::debug!(
        "idft_map: {} visibilities, {}x{} pixels",
        vis.len(),
        shape[0],
        shape[1]
    );

    let (x, y) = mesh_from_axes(x, y);
    let u = uv.row(0);
    let v = uv.row(1);
    let scale = 1.0 / vis.len() as f64;
    let n = shape[1];

    let mut image = Array2::zeros(shape);
    Zip::indexed(&mut image).par_for_each(|(r, c), e| {
        let p = r * n + c;
        let (x, y) = (x[p], y[p]);
        let sum = Zip::from(&vis).and(&u).and(&v).fold(
            Complex::new(0.0, 0.0),
            |sum, &value, &u, &v| sum + value * Complex::new(0.0, 2.0 * PI * (u * x + v * y)).exp(),
        );
        *e = sum.re * scale;
    });
    Ok(image)
}

/// Position and pixel size of a map, one entry per axis.
///
/// The first entries drive the x coordinates (axis 0 length), the second the y coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MapGeometry {
    pub center: (f64, f64),
    pub pixel_size: (f64, f64),
}

impl Default for MapGeometry {
    fn default() -> Self {
        MapGeometry {
            center: (0.0, 0.0),
            pixel_size: (1.0, 1.0),
        }
    }
}

impl MapGeometry {
    pub fn x_axis(&self, number_pixels: usize) -> Array1<f64> {
        generate_xy(number_pixels, self.center.0, self.pixel_size.0)
    }

    pub fn y_axis(&self, number_pixels: usize) -> Array1<f64> {
        generate_xy(number_pixels, self.center.1, self.pixel_size.1)
    }
}

/// A set of visibilities and the spatial frequencies they were sampled at.
///
/// Samples are unordered and may repeat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visibilities {
    /// Shape `(2, K)`, u in row 0 and v in row 1
    pub uv: Array2<f64>,
    pub values: Array1<Complex<f64>>,
}

impl Visibilities {
    pub fn new(uv: Array2<f64>, values: Array1<Complex<f64>>) -> Result<Self> {
        check_len("uv", 0, 2, uv.nrows())?;
        check_len("values", 0, uv.ncols(), values.len())?;
        Ok(Visibilities { uv, values })
    }

    /// Samples `image` at each column of `uv`.
    pub fn from_map(
        image: ArrayView2<f64>,
        uv: Array2<f64>,
        geometry: &MapGeometry,
    ) -> Result<Self> {
        let values = dft_map(image, uv.view(), geometry.center, geometry.pixel_size)?;
        Ok(Visibilities { uv, values })
    }

    /// Back-projects onto a map of `shape`, giving the dirty map.
    pub fn to_map(&self, shape: [usize; 2], geometry: &MapGeometry) -> Result<Array2<f64>> {
        idft_map(
            self.values.view(),
            shape,
            self.uv.view(),
            geometry.center,
            geometry.pixel_size,
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distance of each sample from the origin of the uv plane
    pub fn uv_distance(&self) -> Array1<f64> {
        Zip::from(self.uv.row(0))
            .and(self.uv.row(1))
            .map_collect(|&u, &v| u.hypot(v))
    }
}
