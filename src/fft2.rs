//! Grid-aligned 2D FFT used to cross-check the direct sums.
use ndarray::parallel::prelude::{IntoParallelIterator, ParallelIterator};
use ndarray::{Array2, ArrayView2, Zip};
use num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{FftDirection, FftPlanner};

/// Unnormalised forward FFT of a real image, DC at index (0, 0).
///
/// Output index `[l, k]` holds `sum_{r,c} image[r, c] * exp(-2πi (l r / m + k c / n))`.
pub fn fft2(image: ArrayView2<f64>) -> Array2<Complex<f64>> {
    let mut output = image.map(|&e| Complex::new(e, 0.0));
    let (m, n) = output.dim();

    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft(n, FftDirection::Forward);
    let fft_col = planner.plan_fft(m, FftDirection::Forward);

    Zip::from(output.rows_mut()).into_par_iter().for_each_init(
        || vec![Zero::zero(); fft_row.get_inplace_scratch_len()],
        |scratch, mut row| {
            let mut buffer = row.0.to_vec();
            fft_row.process_with_scratch(&mut buffer, scratch);
            for (e, b) in row.0.iter_mut().zip(buffer) {
                *e = b;
            }
        },
    );

    Zip::from(output.columns_mut())
        .into_par_iter()
        .for_each_init(
            || {
                (
                    vec![Zero::zero(); m],
                    vec![Zero::zero(); fft_col.get_inplace_scratch_len()],
                )
            },
            |(temp, scratch), mut col| {
                for (t, &e) in temp.iter_mut().zip(col.0.iter()) {
                    *t = e;
                }
                fft_col.process_with_scratch(temp, scratch);
                for (e, &t) in col.0.iter_mut().zip(temp.iter()) {
                    *e = t;
                }
            },
        );

    output
}

#[cfg(test)]
mod tests {
    use super::fft2;
    use ndarray::arr2;
    use num_complex::Complex;

    #[test]
    fn test_fft2() {
        let input = arr2(&[[1., 2., 3.], [4., 5., 6.], [7., 8., 9.]]);
        let output = fft2(input.view());

        let expected = [
            Complex::new(45.0, 0.),
            Complex::new(-4.5, 2.598_076_211_353_316),
            Complex::new(-4.5, -2.598_076_211_353_316),
            Complex::new(-13.5, 7.794_228_634_059_948),
            Complex::new(0.0, 0.),
            Complex::new(0.0, 0.),
            Complex::new(-13.5, -7.794_228_634_059_948),
            Complex::new(0.0, 0.),
            Complex::new(0.0, 0.),
        ];
        for (a, b) in output.iter().zip(expected.iter()) {
            assert!((a - b).norm() < 1e-9, "{} != {}", a, b);
        }
    }
}
