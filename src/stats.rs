//! Outlier-resistant location estimate.
use crate::error::{Error, Result};
use ndarray::ArrayView1;

// converts a median absolute deviation into a gaussian sigma
const MAD_SCALE: f64 = 0.6745;
// fallback when more than half the values are identical
const MEAN_ABS_DEV_SCALE: f64 = 0.8;
const MAD_LIMIT: f64 = 1e-24;
// truncation correction coefficients, constant term first
const SIGMA_COEFFS: [f64; 4] = [-0.15405, 0.90723, -0.23584, 0.020142];

/// Returns the mean of `values` after discarding points more than `clip_sigmas` standard deviations
/// from the median, and the standard error of that mean.
///
/// The first cut uses the median absolute deviation as a robust sigma. The sigma of the kept points,
/// corrected for the truncation of the distribution, then sets a second cut which gives the final mean.
/// Deviations are always measured from the median.
///
/// * `clip_sigmas` - Clipping threshold, should be non-negative. Values below 1.0 use the
/// truncation correction for 1.0.
///
/// Fails with `TooFewKept` if either cut leaves fewer than two values, e.g. a single value or a
/// zero threshold.
pub fn resistant_mean(values: ArrayView1<f64>, clip_sigmas: f64) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(Error::Empty { argument: "values" });
    }

    let center = median(values.iter().copied().collect());
    let abs_dev: Vec<f64> = values.iter().map(|&e| (e - center).abs()).collect();
    let mut robust_sigma = median(abs_dev.clone()) / MAD_SCALE;
    if robust_sigma < MAD_LIMIT {
        robust_sigma = abs_dev.iter().sum::<f64>() / abs_dev.len() as f64 / MEAN_ABS_DEV_SCALE;
        log::warn!(
            "resistant_mean: median absolute deviation vanished, using mean absolute deviation {}",
            robust_sigma
        );
    }

    let correction = truncation_correction(clip_sigmas);

    let (_, sigma, kept) = clipped_moments(values, &abs_dev, clip_sigmas * robust_sigma);
    check_kept(kept)?;
    let sigma = sigma / correction;

    let (mean, sigma, kept) = clipped_moments(values, &abs_dev, clip_sigmas * sigma);
    check_kept(kept)?;
    let sigma = sigma / correction;
    log::debug!(
        "resistant_mean: kept {} of {} values, mean:{} sigma:{}",
        kept,
        values.len(),
        mean,
        sigma
    );

    Ok((mean, sigma / ((kept as f64) - 1.0).sqrt()))
}

/// Median of `values`, averaging the two middle values for even lengths.
pub fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let len = values.len();
    if len == 0 {
        f64::NAN
    } else if len % 2 == 1 {
        values[len / 2]
    } else {
        0.5 * (values[len / 2 - 1] + values[len / 2])
    }
}

// mean, population sigma and count of the values whose deviation is within cutoff
fn clipped_moments(values: ArrayView1<f64>, abs_dev: &[f64], cutoff: f64) -> (f64, f64, usize) {
    let kept: Vec<f64> = values
        .iter()
        .zip(abs_dev)
        .filter(|&(_, &dev)| dev <= cutoff)
        .map(|(&e, _)| e)
        .collect();
    let count = kept.len() as f64;
    let mean = kept.iter().sum::<f64>() / count;
    let variance = kept.iter().map(|e| (e - mean) * (e - mean)).sum::<f64>() / count;
    (mean, variance.sqrt(), kept.len())
}

// the standard error of the mean needs at least two points
fn check_kept(kept: usize) -> Result<()> {
    if kept < 2 {
        Err(Error::TooFewKept { kept })
    } else {
        Ok(())
    }
}

// sigma of a gaussian truncated at clip_sigmas, relative to the untruncated sigma
fn truncation_correction(clip_sigmas: f64) -> f64 {
    let sc = clip_sigmas.max(1.0);
    if sc <= 4.5 {
        SIGMA_COEFFS
            .iter()
            .rev()
            .fold(0.0, |acc, &coeff| acc * sc + coeff)
    } else {
        1.0
    }
}
