//! Intensity histogram and automatic window selection.
//!
//! The auto window picks input bounds at two cumulative percentiles of the
//! histogram, so a handful of outlier pixels do not flatten the ramp.

use crate::error::LutError;
use crate::image::GrayImage;
use crate::lut::LUT_SIZE;

/// Count pixels per intensity.
///
/// Bins are `u64`: a single intensity can cover more than `u32::MAX`
/// pixels of a `u32 × u32` image.
pub fn histogram(image: &GrayImage) -> [u64; LUT_SIZE] {
    let mut bins = [0u64; LUT_SIZE];
    for &px in &image.pixels {
        bins[usize::from(px)] += 1;
    }
    bins
}

/// Choose `(input_min, input_max)` for a linear LUT from image content.
///
/// `input_min` is the intensity holding the pixel just past the
/// `low_percentile` rank; `input_max` is the first intensity whose
/// cumulative count reaches `high_percentile`. Percentiles are in
/// `0.0..=100.0` with `low <= high`. An empty image returns `(0, 255)`.
///
/// `auto_window(img, 0.0, 100.0)` is the image's exact min/max, and neither
/// bound ever lies past the brightest pixel.
pub fn auto_window(
    image: &GrayImage,
    low_percentile: f64,
    high_percentile: f64,
) -> Result<(i32, i32), LutError> {
    let valid = |p: f64| (0.0..=100.0).contains(&p);
    if !valid(low_percentile) || !valid(high_percentile) || low_percentile > high_percentile {
        return Err(LutError::InvalidPercentile {
            low: low_percentile,
            high: high_percentile,
        });
    }

    if image.is_empty() {
        return Ok((0, LUT_SIZE as i32 - 1));
    }

    let bins = histogram(image);
    let total = image.pixels.len() as f64;
    let low_target = total * low_percentile / 100.0;
    let high_target = total * high_percentile / 100.0;

    let mut lower = None;
    let mut upper = None;
    let mut cumulative = 0u64;
    for (intensity, &count) in bins.iter().enumerate() {
        cumulative += count;
        let cum = cumulative as f64;
        if lower.is_none() && cum > low_target {
            lower = Some(intensity as i32);
        }
        if upper.is_none() && cumulative > 0 && cum >= high_target {
            upper = Some(intensity as i32);
        }
        if lower.is_some() && upper.is_some() {
            break;
        }
    }

    // low == 100% has no pixel past its rank; pin to the brightest one.
    let brightest = bins
        .iter()
        .rposition(|&count| count > 0)
        .map_or(LUT_SIZE as i32 - 1, |i| i as i32);
    let lower = lower.unwrap_or(brightest);
    let upper = upper.unwrap_or(brightest).max(lower);
    tracing::debug!(lower, upper, low_percentile, high_percentile, "auto window");
    Ok((lower, upper))
}
