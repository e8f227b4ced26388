//! Per-segment luminance summation

use super::{grid::PixelGrid, luminance::LuminanceFn};
use crate::error::{BrightnessError, Result};
use std::iter::Sum;
use std::ops::Add;

/// Partial result of one column range: how many pixels, and their summed luminance
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentResult {
    pub pixel_count: u64,
    pub luminance_sum: f64,
}

impl SegmentResult {
    /// Combine two partial results
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            pixel_count: self.pixel_count + other.pixel_count,
            luminance_sum: self.luminance_sum + other.luminance_sum,
        }
    }

    /// Mean luminance, or `None` when no pixels were summed
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.pixel_count > 0).then(|| self.luminance_sum / self.pixel_count as f64)
    }
}

impl Add for SegmentResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.merge(rhs)
    }
}

impl Sum for SegmentResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::merge)
    }
}

/// Sum luminance over every pixel with `x` in `[x_min, x_max)` and any `y`
///
/// Columns are walked outer, rows inner. An empty range yields an empty result.
///
/// # Errors
/// - `SegmentOutOfBounds` when `x_min > x_max` or `x_max` exceeds the image width
pub fn sum_segment<I>(image: &I, x_min: u32, x_max: u32, luminance: LuminanceFn) -> Result<SegmentResult>
where
    I: PixelGrid + ?Sized,
{
    let width = image.width();
    if x_min > x_max || x_max > width {
        return Err(BrightnessError::SegmentOutOfBounds {
            x_min,
            x_max,
            width,
        });
    }

    let height = image.height();
    let mut result = SegmentResult::default();
    for x in x_min..x_max {
        for y in 0..height {
            result.pixel_count += 1;
            result.luminance_sum += luminance(image.sample(x, y));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::luminance::{relative_luminance_rec709, ColorSample};
    use image::{Rgb, RgbImage};

    fn constant_one(_: ColorSample) -> f64 {
        1.0
    }

    fn red_only(sample: ColorSample) -> f64 {
        f64::from(sample.red)
    }

    #[test]
    fn test_full_range_counts_every_pixel() {
        let image = RgbImage::from_pixel(5, 4, Rgb([0, 0, 0]));
        let result = sum_segment(&image, 0, 5, constant_one).unwrap();
        assert_eq!(result.pixel_count, 20);
        assert_eq!(result.luminance_sum, 20.0);
    }

    #[test]
    fn test_column_range_only() {
        // Column x has red channel x
        let image = RgbImage::from_fn(4, 3, |x, _| Rgb([x as u8, 0, 0]));
        let result = sum_segment(&image, 1, 3, red_only).unwrap();
        assert_eq!(result.pixel_count, 6);
        assert_eq!(result.luminance_sum, 3.0 * 257.0 + 3.0 * 2.0 * 257.0);
    }

    #[test]
    fn test_empty_range() {
        let image = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        let result = sum_segment(&image, 2, 2, relative_luminance_rec709).unwrap();
        assert_eq!(result, SegmentResult::default());
        assert_eq!(result.mean(), None);
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let image = RgbImage::new(4, 4);
        let err = sum_segment(&image, 2, 5, constant_one).unwrap_err();
        assert!(matches!(
            err,
            BrightnessError::SegmentOutOfBounds { x_min: 2, x_max: 5, width: 4 }
        ));
        assert!(sum_segment(&image, 3, 1, constant_one).is_err());
    }

    #[test]
    fn test_deterministic() {
        let image = RgbImage::from_fn(7, 5, |x, y| Rgb([(x * 30) as u8, (y * 40) as u8, 9]));
        let a = sum_segment(&image, 0, 7, relative_luminance_rec709).unwrap();
        let b = sum_segment(&image, 0, 7, relative_luminance_rec709).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_merge_and_sum() {
        let a = SegmentResult { pixel_count: 2, luminance_sum: 3.0 };
        let b = SegmentResult { pixel_count: 4, luminance_sum: 9.0 };
        assert_eq!(a + b, SegmentResult { pixel_count: 6, luminance_sum: 12.0 });
        let total: SegmentResult = vec![a, b, a].into_iter().sum();
        assert_eq!(total.pixel_count, 8);
        assert_eq!(total.mean(), Some(15.0 / 8.0));
    }
}
