//! Read-only pixel access used by the summation loop

use super::luminance::ColorSample;
use image::{DynamicImage, GenericImageView, ImageBuffer, Luma, LumaA, Rgb, Rgba};
use std::ops::Deref;

/// A rectangular, immutable grid of pixels addressed by `(x, y)`
///
/// Implementors must be safe to read from many threads at once; analysis
/// never writes through this trait.
pub trait PixelGrid: Send + Sync {
    /// Number of columns
    fn width(&self) -> u32;

    /// Number of rows
    fn height(&self) -> u32;

    /// Sample the pixel at `(x, y)`; callers guarantee `x < width` and `y < height`
    fn sample(&self, x: u32, y: u32) -> ColorSample;

    /// Total pixel count, `width * height`
    fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}

impl PixelGrid for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn sample(&self, x: u32, y: u32) -> ColorSample {
        // 16-bit variants keep their full precision
        match self {
            DynamicImage::ImageLuma16(buffer) => buffer.sample(x, y),
            DynamicImage::ImageLumaA16(buffer) => buffer.sample(x, y),
            DynamicImage::ImageRgb16(buffer) => buffer.sample(x, y),
            DynamicImage::ImageRgba16(buffer) => buffer.sample(x, y),
            other => {
                let Rgba([r, g, b, a]) = other.get_pixel(x, y);
                ColorSample::from_rgba8(r, g, b, a)
            },
        }
    }
}

impl<C> PixelGrid for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]> + Send + Sync,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn sample(&self, x: u32, y: u32) -> ColorSample {
        let Rgba([r, g, b, a]) = *self.get_pixel(x, y);
        ColorSample::from_rgba8(r, g, b, a)
    }
}

impl<C> PixelGrid for ImageBuffer<Rgb<u8>, C>
where
    C: Deref<Target = [u8]> + Send + Sync,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn sample(&self, x: u32, y: u32) -> ColorSample {
        let Rgb([r, g, b]) = *self.get_pixel(x, y);
        ColorSample::from_rgba8(r, g, b, u8::MAX)
    }
}

impl<C> PixelGrid for ImageBuffer<Luma<u16>, C>
where
    C: Deref<Target = [u16]> + Send + Sync,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn sample(&self, x: u32, y: u32) -> ColorSample {
        let Luma([v]) = *self.get_pixel(x, y);
        ColorSample::opaque(v, v, v)
    }
}

impl<C> PixelGrid for ImageBuffer<LumaA<u16>, C>
where
    C: Deref<Target = [u16]> + Send + Sync,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn sample(&self, x: u32, y: u32) -> ColorSample {
        let LumaA([v, a]) = *self.get_pixel(x, y);
        ColorSample::from_rgba16(v, v, v, a)
    }
}

impl<C> PixelGrid for ImageBuffer<Rgb<u16>, C>
where
    C: Deref<Target = [u16]> + Send + Sync,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn sample(&self, x: u32, y: u32) -> ColorSample {
        let Rgb([r, g, b]) = *self.get_pixel(x, y);
        ColorSample::opaque(r, g, b)
    }
}

impl<C> PixelGrid for ImageBuffer<Rgba<u16>, C>
where
    C: Deref<Target = [u16]> + Send + Sync,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn sample(&self, x: u32, y: u32) -> ColorSample {
        let Rgba([r, g, b, a]) = *self.get_pixel(x, y);
        ColorSample::from_rgba16(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, RgbImage, RgbaImage};

    #[test]
    fn test_dynamic_rgb8_widens() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])));
        assert_eq!(PixelGrid::width(&image), 3);
        assert_eq!(PixelGrid::height(&image), 2);
        assert_eq!(image.pixel_count(), 6);
        assert_eq!(
            image.sample(2, 1),
            ColorSample::opaque(10 * 257, 20 * 257, 30 * 257)
        );
    }

    #[test]
    fn test_dynamic_rgba16_keeps_precision() {
        let buffer: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(1, 1, Rgba([12345, 1, 65535, 65535]));
        let image = DynamicImage::ImageRgba16(buffer);
        assert_eq!(image.sample(0, 0), ColorSample::opaque(12345, 1, 65535));
    }

    #[test]
    fn test_dynamic_luma16_is_gray() {
        let buffer: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_pixel(2, 2, Luma([777]));
        let image = DynamicImage::ImageLuma16(buffer);
        assert_eq!(image.sample(1, 1), ColorSample::opaque(777, 777, 777));
    }

    #[test]
    fn test_rgba8_buffer_premultiplies() {
        let buffer = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 0]));
        assert_eq!(buffer.sample(0, 0), ColorSample::new(0, 0, 0, 0));
    }

    #[test]
    fn test_empty_image_has_no_pixels() {
        let image = DynamicImage::new_rgb8(0, 0);
        assert_eq!(image.pixel_count(), 0);
    }
}
