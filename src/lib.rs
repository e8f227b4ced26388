#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Image Brightness
//!
//! Computes a single perceived-brightness percentage (0-100) for a raster
//! image. Every pixel is mapped to a relative-luminance value, the values are
//! averaged, and the mean is rescaled from the 16-bit channel range onto
//! 0-100.
//!
//! Large images can be split into vertical column strips that are summed on
//! tokio's blocking pool and then folded together. The parallel result always
//! matches the sequential one.
//!
//! ## Features
//!
//! - **Content-sniffed decoding**: PNG, JPEG, TIFF and BMP (WebP with `webp-support`)
//! - **8 and 16-bit sources**: samples are widened and alpha-premultiplied
//! - **Selectable weights**: Rec. 709 (default) or Rec. 601 luminance
//! - **Fork-join analysis**: one blocking task per column partition
//! - **CLI Integration**: Optional command-line interface (enable with `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use image_brightness::{analyze_image, analyze_image_parallel, image_from_file};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let loaded = image_from_file("photo.jpg")?;
//! println!("{} image", loaded.format_name());
//!
//! let image = loaded.into_shared();
//! let sequential = analyze_image(&*image)?;
//! let parallel = analyze_image_parallel(image, 8).await?;
//! assert_eq!(sequential, parallel);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom configuration
//!
//! ```rust
//! use image_brightness::{AnalyzerConfig, BrightnessAnalyzer, LuminanceWeights};
//! use image::{Rgb, RgbImage};
//! use std::sync::Arc;
//!
//! # async fn example() -> image_brightness::Result<()> {
//! let config = AnalyzerConfig::builder()
//!     .parallelism(4)
//!     .weights(LuminanceWeights::Rec601)
//!     .build();
//! let analyzer = BrightnessAnalyzer::new(config);
//!
//! let image = Arc::new(RgbImage::from_pixel(64, 64, Rgb([255, 255, 255])));
//! let report = analyzer.analyze(image).await?;
//! assert_eq!(report.percentage, 100);
//! # Ok(())
//! # }
//! ```
//!
//! ### Feature Flags
//!
//! - `cli` (default): command-line interface and tracing subscriber setup
//! - `tracing-json`: JSON log output for the CLI
//! - `webp-support`: WebP decoding
//!
//! To use only as a library without CLI dependencies:
//!
//! ```toml
//! [dependencies]
//! image-brightness = { version = "0.1", default-features = false }
//! ```

pub mod analysis;
pub mod analyzer;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

// Public API exports
pub use analysis::{
    normalize, partition, relative_luminance_rec601, relative_luminance_rec709, sum_segment,
    ColorSample, LuminanceFn, LuminanceWeights, Partition, PixelGrid, SegmentResult,
};
pub use analyzer::{BrightnessAnalyzer, BrightnessReport};
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, MAX_PARALLELISM};
pub use error::{BrightnessError, Result};
pub use services::{ImageIOService, LoadedImage};

#[cfg(feature = "cli")]
pub use tracing_config::{spans, TracingConfig, TracingFormat};

/// Load and decode an image file
///
/// The format is detected from the file content; the extension is ignored.
///
/// # Errors
/// - `BrightnessError::FileAccess` if the path cannot be opened or read
/// - `BrightnessError::Decode` if the content is not a supported image
///
/// # Examples
/// ```rust,no_run
/// use image_brightness::image_from_file;
///
/// let loaded = image_from_file("input.png")?;
/// assert_eq!(loaded.format_name(), "png");
/// # Ok::<(), image_brightness::BrightnessError>(())
/// ```
pub fn image_from_file<P: AsRef<Path>>(path: P) -> Result<LoadedImage> {
    ImageIOService::load_image(path)
}

/// Brightness percentage of an image, computed on the calling thread
///
/// Uses Rec. 709 weights. Zero-area images yield 0.
///
/// # Examples
/// ```rust
/// use image_brightness::analyze_image;
/// use image::{Rgb, RgbImage};
///
/// let black = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
/// assert_eq!(analyze_image(&black)?, 0);
/// # Ok::<(), image_brightness::BrightnessError>(())
/// ```
pub fn analyze_image<I>(image: &I) -> Result<u8>
where
    I: PixelGrid + ?Sized,
{
    Ok(BrightnessAnalyzer::default().analyze_sequential(image)?.percentage)
}

/// Brightness percentage of an image, summed over `split_count` column partitions
///
/// A `split_count` of 1 runs the whole image as a single partition task.
/// Counts above the image width or `MAX_PARALLELISM` are clamped, so the
/// result always matches [`analyze_image`]. Uses Rec. 709 weights.
/// Zero-area images yield 0.
///
/// # Errors
/// - `BrightnessError::InvalidConfig` if `split_count` is 0
/// - `BrightnessError::TaskFailed` if a partition task panics
pub async fn analyze_image_parallel<I>(image: Arc<I>, split_count: usize) -> Result<u8>
where
    I: PixelGrid + ?Sized + 'static,
{
    let splits = NonZeroUsize::new(split_count).ok_or_else(|| {
        BrightnessError::config_value_error(
            "split count",
            split_count,
            ">= 1",
            Some(1),
        )
    })?;

    let config = AnalyzerConfig {
        parallelism: Some(splits),
        ..AnalyzerConfig::default()
    };
    let analyzer = BrightnessAnalyzer::new(config);
    Ok(analyzer.analyze_parallel(image, splits).await?.percentage)
}

/// Brightness percentage of an encoded image held in memory
///
/// # Errors
/// - `BrightnessError::Decode` if the bytes are not a supported image
/// - Any error from [`BrightnessAnalyzer::analyze`]
pub async fn analyze_bytes(bytes: &[u8], config: &AnalyzerConfig) -> Result<BrightnessReport> {
    let loaded = ImageIOService::load_from_bytes(bytes)?;
    let analyzer = BrightnessAnalyzer::new(config.clone());
    analyzer.analyze(loaded.into_shared()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[tokio::test]
    async fn test_zero_split_count_rejected() {
        let image = Arc::new(RgbImage::new(2, 2));
        let err = analyze_image_parallel(image, 0).await.unwrap_err();
        assert!(matches!(err, BrightnessError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_dynamic_image_both_paths() {
        let image = Arc::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            9,
            7,
            Rgb([0x52, 0x52, 0x52]),
        )));
        let sequential = analyze_image(&*image).unwrap();
        let parallel = analyze_image_parallel(image, 4).await.unwrap();
        assert_eq!(sequential, 32);
        assert_eq!(sequential, parallel);
    }

    #[tokio::test]
    async fn test_analyze_bytes() {
        let mut bytes = Vec::new();
        RgbImage::from_pixel(5, 5, Rgb([255, 255, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let config = AnalyzerConfig::builder().parallelism(2).build();
        let report = analyze_bytes(&bytes, &config).await.unwrap();
        assert_eq!(report.percentage, 100);
        assert_eq!(report.pixel_count, 25);
        assert_eq!(report.segments, 2);
    }

    #[tokio::test]
    async fn test_analyze_bytes_rejects_garbage() {
        let err = analyze_bytes(b"not an image", &AnalyzerConfig::default()).await.unwrap_err();
        assert!(err.is_load_error());
    }
}
