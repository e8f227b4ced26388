//! Image loading service
//!
//! Keeps file and stream handling out of the analysis code. Formats are
//! always detected from the content, never from the file extension.

use crate::error::{BrightnessError, Result};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;
use std::sync::Arc;

/// A decoded image together with the container format it was read from
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

impl LoadedImage {
    /// Short lowercase name of the detected format, e.g. `"png"` or `"jpeg"`
    #[must_use]
    pub fn format_name(&self) -> &'static str {
        format_name(self.format)
    }

    /// Move the image behind an `Arc` for the parallel analysis path
    #[must_use]
    pub fn into_shared(self) -> Arc<DynamicImage> {
        Arc::new(self.image)
    }

    #[must_use]
    pub fn into_parts(self) -> (DynamicImage, &'static str) {
        let name = self.format_name();
        (self.image, name)
    }
}

/// Lowercase name for an image format
#[must_use]
pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Bmp => "bmp",
        other => other.extensions_str().first().copied().unwrap_or("unknown"),
    }
}

/// Service for loading images from files, bytes and async streams
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    ///
    /// # Returns
    /// * `Ok(LoadedImage)` - Successfully decoded image and its format
    /// * `Err(BrightnessError::FileAccess)` - The path could not be opened or read
    /// * `Err(BrightnessError::Decode)` - The content is not a supported image
    ///
    /// # Examples
    /// ```rust,no_run
    /// use image_brightness::services::ImageIOService;
    ///
    /// let loaded = ImageIOService::load_image("input.png")?;
    /// println!("{} image", loaded.format_name());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<LoadedImage> {
        let path_ref = path.as_ref();

        let file = std::fs::File::open(path_ref)
            .map_err(|e| BrightnessError::file_access(path_ref, e))?;

        log::debug!("Decoding image from {}", path_ref.display());
        Self::decode_reader(BufReader::new(file), &path_ref.display().to_string())
            .map_err(|e| match e {
                // Read failures after a successful open are still access problems
                BrightnessError::FileAccess { source, .. } => {
                    BrightnessError::file_access(path_ref, source)
                },
                other => other,
            })
    }

    /// Load an image from bytes
    ///
    /// # Arguments
    /// * `bytes` - Raw image data (PNG, JPEG, TIFF, BMP, ...)
    ///
    /// # Examples
    /// ```rust,no_run
    /// use image_brightness::services::ImageIOService;
    ///
    /// let image_data = std::fs::read("input.jpg")?;
    /// let loaded = ImageIOService::load_from_bytes(&image_data)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_from_bytes(bytes: &[u8]) -> Result<LoadedImage> {
        Self::decode_reader(Cursor::new(bytes), &format!("{} bytes", bytes.len()))
    }

    /// Load an image from an async reader
    ///
    /// The stream is read to the end before decoding.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use image_brightness::services::ImageIOService;
    /// use tokio::fs::File;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let file = File::open("image.jpg").await?;
    /// let loaded = ImageIOService::load_from_reader(file).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load_from_reader<R: tokio::io::AsyncRead + Unpin>(mut reader: R) -> Result<LoadedImage> {
        use tokio::io::AsyncReadExt;

        let mut buffer = Vec::new();
        AsyncReadExt::read_to_end(&mut reader, &mut buffer)
            .await
            .map_err(|e| BrightnessError::file_access("<stream>", e))?;

        Self::load_from_bytes(&buffer)
    }

    fn decode_reader<R: BufRead + Seek>(reader: R, context: &str) -> Result<LoadedImage> {
        let reader = ImageReader::new(reader)
            .with_guessed_format()
            .map_err(|e| BrightnessError::file_access(context, e))?;

        let format = reader.format().ok_or_else(|| {
            BrightnessError::unrecognized_format(format!("{}: unrecognized image signature", context))
        })?;

        let image = reader
            .decode()
            .map_err(|e| BrightnessError::decode(format!("{}: {}", context, format_name(format)), e))?;

        log::debug!(
            "Decoded {} image {}x{} ({})",
            format_name(format),
            image.width(),
            image.height(),
            context
        );
        Ok(LoadedImage { image, format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn png_bytes() -> Vec<u8> {
        let image = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_load_nonexistent_file() {
        let err = ImageIOService::load_image("MISSING_FILENAME").unwrap_err();
        assert!(matches!(err, BrightnessError::FileAccess { .. }));
        assert!(err.to_string().contains("MISSING_FILENAME"));
    }

    #[test]
    fn test_load_from_bytes() {
        let loaded = ImageIOService::load_from_bytes(&png_bytes()).unwrap();
        assert_eq!(loaded.format, ImageFormat::Png);
        assert_eq!(loaded.format_name(), "png");
        assert_eq!(loaded.image.width(), 3);
        assert_eq!(loaded.image.height(), 2);
    }

    #[test]
    fn test_garbage_bytes_are_decode_errors() {
        let err = ImageIOService::load_from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, BrightnessError::Decode { source: None, .. }));
    }

    #[test]
    fn test_truncated_png_is_decode_error() {
        let bytes = png_bytes();
        let err = ImageIOService::load_from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, BrightnessError::Decode { source: Some(_), .. }));
    }

    #[test]
    fn test_extension_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("actually_png.jpg");
        std::fs::write(&path, png_bytes()).unwrap();

        let loaded = ImageIOService::load_image(&path).unwrap();
        assert_eq!(loaded.format_name(), "png");
    }

    #[test]
    fn test_directory_is_not_an_image() {
        let dir = tempdir().unwrap();
        let err = ImageIOService::load_image(dir.path()).unwrap_err();
        assert!(err.is_load_error());
    }

    #[tokio::test]
    async fn test_load_from_reader() {
        let bytes = png_bytes();
        let loaded = ImageIOService::load_from_reader(bytes.as_slice()).await.unwrap();
        let (image, name) = loaded.into_parts();
        assert_eq!(name, "png");
        assert_eq!(image.width(), 3);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(format_name(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_name(ImageFormat::Tiff), "tiff");
        assert_eq!(format_name(ImageFormat::Ico), "ico");
    }
}
