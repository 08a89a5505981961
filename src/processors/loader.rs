// letterbox/src/processors/loader.rs
use crate::core::{LetterboxError, Result};
use crate::utils::image_format_to_string;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageFormat, ImageReader};
use std::path::Path;

#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let decode_error = |e: image::ImageError| {
            LetterboxError::ProcessingError(format!("Failed to decode {}: {}", path.display(), e))
        };

        let decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()
            .map_err(decode_error)?;

        // Check the header before paying for a full decode
        if let Some((max_w, max_h)) = self.max_dimensions {
            let (width, height) = decoder.dimensions();
            if width > max_w || height > max_h {
                return Err(LetterboxError::MemoryLimitExceeded(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        let image = DynamicImage::from_decoder(decoder).map_err(decode_error)?;

        let (width, height) = image.dimensions();
        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }

    pub fn get_dimensions_and_format(&self, path: &Path) -> Result<(u32, u32, String)> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;

        let format = reader
            .format()
            .map(image_format_to_string)
            .unwrap_or_else(|| "Unknown".to_string());

        let (width, height) = reader.into_dimensions()?;

        Ok((width, height, format))
    }

    /// Format implied by the file extension, used to pick the encoder.
    pub fn detect_format(&self, path: &Path) -> Result<ImageFormat> {
        ImageFormat::from_path(path).map_err(|_| {
            LetterboxError::UnsupportedFormat(format!(
                "Cannot infer image format from: {}",
                path.display()
            ))
        })
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(LetterboxError::InvalidParameter(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let metadata = path.metadata()?;
        if !metadata.is_file() {
            return Err(LetterboxError::InvalidParameter(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        if metadata.len() == 0 {
            return Err(LetterboxError::InvalidParameter(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::TempDir;

    #[test]
    fn loads_png_and_reports_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.png");
        RgbImage::new(12, 7).save(&path).unwrap();

        let loader = Loader::new();
        let image = loader.load(&path).unwrap();
        assert_eq!(image.dimensions(), (12, 7));

        let (w, h, format) = loader.get_dimensions_and_format(&path).unwrap();
        assert_eq!((w, h, format.as_str()), (12, 7, "PNG"));
    }

    #[test]
    fn sniffs_content_regardless_of_extension() {
        let dir = TempDir::new().unwrap();
        let png = dir.path().join("real.png");
        RgbImage::new(4, 4).save(&png).unwrap();
        let disguised = dir.path().join("disguised.jpg");
        std::fs::copy(&png, &disguised).unwrap();

        assert_eq!(Loader::new().load(&disguised).unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn rejects_empty_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty.png");
        std::fs::write(&empty, b"").unwrap();

        let loader = Loader::new();
        assert!(matches!(
            loader.load(&empty),
            Err(LetterboxError::InvalidParameter(_))
        ));
        assert!(loader.load(&dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn rejects_corrupt_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(Loader::new().load(&path).is_err());
    }

    #[test]
    fn enforces_dimension_ceiling() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wide.png");
        RgbImage::new(64, 8).save(&path).unwrap();

        let loader = Loader::new().with_max_dimensions(32, 32);
        assert!(matches!(
            loader.load(&path),
            Err(LetterboxError::MemoryLimitExceeded(_))
        ));
    }

    #[test]
    fn detects_format_from_extension() {
        let loader = Loader::new();
        assert_eq!(loader.detect_format(Path::new("x.JPG")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(loader.detect_format(Path::new("x.tif")).unwrap(), ImageFormat::Tiff);
        assert!(matches!(
            loader.detect_format(Path::new("x.txt")),
            Err(LetterboxError::UnsupportedFormat(_))
        ));
    }
}
