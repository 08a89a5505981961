// letterbox/src/processors/compressor.rs
use crate::core::{LetterboxError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

pub struct Compressor {
    quality: u8,
    optimize_png: bool,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: false,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    /// Encodes `image` as `format` into `path`. Returns the written size.
    pub fn save_with_format(
        &self,
        image: &DynamicImage,
        path: &Path,
        format: ImageFormat,
    ) -> Result<u64> {
        log::debug!(
            "Saving image to {} with format {:?}, quality: {}",
            path.display(),
            format,
            self.quality
        );

        match format {
            ImageFormat::Jpeg => self.save_jpeg(image, path)?,
            ImageFormat::Png => self.save_png(image, path)?,
            _ => self.save_generic(image, path, format)?,
        }

        self.log_save_result(path)
    }

    fn save_jpeg(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, self.quality);

        // JPEG has no alpha channel
        if image.color().has_alpha() {
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
        } else {
            image.write_with_encoder(encoder)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn save_png(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        if !self.optimize_png {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            image.write_to(&mut writer, ImageFormat::Png)?;
            writer.flush()?;
            return Ok(());
        }

        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)?;

        let optimized = optimize_from_memory(&buffer.into_inner(), &Options::default())
            .map_err(|e| LetterboxError::ProcessingError(format!("PNG optimization failed: {}", e)))?;

        std::fs::write(path, optimized)?;
        Ok(())
    }

    fn save_generic(&self, image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        image.write_to(&mut writer, format)?;
        writer.flush()?;
        Ok(())
    }

    fn log_save_result(&self, path: &Path) -> Result<u64> {
        let file_size = std::fs::metadata(path)?.len();
        log::info!("Saved image: {} ({} bytes)", path.display(), file_size);
        Ok(file_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn jpeg_flattens_alpha() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.jpg");
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 128])));

        let size = Compressor::new(90)
            .save_with_format(&image, &path, ImageFormat::Jpeg)
            .unwrap();

        assert!(size > 0);
        assert_eq!(image::open(&path).unwrap().dimensions(), (8, 8));
    }

    #[test]
    fn optimized_png_decodes_to_same_pixels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let mut source = RgbImage::new(16, 16);
        for (x, y, pixel) in source.enumerate_pixels_mut() {
            pixel.0 = [x as u8 * 10, y as u8 * 10, 7];
        }
        let image = DynamicImage::ImageRgb8(source.clone());

        Compressor::new(85)
            .with_png_optimization(true)
            .save_with_format(&image, &path, ImageFormat::Png)
            .unwrap();

        assert_eq!(image::open(&path).unwrap().to_rgb8(), source);
    }

    #[test]
    fn writes_bmp_through_generic_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.bmp");
        let image = DynamicImage::ImageRgb8(RgbImage::new(5, 3));

        Compressor::new(85)
            .save_with_format(&image, &path, ImageFormat::Bmp)
            .unwrap();

        assert_eq!(image::open(&path).unwrap().dimensions(), (5, 3));
    }
}
