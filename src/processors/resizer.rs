// letterbox/src/processors/resizer.rs
use crate::core::{Padding, PaddingColor, ResizeAlgorithm, TargetSize};
use image::{imageops, imageops::FilterType, DynamicImage, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

/// Largest size with the source's aspect ratio that fits inside `target`.
///
/// Sources already inside the box keep their size unless `upscale` is set.
/// Each side is rounded to the nearest pixel and clamped to `1..=bound`, so
/// the result never exceeds the target.
pub fn fit_dimensions(source: (u32, u32), target: TargetSize, upscale: bool) -> (u32, u32) {
    let (orig_w, orig_h) = source;
    if orig_w == 0 || orig_h == 0 {
        return (orig_w.min(target.width), orig_h.min(target.height));
    }

    let ratio_w = target.width as f64 / orig_w as f64;
    let ratio_h = target.height as f64 / orig_h as f64;
    let mut ratio = ratio_w.min(ratio_h);
    if !upscale {
        ratio = ratio.min(1.0);
    }

    let new_w = (orig_w as f64 * ratio).round() as u32;
    let new_h = (orig_h as f64 * ratio).round() as u32;

    (new_w.clamp(1, target.width.max(1)), new_h.clamp(1, target.height.max(1)))
}

pub struct Resizer {
    algorithm: ResizeAlgorithm,
    upscale: bool,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm, upscale: bool) -> Self {
        Self { algorithm, upscale }
    }

    /// Scales `image` to fit inside `target` keeping its aspect ratio.
    pub fn fit(&self, image: &DynamicImage, target: TargetSize) -> DynamicImage {
        let (width, height) = fit_dimensions(image.dimensions(), target, self.upscale);

        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image.clone();
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );

        image.resize_exact(width, height, self.get_filter_type())
    }

    /// Fits `image` into `target` and centers it on a canvas of exactly
    /// `target` filled with `color`.
    ///
    /// The canvas is RGBA when the source carries alpha, RGB otherwise. The
    /// padding itself is always opaque.
    pub fn letterbox(
        &self,
        image: &DynamicImage,
        target: TargetSize,
        color: PaddingColor,
    ) -> DynamicImage {
        let scaled = self.fit(image, target);
        let padding = Padding::between(target, scaled.dimensions());

        log::debug!(
            "Padding {}x{} content with left={} top={} right={} bottom={}",
            scaled.width(),
            scaled.height(),
            padding.left,
            padding.top,
            padding.right,
            padding.bottom
        );

        let [r, g, b] = color.0;
        let (x, y) = (padding.left as i64, padding.top as i64);

        if scaled.color().has_alpha() {
            let mut canvas = RgbaImage::from_pixel(target.width, target.height, Rgba([r, g, b, 255]));
            imageops::replace(&mut canvas, &scaled.to_rgba8(), x, y);
            DynamicImage::ImageRgba8(canvas)
        } else {
            let mut canvas = RgbImage::from_pixel(target.width, target.height, Rgb([r, g, b]));
            imageops::replace(&mut canvas, &scaled.to_rgb8(), x, y);
            DynamicImage::ImageRgb8(canvas)
        }
    }

    fn get_filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::Lanczos3, false)
    }
}
