// letterbox/src/core/mod.rs
pub mod processor;

use std::fmt;
use crate::utils::format_file_size;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// Output box every processed image is fitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self::new(80, 80)
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for TargetSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Fill color for the border around the scaled content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaddingColor(pub [u8; 3]);

impl PaddingColor {
    pub const BLACK: Self = Self([0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

impl fmt::Display for PaddingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for PaddingColor {
    type Err = LetterboxError;

    /// Accepts `R,G,B` with decimal channels or `#RRGGBB`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || LetterboxError::InvalidParameter(format!("Invalid color: {}", s));

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self([channel(0)?, channel(2)?, channel(4)?]));
        }

        let channels: Vec<u8> = s
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<_>>()?;

        match channels.as_slice() {
            &[r, g, b] => Ok(Self([r, g, b])),
            _ => Err(invalid()),
        }
    }
}

/// Border widths around the scaled content, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Padding {
    /// Splits the free space evenly; the odd pixel goes right and bottom.
    pub fn between(target: TargetSize, scaled: (u32, u32)) -> Self {
        let delta_w = target.width.saturating_sub(scaled.0);
        let delta_h = target.height.saturating_sub(scaled.1);

        Self {
            left: delta_w / 2,
            top: delta_h / 2,
            right: delta_w - delta_w / 2,
            bottom: delta_h - delta_h / 2,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub target: TargetSize,
    pub padding_color: PaddingColor,
    pub algorithm: ResizeAlgorithm,
    pub quality: u8,
    pub upscale: bool,
    pub auto_orient: bool,
    pub optimize_png: bool,
    pub fail_fast: bool,
    pub max_file_size: Option<u64>,
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub skipped_count: usize,
    pub total_size_before: u64,
    pub total_size_after: u64,
    pub errors: Vec<(PathBuf, String)>,
}

impl ProcessingStats {
    pub fn merge(&mut self, other: ProcessingStats) {
        self.processed_count += other.processed_count;
        self.skipped_count += other.skipped_count;
        self.total_size_before += other.total_size_before;
        self.total_size_after += other.total_size_after;
        self.errors.extend(other.errors);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// One-line report of a finished batch.
    pub fn summary(&self, target: TargetSize, output_dir: &Path) -> String {
        let sizes = format!(
            "{} -> {}",
            format_file_size(self.total_size_before),
            format_file_size(self.total_size_after)
        );

        if self.has_errors() {
            format!(
                "Resized {} of {} images to {} with padding and saved to {} ({}, {} skipped, {} failed)",
                self.processed_count,
                self.processed_count + self.errors.len(),
                target,
                output_dir.display(),
                sizes,
                self.skipped_count,
                self.errors.len()
            )
        } else {
            format!(
                "All {} images have been resized to {} with padding and saved to {} ({}, {} skipped)",
                self.processed_count,
                target,
                output_dir.display(),
                sizes,
                self.skipped_count
            )
        }
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            target: TargetSize::default(),
            padding_color: PaddingColor::BLACK,
            algorithm: ResizeAlgorithm::Lanczos3,
            quality: 85,
            upscale: false,
            auto_orient: false,
            optimize_png: false,
            fail_fast: false,
            max_file_size: None,
        }
    }
}

impl ProcessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.target.width == 0 || self.target.height == 0 {
            return Err(LetterboxError::InvalidParameter(format!(
                "Target size must be positive, got {}",
                self.target
            )));
        }

        if self.target.width > 100_000 || self.target.height > 100_000 {
            return Err(LetterboxError::InvalidParameter(
                "Dimensions too large (max 100,000 pixels)".to_string(),
            ));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(LetterboxError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum LetterboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Memory limit exceeded: {0}")]
    MemoryLimitExceeded(String),
}

pub type Result<T> = std::result::Result<T, LetterboxError>;
