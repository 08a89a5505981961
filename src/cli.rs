// letterbox/src/cli.rs
use crate::core::{PaddingColor, ProcessConfig, ResizeAlgorithm, TargetSize};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "letterbox", version, about = "Fit images into a fixed size and pad the rest")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Letterbox every image in a directory
    Batch {
        /// Directory with source images
        input: PathBuf,

        /// Directory for the results, created if missing
        output: PathBuf,

        #[command(flatten)]
        options: ImageOptions,

        /// Stop at the first file that fails instead of skipping it
        #[arg(long)]
        fail_fast: bool,
    },

    /// Letterbox a single image
    Resize {
        input: PathBuf,

        /// Output file; the extension selects the encoder
        output: PathBuf,

        #[command(flatten)]
        options: ImageOptions,
    },

    /// Show image details and the padding it would receive
    Info {
        input: PathBuf,

        #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,

        #[arg(long)]
        upscale: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ImageOptions {
    /// Target width in pixels
    #[arg(short = 'W', long, default_value_t = 80, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Target height in pixels
    #[arg(short = 'H', long, default_value_t = 80, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Padding color as R,G,B or #RRGGBB
    #[arg(short, long, default_value = "0,0,0")]
    pub color: PaddingColor,

    /// Resampling filter
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 85, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Enlarge images smaller than the target instead of only padding them
    #[arg(long)]
    pub upscale: bool,

    /// Rotate according to the EXIF orientation tag before resizing
    #[arg(long)]
    pub auto_orient: bool,

    /// Losslessly recompress PNG output
    #[arg(long)]
    pub optimize_png: bool,

    /// Reject input files larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,
}

impl ImageOptions {
    pub fn to_config(&self) -> ProcessConfig {
        ProcessConfig {
            target: TargetSize::new(self.width, self.height),
            padding_color: self.color,
            algorithm: self.algorithm.into(),
            quality: self.quality,
            upscale: self.upscale,
            auto_orient: self.auto_orient,
            optimize_png: self.optimize_png,
            max_file_size: self.max_file_size,
            ..Default::default()
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}
