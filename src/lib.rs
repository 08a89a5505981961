mod cli;
mod core;
mod processors;
mod utils;

pub use crate::cli::{Algorithm, Cli, Commands, ImageOptions};
pub use crate::core::processor::ImageProcessor;
pub use crate::core::{
    LetterboxError, Padding, PaddingColor, ProcessConfig, ProcessingStats, ResizeAlgorithm,
    Result, TargetSize,
};
pub use crate::processors::{
    fit_dimensions, process_directory, BatchProcessor, Compressor, Loader, MetadataProcessor,
    Resizer,
};
pub use crate::utils::{calculate_aspect_ratio, format_file_size, is_supported_format, SUPPORTED_EXTENSIONS};

pub mod prelude {
    pub use crate::{
        process_directory, resize_with_padding, BatchProcessor, ImageProcessor, PaddingColor,
        ProcessConfig, ResizeAlgorithm, TargetSize,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;

/// Letterboxes `image` into `target` with Lanczos3 resampling, padding with
/// `padding_color`. Images smaller than the target are padded, not enlarged.
pub fn resize_with_padding(
    image: &DynamicImage,
    target: TargetSize,
    padding_color: PaddingColor,
) -> DynamicImage {
    Resizer::default().letterbox(image, target, padding_color)
}
