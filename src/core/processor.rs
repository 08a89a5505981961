// letterbox/src/core/processor.rs
use super::{LetterboxError, ProcessConfig, ProcessingStats, Result};
use crate::processors::{Compressor, Loader, MetadataProcessor, Resizer};
use image::DynamicImage;
use std::path::Path;

/// Single-file pipeline: load, letterbox, encode by output extension.
pub struct ImageProcessor {
    config: ProcessConfig,
    loader: Loader,
    resizer: Resizer,
    compressor: Compressor,
    metadata_processor: MetadataProcessor,
}

impl ImageProcessor {
    pub fn new(config: ProcessConfig) -> Self {
        let resizer = Resizer::new(config.algorithm, config.upscale);
        let compressor = Compressor::new(config.quality).with_png_optimization(config.optimize_png);

        Self {
            config,
            loader: Loader::new(),
            resizer,
            compressor,
            metadata_processor: MetadataProcessor::new(),
        }
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ProcessingStats> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        self.config.validate()?;
        self.validate_paths(input_path, output_path)?;

        let original_size = std::fs::metadata(input_path)?.len();
        if let Some(max_size) = self.config.max_file_size {
            if original_size > max_size {
                return Err(LetterboxError::MemoryLimitExceeded(format!(
                    "File size {} exceeds limit {}",
                    original_size, max_size
                )));
            }
        }

        // Fail on an unencodable extension before decoding anything
        let output_format = self.loader.detect_format(output_path)?;

        let mut image = self.loader.load(input_path)?;

        if self.config.auto_orient {
            if let Some(orientation) = self.metadata_processor.orientation(input_path)? {
                image = self.metadata_processor.apply_orientation(image, orientation);
            }
        }

        let image = self.letterbox(&image);

        let new_size = self
            .compressor
            .save_with_format(&image, output_path, output_format)?;

        Ok(ProcessingStats {
            processed_count: 1,
            total_size_before: original_size,
            total_size_after: new_size,
            ..Default::default()
        })
    }

    /// Letterboxes an already decoded image with this processor's settings.
    pub fn letterbox(&self, image: &DynamicImage) -> DynamicImage {
        self.resizer
            .letterbox(image, self.config.target, self.config.padding_color)
    }

    fn validate_paths(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        if !input_path.exists() {
            return Err(LetterboxError::InvalidParameter(format!(
                "Input file does not exist: {}",
                input_path.display()
            )));
        }

        // `a.png` and `./a.png` name the same file
        let same_file = match (input_path.canonicalize(), output_path.canonicalize()) {
            (Ok(input), Ok(output)) => input == output,
            _ => input_path == output_path,
        };
        if same_file {
            return Err(LetterboxError::InvalidParameter(format!(
                "Refusing to overwrite input file: {}",
                input_path.display()
            )));
        }

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(())
    }
}
