// letterbox/src/processors/batch.rs
use crate::core::processor::ImageProcessor;
use crate::core::{
    LetterboxError, PaddingColor, ProcessConfig, ProcessingStats, Result, TargetSize,
};
use crate::utils::is_supported_format;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Letterboxes every image in `input_dir` into `output_dir` with default
/// settings and per-file error isolation. Returns the number of files written.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    target: TargetSize,
    padding_color: PaddingColor,
) -> Result<usize> {
    let config = ProcessConfig {
        target,
        padding_color,
        ..Default::default()
    };

    let stats = BatchProcessor::new(config).process_directory(input_dir, output_dir)?;
    Ok(stats.processed_count)
}

/// Sequential directory driver around [`ImageProcessor`].
pub struct BatchProcessor {
    processor: ImageProcessor,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(config: ProcessConfig) -> Self {
        Self {
            processor: ImageProcessor::new(config),
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<ProcessingStats> {
        let config = self.processor.config();
        config.validate()?;
        self.validate_paths(input_dir, output_dir)?;

        std::fs::create_dir_all(output_dir)?;

        let (image_paths, skipped_count) = self.collect_image_paths(input_dir)?;
        let mut stats = ProcessingStats {
            skipped_count,
            ..Default::default()
        };

        if image_paths.is_empty() {
            log::warn!("No image files found in {}", input_dir.display());
        } else {
            log::info!(
                "Processing {} images from {}",
                image_paths.len(),
                input_dir.display()
            );
        }

        let pb = self.create_progress_bar(image_paths.len())?;

        for input_path in image_paths.iter().progress_with(pb.clone()) {
            match self.process_single_image_in_batch(input_path, output_dir) {
                Ok(image_stats) => stats.merge(image_stats),
                Err(e) if config.fail_fast => {
                    pb.abandon();
                    log::error!("Aborting batch at {}: {}", input_path.display(), e);
                    return Err(e);
                }
                Err(e) => {
                    log::warn!("Failed to process {}: {}", input_path.display(), e);
                    stats.errors.push((input_path.clone(), e.to_string()));
                }
            }
        }

        pb.finish_and_clear();

        log::info!("{}", stats.summary(config.target, output_dir));

        Ok(stats)
    }

    fn process_single_image_in_batch(&self, input_path: &Path, output_dir: &Path) -> Result<ProcessingStats> {
        let file_name = input_path.file_name().ok_or_else(|| {
            LetterboxError::InvalidParameter(format!("Invalid file name: {}", input_path.display()))
        })?;

        self.processor.process(input_path, output_dir.join(file_name))
    }

    /// Regular files with a known image extension directly inside
    /// `input_dir`, sorted by name, plus the count of entries passed over.
    fn collect_image_paths(&self, input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
        let mut paths = Vec::new();
        let mut skipped = 0;

        let walker = WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;

            if entry.file_type().is_file() && is_supported_format(entry.path()) {
                paths.push(entry.into_path());
            } else {
                log::debug!("Skipping {}", entry.path().display());
                skipped += 1;
            }
        }

        Ok((paths, skipped))
    }

    fn create_progress_bar(&self, total: usize) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }

        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .map_err(|e| LetterboxError::ProcessingError(format!("Invalid progress template: {}", e)))?
            .progress_chars("#>-");
        pb.set_style(style);
        Ok(pb)
    }

    pub fn validate_paths(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.exists() {
            return Err(LetterboxError::InvalidParameter(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        if !input_dir.is_dir() {
            return Err(LetterboxError::InvalidParameter(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(LetterboxError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        // Same file names would overwrite the inputs
        let same_dir = match (input_dir.canonicalize(), output_dir.canonicalize()) {
            (Ok(input), Ok(output)) => input == output,
            _ => input_dir == output_dir,
        };
        if same_dir {
            return Err(LetterboxError::InvalidParameter(
                "Input and output directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::TempDir;

    fn quiet(config: ProcessConfig) -> BatchProcessor {
        BatchProcessor::new(config).with_progress(false)
    }

    #[test]
    fn collects_only_supported_regular_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        RgbImage::new(2, 2).save(dir.path().join("b.png")).unwrap();
        RgbImage::new(2, 2).save(dir.path().join("a.PNG")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();
        RgbImage::new(2, 2)
            .save(dir.path().join("nested.png").join("deep.png"))
            .unwrap();

        let (paths, skipped) = quiet(ProcessConfig::default())
            .collect_image_paths(dir.path())
            .unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn rejects_same_input_and_output() {
        let dir = TempDir::new().unwrap();
        let result = quiet(ProcessConfig::default()).process_directory(dir.path(), dir.path());
        assert!(matches!(result, Err(LetterboxError::InvalidParameter(_))));
    }

    #[test]
    fn rejects_missing_input_and_file_as_output() {
        let dir = TempDir::new().unwrap();
        let batch = quiet(ProcessConfig::default());

        assert!(batch
            .validate_paths(&dir.path().join("missing"), &dir.path().join("out"))
            .is_err());

        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        assert!(batch.validate_paths(&input, &file).is_err());
    }

    #[test]
    fn rejects_invalid_config_before_touching_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out");
        let config = ProcessConfig {
            target: TargetSize::new(80, 0),
            ..Default::default()
        };

        let input = dir.path().join("in");
        std::fs::create_dir(&input).unwrap();
        assert!(quiet(config).process_directory(&input, &output).is_err());
        assert!(!output.exists());
    }
}
