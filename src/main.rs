use anyhow::{bail, Context};
use clap::Parser;
use letterbox::{
    calculate_aspect_ratio, fit_dimensions, format_file_size, BatchProcessor, Cli, Commands,
    ImageOptions, ImageProcessor, Loader, MetadataProcessor, Padding, TargetSize,
};
use log::LevelFilter;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Batch {
            input,
            output,
            options,
            fail_fast,
        } => process_batch(input, output, options, fail_fast),
        Commands::Resize {
            input,
            output,
            options,
        } => process_resize(input, output, options),
        Commands::Info {
            input,
            width,
            height,
            upscale,
        } => process_info(input, TargetSize::new(width, height), upscale),
    }
}

fn process_batch(
    input: PathBuf,
    output: PathBuf,
    options: ImageOptions,
    fail_fast: bool,
) -> anyhow::Result<()> {
    let mut config = options.to_config();
    config.fail_fast = fail_fast;
    let target = config.target;

    let processor = BatchProcessor::new(config);
    let stats = processor
        .process_directory(&input, &output)
        .with_context(|| format!("Batch processing of {} failed", input.display()))?;

    println!("{}.", stats.summary(target, &output));

    if stats.has_errors() {
        for (path, error) in &stats.errors {
            eprintln!("  {}: {}", path.display(), error);
        }
        bail!("{} file(s) could not be processed", stats.errors.len());
    }

    Ok(())
}

fn process_resize(input: PathBuf, output: PathBuf, options: ImageOptions) -> anyhow::Result<()> {
    let config = options.to_config();
    let target = config.target;

    let processor = ImageProcessor::new(config);
    processor
        .process(&input, &output)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    println!("Letterboxed image ({}) saved to: {}", target, output.display());

    Ok(())
}

fn process_info(input: PathBuf, target: TargetSize, upscale: bool) -> anyhow::Result<()> {
    if !input.exists() {
        bail!("File does not exist: {}", input.display());
    }

    let loader = Loader::new();
    let metadata_processor = MetadataProcessor::new();

    let file_size = std::fs::metadata(&input)?.len();
    let (width, height, format) = loader.get_dimensions_and_format(&input)?;
    let aspect_ratio = calculate_aspect_ratio(width, height);
    let exif = metadata_processor.read_metadata(&input)?;

    let scaled = fit_dimensions((width, height), target, upscale);
    let padding = Padding::between(target, scaled);

    println!("=== Image Information ===");
    println!("File: {}", input.display());
    println!("Size: {}", format_file_size(file_size));
    println!("Dimensions: {} x {} pixels", width, height);
    println!("Aspect Ratio: {:.2}:1", aspect_ratio);
    println!("Format: {}", format);
    println!("Has EXIF metadata: {}", exif.is_some());

    println!("\n=== Letterbox into {} ===", target);
    println!("Scaled content: {} x {} pixels", scaled.0, scaled.1);
    println!(
        "Padding: left {}, top {}, right {}, bottom {}",
        padding.left, padding.top, padding.right, padding.bottom
    );

    if let Some(exif) = exif {
        println!("\n=== EXIF Metadata ===");
        for (tag, value) in metadata_processor.extract_common_metadata(&exif) {
            println!("{:20}: {}", tag, value);
        }
    }

    Ok(())
}
