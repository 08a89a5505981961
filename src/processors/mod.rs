// letterbox/src/processors/mod.rs
mod batch;
mod compressor;
mod loader;
mod metadata;
mod resizer;

pub use batch::{process_directory, BatchProcessor};
pub use compressor::Compressor;
pub use loader::Loader;
pub use metadata::MetadataProcessor;
pub use resizer::{fit_dimensions, Resizer};
