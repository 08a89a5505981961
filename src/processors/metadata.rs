// letterbox/src/processors/metadata.rs
use crate::core::Result;
use exif::{Exif, In, Reader, Tag};
use image::DynamicImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIF access for the `info` report and for auto-orientation.
pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Reads EXIF from `path`. Containers without EXIF, or with EXIF that
    /// does not parse, yield `None`; only I/O failures are errors.
    pub fn read_metadata(&self, path: &Path) -> Result<Option<Exif>> {
        let file = File::open(path)?;
        let mut bufreader = BufReader::new(&file);

        match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => {
                log::debug!("Found EXIF data in {}", path.display());
                Ok(Some(exif))
            }
            Err(exif::Error::Io(e)) => Err(e.into()),
            Err(e) => {
                log::debug!("No usable EXIF data in {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    pub fn has_metadata(&self, path: &Path) -> Result<bool> {
        Ok(self.read_metadata(path)?.is_some())
    }

    /// EXIF orientation tag (1..=8), if present.
    pub fn orientation(&self, path: &Path) -> Result<Option<u32>> {
        let orientation = self.read_metadata(path)?.and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        });
        Ok(orientation.filter(|o| (1..=8).contains(o)))
    }

    /// Rotates and flips `image` so that EXIF `orientation` becomes 1.
    pub fn apply_orientation(&self, image: DynamicImage, orientation: u32) -> DynamicImage {
        log::debug!("Applying EXIF orientation {}", orientation);
        match orientation {
            2 => image.fliph(),
            3 => image.rotate180(),
            4 => image.flipv(),
            5 => image.rotate90().fliph(),
            6 => image.rotate90(),
            7 => image.rotate270().fliph(),
            8 => image.rotate270(),
            _ => image,
        }
    }

    pub fn extract_common_metadata(&self, exif: &Exif) -> Vec<(String, String)> {
        let mut metadata = Vec::new();

        for field in exif.fields() {
            match field.tag {
                Tag::ImageDescription
                | Tag::Make
                | Tag::Model
                | Tag::DateTime
                | Tag::DateTimeOriginal
                | Tag::Orientation
                | Tag::XResolution
                | Tag::YResolution
                | Tag::Software
                | Tag::Artist
                | Tag::Copyright => {
                    let value = field.display_value().with_unit(exif).to_string();
                    metadata.push((field.tag.to_string(), value));
                }
                _ => {}
            }
        }

        metadata
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new()
    }
}
