//! Image reference scanning.
//!
//! Every `![alt](path)` in the document gets a placeholder name
//! (`image_01.png`, `image_02.png`, …) in a per-document folder
//! (`<stem>_images`). Nothing is copied: the folder is created empty so a
//! person can drop the real files in later, and the generated `<img>` tags
//! keep an empty `src` until they do.

use crate::config::ConversionConfig;
use crate::pipeline::input::{self, SourceDocument};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// `![alt](path)`: group 1 is the alt text, group 2 the referenced path.
pub(crate) static RE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// One cataloged image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Path exactly as written in the document.
    pub original_path: String,
    /// Alt text, possibly empty.
    pub alt_text: String,
    /// Placeholder file name, e.g. `image_03.png`.
    pub assigned_name: String,
    /// Folder the file is expected in, e.g. `notes_images`.
    pub destination_folder: String,
}

impl ImageReference {
    /// `folder/name`, as shown in the generated JSX comment.
    pub fn destination(&self) -> String {
        format!("{}/{}", self.destination_folder, self.assigned_name)
    }
}

/// Lookup table from original image path to its catalog entry.
///
/// When a path appears more than once the later reference wins.
pub type ImageMap = HashMap<String, ImageReference>;

/// Scan `text` for image references and assign placeholder names.
///
/// Numbering follows document order and counts every occurrence, so a
/// repeated path consumes a number and its entry is overwritten by the
/// later occurrence.
pub fn scan_images(text: &str, folder: &str, config: &ConversionConfig) -> ImageMap {
    let mut images = ImageMap::new();

    for (i, caps) in RE_IMAGE.captures_iter(text).enumerate() {
        let index = i + 1;
        let alt_text = caps[1].to_string();
        let original_path = caps[2].to_string();
        let reference = ImageReference {
            original_path: original_path.clone(),
            alt_text,
            assigned_name: config.image_name(index),
            destination_folder: folder.to_string(),
        };

        info!(
            "Image {}: {} -> {}",
            index,
            if reference.alt_text.is_empty() {
                "No alt text"
            } else {
                reference.alt_text.as_str()
            },
            reference.destination()
        );

        images.insert(original_path, reference);
    }

    images
}

/// Catalog the images of an already-loaded document.
///
/// Creates the images folder under the project root when configured to.
/// A folder that cannot be created is logged and the scan still runs.
pub fn catalog_document(doc: &SourceDocument, config: &ConversionConfig) -> ImageMap {
    let folder = config.images_folder_name(&doc.path);

    if config.create_images_dir {
        let dir = config.images_dir(&doc.path);
        if !dir.exists() {
            match std::fs::create_dir_all(&dir) {
                Ok(()) => info!("Created images folder: {}", folder),
                Err(e) => warn!("Could not create images folder {}: {}", dir.display(), e),
            }
        }
    }

    scan_images(&doc.text, &folder, config)
}

/// Read the document at `source` and catalog its images.
///
/// Returns an empty map when the document is missing or unreadable.
pub fn catalog_images(source: impl AsRef<Path>, config: &ConversionConfig) -> ImageMap {
    match input::read_source(source) {
        Ok(doc) => catalog_document(&doc, config),
        Err(e) => {
            warn!("Error reading file for image extraction: {}", e);
            ImageMap::new()
        }
    }
}
