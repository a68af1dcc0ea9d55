//! Configuration types for Markdown-to-TSX conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the project
//! conventions the tool was written for: components live under
//! `src/contents/<name>.tsx`, images are expected in `<doc>_images/`, and the
//! generated markup uses the `Content`, `converted-table` and `medium` CSS
//! classes.

use crate::error::Md2TsxError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a Markdown-to-TSX conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2tsx::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .project_root("/srv/site")
///     .container_class("Article")
///     .build()
///     .unwrap();
/// assert_eq!(config.target_path("engineering"),
///            std::path::PathBuf::from("/srv/site/src/contents/engineering.tsx"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Directory the target path and the images folder are resolved against.
    /// Default: the process working directory.
    pub project_root: PathBuf,

    /// Directory, relative to `project_root`, holding the target components.
    /// Default: `src/contents`.
    pub contents_dir: PathBuf,

    /// Extension of the target component file. Default: `tsx`.
    pub target_extension: String,

    /// Suffix appended to the document stem to name the images folder.
    /// Default: `_images`.
    pub images_suffix: String,

    /// Extension used for the placeholder image names (`image_01.png`).
    /// Default: `png`.
    pub image_extension: String,

    /// Extension of the recovery file written beside the document when the
    /// splice fails. Default: `txt`.
    pub fallback_extension: String,

    /// `className` of the wrapping `<div>`. Default: `Content`.
    pub container_class: String,

    /// `className` of every generated `<table>`. Default: `converted-table`.
    pub table_class: String,

    /// `className` of every generated `<img>`. Default: `medium`.
    pub image_class: String,

    /// Create the images folder when it does not exist. Default: true.
    pub create_images_dir: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            project_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            contents_dir: PathBuf::from("src").join("contents"),
            target_extension: "tsx".to_string(),
            images_suffix: "_images".to_string(),
            image_extension: "png".to_string(),
            fallback_extension: "txt".to_string(),
            container_class: "Content".to_string(),
            table_class: "converted-table".to_string(),
            image_class: "medium".to_string(),
            create_images_dir: true,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Path of the component that receives the markup for `target_name`.
    pub fn target_path(&self, target_name: &str) -> PathBuf {
        self.project_root
            .join(&self.contents_dir)
            .join(format!("{target_name}.{}", self.target_extension))
    }

    /// Name of the images folder for a document, e.g. `notes_images`.
    pub fn images_folder_name(&self, source: &Path) -> String {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{stem}{}", self.images_suffix)
    }

    /// On-disk location of the images folder for a document.
    pub fn images_dir(&self, source: &Path) -> PathBuf {
        self.project_root.join(self.images_folder_name(source))
    }

    /// Recovery file path: the document path with its extension swapped.
    pub fn fallback_path(&self, source: &Path) -> PathBuf {
        source.with_extension(&self.fallback_extension)
    }

    /// Placeholder file name for the `index`-th image (1-indexed).
    pub fn image_name(&self, index: usize) -> String {
        format!("image_{index:02}.{}", self.image_extension)
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.project_root = root.into();
        self
    }

    pub fn contents_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.contents_dir = dir.into();
        self
    }

    pub fn target_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.target_extension = ext.into();
        self
    }

    pub fn images_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.images_suffix = suffix.into();
        self
    }

    pub fn image_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.image_extension = ext.into();
        self
    }

    pub fn fallback_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.fallback_extension = ext.into();
        self
    }

    pub fn container_class(mut self, class: impl Into<String>) -> Self {
        self.config.container_class = class.into();
        self
    }

    pub fn table_class(mut self, class: impl Into<String>) -> Self {
        self.config.table_class = class.into();
        self
    }

    pub fn image_class(mut self, class: impl Into<String>) -> Self {
        self.config.image_class = class.into();
        self
    }

    pub fn create_images_dir(mut self, v: bool) -> Self {
        self.config.create_images_dir = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2TsxError> {
        let c = &self.config;
        for (field, ext) in [
            ("target_extension", &c.target_extension),
            ("image_extension", &c.image_extension),
            ("fallback_extension", &c.fallback_extension),
        ] {
            validate_extension(field, ext)?;
        }
        if c.images_suffix.is_empty() {
            return Err(Md2TsxError::InvalidConfig(
                "images_suffix must not be empty".into(),
            ));
        }
        for (field, class) in [
            ("container_class", &c.container_class),
            ("table_class", &c.table_class),
            ("image_class", &c.image_class),
        ] {
            if class.trim().is_empty() || class.contains('"') {
                return Err(Md2TsxError::InvalidConfig(format!(
                    "{field} must be a non-empty class name without quotes, got {class:?}"
                )));
            }
        }
        Ok(self.config)
    }
}

fn validate_extension(field: &str, ext: &str) -> Result<(), Md2TsxError> {
    if ext.is_empty() {
        return Err(Md2TsxError::InvalidConfig(format!(
            "{field} must not be empty"
        )));
    }
    if ext.starts_with('.') || ext.contains(['/', '\\']) {
        return Err(Md2TsxError::InvalidConfig(format!(
            "{field} must be a bare extension like \"tsx\", got {ext:?}"
        )));
    }
    Ok(())
}
