//! Output format selection and save-path assembly.

use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Formats offered when saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
}

impl SaveFormat {
    /// All formats in the order the save form lists them.
    pub const ALL: [SaveFormat; 4] = [
        SaveFormat::Jpeg,
        SaveFormat::Png,
        SaveFormat::Bmp,
        SaveFormat::Tiff,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Png => "png",
            SaveFormat::Bmp => "bmp",
            SaveFormat::Tiff => "tif",
        }
    }

    /// Combo box entry, e.g. `JPEG (*.jpg)`.
    pub fn label(self) -> &'static str {
        match self {
            SaveFormat::Jpeg => "JPEG (*.jpg)",
            SaveFormat::Png => "PNG (*.png)",
            SaveFormat::Bmp => "BMP (*.bmp)",
            SaveFormat::Tiff => "TIFF (*.tif)",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            SaveFormat::Jpeg => ImageFormat::Jpeg,
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Bmp => ImageFormat::Bmp,
            SaveFormat::Tiff => ImageFormat::Tiff,
        }
    }

    /// Maps a codec back to one of the offered formats, if it is one.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(SaveFormat::Jpeg),
            ImageFormat::Png => Some(SaveFormat::Png),
            ImageFormat::Bmp => Some(SaveFormat::Bmp),
            ImageFormat::Tiff => Some(SaveFormat::Tiff),
            _ => None,
        }
    }
}

/// A validated save target. Only constructible through [`SaveRequest::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    directory: String,
    file_name: String,
    format: SaveFormat,
}

impl SaveRequest {
    /// Returns `None` when either the directory or the file name is empty.
    pub fn build(directory: &str, file_name: &str, format: SaveFormat) -> Option<Self> {
        if directory.is_empty() || file_name.is_empty() {
            return None;
        }

        Some(Self {
            directory: directory.to_string(),
            file_name: file_name.to_string(),
            format,
        })
    }

    /// `directory/file_name.extension`
    pub fn path(&self) -> PathBuf {
        Path::new(&self.directory).join(format!("{}.{}", self.file_name, self.format.extension()))
    }

    pub fn format(&self) -> SaveFormat {
        self.format
    }
}
