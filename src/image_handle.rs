//! Decoded image owned by the viewer.
//!
//! The handle keeps the full-resolution original. Display copies are derived
//! from it on demand and never written back.

use crate::config::MAX_DISPLAY_PIXELS;
use crate::error::{AppError, Result};
use crate::save_request::SaveFormat;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader, RgbaImage};
use log::{debug, info};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A successfully decoded image together with the name it was opened under.
pub struct ImageHandle {
    name: String,
    source_dir: Option<PathBuf>,
    image: DynamicImage,
}

impl ImageHandle {
    /// Decodes the file at `path`, detecting the format from its content.
    pub fn open(path: &Path) -> Result<Self> {
        let image = ImageReader::open(path)
            .map_err(|e| AppError::ImageOpening(format!("{}: {}", path.display(), e)))?
            .with_guessed_format()
            .map_err(|e| AppError::ImageOpening(format!("{}: {}", path.display(), e)))?
            .decode()
            .map_err(|e| AppError::ImageOpening(format!("{}: {}", path.display(), e)))?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);

        info!(
            "Opened image '{}' ({}x{})",
            name,
            image.width(),
            image.height()
        );

        Ok(Self {
            name,
            source_dir,
            image,
        })
    }

    /// File base name without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the image was opened from, if the path named one.
    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Writes the original image, choosing the format from the path's extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path)
            .ok()
            .and_then(SaveFormat::from_image_format)
            .ok_or_else(|| self.saving_error(format!("unsupported output path {}", path.display())))?;

        self.save_as(path, format)
    }

    /// Writes the original image in an explicit format.
    pub fn save_as(&self, path: &Path, format: SaveFormat) -> Result<()> {
        self.encodable_as(format)
            .save_with_format(path, format.image_format())
            .map_err(|e| self.saving_error(e.to_string()))?;

        info!("Saved '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Display size at `scale`, or an error when it exceeds the display budget.
    pub fn display_size(&self, scale: f32) -> Result<(u32, u32)> {
        let (width, height) = scaled_dimensions(self.width(), self.height(), scale);
        if width as u64 * height as u64 > MAX_DISPLAY_PIXELS {
            return Err(AppError::DisplayTooLarge { width, height });
        }
        Ok((width, height))
    }

    /// Produces a resampled RGBA copy for display. The original is left untouched.
    pub fn scaled_copy(&self, scale: f32) -> Result<RgbaImage> {
        let (width, height) = self.display_size(scale)?;
        if scale == 1.0 {
            return Ok(self.image.to_rgba8());
        }

        let start = std::time::Instant::now();
        let scaled = self
            .image
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgba8();
        debug!(
            "Scaled '{}' to {}x{} in {:?}",
            self.name,
            width,
            height,
            start.elapsed()
        );
        Ok(scaled)
    }

    /// Converts pixel layouts the target encoder cannot write.
    fn encodable_as(&self, format: SaveFormat) -> Cow<'_, DynamicImage> {
        let color = self.image.color();
        match format {
            SaveFormat::Jpeg if !matches!(color, ColorType::L8 | ColorType::Rgb8) => {
                Cow::Owned(DynamicImage::ImageRgb8(self.image.to_rgb8()))
            }
            SaveFormat::Bmp
                if !matches!(
                    color,
                    ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
                ) =>
            {
                Cow::Owned(DynamicImage::ImageRgba8(self.image.to_rgba8()))
            }
            SaveFormat::Png if matches!(color, ColorType::Rgb32F | ColorType::Rgba32F) => {
                Cow::Owned(DynamicImage::ImageRgba16(self.image.to_rgba16()))
            }
            SaveFormat::Tiff if color == ColorType::La8 => {
                Cow::Owned(DynamicImage::ImageRgba8(self.image.to_rgba8()))
            }
            SaveFormat::Tiff if color == ColorType::La16 => {
                Cow::Owned(DynamicImage::ImageRgba16(self.image.to_rgba16()))
            }
            _ => Cow::Borrowed(&self.image),
        }
    }

    fn saving_error(&self, reason: String) -> AppError {
        AppError::ImageSaving {
            name: self.name.clone(),
            reason,
        }
    }
}

/// Display size for `scale`, rounded per axis and never below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let scale_axis = |len: u32| ((len as f64 * scale as f64).round() as u32).max(1);
    (scale_axis(width), scale_axis(height))
}
