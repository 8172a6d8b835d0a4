//! Unified error types for the image viewer application.

use std::fmt;

/// Application-specific errors.
#[derive(Debug, PartialEq)]
pub enum AppError {
    /// Source file missing, unreadable or not decodable as an image
    ImageOpening(String),
    /// Encoding or writing the image failed
    ImageSaving { name: String, reason: String },
    /// Scaled display copy would exceed the pixel budget
    DisplayTooLarge { width: u32, height: u32 },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ImageOpening(msg) => write!(f, "Could not open the image: {}", msg),
            AppError::ImageSaving { name, reason } => {
                write!(f, "Could not save the image '{}': {}", name, reason)
            }
            AppError::DisplayTooLarge { width, height } => write!(
                f,
                "A {}x{} view is too large to display",
                width, height
            ),
        }
    }
}

impl std::error::Error for AppError {}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saving_error_names_the_image() {
        let err = AppError::ImageSaving {
            name: "photo".to_string(),
            reason: "disk full".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("'photo'"));
        assert!(text.contains("disk full"));
    }
}
