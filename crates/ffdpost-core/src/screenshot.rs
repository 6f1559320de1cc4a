//! Screenshot specification.

use serde::{Deserialize, Serialize};

use crate::error::{PostError, Result};

/// A screenshot request: viewport size plus output name stem.
///
/// The engine appends `.png` to the stem; the stem must not be empty and the
/// viewport must have positive area. Validation happens before the engine is
/// invoked, so a zero-sized view never reaches the render side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotSpec {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Output filename stem (without extension).
    pub stem: String,
}

impl ScreenshotSpec {
    /// Creates a screenshot spec.
    pub fn new(width: u32, height: u32, stem: impl Into<String>) -> Self {
        Self {
            width,
            height,
            stem: stem.into(),
        }
    }

    /// Rejects unwritable requests: zero-sized viewport or empty stem.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PostError::Write(format!(
                "screenshot size {}x{} has zero area",
                self.width, self.height
            )));
        }
        if self.stem.is_empty() {
            return Err(PostError::Write("screenshot name stem is empty".into()));
        }
        Ok(())
    }

    /// Output filename with the `.png` extension appended.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.stem)
    }
}

/// Default viewport size of the batch runs.
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (936, 813);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_spec() {
        let spec = ScreenshotSpec::new(936, 813, "T");
        assert!(spec.validate().is_ok());
        assert_eq!(spec.file_name(), "T.png");
    }

    #[test]
    fn test_zero_width_rejected() {
        let spec = ScreenshotSpec::new(0, 813, "T");
        assert!(matches!(spec.validate(), Err(PostError::Write(_))));
    }

    #[test]
    fn test_zero_height_rejected() {
        let spec = ScreenshotSpec::new(936, 0, "T");
        assert!(matches!(spec.validate(), Err(PostError::Write(_))));
    }

    #[test]
    fn test_empty_stem_rejected() {
        let spec = ScreenshotSpec::new(936, 813, "");
        assert!(spec.validate().is_err());
    }
}
