//! Output formats the stego image can be written in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, StegoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    Bmp,
    Gif,
    #[serde(alias = "tif")]
    Tiff,
}

impl OutputFormat {
    /// Format implied by the path's extension. A path with no extension is
    /// written as PNG.
    ///
    /// # Errors
    /// - [`StegoError::UnsupportedFormat`] for any other extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext.parse(),
            None => Ok(OutputFormat::Png),
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
            OutputFormat::Gif => image::ImageFormat::Gif,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
        }
    }

    /// Whether pixel values survive a save/load cycle unchanged.
    /// JPEG re-compresses and GIF quantises to a palette.
    pub fn preserves_pixels(self) -> bool {
        !matches!(self, OutputFormat::Jpeg | OutputFormat::Gif)
    }
}

impl FromStr for OutputFormat {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "bmp" => Ok(OutputFormat::Bmp),
            "gif" => Ok(OutputFormat::Gif),
            "tif" | "tiff" => Ok(OutputFormat::Tiff),
            other => Err(StegoError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Gif => "gif",
            OutputFormat::Tiff => "tiff",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.PNG")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a/b.jpg")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("scan.tif")).unwrap(), OutputFormat::Tiff);
        assert_eq!(OutputFormat::from_path(Path::new("noext")).unwrap(), OutputFormat::Png);
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        match OutputFormat::from_path(Path::new("image.webp")) {
            Err(StegoError::UnsupportedFormat(name)) => assert_eq!(name, "webp"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_lossy_formats() {
        assert!(OutputFormat::Png.preserves_pixels());
        assert!(OutputFormat::Bmp.preserves_pixels());
        assert!(!OutputFormat::Jpeg.preserves_pixels());
        assert!(!OutputFormat::Gif.preserves_pixels());
    }
}
