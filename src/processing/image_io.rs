//! # Image File I/O
//!
//! Bridges files on disk and [`PixelGrid`] using the `image` crate.
//!
//! ## Loading
//! - 8-bit RGB and RGBA images load as-is
//! - Anything else (grayscale, 16-bit, float) is converted to 8-bit RGBA
//! - When encoding in alpha mode, RGB images gain an opaque alpha channel.
//!   Decoding never adds one, so alpha-mode decoding of an RGB file reports
//!   a configuration error instead of reading a constant channel.
//!
//! ## Saving
//! The grid is written in the requested [`OutputFormat`]. JPEG output drops
//! the alpha channel. JPEG and GIF alter pixel values, which destroys the
//! hidden payload; a warning is logged when either is chosen.

use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};
use log::{debug, warn};
use std::path::Path;

use crate::error::{Result, StegoError};
use crate::processing::format::OutputFormat;
use crate::stego::{ChannelLayout, EmbeddingMode, PixelGrid};

/// Load an image to encode into with `mode`.
pub fn open_for_encode(path: &Path, mode: EmbeddingMode) -> Result<PixelGrid> {
    let img = open_image(path)?;
    grid_from_image(img, mode == EmbeddingMode::Alpha)
}

/// Load an image to decode from.
pub fn open_for_decode(path: &Path) -> Result<PixelGrid> {
    let img = open_image(path)?;
    grid_from_image(img, false)
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).map_err(|source| StegoError::ImageAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let (width, height) = img.dimensions();
    debug!("Opened {} ({}x{}, {:?})", path.display(), width, height, img.color());
    Ok(img)
}

/// Convert a decoded image into a grid, adding an alpha channel when
/// `require_alpha` is set.
pub fn grid_from_image(img: DynamicImage, require_alpha: bool) -> Result<PixelGrid> {
    match img {
        DynamicImage::ImageRgb8(buf) if !require_alpha => {
            let (width, height) = buf.dimensions();
            PixelGrid::new(width, height, ChannelLayout::Rgb, buf.into_raw())
        }
        DynamicImage::ImageRgba8(buf) => {
            let (width, height) = buf.dimensions();
            PixelGrid::new(width, height, ChannelLayout::Rgba, buf.into_raw())
        }
        other => {
            debug!("Converting {:?} image to RGBA", other.color());
            let buf = other.into_rgba8();
            let (width, height) = buf.dimensions();
            PixelGrid::new(width, height, ChannelLayout::Rgba, buf.into_raw())
        }
    }
}

/// Convert a grid back into an `image` buffer.
pub fn grid_into_image(grid: PixelGrid) -> Result<DynamicImage> {
    let (width, height, layout) = (grid.width(), grid.height(), grid.layout());
    let img = match layout {
        ChannelLayout::Rgb => {
            RgbImage::from_raw(width, height, grid.into_raw()).map(DynamicImage::ImageRgb8)
        }
        ChannelLayout::Rgba => {
            RgbaImage::from_raw(width, height, grid.into_raw()).map(DynamicImage::ImageRgba8)
        }
    };

    img.ok_or_else(|| {
        StegoError::InvalidGrid(format!("buffer does not match {}x{} image", width, height))
    })
}

/// Write `grid` to `path`. The format comes from `format` if given, otherwise
/// from the path's extension.
///
/// # Returns
/// The format actually written.
///
/// # Errors
/// - [`StegoError::UnsupportedFormat`] if the extension is not a known format
/// - [`StegoError::ImageSave`] if encoding or writing fails
pub fn save_grid(grid: PixelGrid, path: &Path, format: Option<OutputFormat>) -> Result<OutputFormat> {
    let format = match format {
        Some(format) => format,
        None => OutputFormat::from_path(path)?,
    };

    if !format.preserves_pixels() {
        warn!(
            "{} output alters pixel values; the hidden message will likely not survive",
            format
        );
    }

    let drop_alpha = format == OutputFormat::Jpeg && grid.layout().has_alpha();
    let mut img = grid_into_image(grid)?;
    if drop_alpha {
        debug!("Dropping alpha channel for JPEG output");
        img = DynamicImage::ImageRgb8(img.into_rgb8());
    }

    img.save_with_format(path, format.image_format())
        .map_err(|source| StegoError::ImageSave {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Wrote {} as {}", path.display(), format);
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};

    #[test]
    fn test_rgb_image_stays_rgb_unless_alpha_required() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([10, 20, 30])));

        let grid = grid_from_image(img.clone(), false).unwrap();
        assert_eq!(grid.layout(), ChannelLayout::Rgb);
        assert_eq!(grid.pixel(3, 2), &[10, 20, 30]);

        let grid = grid_from_image(img, true).unwrap();
        assert_eq!(grid.layout(), ChannelLayout::Rgba);
        assert_eq!(grid.pixel(3, 2), &[10, 20, 30, 255]);
    }

    #[test]
    fn test_grayscale_converts_to_rgba() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(5, 5, Luma([200])));
        let grid = grid_from_image(img, false).unwrap();
        assert_eq!(grid.layout(), ChannelLayout::Rgba);
        assert_eq!(grid.pixel(0, 0), &[200, 200, 200, 255]);
    }

    #[test]
    fn test_grid_image_round_trip() {
        let grid = PixelGrid::filled(6, 4, ChannelLayout::Rgba, &[1, 2, 3, 4]).unwrap();
        let img = grid_into_image(grid.clone()).unwrap();
        assert_eq!(grid_from_image(img, false).unwrap(), grid);
    }

    #[test]
    fn test_jpeg_output_drops_alpha() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.jpg");
        let grid = PixelGrid::filled(8, 8, ChannelLayout::Rgba, &[90, 120, 150, 200]).unwrap();

        let written = save_grid(grid, &path, None).unwrap();
        assert_eq!(written, OutputFormat::Jpeg);
        assert!(!image::open(&path).unwrap().color().has_alpha());
    }

    #[test]
    fn test_missing_file_is_image_access_error() {
        let result = open_for_decode(Path::new("definitely/not/here.png"));
        assert!(matches!(result, Err(StegoError::ImageAccess { .. })));
    }
}
