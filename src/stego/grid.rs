//! # Pixel Grid
//!
//! Owned, interleaved 8-bit pixel buffer handed to the codec. Every pixel in a
//! grid has the same channel arity: `R, G, B` or `R, G, B, A`.

use crate::error::{Result, StegoError};

/// Channel layout shared by every pixel of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Rgb,
    Rgba,
}

impl ChannelLayout {
    /// Number of 8-bit channels per pixel.
    pub fn arity(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Whether the fourth (alpha) channel is present.
    pub fn has_alpha(self) -> bool {
        matches!(self, ChannelLayout::Rgba)
    }
}

/// Row-major pixel buffer with a fixed channel layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wrap a raw row-major buffer.
    ///
    /// # Errors
    /// - [`StegoError::InvalidGrid`] if either dimension is zero or the buffer
    ///   length is not `width * height * arity`
    pub fn new(width: u32, height: u32, layout: ChannelLayout, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StegoError::InvalidGrid(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(layout.arity()))
            .ok_or_else(|| {
                StegoError::InvalidGrid(format!("{}x{} grid is too large", width, height))
            })?;

        if data.len() != expected {
            return Err(StegoError::InvalidGrid(format!(
                "expected {} bytes for a {}x{} grid with {} channels, got {}",
                expected,
                width,
                height,
                layout.arity(),
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Grid where every pixel is `pixel`. Extra trailing values in `pixel`
    /// beyond the layout's arity are ignored.
    pub fn filled(width: u32, height: u32, layout: ChannelLayout, pixel: &[u8]) -> Result<Self> {
        let arity = layout.arity();
        if pixel.len() < arity {
            return Err(StegoError::InvalidGrid(format!(
                "fill pixel has {} channels, layout needs {}",
                pixel.len(),
                arity
            )));
        }

        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * arity);
        for _ in 0..count {
            data.extend_from_slice(&pixel[..arity]);
        }

        Self::new(width, height, layout, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout shared by every pixel.
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Channels per pixel.
    ///
    /// # Returns
    /// 3 for [`ChannelLayout::Rgb`], 4 for [`ChannelLayout::Rgba`]
    pub fn channel_arity(&self) -> usize {
        self.layout.arity()
    }

    fn offset(&self, x: u32, y: u32, channel: usize) -> usize {
        debug_assert!(x < self.width && y < self.height && channel < self.channel_arity());
        (y as usize * self.width as usize + x as usize) * self.channel_arity() + channel
    }

    /// All channel values of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = self.offset(x, y, 0);
        &self.data[start..start + self.channel_arity()]
    }

    /// One channel value of the pixel at `(x, y)`.
    pub fn channel(&self, x: u32, y: u32, channel: usize) -> u8 {
        self.data[self.offset(x, y, channel)]
    }

    /// Overwrite one channel value of the pixel at `(x, y)`.
    pub fn set_channel(&mut self, x: u32, y: u32, channel: usize, value: u8) {
        let idx = self.offset(x, y, channel);
        self.data[idx] = value;
    }

    /// Row-major interleaved channel bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the grid, returning its buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
