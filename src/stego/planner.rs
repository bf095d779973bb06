//! # Bit Channel Planner
//!
//! Enumerates the channel values eligible for LSB read/write, in the fixed
//! order the codec consumes them:
//!
//! ```text
//! for y in 0..height
//!   for x in 0..width
//!     rgb:   (x, y, 0) (x, y, 1) (x, y, 2)
//!     alpha: (x, y, 3)
//! ```
//!
//! The sequence is lazy and restartable: call [`enumerate_slots`] again for a
//! fresh pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StegoError};

/// Which channels carry the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    /// R, G and B of every pixel.
    #[default]
    Rgb,
    /// Only A; needs a 4-channel grid.
    Alpha,
}

impl EmbeddingMode {
    /// Bit slots contributed by each pixel.
    pub fn slots_per_pixel(self) -> usize {
        match self {
            EmbeddingMode::Rgb => 3,
            EmbeddingMode::Alpha => 1,
        }
    }
}

impl FromStr for EmbeddingMode {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(EmbeddingMode::Rgb),
            "alpha" => Ok(EmbeddingMode::Alpha),
            other => Err(StegoError::Configuration(format!(
                "invalid mode '{}', expected 'rgb' or 'alpha'",
                other
            ))),
        }
    }
}

impl fmt::Display for EmbeddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingMode::Rgb => write!(f, "rgb"),
            EmbeddingMode::Alpha => write!(f, "alpha"),
        }
    }
}

/// One (pixel coordinate, channel index) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: u32,
    pub y: u32,
    pub channel: usize,
}

/// `width * height * slots_per_pixel`.
pub fn usable_bit_slots(width: u32, height: u32, mode: EmbeddingMode) -> usize {
    width as usize * height as usize * mode.slots_per_pixel()
}

/// Raster-order slot iterator. See the module docs for the ordering.
#[derive(Debug, Clone)]
pub struct Slots {
    width: u32,
    mode: EmbeddingMode,
    next: usize,
    total: usize,
}

impl Iterator for Slots {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.next >= self.total {
            return None;
        }

        let per_pixel = self.mode.slots_per_pixel();
        let pixel = self.next / per_pixel;
        let channel = match self.mode {
            EmbeddingMode::Rgb => self.next % per_pixel,
            EmbeddingMode::Alpha => 3,
        };
        self.next += 1;

        Some(Slot {
            x: (pixel % self.width as usize) as u32,
            y: (pixel / self.width as usize) as u32,
            channel,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Slots {}

/// Start a pass over every eligible slot.
///
/// # Errors
/// - [`StegoError::Configuration`] if `mode` is Alpha and the grid has no
///   alpha channel (`channel_arity != 4`), or RGB mode with fewer than 3
///   channels
pub fn enumerate_slots(
    width: u32,
    height: u32,
    channel_arity: usize,
    mode: EmbeddingMode,
) -> Result<Slots> {
    match mode {
        EmbeddingMode::Alpha if channel_arity != 4 => {
            return Err(StegoError::Configuration(format!(
                "alpha mode requires an image with an alpha channel (4 channels), got {}",
                channel_arity
            )));
        }
        EmbeddingMode::Rgb if channel_arity < 3 => {
            return Err(StegoError::Configuration(format!(
                "rgb mode requires at least 3 channels, got {}",
                channel_arity
            )));
        }
        _ => {}
    }

    Ok(Slots {
        width,
        mode,
        next: 0,
        total: usable_bit_slots(width, height, mode),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(slots: Slots) -> Vec<(u32, u32, usize)> {
        slots.map(|s| (s.x, s.y, s.channel)).collect()
    }

    #[test]
    fn test_rgb_order_cycles_channels_then_x_then_y() {
        let slots = enumerate_slots(2, 2, 3, EmbeddingMode::Rgb).unwrap();
        assert_eq!(
            coords(slots),
            vec![
                (0, 0, 0), (0, 0, 1), (0, 0, 2),
                (1, 0, 0), (1, 0, 1), (1, 0, 2),
                (0, 1, 0), (0, 1, 1), (0, 1, 2),
                (1, 1, 0), (1, 1, 1), (1, 1, 2),
            ]
        );
    }

    #[test]
    fn test_alpha_visits_channel_three_once_per_pixel() {
        let slots = enumerate_slots(3, 2, 4, EmbeddingMode::Alpha).unwrap();
        assert_eq!(
            coords(slots),
            vec![(0, 0, 3), (1, 0, 3), (2, 0, 3), (0, 1, 3), (1, 1, 3), (2, 1, 3)]
        );
    }

    #[test]
    fn test_rgb_mode_on_rgba_grid_skips_alpha() {
        let slots = enumerate_slots(4, 4, 4, EmbeddingMode::Rgb).unwrap();
        assert!(slots.clone().all(|s| s.channel < 3));
        assert_eq!(slots.len(), 48);
    }

    #[test]
    fn test_length_matches_usable_bit_slots() {
        for &(w, h) in &[(1, 1), (5, 5), (50, 50), (7, 3)] {
            for &mode in &[EmbeddingMode::Rgb, EmbeddingMode::Alpha] {
                let slots = enumerate_slots(w, h, 4, mode).unwrap();
                assert_eq!(slots.count(), usable_bit_slots(w, h, mode));
            }
        }
    }

    #[test]
    fn test_alpha_on_rgb_grid_is_rejected() {
        let result = enumerate_slots(10, 10, 3, EmbeddingMode::Alpha);
        assert!(matches!(result, Err(StegoError::Configuration(_))));
    }

    #[test]
    fn test_restartable() {
        let first = coords(enumerate_slots(3, 3, 3, EmbeddingMode::Rgb).unwrap());
        let second = coords(enumerate_slots(3, 3, 3, EmbeddingMode::Rgb).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("rgb".parse::<EmbeddingMode>().unwrap(), EmbeddingMode::Rgb);
        assert_eq!("ALPHA".parse::<EmbeddingMode>().unwrap(), EmbeddingMode::Alpha);
        assert!(matches!(
            "cmyk".parse::<EmbeddingMode>(),
            Err(StegoError::Configuration(_))
        ));
    }
}
