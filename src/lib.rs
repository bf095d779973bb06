//! # lsb-stego
//!
//! Hides text in the least significant bits of an image's pixel channels and
//! recovers it later.
//!
//! - [`stego`]: the codec core (pixel grid, slot planner, bitstream, encode/decode)
//! - [`processing`]: image file loading and saving via the `image` crate
//! - [`commands`]: file-level encode/decode/capacity used by the `stego` binary
//! - [`common`]: TOML configuration
//! - [`utils`]: logging setup
//!
//! This is not encryption. The payload is readable by anyone who knows where
//! to look, and lossy re-encoding (JPEG, GIF) destroys it.
//!
//! ```ignore
//! use lsb_stego::stego::{decode, encode, ChannelLayout, EmbeddingMode, PixelGrid, TerminationPolicy};
//!
//! let mut grid = PixelGrid::filled(50, 50, ChannelLayout::Rgb, &[255, 255, 255])?;
//! encode(&mut grid, "Hello", EmbeddingMode::Rgb)?;
//! let message = decode(&grid, EmbeddingMode::Rgb, &TerminationPolicy::default())?;
//! assert_eq!(message, "Hello");
//! ```

pub mod commands;
pub mod common;
pub mod error;
pub mod processing;
pub mod stego;
pub mod utils;

pub use error::{Result, StegoError};
pub use stego::{EmbeddingMode, PixelGrid, TerminationPolicy};
