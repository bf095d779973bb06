//! # Image Processing
//!
//! File-level adapter around the `image` crate: loads carriers into a
//! [`PixelGrid`](crate::stego::PixelGrid) and writes stego images back out.

pub mod format;
pub mod image_io;

pub use format::OutputFormat;
pub use image_io::{open_for_decode, open_for_encode, save_grid};
