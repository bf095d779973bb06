//! # LSB Steganography Core
//!
//! - [`grid`]: owned pixel buffer with a fixed channel layout
//! - [`planner`]: raster-order enumeration of the channel slots a mode uses
//! - [`bits`]: text to 8-bit groups and back
//! - [`codec`]: embedding and extraction with termination handling

pub mod bits;
pub mod codec;
pub mod grid;
pub mod planner;

pub use bits::Bitstream;
pub use codec::{
    capacity_bits, decode, encode, encode_with, max_message_chars, TerminationPolicy,
    DEFAULT_DELIMITER,
};
pub use grid::{ChannelLayout, PixelGrid};
pub use planner::{enumerate_slots, usable_bit_slots, EmbeddingMode, Slot, Slots};
