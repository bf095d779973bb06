//! # File-Level Commands
//!
//! Glue between image files and the codec, one function per CLI subcommand.
//! Each loads the carrier, runs the codec, and (for encode) writes the result.

use log::{debug, info};
use std::path::Path;

use crate::error::Result;
use crate::processing::{open_for_decode, open_for_encode, save_grid, OutputFormat};
use crate::stego::{self, EmbeddingMode, TerminationPolicy};

/// Embedding capacity of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub width: u32,
    pub height: u32,
    pub mode: EmbeddingMode,
    /// Total usable bit slots
    pub bits: usize,
    /// Longest message that fits once the terminator is added
    pub max_chars: usize,
}

/// Hide `message` in the image at `input` and write the result to `output`.
///
/// The image is loaded, modified in memory, and only written if encoding
/// succeeds, so a capacity failure leaves no output file behind.
pub fn encode_file(
    input: &Path,
    message: &str,
    output: &Path,
    mode: EmbeddingMode,
    policy: &TerminationPolicy,
    format: Option<OutputFormat>,
) -> Result<OutputFormat> {
    let mut grid = open_for_encode(input, mode)?;
    debug!(
        "Encoding {} characters into {}x{} image ({} mode, {:?})",
        message.chars().count(),
        grid.width(),
        grid.height(),
        mode,
        policy
    );

    stego::encode_with(&mut grid, message, mode, policy)?;

    let written = save_grid(grid, output, format)?;
    info!("Encoded image saved to {}", output.display());
    Ok(written)
}

/// Recover a message from the image at `input`. An empty string means
/// nothing was found.
pub fn decode_file(input: &Path, mode: EmbeddingMode, policy: &TerminationPolicy) -> Result<String> {
    let grid = open_for_decode(input)?;
    debug!(
        "Decoding {}x{} image ({} mode, {:?})",
        grid.width(),
        grid.height(),
        mode,
        policy
    );

    stego::decode(&grid, mode, policy)
}

/// Report how much text the image at `input` can hold.
pub fn capacity_file(
    input: &Path,
    mode: EmbeddingMode,
    policy: &TerminationPolicy,
) -> Result<CapacityReport> {
    let grid = open_for_encode(input, mode)?;

    Ok(CapacityReport {
        width: grid.width(),
        height: grid.height(),
        mode,
        bits: stego::capacity_bits(&grid, mode)?,
        max_chars: stego::max_message_chars(&grid, mode, policy)?,
    })
}
