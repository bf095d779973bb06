//! # LSB Codec
//!
//! Hides text in the least significant bit of pixel channels and reads it
//! back.
//!
//! ## Encoding
//! 1. Append the terminator required by the [`TerminationPolicy`]
//! 2. Expand the payload to 8 bits per character, MSB first
//! 3. Reject the payload if it needs more bits than the mode provides
//! 4. Pad with zero bits up to the full slot count
//! 5. Write one bit into every slot: `channel = (channel & !1) | bit`
//!
//! Step 4 means every channel selected by the mode is overwritten, not only
//! the ones carrying payload bits. Channels outside the mode are never touched.
//!
//! ## Decoding
//! Every slot's LSB is collected first, then the bits are read back as 8-bit
//! characters until the policy says stop. Finding nothing is not an error:
//! the result is just an empty (or meaningless) string.
//!
//! The codec performs no I/O and no logging.

use crate::error::{Result, StegoError};
use crate::stego::bits::Bitstream;
use crate::stego::grid::PixelGrid;
use crate::stego::planner::{enumerate_slots, EmbeddingMode, Slots};

/// Delimiter appended by [`encode`].
pub const DEFAULT_DELIMITER: &str = "~END~";

/// How the end of a message is marked on encode and detected on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationPolicy {
    /// Append the delimiter on encode; on decode stop once the decoded text
    /// ends with it and strip it.
    DelimiterScan(String),
    /// Append nothing on encode, relying on the zero padding; on decode stop
    /// at the first zero byte.
    ZeroByteSentinel,
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        TerminationPolicy::DelimiterScan(DEFAULT_DELIMITER.to_string())
    }
}

impl TerminationPolicy {
    fn validate(&self) -> Result<()> {
        match self {
            TerminationPolicy::DelimiterScan(delimiter) if delimiter.is_empty() => Err(
                StegoError::Configuration("delimiter must not be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Bits the terminator adds to every payload.
    pub fn terminator_bits(&self) -> usize {
        match self {
            TerminationPolicy::DelimiterScan(delimiter) => delimiter.chars().count() * 8,
            TerminationPolicy::ZeroByteSentinel => 0,
        }
    }

    fn payload(&self, message: &str) -> Result<Bitstream> {
        match self {
            TerminationPolicy::DelimiterScan(delimiter) => {
                // Decoding stops at the first match, which must be the appended one.
                let payload = format!("{}{}", message, delimiter);
                if payload.find(delimiter.as_str()) != Some(message.len()) {
                    return Err(StegoError::Configuration(format!(
                        "message contains or runs into the delimiter '{}'",
                        delimiter
                    )));
                }
                Bitstream::from_text(&payload)
            }
            TerminationPolicy::ZeroByteSentinel => {
                // A NUL would end decoding early.
                if let Some(index) = message.chars().position(|ch| ch == '\0') {
                    return Err(StegoError::UnsupportedCharacter { ch: '\0', index });
                }
                Bitstream::from_text(message)
            }
        }
    }
}

fn slots_for(grid: &PixelGrid, mode: EmbeddingMode) -> Result<Slots> {
    enumerate_slots(grid.width(), grid.height(), grid.channel_arity(), mode)
}

/// Number of bit slots `mode` provides in `grid`.
///
/// # Errors
/// - [`StegoError::Configuration`] if the grid's layout does not support `mode`
pub fn capacity_bits(grid: &PixelGrid, mode: EmbeddingMode) -> Result<usize> {
    Ok(slots_for(grid, mode)?.len())
}

/// Longest message, in characters, that still fits together with the
/// policy's terminator.
pub fn max_message_chars(
    grid: &PixelGrid,
    mode: EmbeddingMode,
    policy: &TerminationPolicy,
) -> Result<usize> {
    policy.validate()?;
    let available = capacity_bits(grid, mode)?;
    Ok(available.saturating_sub(policy.terminator_bits()) / 8)
}

/// Encode `message` followed by [`DEFAULT_DELIMITER`].
pub fn encode(grid: &mut PixelGrid, message: &str, mode: EmbeddingMode) -> Result<()> {
    encode_with(grid, message, mode, &TerminationPolicy::default())
}

/// Encode `message` into `grid`, terminated according to `policy`.
///
/// Nothing is written unless the whole payload fits.
///
/// # Errors
/// - [`StegoError::Configuration`] for an unsupported mode/layout pair, an
///   empty delimiter, or a message that would match the delimiter before its
///   end (for example `"x~END"` with `"~END~"`)
/// - [`StegoError::UnsupportedCharacter`] for characters above `0xFF` (or a
///   NUL under [`TerminationPolicy::ZeroByteSentinel`])
/// - [`StegoError::CapacityExceeded`] if the payload needs more bits than
///   the grid has slots
pub fn encode_with(
    grid: &mut PixelGrid,
    message: &str,
    mode: EmbeddingMode,
    policy: &TerminationPolicy,
) -> Result<()> {
    policy.validate()?;
    let slots = slots_for(grid, mode)?;

    let mut bits = policy.payload(message)?;
    let available = slots.len();
    if bits.len() > available {
        return Err(StegoError::CapacityExceeded {
            required: bits.len(),
            available,
        });
    }

    bits.pad_to(available);

    for (slot, bit) in slots.zip(bits.iter()) {
        let value = grid.channel(slot.x, slot.y, slot.channel);
        grid.set_channel(slot.x, slot.y, slot.channel, (value & !1) | bit as u8);
    }

    Ok(())
}

/// Read a message back out of `grid`.
///
/// # Errors
/// - [`StegoError::Configuration`] for an unsupported mode/layout pair or an
///   empty delimiter
pub fn decode(grid: &PixelGrid, mode: EmbeddingMode, policy: &TerminationPolicy) -> Result<String> {
    policy.validate()?;

    let bits: Bitstream = slots_for(grid, mode)?
        .map(|slot| grid.channel(slot.x, slot.y, slot.channel) & 1 == 1)
        .collect();

    let mut message = String::new();
    match policy {
        TerminationPolicy::ZeroByteSentinel => {
            for byte in bits.bytes().take_while(|&b| b != 0) {
                message.push(char::from(byte));
            }
        }
        TerminationPolicy::DelimiterScan(delimiter) => {
            for byte in bits.bytes() {
                message.push(char::from(byte));
                if message.ends_with(delimiter.as_str()) {
                    message.truncate(message.len() - delimiter.len());
                    break;
                }
            }
        }
    }

    Ok(message)
}
