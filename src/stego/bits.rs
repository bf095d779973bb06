//! # Bitstream
//!
//! Text is expanded one character at a time into 8 bits, most significant bit
//! first. Only code points up to `0xFF` fit in one group, so wider characters
//! are rejected instead of being silently truncated.

use crate::error::{Result, StegoError};

/// Ordered sequence of bits, built from text or collected from pixel LSBs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitstream {
    bits: Vec<bool>,
}

impl Bitstream {
    /// Empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand `text` to 8 bits per character.
    ///
    /// # Errors
    /// - [`StegoError::UnsupportedCharacter`] for any code point above `0xFF`
    pub fn from_text(text: &str) -> Result<Self> {
        let mut stream = Self {
            bits: Vec::with_capacity(text.len() * 8),
        };

        for (index, ch) in text.chars().enumerate() {
            let byte = u8::try_from(u32::from(ch))
                .map_err(|_| StegoError::UnsupportedCharacter { ch, index })?;
            stream.push_byte(byte);
        }

        Ok(stream)
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append the 8 bits of `byte`, most significant first.
    ///
    /// # Arguments
    /// * `byte` - Value to expand
    ///
    /// # Example
    /// ```
    /// use lsb_stego::stego::Bitstream;
    ///
    /// let mut stream = Bitstream::new();
    /// stream.push_byte(0x80);
    /// assert_eq!(stream.len(), 8);
    /// assert_eq!(stream.get(0), Some(true));
    /// assert_eq!(stream.get(7), Some(false));
    /// ```
    pub fn push_byte(&mut self, byte: u8) {
        for shift in (0..8).rev() {
            self.bits.push((byte >> shift) & 1 == 1);
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the stream holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Append zero bits until the stream is `len` bits long. No-op if it is
    /// already at least that long.
    pub fn pad_to(&mut self, len: usize) {
        if self.bits.len() < len {
            self.bits.resize(len, false);
        }
    }

    /// Bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Consecutive 8-bit groups as bytes; a trailing partial group is dropped.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits
            .chunks_exact(8)
            .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
    }
}

impl FromIterator<bool> for Bitstream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_expands_msb_first() {
        let stream = Bitstream::from_text("A").unwrap();
        let bits: Vec<bool> = stream.iter().collect();
        // 'A' = 0x41 = 01000001
        assert_eq!(bits, vec![false, true, false, false, false, false, false, true]);
    }

    #[test]
    fn test_length_is_eight_per_character() {
        assert_eq!(Bitstream::from_text("Hello~END~").unwrap().len(), 80);
        assert!(Bitstream::from_text("").unwrap().is_empty());
    }

    #[test]
    fn test_latin1_is_accepted() {
        let stream = Bitstream::from_text("café").unwrap();
        assert_eq!(stream.bytes().collect::<Vec<_>>(), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_wide_character_is_rejected_with_position() {
        match Bitstream::from_text("ok€") {
            Err(StegoError::UnsupportedCharacter { ch, index }) => {
                assert_eq!(ch, '€');
                assert_eq!(index, 2);
            }
            other => panic!("expected UnsupportedCharacter, got {:?}", other),
        }
    }

    #[test]
    fn test_bytes_drop_trailing_partial_group() {
        let mut stream = Bitstream::from_text("Hi").unwrap();
        stream.push(true);
        stream.push(true);
        assert_eq!(stream.bytes().collect::<Vec<_>>(), b"Hi".to_vec());
    }

    #[test]
    fn test_pad_to_appends_zero_bits() {
        let mut stream = Bitstream::from_text("a").unwrap();
        stream.pad_to(20);
        assert_eq!(stream.len(), 20);
        assert!((8..20).all(|i| stream.get(i) == Some(false)));

        stream.pad_to(4);
        assert_eq!(stream.len(), 20);
    }
}
