//! Per-channel input format: word width and byte order.

use std::fmt;

use crate::AudioCompareError;

/// Byte order in which a channel's words are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    pub fn is_little(self) -> bool {
        self == Endianness::Little
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => write!(f, "little"),
            Endianness::Big => write!(f, "big"),
        }
    }
}

/// Number of bytes per input word, restricted to `1..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordWidth(u8);

impl WordWidth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Construct a [`WordWidth`], rejecting anything outside `1..=4`.
    pub fn new(bytes: u8) -> Result<Self, AudioCompareError> {
        if (Self::MIN..=Self::MAX).contains(&bytes) {
            Ok(Self(bytes))
        } else {
            Err(AudioCompareError::InvalidWordWidth(bytes))
        }
    }

    pub fn bytes(self) -> usize {
        usize::from(self.0)
    }

    pub fn bits(self) -> u32 {
        u32::from(self.0) * 8
    }

    /// Index of the bit holding the sign of a word of this width.
    pub fn sign_bit(self) -> u32 {
        self.bits() - 1
    }
}

impl TryFrom<u8> for WordWidth {
    type Error = AudioCompareError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for WordWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Word width and byte order of one mono input stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelFormat {
    pub width: WordWidth,
    pub endianness: Endianness,
}

impl ChannelFormat {
    pub fn new(width: WordWidth, endianness: Endianness) -> Self {
        Self { width, endianness }
    }
}

impl fmt::Display for ChannelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit {} endian", self.width.bits(), self.endianness)
    }
}

/// Position of a mono input within the stereo output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Left,
    Right,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Left => write!(f, "left"),
            Channel::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_width_accepts_one_to_four_bytes() {
        for bytes in 1..=4u8 {
            let width = WordWidth::new(bytes).unwrap();
            assert_eq!(width.bytes(), usize::from(bytes));
            assert_eq!(width.sign_bit(), u32::from(bytes) * 8 - 1);
        }
    }

    #[test]
    fn word_width_rejects_out_of_range_values() {
        assert!(matches!(
            WordWidth::new(0),
            Err(AudioCompareError::InvalidWordWidth(0))
        ));
        assert!(matches!(
            WordWidth::try_from(5u8),
            Err(AudioCompareError::InvalidWordWidth(5))
        ));
    }

    #[test]
    fn channel_format_describes_itself() {
        let format = ChannelFormat::new(WordWidth::new(3).unwrap(), Endianness::Big);
        assert_eq!(format.to_string(), "24-bit big endian");
    }
}
