//! Word decoder: turns fixed-width signed PCM words into canonical `i32` samples.

use std::io::{self, ErrorKind, Read};

use log::warn;

use crate::format::{Channel, ChannelFormat, Endianness};

/// Widest word the decoder handles, in bytes.
pub const MAX_WORD_BYTES: usize = 4;

/// Result of one [`decode_word`] call.
///
/// When `exhausted` is set the stream ran out before a whole word could be
/// read; `sample` is then zero and `bytes_read` holds the length of the
/// incomplete word that was discarded (usually zero).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedWord {
    pub sample: i32,
    pub exhausted: bool,
    pub bytes_read: usize,
}

impl DecodedWord {
    fn complete(sample: i32, bytes_read: usize) -> Self {
        Self {
            sample,
            exhausted: false,
            bytes_read,
        }
    }

    fn exhausted(bytes_read: usize) -> Self {
        Self {
            sample: 0,
            exhausted: true,
            bytes_read,
        }
    }
}

/// The on-disk bytes of one word, as produced by [`sample_to_bytes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordBytes {
    bytes: [u8; MAX_WORD_BYTES],
    len: usize,
}

impl WordBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl AsRef<[u8]> for WordBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Assemble a raw word into a sign-extended 32-bit sample.
///
/// The word width is the slice length. Big-endian words are reversed first,
/// so assembly always happens in little-endian order; the most significant
/// bit of the word is then replicated into every higher bit of the result.
/// An empty slice yields zero and anything past [`MAX_WORD_BYTES`] is ignored.
pub fn sample_from_bytes(bytes: &[u8], endianness: Endianness) -> i32 {
    let width = bytes.len().min(MAX_WORD_BYTES);
    if width == 0 {
        return 0;
    }

    let mut word = [0u8; MAX_WORD_BYTES];
    word[..width].copy_from_slice(&bytes[..width]);
    if endianness == Endianness::Big {
        word[..width].reverse();
    }

    let shift = (MAX_WORD_BYTES - width) as u32 * 8;
    // Move the word's sign bit to bit 31 so the arithmetic shift back fills
    // the high bits with copies of it.
    ((u32::from_le_bytes(word) << shift) as i32) >> shift
}

/// Encode a sample as one word of the given format.
///
/// Only the low `width` bytes of the two's-complement value are kept, so this
/// is the exact inverse of [`sample_from_bytes`] for every decodable word.
pub fn sample_to_bytes(sample: i32, format: ChannelFormat) -> WordBytes {
    let len = format.width.bytes();
    let mut bytes = sample.to_le_bytes();
    if format.endianness == Endianness::Big {
        bytes[..len].reverse();
    }
    WordBytes { bytes, len }
}

/// Read and decode exactly one word from `reader`.
///
/// A stream that ends before `width` bytes arrive is reported through
/// [`DecodedWord::exhausted`], never as an error. Only genuine I/O failures
/// surface as `Err`.
pub fn decode_word<R: Read + ?Sized>(
    reader: &mut R,
    format: ChannelFormat,
) -> io::Result<DecodedWord> {
    let width = format.width.bytes();
    let mut buffer = [0u8; MAX_WORD_BYTES];
    let filled = fill_word(reader, &mut buffer[..width])?;

    if filled < width {
        return Ok(DecodedWord::exhausted(filled));
    }

    Ok(DecodedWord::complete(
        sample_from_bytes(&buffer[..width], format.endianness),
        width,
    ))
}

fn fill_word<R: Read + ?Sized>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// A mono input stream bound to its channel and format.
///
/// Once a read comes up short the reader stays exhausted and the underlying
/// stream is not touched again.
#[derive(Debug)]
pub struct ChannelReader<R> {
    inner: R,
    channel: Channel,
    format: ChannelFormat,
    words_read: u64,
    trailing_bytes: usize,
    exhausted: bool,
}

impl<R: Read> ChannelReader<R> {
    pub fn new(inner: R, channel: Channel, format: ChannelFormat) -> Self {
        Self {
            inner,
            channel,
            format,
            words_read: 0,
            trailing_bytes: 0,
            exhausted: false,
        }
    }

    /// Decode the next word, or report exhaustion.
    pub fn next_word(&mut self) -> io::Result<DecodedWord> {
        if self.exhausted {
            return Ok(DecodedWord::exhausted(0));
        }

        let word = decode_word(&mut self.inner, self.format)?;
        if word.exhausted {
            self.exhausted = true;
            if word.bytes_read > 0 {
                self.trailing_bytes = word.bytes_read;
                warn!(
                    "{} channel ends with an incomplete {}-byte word; dropping {} trailing byte(s)",
                    self.channel,
                    self.format.width,
                    word.bytes_read
                );
            }
        } else {
            self.words_read += 1;
        }

        Ok(word)
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn format(&self) -> ChannelFormat {
        self.format
    }

    pub fn words_read(&self) -> u64 {
        self.words_read
    }

    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
