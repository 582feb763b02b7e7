//! Stereo interleaver: drives one decoder per channel in lockstep.

use std::io::{self, Read, Write};

use crate::decode::ChannelReader;
use crate::format::{Channel, ChannelFormat};
use crate::progress::{NoProgress, ProgressReporter};

/// Bytes per output frame: two native-order `i32` samples.
pub const FRAME_BYTES: usize = 8;

/// Number of frames between [`ProgressReporter::advance`] calls.
pub const PROGRESS_INTERVAL_FRAMES: u64 = 65_536;

/// Counters gathered during one interleaving pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterleaveStats {
    pub frames_written: u64,
    pub left_words: u64,
    pub right_words: u64,
    pub left_trailing_bytes: usize,
    pub right_trailing_bytes: usize,
}

/// Interleave two mono streams into stereo frames and return the frame count.
///
/// Both channels are read on every iteration. The pass stops at the first
/// iteration where both are exhausted; until then an exhausted channel
/// contributes silence (zero) to each frame.
pub fn interleave<L, R, W>(
    left: L,
    left_format: ChannelFormat,
    right: R,
    right_format: ChannelFormat,
    output: W,
) -> io::Result<u64>
where
    L: Read,
    R: Read,
    W: Write,
{
    interleave_with_progress(
        left,
        left_format,
        right,
        right_format,
        output,
        &mut NoProgress,
    )
    .map(|stats| stats.frames_written)
}

/// Same as [`interleave`], reporting progress and returning per-channel counters.
pub fn interleave_with_progress<L, R, W, P>(
    left: L,
    left_format: ChannelFormat,
    right: R,
    right_format: ChannelFormat,
    mut output: W,
    progress: &mut P,
) -> io::Result<InterleaveStats>
where
    L: Read,
    R: Read,
    W: Write,
    P: ProgressReporter + ?Sized,
{
    let mut left = ChannelReader::new(left, Channel::Left, left_format);
    let mut right = ChannelReader::new(right, Channel::Right, right_format);
    let mut frames_written: u64 = 0;

    loop {
        let left_word = left.next_word()?;
        let right_word = right.next_word()?;
        if left_word.exhausted && right_word.exhausted {
            break;
        }

        write_frame(&mut output, left_word.sample, right_word.sample)?;
        frames_written += 1;

        if frames_written % PROGRESS_INTERVAL_FRAMES == 0 {
            progress.advance(frames_written);
        }
    }

    if frames_written % PROGRESS_INTERVAL_FRAMES != 0 {
        progress.advance(frames_written);
    }

    Ok(InterleaveStats {
        frames_written,
        left_words: left.words_read(),
        right_words: right.words_read(),
        left_trailing_bytes: left.trailing_bytes(),
        right_trailing_bytes: right.trailing_bytes(),
    })
}

fn write_frame<W: Write + ?Sized>(output: &mut W, left: i32, right: i32) -> io::Result<()> {
    let mut frame = [0u8; FRAME_BYTES];
    frame[..4].copy_from_slice(&left.to_ne_bytes());
    frame[4..].copy_from_slice(&right.to_ne_bytes());
    output.write_all(&frame)
}
