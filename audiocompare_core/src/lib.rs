use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

pub mod decode;
pub mod format;
pub mod interleave;
mod progress;

pub use decode::{
    decode_word, sample_from_bytes, sample_to_bytes, ChannelReader, DecodedWord, WordBytes,
    MAX_WORD_BYTES,
};
pub use format::{Channel, ChannelFormat, Endianness, WordWidth};
pub use interleave::{
    interleave, interleave_with_progress, InterleaveStats, FRAME_BYTES, PROGRESS_INTERVAL_FRAMES,
};
pub use progress::{NoProgress, ProgressEvent, ProgressReporter};

use progress::CallbackReporter;

/// Default capacity of the buffered readers and writer used by [`run`].
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Errors that can occur while combining two mono captures.
#[derive(Debug, Error)]
pub enum AudioCompareError {
    /// Wrapper around IO errors encountered while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error returned when a word width outside `1..=4` is requested.
    #[error("word width must be 1, 2, 3, or 4 bytes (got {0})")]
    InvalidWordWidth(u8),

    /// Error returned when an input path does not name a regular file.
    #[error("{channel} channel input file does not exist: {}", .path.display())]
    MissingInput { channel: Channel, path: PathBuf },

    /// Error returned when the output path resolves to one of the inputs.
    #[error("output file {} is also the {channel} channel input", .path.display())]
    OutputAliasesInput { channel: Channel, path: PathBuf },
}

/// One mono input: where it lives and how its words are laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelInput {
    pub path: PathBuf,
    pub format: ChannelFormat,
}

impl ChannelInput {
    pub fn new<P: Into<PathBuf>>(path: P, format: ChannelFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

/// Configuration for one conversion pass.
#[derive(Clone, Debug)]
pub struct Config {
    /// Canonicalized left channel input.
    pub left: ChannelInput,
    /// Canonicalized right channel input.
    pub right: ChannelInput,
    /// Output path; its parent directory is canonicalized when it exists.
    pub output_path: PathBuf,
    /// Capacity of each buffered reader and of the buffered writer.
    pub buffer_capacity: NonZeroUsize,
}

impl Config {
    /// Construct a new [`Config`] with default settings.
    pub fn new<O: Into<PathBuf>>(
        left: ChannelInput,
        right: ChannelInput,
        output: O,
    ) -> Result<Self, AudioCompareError> {
        Self::builder(left, right, output).build()
    }

    /// Start building a [`Config`] with optional settings.
    pub fn builder<O: Into<PathBuf>>(
        left: ChannelInput,
        right: ChannelInput,
        output: O,
    ) -> ConfigBuilder {
        ConfigBuilder {
            left,
            right,
            output: output.into(),
            buffer_capacity: None,
        }
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    left: ChannelInput,
    right: ChannelInput,
    output: PathBuf,
    buffer_capacity: Option<NonZeroUsize>,
}

impl ConfigBuilder {
    /// Override the I/O buffer capacity, in bytes.
    pub fn buffer_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    /// Validate the paths and produce the final [`Config`].
    pub fn build(self) -> Result<Config, AudioCompareError> {
        let left = resolve_input(Channel::Left, self.left)?;
        let right = resolve_input(Channel::Right, self.right)?;
        let output_path = resolve_output(self.output);

        for (channel, input) in [(Channel::Left, &left), (Channel::Right, &right)] {
            if input.path == output_path {
                return Err(AudioCompareError::OutputAliasesInput {
                    channel,
                    path: output_path,
                });
            }
        }

        let buffer_capacity = self.buffer_capacity.unwrap_or(
            NonZeroUsize::new(DEFAULT_BUFFER_CAPACITY).unwrap_or(NonZeroUsize::MIN),
        );

        Ok(Config {
            left,
            right,
            output_path,
            buffer_capacity,
        })
    }
}

fn resolve_input(channel: Channel, input: ChannelInput) -> Result<ChannelInput, AudioCompareError> {
    if !input.path.is_file() {
        return Err(AudioCompareError::MissingInput {
            channel,
            path: input.path,
        });
    }

    Ok(ChannelInput {
        path: fs::canonicalize(&input.path)?,
        format: input.format,
    })
}

fn resolve_output(path: PathBuf) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(&path) {
        return resolved;
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path,
    }
}

/// Expected shape of one channel, derived from its file size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelPlan {
    pub channel: Channel,
    pub format: ChannelFormat,
    pub input_bytes: u64,
    pub words: u64,
    pub trailing_bytes: u64,
}

impl ChannelPlan {
    fn from_len(channel: Channel, format: ChannelFormat, input_bytes: u64) -> Self {
        let width = format.width.bytes() as u64;
        Self {
            channel,
            format,
            input_bytes,
            words: input_bytes / width,
            trailing_bytes: input_bytes % width,
        }
    }
}

/// Outcome of a conversion as predicted from the input sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversionPlan {
    pub left: ChannelPlan,
    pub right: ChannelPlan,
    pub frames: u64,
    pub output_bytes: u64,
}

/// Compute what [`run`] would produce without touching the output.
pub fn plan(config: &Config) -> Result<ConversionPlan, AudioCompareError> {
    let left = ChannelPlan::from_len(
        Channel::Left,
        config.left.format,
        fs::metadata(&config.left.path)?.len(),
    );
    let right = ChannelPlan::from_len(
        Channel::Right,
        config.right.format,
        fs::metadata(&config.right.path)?.len(),
    );
    let frames = left.words.max(right.words);

    Ok(ConversionPlan {
        left,
        right,
        frames,
        output_bytes: frames * FRAME_BYTES as u64,
    })
}

/// Totals reported once a conversion completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversionSummary {
    pub frames_written: u64,
    pub bytes_written: u64,
    pub stats: InterleaveStats,
}

/// Perform the conversion described by the supplied [`Config`].
pub fn run(config: Config) -> Result<ConversionSummary, AudioCompareError> {
    run_with_reporter(config, &mut NoProgress)
}

/// Perform the conversion, invoking `on_event` as it progresses.
pub fn run_with_progress<F>(
    config: Config,
    on_event: F,
) -> Result<ConversionSummary, AudioCompareError>
where
    F: FnMut(ProgressEvent),
{
    let mut reporter = CallbackReporter::new(on_event);
    run_with_reporter(config, &mut reporter)
}

/// Perform the conversion, forwarding progress to a [`ProgressReporter`].
///
/// An existing output file is truncated.
pub fn run_with_reporter<P>(
    config: Config,
    progress: &mut P,
) -> Result<ConversionSummary, AudioCompareError>
where
    P: ProgressReporter + ?Sized,
{
    let expected = plan(&config)?;
    info!(
        "interleaving '{}' ({}) and '{}' ({}) into '{}'",
        config.left.path.display(),
        config.left.format,
        config.right.path.display(),
        config.right.format,
        config.output_path.display()
    );
    debug!(
        "expecting {} frame(s): {} left word(s), {} right word(s)",
        expected.frames, expected.left.words, expected.right.words
    );

    let capacity = config.buffer_capacity.get();
    let left = BufReader::with_capacity(capacity, File::open(&config.left.path)?);
    let right = BufReader::with_capacity(capacity, File::open(&config.right.path)?);
    let mut output = BufWriter::with_capacity(capacity, File::create(&config.output_path)?);

    progress.start(Some(expected.frames));
    let stats = interleave_with_progress(
        left,
        config.left.format,
        right,
        config.right.format,
        &mut output,
        progress,
    )?;
    output.flush()?;
    progress.finish();

    let summary = ConversionSummary {
        frames_written: stats.frames_written,
        bytes_written: stats.frames_written * FRAME_BYTES as u64,
        stats,
    };
    info!(
        "wrote {} frame(s) ({} bytes) to '{}'",
        summary.frames_written,
        summary.bytes_written,
        config.output_path.display()
    );

    Ok(summary)
}
