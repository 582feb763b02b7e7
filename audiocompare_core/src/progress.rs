/// Progress notifications emitted while a conversion runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Emitted once before the first frame, with the expected frame count
    /// when it can be derived from the input sizes.
    Start { total_frames: Option<u64> },
    /// Emitted periodically with the number of frames written so far.
    Advance { frames_written: u64 },
    /// Emitted once the output has been flushed.
    Finish,
}

/// Receives progress updates from the interleaver and the conversion driver.
///
/// Every method has an empty default so reporters only implement what they use.
pub trait ProgressReporter {
    fn start(&mut self, _total_frames: Option<u64>) {}

    fn advance(&mut self, _frames_written: u64) {}

    fn finish(&mut self) {}
}

/// Reporter that discards every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

pub(crate) struct CallbackReporter<F> {
    on_event: F,
}

impl<F> CallbackReporter<F>
where
    F: FnMut(ProgressEvent),
{
    pub(crate) fn new(on_event: F) -> Self {
        Self { on_event }
    }
}

impl<F> ProgressReporter for CallbackReporter<F>
where
    F: FnMut(ProgressEvent),
{
    fn start(&mut self, total_frames: Option<u64>) {
        (self.on_event)(ProgressEvent::Start { total_frames });
    }

    fn advance(&mut self, frames_written: u64) {
        (self.on_event)(ProgressEvent::Advance { frames_written });
    }

    fn finish(&mut self) {
        (self.on_event)(ProgressEvent::Finish);
    }
}
