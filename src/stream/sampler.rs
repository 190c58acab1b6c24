use std::future::Future;
use std::io::{self, Write};

use serde_json::Value;
use tracing::{trace, warn};

use crate::error::StreamError;

use super::message::StreamMessage;
use super::source::MessageSource;

/// What the sampler decided for one message.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleAction {
    /// Barometric sample counted toward the target.
    Captured(Value),
    /// Position update echoed as a liveness check; not counted.
    Preview(Value),
    /// Nothing to print.
    Skipped,
}

/// How a sampling run ended.
#[derive(Debug)]
pub enum SampleOutcome {
    /// The capture target was reached.
    Completed {
        /// Barometric messages captured.
        captured: usize,
    },
    /// The operator interrupted the run; the connection was closed.
    Interrupted {
        /// Barometric messages captured before the interrupt.
        captured: usize,
    },
    /// The stream failed or ended before the target.
    Failed(StreamError),
}

/// Bounded capture of barometric messages.
///
/// The only state carried between messages is the captured count and how
/// many position previews were echoed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampler {
    target: usize,
    preview_limit: usize,
    captured: usize,
    previewed: usize,
}

impl Sampler {
    /// Sampler that stops after `target` barometric messages and echoes at
    /// most `preview_limit` position messages before the first one.
    #[must_use]
    pub const fn new(target: usize, preview_limit: usize) -> Self {
        Self {
            target,
            preview_limit,
            captured: 0,
            previewed: 0,
        }
    }

    /// Barometric messages captured so far.
    #[must_use]
    pub const fn captured(&self) -> usize {
        self.captured
    }

    /// True once the capture target is reached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.captured >= self.target
    }

    /// Apply one classified message to the capture state.
    pub fn accept(&mut self, message: StreamMessage) -> SampleAction {
        match message {
            StreamMessage::Barometric(value) if !self.is_complete() => {
                self.captured += 1;
                SampleAction::Captured(value)
            }
            StreamMessage::Position(value) if self.captured == 0 && self.previewed < self.preview_limit => {
                self.previewed += 1;
                SampleAction::Preview(value)
            }
            _ => SampleAction::Skipped,
        }
    }

    /// Read from `source` until the target is reached, the stream fails, or
    /// `shutdown` resolves.
    ///
    /// Exactly one message is handled per await, in arrival order. Nothing
    /// is read once the target is reached. Undecodable frames are printed
    /// and skipped.
    pub async fn run<S, W, F>(&mut self, source: &mut S, out: &mut W, shutdown: F) -> io::Result<SampleOutcome>
    where
        S: MessageSource,
        W: Write,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        while !self.is_complete() {
            let next = tokio::select! {
                biased;
                () = &mut shutdown => {
                    source.close().await;
                    return Ok(SampleOutcome::Interrupted { captured: self.captured });
                }
                next = source.next_message() => next,
            };

            let text = match next {
                Some(Ok(text)) => text,
                Some(Err(err @ StreamError::Decode { .. })) => {
                    warn!(error = %err, "skipping undecodable frame");
                    writeln!(out, "Decode Error: {err}")?;
                    continue;
                }
                Some(Err(err)) => return Ok(SampleOutcome::Failed(err)),
                None => {
                    return Ok(SampleOutcome::Failed(StreamError::Closed {
                        captured: self.captured,
                    }))
                }
            };

            let message = match StreamMessage::classify(&text) {
                Ok(message) => message,
                Err(err) => {
                    warn!(error = %err, "skipping undecodable frame");
                    writeln!(out, "Decode Error: {err}")?;
                    continue;
                }
            };

            match self.accept(message) {
                SampleAction::Captured(value) => writeln!(out, "FOUND BARO DATA: {value}")?,
                SampleAction::Preview(value) => writeln!(out, "POS: {value}")?,
                SampleAction::Skipped => trace!("message skipped"),
            }
            out.flush()?;
        }

        source.close().await;
        writeln!(out, "Captured {} messages with baro data.", self.captured)?;
        out.flush()?;
        Ok(SampleOutcome::Completed {
            captured: self.captured,
        })
    }
}
