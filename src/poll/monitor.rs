use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::PollError;
use crate::tag::TagSnapshot;

use super::source::{FetchOutcome, SnapshotSource};

const SEPARATOR: &str = "--------------------";

/// Remembers the tag count seen on the previous successful poll.
///
/// Output is emitted when the count changed or is nonzero, so an idle engine
/// at zero tags prints once and then stays quiet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountTracker {
    last: Option<usize>,
}

impl CountTracker {
    /// Tracker that has not seen any successful poll yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Count from the previous successful poll, if any.
    #[must_use]
    pub const fn last(&self) -> Option<usize> {
        self.last
    }

    /// Record `count` and report whether it should be printed.
    pub fn observe(&mut self, count: usize) -> bool {
        let emit = self.last != Some(count) || count > 0;
        self.last = Some(count);
        emit
    }
}

/// What one poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCycle {
    /// Tags were printed.
    Reported {
        /// Number of tags in the snapshot.
        count: usize,
    },
    /// Zero tags again; nothing printed.
    Quiet,
    /// Server answered with a non-200 status.
    Status(u16),
    /// Server not reachable.
    Unreachable,
    /// Decode or other request failure.
    Failed,
}

/// Sequential poll loop over a [`SnapshotSource`].
#[derive(Debug)]
pub struct PollMonitor<S> {
    source: S,
    interval: Duration,
    tracker: CountTracker,
}

impl<S: SnapshotSource> PollMonitor<S> {
    /// Monitor `source`, polling once per `interval`.
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source,
            interval,
            tracker: CountTracker::new(),
        }
    }

    /// Change-detection state carried between cycles.
    #[must_use]
    pub const fn tracker(&self) -> &CountTracker {
        &self.tracker
    }

    /// Perform one poll and print its outcome to `out`.
    pub async fn poll_once<W: Write>(&mut self, out: &mut W) -> io::Result<PollCycle> {
        let cycle = match self.source.fetch().await {
            Ok(FetchOutcome::Snapshots(tags)) => self.report_tags(out, &tags)?,
            Ok(FetchOutcome::Status(code)) => {
                writeln!(out, "Error: {code}")?;
                PollCycle::Status(code)
            }
            Err(err) => Self::report_error(out, &err)?,
        };
        out.flush()?;
        Ok(cycle)
    }

    /// Poll until `shutdown` resolves, then print the stop notice.
    ///
    /// Only console write failures end the loop early.
    pub async fn run<W, F>(&mut self, out: &mut W, shutdown: F) -> io::Result<()>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        writeln!(out, "Monitoring tags at {}...", self.source.endpoint())?;
        out.flush()?;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    writeln!(out)?;
                    writeln!(out, "Stopping monitor.")?;
                    out.flush()?;
                    return Ok(());
                }
                res = self.cycle(out) => {
                    let cycle = res?;
                    trace!(?cycle, "poll cycle finished");
                }
            }
        }
    }

    async fn cycle<W: Write>(&mut self, out: &mut W) -> io::Result<PollCycle> {
        let cycle = self.poll_once(out).await?;
        tokio::time::sleep(self.interval).await;
        Ok(cycle)
    }

    fn report_tags<W: Write>(&mut self, out: &mut W, tags: &[TagSnapshot]) -> io::Result<PollCycle> {
        let count = tags.len();
        if !self.tracker.observe(count) {
            return Ok(PollCycle::Quiet);
        }

        writeln!(out, "Active Tags: {count}")?;
        for tag in tags {
            if let Some(at) = tag.observed_at() {
                debug!(id = %tag.hex_id(), %at, "tag observed");
            }
            writeln!(out, "{tag}")?;
        }
        writeln!(out, "{SEPARATOR}")?;
        Ok(PollCycle::Reported { count })
    }

    fn report_error<W: Write>(out: &mut W, err: &PollError) -> io::Result<PollCycle> {
        debug!(error = %err, "poll failed");
        if err.is_transient() {
            writeln!(out, "Connection refused. Server might be starting...")?;
            Ok(PollCycle::Unreachable)
        } else {
            writeln!(out, "Error: {err}")?;
            Ok(PollCycle::Failed)
        }
    }
}
