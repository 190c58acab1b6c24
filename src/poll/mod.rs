//! Poll Monitor: periodic snapshot of the engine's active tags.
//!
//! The monitor issues one `GET /api/tags` per interval and prints the tag
//! list whenever the count changed or tags are present. While the engine is
//! idle at zero tags it stays quiet.

/// Change detection and the polling loop.
pub mod monitor;
/// Snapshot sources (HTTP and test doubles).
pub mod source;

pub use monitor::{CountTracker, PollCycle, PollMonitor};
pub use source::{FetchOutcome, HttpSnapshotSource, SnapshotSource};
