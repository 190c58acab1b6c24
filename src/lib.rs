//! # tagwatch - diagnostics for a real-time positioning engine
//!
//! tagwatch observes a running positioning / sensor-fusion engine from the
//! outside and validates what it produces. It only consumes the engine's
//! documented interfaces.
//!
//! ## Tools
//!
//! - **Poll Monitor** ([`poll`]): polls `GET /api/tags` once per interval and
//!   prints the active tags whenever the count changed or is nonzero.
//! - **Stream Sampler** ([`stream`]): holds one WebSocket connection and
//!   captures a bounded number of barometric messages.
//! - **Bounds Verifier** ([`verify`]): checks a trajectory CSV export for
//!   outliers and clamp artifacts and turns the result into an exit code.
//!
//! Each tool has its own binary; they share no runtime state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tagwatch::config::BoundsLimits;
//! use tagwatch::verify::verify_path;
//!
//! let report = verify_path("fused.csv".as_ref(), BoundsLimits::default())?;
//! report.write_to(&mut std::io::stdout())?;
//! std::process::exit(i32::from(report.verdict().exit_code()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod logging;
pub mod signal;
pub mod tag;

pub mod poll;
pub mod stream;
pub mod verify;

// Re-export primary types at crate root for convenience
pub use config::{BoundsLimits, PollConfig, SamplerConfig, VerifyConfig};
pub use error::{PollError, StreamError, TagwatchError, TagwatchResult, VerifyError};
pub use poll::{CountTracker, HttpSnapshotSource, PollMonitor, SnapshotSource};
pub use stream::{MessageSource, SampleOutcome, Sampler, StreamMessage, WsMessageSource};
pub use tag::TagSnapshot;
pub use verify::{BoundsAccumulator, BoundsReport, TrajectoryPoint, Verdict};
