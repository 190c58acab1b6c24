//! Bounds Verifier: offline plausibility check of a trajectory export.
//!
//! Two independent checks gate acceptance of a fused trajectory:
//!
//! - **Outliers**: any coordinate whose magnitude exceeds the outlier limit
//!   (unbounded filter divergence).
//! - **Clamp artifacts**: any coordinate exactly equal to the engine's
//!   sentinel (the engine substituted a placeholder for a missing estimate).
//!
//! Both are always evaluated and reported; either one fails the run.

/// Streaming statistics and the verdict.
pub mod bounds;
/// CSV column detection and row iteration.
pub mod reader;

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::BoundsLimits;
use crate::error::VerifyError;

pub use bounds::{AxisBounds, BoundsAccumulator, BoundsReport, TrajectoryPoint, Verdict};
pub use reader::{TrajectoryReader, COLUMN_PAIRS};

/// Verify the export at `path` in a single pass.
pub fn verify_path(path: &Path, limits: BoundsLimits) -> Result<BoundsReport, VerifyError> {
    debug!(path = %path.display(), "verifying trajectory export");
    accumulate(TrajectoryReader::open(path)?, limits)
}

/// Verify an export read from `reader`.
pub fn verify_reader<R: Read>(reader: R, limits: BoundsLimits) -> Result<BoundsReport, VerifyError> {
    accumulate(TrajectoryReader::from_reader(reader)?, limits)
}

fn accumulate<R: Read>(rows: TrajectoryReader<R>, limits: BoundsLimits) -> Result<BoundsReport, VerifyError> {
    if let Some((x, y)) = rows.column_names() {
        debug!(x, y, "position columns");
    }

    let mut acc = BoundsAccumulator::new(limits);
    for point in rows {
        acc.push(point?);
    }
    debug!(rows = acc.count(), "trajectory scanned");
    Ok(acc.finish())
}
