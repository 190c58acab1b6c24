use std::io::{self, Write};

use crate::config::BoundsLimits;

/// One fused trajectory sample in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    /// Fused x coordinate.
    pub x: f64,
    /// Fused y coordinate.
    pub y: f64,
}

impl TrajectoryPoint {
    /// Point at `(x, y)`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed range of values seen on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    /// Smallest value seen.
    pub min: f64,
    /// Largest value seen.
    pub max: f64,
}

impl AxisBounds {
    const fn single(v: f64) -> Self {
        Self { min: v, max: v }
    }

    fn including(self, v: f64) -> Self {
        Self {
            min: self.min.min(v),
            max: self.max.max(v),
        }
    }
}

/// Single-pass accumulator for count, per-axis bounds, outliers and clamp
/// artifacts. Memory use does not grow with the number of rows.
#[derive(Debug, Clone)]
pub struct BoundsAccumulator {
    limits: BoundsLimits,
    count: u64,
    x: Option<AxisBounds>,
    y: Option<AxisBounds>,
    outliers: u64,
    clamped: u64,
}

impl BoundsAccumulator {
    /// Empty accumulator checking against `limits`.
    #[must_use]
    pub const fn new(limits: BoundsLimits) -> Self {
        Self {
            limits,
            count: 0,
            x: None,
            y: None,
            outliers: 0,
            clamped: 0,
        }
    }

    /// Fold one sample in.
    pub fn push(&mut self, point: TrajectoryPoint) {
        self.count += 1;
        for (axis, v) in [(&mut self.x, point.x), (&mut self.y, point.y)] {
            *axis = Some(axis.map_or_else(|| AxisBounds::single(v), |b| b.including(v)));
            if v.abs() > self.limits.outlier_limit_m {
                self.outliers += 1;
            }
            if v == self.limits.clamp_sentinel_m {
                self.clamped += 1;
            }
        }
    }

    /// Samples folded in so far.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Freeze the accumulated statistics.
    #[must_use]
    pub fn finish(self) -> BoundsReport {
        BoundsReport {
            limits: self.limits,
            count: self.count,
            x: self.x,
            y: self.y,
            outliers: self.outliers,
            clamped: self.clamped,
        }
    }
}

impl Extend<TrajectoryPoint> for BoundsAccumulator {
    fn extend<I: IntoIterator<Item = TrajectoryPoint>>(&mut self, iter: I) {
        for point in iter {
            self.push(point);
        }
    }
}

/// Statistics for a whole trajectory export.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsReport {
    /// Limits the export was checked against.
    pub limits: BoundsLimits,
    /// Number of data rows.
    pub count: u64,
    /// Range of x values; `None` when there were no rows.
    pub x: Option<AxisBounds>,
    /// Range of y values; `None` when there were no rows.
    pub y: Option<AxisBounds>,
    /// Coordinates (x and y counted separately) beyond the outlier limit.
    pub outliers: u64,
    /// Coordinates (x and y counted separately) equal to the clamp sentinel.
    pub clamped: u64,
}

impl BoundsReport {
    /// Pass/fail decision. Both checks always contribute.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        if self.count == 0 {
            Verdict::NoData
        } else if self.outliers > 0 || self.clamped > 0 {
            Verdict::Fail {
                outliers: self.outliers,
                clamped: self.clamped,
            }
        } else {
            Verdict::Pass
        }
    }

    /// Print the report in the operator console format.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (Some(x), Some(y)) = (self.x, self.y) else {
            writeln!(out, "No data found")?;
            return out.flush();
        };

        writeln!(out, "Count: {}", self.count)?;
        writeln!(out, "X Bounds: {:.4} to {:.4}", x.min, x.max)?;
        writeln!(out, "Y Bounds: {:.4} to {:.4}", y.min, y.max)?;

        if self.outliers > 0 {
            writeln!(
                out,
                "FAIL: Found {} outlier coordinates > {}m",
                self.outliers, self.limits.outlier_limit_m
            )?;
        }
        if self.clamped > 0 {
            writeln!(
                out,
                "FAIL: Found {} coordinates clamped exactly at {:.1}",
                self.clamped, self.limits.clamp_sentinel_m
            )?;
        }
        if self.verdict() == Verdict::Pass {
            writeln!(out, "PASS: Coordinates are within reasonable bounds.")?;
        }
        out.flush()
    }
}

/// Outcome of verifying one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No data rows; not a failure.
    NoData,
    /// All coordinates plausible.
    Pass,
    /// At least one check failed.
    Fail {
        /// Outlier coordinates found.
        outliers: u64,
        /// Clamp artifacts found.
        clamped: u64,
    },
}

impl Verdict {
    /// Process exit status: 0 for pass or no data, 1 for any failure.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::NoData | Self::Pass => 0,
            Self::Fail { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(points: &[(f64, f64)]) -> BoundsReport {
        let mut acc = BoundsAccumulator::new(BoundsLimits::default());
        acc.extend(points.iter().map(|&(x, y)| TrajectoryPoint::new(x, y)));
        acc.finish()
    }

    fn render(r: &BoundsReport) -> String {
        let mut out = Vec::new();
        r.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_point_passes() {
        let r = report(&[(500.0, 500.0)]);
        assert_eq!(r.verdict(), Verdict::Pass);
        assert_eq!(r.verdict().exit_code(), 0);
        assert_eq!(
            render(&r),
            "Count: 1\n\
             X Bounds: 500.0000 to 500.0000\n\
             Y Bounds: 500.0000 to 500.0000\n\
             PASS: Coordinates are within reasonable bounds.\n"
        );
    }

    #[test]
    fn test_bounds_track_min_max() {
        let r = report(&[(1.0, -4.0), (-2.5, 3.0), (0.25, 10.125)]);
        let x = r.x.unwrap();
        let y = r.y.unwrap();
        assert_eq!((x.min, x.max), (-2.5, 1.0));
        assert_eq!((y.min, y.max), (-4.0, 10.125));
        assert!(render(&r).contains("Y Bounds: -4.0000 to 10.1250\n"));
    }

    #[test]
    fn test_outlier_fails() {
        let r = report(&[(1.0, 1.0), (1500.0, 0.0)]);
        assert_eq!(r.verdict(), Verdict::Fail { outliers: 1, clamped: 0 });
        assert_eq!(r.verdict().exit_code(), 1);
        let text = render(&r);
        assert!(text.contains("FAIL: Found 1 outlier coordinates > 1000m\n"));
        assert!(!text.contains("PASS"));
    }

    #[test]
    fn test_exactly_at_limit_is_not_outlier() {
        let r = report(&[(1000.0, -1000.0)]);
        assert_eq!(r.verdict(), Verdict::Pass);
    }

    #[test]
    fn test_clamp_sentinel_reports_both_checks() {
        // -2000 is also an outlier by magnitude; both classes are reported.
        let r = report(&[(-2000.0, 0.0), (3.0, 4.0)]);
        assert_eq!(r.verdict(), Verdict::Fail { outliers: 1, clamped: 1 });
        let text = render(&r);
        assert!(text.contains("FAIL: Found 1 outlier coordinates > 1000m\n"));
        assert!(text.contains("FAIL: Found 1 coordinates clamped exactly at -2000.0\n"));
        let outlier_at = text.find("outlier").unwrap();
        let clamp_at = text.find("clamped").unwrap();
        assert!(outlier_at < clamp_at);
    }

    #[test]
    fn test_clamp_only_with_custom_limit() {
        let limits = BoundsLimits {
            outlier_limit_m: 5000.0,
            clamp_sentinel_m: -2000.0,
        };
        let mut acc = BoundsAccumulator::new(limits);
        acc.push(TrajectoryPoint::new(0.0, -2000.0));
        let r = acc.finish();
        assert_eq!(r.verdict(), Verdict::Fail { outliers: 0, clamped: 1 });
        assert!(!render(&r).contains("outlier"));
    }

    #[test]
    fn test_counts_each_axis() {
        let r = report(&[(-2000.0, -2000.0)]);
        assert_eq!(r.outliers, 2);
        assert_eq!(r.clamped, 2);
    }

    #[test]
    fn test_empty_is_no_data() {
        let r = report(&[]);
        assert_eq!(r.verdict(), Verdict::NoData);
        assert_eq!(r.verdict().exit_code(), 0);
        assert_eq!(render(&r), "No data found\n");
    }
}
