//! Fixed defaults and per-tool configuration.
//!
//! Every tool runs with these defaults unless the operator overrides them on
//! the command line. There are no configuration files.

use std::path::PathBuf;
use std::time::Duration;

/// Tag-location endpoint of a locally running engine.
pub const DEFAULT_TAGS_URL: &str = "http://localhost:8080/api/tags";

/// WebSocket hub of a locally running engine.
pub const DEFAULT_STREAM_URL: &str = "ws://localhost:8081/ws";

/// Trajectory export written by the engine's fuse tool.
pub const DEFAULT_TRAJECTORY_PATH: &str = "engine-go/verify_fix.csv";

/// Delay between two polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Per-request timeout for a single poll.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Barometric messages to capture before the sampler stops.
pub const DEFAULT_CAPTURE_TARGET: usize = 500;

/// Position messages echoed before the first barometric sample.
///
/// Narrower than echoing every position message until the first barometric
/// one: only the first is shown unless `position_preview` is raised.
pub const DEFAULT_POSITION_PREVIEW: usize = 1;

/// Largest plausible coordinate magnitude in meters.
pub const DEFAULT_OUTLIER_LIMIT_M: f64 = 1000.0;

/// Value the engine substitutes when it cannot produce an estimate.
pub const DEFAULT_CLAMP_SENTINEL_M: f64 = -2000.0;

/// Poll Monitor configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Endpoint returning the JSON array of active tags.
    pub url: String,
    /// Delay between two polls.
    pub interval: Duration,
    /// Timeout applied to each request.
    pub request_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TAGS_URL.to_string(),
            interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Stream Sampler configuration.
///
/// With the default `position_preview` of 1 the sampler prints a single
/// position message, not every one seen before the first barometric sample.
/// Raise it to see more of the early position traffic.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// WebSocket endpoint.
    pub url: String,
    /// Number of barometric messages after which the sampler stops.
    pub capture_target: usize,
    /// How many position messages to echo while nothing is captured yet.
    pub position_preview: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STREAM_URL.to_string(),
            capture_target: DEFAULT_CAPTURE_TARGET,
            position_preview: DEFAULT_POSITION_PREVIEW,
        }
    }
}

/// Physical plausibility limits applied by the verifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsLimits {
    /// Coordinates with a magnitude strictly above this are outliers.
    pub outlier_limit_m: f64,
    /// Coordinates exactly equal to this are clamp artifacts.
    pub clamp_sentinel_m: f64,
}

impl Default for BoundsLimits {
    fn default() -> Self {
        Self {
            outlier_limit_m: DEFAULT_OUTLIER_LIMIT_M,
            clamp_sentinel_m: DEFAULT_CLAMP_SENTINEL_M,
        }
    }
}

/// Bounds Verifier configuration.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Trajectory export to check.
    pub path: PathBuf,
    /// Limits to check it against.
    pub limits: BoundsLimits,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_TRAJECTORY_PATH),
            limits: BoundsLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_ports() {
        let poll = PollConfig::default();
        assert_eq!(poll.url, "http://localhost:8080/api/tags");
        assert_eq!(poll.interval, Duration::from_secs(1));
        assert_eq!(poll.request_timeout, Duration::from_secs(1));

        let sampler = SamplerConfig::default();
        assert_eq!(sampler.url, "ws://localhost:8081/ws");
        assert_eq!(sampler.capture_target, 500);
        assert_eq!(sampler.position_preview, 1);
    }

    #[test]
    fn test_default_limits() {
        let limits = BoundsLimits::default();
        assert!((limits.outlier_limit_m - 1000.0).abs() < f64::EPSILON);
        assert!((limits.clamp_sentinel_m + 2000.0).abs() < f64::EPSILON);
        assert_eq!(VerifyConfig::default().limits, limits);
    }
}
