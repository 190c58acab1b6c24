//! Bounds Verifier
//!
//! Checks a trajectory CSV export for outlier coordinates and clamp
//! artifacts.
//!
//! Exit status: 0 pass or no data, 1 check failed, 2 unreadable export.
//!
//! Usage:
//!   tagwatch-verify
//!   tagwatch-verify out/tag_1a2b.csv --outlier-limit 500

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tagwatch::config::{
    BoundsLimits, VerifyConfig, DEFAULT_CLAMP_SENTINEL_M, DEFAULT_OUTLIER_LIMIT_M, DEFAULT_TRAJECTORY_PATH,
};
use tagwatch::logging;
use tagwatch::verify::verify_path;

const EXIT_UNREADABLE: u8 = 2;

/// Bounds Verifier - plausibility gate for fused trajectory exports
#[derive(Parser, Debug)]
#[command(name = "tagwatch-verify")]
#[command(about = "Verify a trajectory export against physical plausibility bounds")]
struct Args {
    /// Trajectory CSV export
    #[arg(default_value = DEFAULT_TRAJECTORY_PATH)]
    path: PathBuf,

    /// Coordinates with a larger magnitude (meters) are outliers
    #[arg(long, default_value_t = DEFAULT_OUTLIER_LIMIT_M)]
    outlier_limit: f64,

    /// Sentinel value (meters) the engine emits instead of an estimate
    #[arg(long, default_value_t = DEFAULT_CLAMP_SENTINEL_M, allow_negative_numbers = true)]
    clamp_sentinel: f64,
}

impl From<Args> for VerifyConfig {
    fn from(args: Args) -> Self {
        Self {
            path: args.path,
            limits: BoundsLimits {
                outlier_limit_m: args.outlier_limit,
                clamp_sentinel_m: args.clamp_sentinel,
            },
        }
    }
}

fn main() -> ExitCode {
    logging::init();
    let config = VerifyConfig::from(Args::parse());

    let report = match verify_path(&config.path, config.limits) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(EXIT_UNREADABLE);
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = report.write_to(&mut stdout) {
        let _ = writeln!(std::io::stderr(), "Error: cannot write report: {err}");
    }
    ExitCode::from(report.verdict().exit_code())
}
