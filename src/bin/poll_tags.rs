//! Poll Monitor
//!
//! Polls the engine's tag-location API once per interval and prints the
//! active tags. Runs until Ctrl+C.
//!
//! Usage:
//!   tagwatch-poll
//!   tagwatch-poll --url http://10.0.0.5:8080/api/tags --interval-ms 500

use std::time::Duration;

use clap::Parser;

use tagwatch::config::{PollConfig, DEFAULT_TAGS_URL};
use tagwatch::poll::{HttpSnapshotSource, PollMonitor};
use tagwatch::{logging, signal, TagwatchResult};

/// Poll Monitor - prints active tags whenever the count changes or is nonzero
#[derive(Parser, Debug)]
#[command(name = "tagwatch-poll")]
#[command(about = "Poll the positioning engine for active tags")]
struct Args {
    /// Tag-location endpoint
    #[arg(long, default_value = DEFAULT_TAGS_URL)]
    url: String,

    /// Delay between polls in milliseconds
    #[arg(long, default_value = "1000")]
    interval_ms: u64,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value = "1000")]
    timeout_ms: u64,
}

impl From<Args> for PollConfig {
    fn from(args: Args) -> Self {
        Self {
            url: args.url,
            interval: Duration::from_millis(args.interval_ms),
            request_timeout: Duration::from_millis(args.timeout_ms),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> TagwatchResult<()> {
    logging::init();
    let config = PollConfig::from(Args::parse());

    let source = HttpSnapshotSource::new(config.url.clone(), config.request_timeout)?;
    let mut monitor = PollMonitor::new(source, config.interval);

    let mut stdout = std::io::stdout().lock();
    monitor.run(&mut stdout, signal::interrupted()).await?;
    Ok(())
}
