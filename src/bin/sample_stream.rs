//! Stream Sampler
//!
//! Connects to the engine's WebSocket hub and captures barometric messages
//! until the target count is reached or Ctrl+C is pressed.
//!
//! Usage:
//!   tagwatch-stream
//!   tagwatch-stream --url ws://10.0.0.5:8081/ws --target 50

use clap::Parser;

use tagwatch::config::{SamplerConfig, DEFAULT_STREAM_URL};
use tagwatch::stream::run_sampler;
use tagwatch::{logging, signal, TagwatchResult};

/// Stream Sampler - captures a bounded sample of barometric messages
#[derive(Parser, Debug)]
#[command(name = "tagwatch-stream")]
#[command(about = "Sample barometric messages from the engine's event stream")]
struct Args {
    /// WebSocket endpoint
    #[arg(long, default_value = DEFAULT_STREAM_URL)]
    url: String,

    /// Barometric messages to capture before stopping
    #[arg(long, default_value = "500")]
    target: usize,

    /// Position messages to echo before the first barometric one
    #[arg(long, default_value = "1")]
    position_preview: usize,
}

impl From<Args> for SamplerConfig {
    fn from(args: Args) -> Self {
        Self {
            url: args.url,
            capture_target: args.target,
            position_preview: args.position_preview,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> TagwatchResult<()> {
    logging::init();
    let config = SamplerConfig::from(Args::parse());

    let mut stdout = std::io::stdout().lock();
    let outcome = run_sampler(&config, &mut stdout, signal::interrupted()).await?;
    tracing::debug!(?outcome, "sampler finished");
    Ok(())
}
