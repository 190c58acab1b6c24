//! Stream Sampler: bounded capture of barometric messages from the engine's
//! WebSocket hub.
//!
//! The sampler holds a single connection and reads one message at a time in
//! arrival order. Position updates are only echoed as a liveness check;
//! barometric updates are echoed and counted until the capture target is
//! reached.

/// Payload-shape classification.
pub mod message;
/// Bounded capture state machine and receive loop.
pub mod sampler;
/// Message sources (WebSocket and test doubles).
pub mod source;

use std::future::Future;
use std::io::{self, Write};

use tracing::info;

use crate::config::SamplerConfig;
use crate::error::StreamError;

pub use message::StreamMessage;
pub use sampler::{SampleAction, SampleOutcome, Sampler};
pub use source::{MessageSource, WsMessageSource};

/// Connect to `config.url` and sample until the capture target, an error, or
/// `shutdown`.
///
/// Errors are printed to `out`; the returned outcome says how the run ended.
pub async fn run_sampler<W, F>(config: &SamplerConfig, out: &mut W, shutdown: F) -> io::Result<SampleOutcome>
where
    W: Write,
    F: Future<Output = ()>,
{
    writeln!(out, "Connecting to {}...", config.url)?;
    out.flush()?;

    tokio::pin!(shutdown);
    let connected = tokio::select! {
        biased;
        () = &mut shutdown => return Ok(SampleOutcome::Interrupted { captured: 0 }),
        res = WsMessageSource::connect(&config.url) => res,
    };

    let mut source = match connected {
        Ok(source) => source,
        Err(err) => {
            report_error(out, &err)?;
            return Ok(SampleOutcome::Failed(err));
        }
    };
    info!(url = %config.url, "stream connected");
    writeln!(out, "Connected. Waiting for messages...")?;
    out.flush()?;

    let mut sampler = Sampler::new(config.capture_target, config.position_preview);
    let outcome = sampler.run(&mut source, out, shutdown).await?;
    if let SampleOutcome::Failed(err) = &outcome {
        report_error(out, err)?;
    }
    Ok(outcome)
}

/// Print a stream error, keeping handshake failures distinct from the rest.
pub fn report_error<W: Write>(out: &mut W, err: &StreamError) -> io::Result<()> {
    if err.is_handshake() {
        writeln!(out, "WebSocket Error: {err}")?;
    } else {
        writeln!(out, "General Error: {}: {err}", err.kind())?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_handshake() {
        let mut out = Vec::new();
        let err = StreamError::Handshake {
            message: "server rejected WebSocket connection: HTTP 404 Not Found".to_string(),
        };
        report_error(&mut out, &err).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "WebSocket Error: server rejected WebSocket connection: HTTP 404 Not Found\n"
        );
    }

    #[test]
    fn test_report_error_general() {
        let mut out = Vec::new();
        report_error(&mut out, &StreamError::Closed { captured: 4 }).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "General Error: ConnectionClosed: stream closed by peer after 4 captured messages\n"
        );
    }
}
