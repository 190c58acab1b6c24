use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::PollError;
use crate::tag::TagSnapshot;

/// Result of a single poll that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Status 200 with a decoded tag list.
    Snapshots(Vec<TagSnapshot>),
    /// Any other HTTP status.
    Status(u16),
}

/// Something that can be asked for the current set of active tags.
///
/// Implementations perform exactly one request per call; the monitor never
/// has two fetches in flight.
pub trait SnapshotSource {
    /// Human readable endpoint, printed when monitoring starts.
    fn endpoint(&self) -> &str;

    /// Perform one poll.
    fn fetch(&mut self) -> impl Future<Output = Result<FetchOutcome, PollError>>;
}

/// HTTP implementation backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: Client,
    url: String,
}

impl HttpSnapshotSource {
    /// Build a source for `url` with the given per-request timeout.
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Result<Self, PollError> {
        let client = Client::builder()
            .connect_timeout(request_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl SnapshotSource for HttpSnapshotSource {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn fetch(&mut self) -> Result<FetchOutcome, PollError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok(FetchOutcome::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let tags: Vec<TagSnapshot> = serde_json::from_slice(&body)?;
        Ok(FetchOutcome::Snapshots(tags))
    }
}
