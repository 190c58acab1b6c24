//! Error types for tagwatch.
//!
//! Every failure a tool can hit is a typed variant here so the console
//! reporting can tell transient connectivity apart from decode and
//! protocol problems. Data-quality violations found by the verifier are
//! not errors; they are a [`crate::verify::Verdict`].

use thiserror::Error;

/// Errors raised while polling the tag-location API.
#[derive(Debug, Error)]
pub enum PollError {
    /// The engine is not reachable: no TCP connection could be made.
    #[error("Connection failed: {message}")]
    Connection {
        /// Underlying transport detail.
        message: String,
    },

    /// The response body was not a JSON array of tag snapshots.
    #[error("Failed to decode tag snapshots: {message}")]
    Decode {
        /// Decoder detail.
        message: String,
    },

    /// Any other request failure (response timeout, body read, redirect loop).
    #[error("Request failed: {message}")]
    Request {
        /// Underlying transport detail.
        message: String,
    },
}

impl PollError {
    /// Returns true for the "server not listening yet" class of failures.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

impl From<reqwest::Error> for PollError {
    fn from(err: reqwest::Error) -> Self {
        // Only connect-phase failures mean "not listening yet"; a server that
        // accepted and then went silent is reported as a request failure.
        if err.is_connect() {
            Self::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::Request {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for PollError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// Errors raised by the event-stream sampler.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The WebSocket opening handshake was rejected or malformed.
    #[error("{message}")]
    Handshake {
        /// Handshake detail.
        message: String,
    },

    /// The TCP connection could not be established.
    #[error("{message}")]
    Connect {
        /// Transport detail.
        message: String,
    },

    /// A frame violated the WebSocket protocol after the handshake.
    #[error("{message}")]
    Protocol {
        /// Protocol detail.
        message: String,
    },

    /// A frame did not carry a JSON document.
    #[error("invalid JSON payload: {message}")]
    Decode {
        /// Decoder detail.
        message: String,
    },

    /// The peer ended the stream before the capture target was reached.
    #[error("stream closed by peer after {captured} captured messages")]
    Closed {
        /// Barometric messages captured before closure.
        captured: usize,
    },

    /// Socket I/O failed while the stream was open.
    #[error("{message}")]
    Io {
        /// I/O detail.
        message: String,
    },
}

impl StreamError {
    /// Short kind name used when reporting the error on the console.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Handshake { .. } => "HandshakeError",
            Self::Connect { .. } => "ConnectError",
            Self::Protocol { .. } => "ProtocolError",
            Self::Decode { .. } => "DecodeError",
            Self::Closed { .. } => "ConnectionClosed",
            Self::Io { .. } => "IoError",
        }
    }

    /// Returns true if the error happened during the opening handshake.
    #[must_use]
    pub const fn is_handshake(&self) -> bool {
        matches!(self, Self::Handshake { .. })
    }

    /// Classify a tungstenite error raised while opening the connection.
    #[must_use]
    pub fn from_connect(err: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;

        match err {
            WsError::Io(e) => Self::Connect {
                message: e.to_string(),
            },
            WsError::Http(response) => Self::Handshake {
                message: format!(
                    "server rejected WebSocket connection: HTTP {}",
                    response.status()
                ),
            },
            other @ (WsError::HttpFormat(_) | WsError::Url(_) | WsError::Protocol(_)) => {
                Self::Handshake {
                    message: other.to_string(),
                }
            }
            other => Self::Io {
                message: other.to_string(),
            },
        }
    }

    /// Classify a tungstenite error raised while reading frames.
    #[must_use]
    pub fn from_receive(err: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;

        match err {
            WsError::Io(e) => Self::Io {
                message: e.to_string(),
            },
            other @ (WsError::Protocol(_) | WsError::Capacity(_)) => {
                Self::Protocol {
                    message: other.to_string(),
                }
            }
            other => Self::Io {
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// Errors raised while reading a trajectory export.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("No position columns found (expected fused_x_m/fused_y_m or a known fallback pair); header was: {header}")]
    MissingColumns {
        header: String,
    },

    #[error("Row {row}: column '{column}' value '{value}' is not a number")]
    InvalidValue {
        row: u64,
        column: String,
        value: String,
    },
}

/// Top-level error type for tagwatch.
#[derive(Debug, Error)]
pub enum TagwatchError {
    #[error("Poll error: {0}")]
    Poll(#[from] PollError),

    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("Verify error: {0}")]
    Verify(#[from] VerifyError),

    #[error("Console output failed: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias for tagwatch operations.
pub type TagwatchResult<T> = Result<T, TagwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_error_transient() {
        let err = PollError::Connection {
            message: "refused".to_string(),
        };
        assert!(err.is_transient());
        assert!(format!("{err}").contains("refused"));

        let err = PollError::Decode {
            message: "expected value".to_string(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_poll_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: PollError = json_err.into();
        assert!(matches!(err, PollError::Decode { .. }));
    }

    #[test]
    fn test_stream_error_kinds() {
        assert_eq!(
            StreamError::Handshake { message: String::new() }.kind(),
            "HandshakeError"
        );
        assert_eq!(StreamError::Closed { captured: 3 }.kind(), "ConnectionClosed");
        assert_eq!(
            StreamError::Decode { message: String::new() }.kind(),
            "DecodeError"
        );
        assert!(StreamError::Handshake { message: String::new() }.is_handshake());
        assert!(!StreamError::Io { message: String::new() }.is_handshake());
    }

    #[test]
    fn test_stream_error_from_connect_io() {
        use tokio_tungstenite::tungstenite::Error as WsError;

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StreamError::from_connect(WsError::Io(io));
        assert_eq!(err.kind(), "ConnectError");
    }

    #[test]
    fn test_stream_error_closed_message() {
        let err = StreamError::Closed { captured: 12 };
        assert!(format!("{err}").contains("12"));
    }

    #[test]
    fn test_verify_error_invalid_value() {
        let err = VerifyError::InvalidValue {
            row: 4,
            column: "fused_x_m".to_string(),
            value: "abc".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Row 4"));
        assert!(msg.contains("fused_x_m"));
        assert!(msg.contains("abc"));
    }
}
