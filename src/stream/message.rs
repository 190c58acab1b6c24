use serde_json::Value;

use crate::error::StreamError;

/// Key that marks a barometric update.
pub const PRESSURE_KEY: &str = "pressure";

/// Key that marks a position update.
pub const POSITION_KEY: &str = "x";

/// One decoded event from the stream, classified by payload shape.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    /// Object carrying a `pressure` field. Takes precedence over position.
    Barometric(Value),
    /// Object carrying an `x` field.
    Position(Value),
    /// Anything else the hub broadcasts.
    Other(Value),
}

impl StreamMessage {
    /// Parse a text frame and classify it.
    pub fn classify(text: &str) -> Result<Self, StreamError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value))
    }

    /// Classify an already decoded document.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let (is_baro, is_pos) = match value.as_object() {
            Some(obj) => (obj.contains_key(PRESSURE_KEY), obj.contains_key(POSITION_KEY)),
            None => (false, false),
        };
        if is_baro {
            Self::Barometric(value)
        } else if is_pos {
            Self::Position(value)
        } else {
            Self::Other(value)
        }
    }

    /// The decoded document.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        match self {
            Self::Barometric(v) | Self::Position(v) | Self::Other(v) => v,
        }
    }
}
