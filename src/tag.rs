//! Tag snapshots reported by the positioning engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One observation of a tracked tag, as served by `GET /api/tags`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagSnapshot {
    /// Tag identifier; operators know tags by their hex id.
    pub id: i64,
    /// Engine timestamp in epoch milliseconds.
    #[serde(default)]
    pub ts: Option<f64>,
    /// East coordinate in meters.
    pub x: f64,
    /// North coordinate in meters.
    pub y: f64,
    /// Height in meters.
    pub z: f64,
    /// Layer (floor) classification; the engine's encoding is opaque here.
    #[serde(default)]
    pub layer: serde_json::Value,
    /// Engine status flag.
    #[serde(default)]
    pub flag: i64,
}

impl TagSnapshot {
    /// Uppercase hexadecimal rendering of the tag id.
    #[must_use]
    pub fn hex_id(&self) -> String {
        if self.id < 0 {
            format!("-{:X}", self.id.unsigned_abs())
        } else {
            format!("{:X}", self.id)
        }
    }

    /// Engine timestamp as a UTC instant, if present and representable.
    #[must_use]
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        let ts = self.ts?;
        if !ts.is_finite() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let millis = ts as i64;
        DateTime::from_timestamp_millis(millis)
    }
}

/// `Tag <hex>: (<x>, <y>, <z>) Flag=<flag>` with two-decimal coordinates.
impl fmt::Display for TagSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tag {}: ({:.2}, {:.2}, {:.2}) Flag={}",
            self.hex_id(),
            self.x,
            self.y,
            self.z,
            self.flag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: i64) -> TagSnapshot {
        TagSnapshot {
            id,
            ts: None,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            layer: serde_json::Value::Null,
            flag: 0,
        }
    }

    #[test]
    fn test_hex_id() {
        assert_eq!(snapshot(255).hex_id(), "FF");
        assert_eq!(snapshot(0).hex_id(), "0");
        assert_eq!(snapshot(0x1A2B).hex_id(), "1A2B");
        assert_eq!(snapshot(-255).hex_id(), "-FF");
    }

    #[test]
    fn test_display_two_decimals() {
        let tag = TagSnapshot {
            id: 255,
            ts: Some(1_700_000_000_000.0),
            x: 1.0,
            y: -2.346,
            z: 10.129,
            layer: serde_json::json!(1),
            flag: 3,
        };
        assert_eq!(tag.to_string(), "Tag FF: (1.00, -2.35, 10.13) Flag=3");
    }

    #[test]
    fn test_decode_defaults_missing_flag() {
        let tag: TagSnapshot =
            serde_json::from_str(r#"{"id": 16, "ts": 5, "x": 1.5, "y": 2.5, "z": 0, "layer": 2}"#).unwrap();
        assert_eq!(tag.flag, 0);
        assert_eq!(tag.layer, serde_json::json!(2));
        assert_eq!(tag.to_string(), "Tag 10: (1.50, 2.50, 0.00) Flag=0");
    }

    #[test]
    fn test_decode_rejects_missing_position() {
        let res = serde_json::from_str::<TagSnapshot>(r#"{"id": 1, "x": 1.0, "y": 2.0}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_observed_at() {
        let mut tag = snapshot(1);
        assert!(tag.observed_at().is_none());

        tag.ts = Some(1_000.0);
        let at = tag.observed_at().unwrap();
        assert_eq!(at.timestamp(), 1);

        tag.ts = Some(f64::NAN);
        assert!(tag.observed_at().is_none());
    }
}
