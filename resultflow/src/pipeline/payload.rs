//! The value a successful pipeline run resolves to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A validated, decoded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// HTTP status code (always below 400).
    pub status: u16,
    /// Decoded body.
    pub body: serde_json::Value,
    /// Response headers with lowercase names.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Payload {
    /// Creates a payload without headers.
    #[must_use]
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body,
            headers: BTreeMap::new(),
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Converts to a JSON object with `status`, `body` and `headers` keys.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status,
            "body": self.body,
            "headers": self.headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_json_shape() {
        let payload = Payload::new(200, json!({"ok": true})).with_header("Content-Type", "application/json");
        assert_eq!(
            payload.to_json(),
            json!({
                "status": 200,
                "body": {"ok": true},
                "headers": {"content-type": "application/json"},
            })
        );
    }

    #[test]
    fn test_deserialize_without_headers() {
        let payload: Payload = serde_json::from_str(r#"{"status": 201, "body": [1, 2]}"#).unwrap();
        assert_eq!(payload, Payload::new(201, json!([1, 2])));
    }
}
