//! Error envelope returned by the backend on non-2xx responses.

use serde::Deserialize;
use serde_json::Value;

/// `{"detail": ...}` body. FastAPI sends a string for handled errors and a
/// list of field errors for request validation failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBody {
    /// The detail as display text, if the body carried one.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if messages.is_empty() {
                    Some(Value::Array(items.clone()).to_string())
                } else {
                    Some(messages.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }

    /// Parse a raw response body; anything that is not a JSON object with a
    /// usable `detail` yields `None`.
    #[must_use]
    pub fn detail_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body).ok()?.detail()
    }
}
