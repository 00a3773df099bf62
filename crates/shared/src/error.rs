use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Error body returned by the products backend on non-2xx responses.
///
/// The backend answers either with a single `detail` message or with a map
/// from field name to a list of validation messages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Detail { detail: String },
    Fields(BTreeMap<String, Value>),
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// One-line rendering suitable for a log field or a status banner.
    pub fn summary(&self) -> String {
        match self {
            Self::Detail { detail } => detail.clone(),
            Self::Fields(fields) => fields
                .iter()
                .map(|(field, messages)| format!("{field}: {}", flatten_messages(messages)))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

fn flatten_messages(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_messages)
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
