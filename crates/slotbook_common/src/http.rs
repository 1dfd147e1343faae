use serde_json::Value;

// Include the client module
pub mod client;

/// Parses a response body as JSON, keeping it as an opaque string when it is not JSON.
pub fn safe_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Picks the user-facing message for a failed response.
///
/// Uses the body's `message` field, then its `error` field, and falls back to
/// `HTTP <status>`. Empty strings and nulls are skipped.
pub fn error_message(status: u16, body: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::String(_) | Value::Null => None,
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_json_keeps_plain_text() {
        assert_eq!(safe_json("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(safe_json("Bad Gateway"), json!("Bad Gateway"));
        assert_eq!(safe_json(""), json!(""));
    }

    #[test]
    fn test_error_message_prefers_message_then_error() {
        assert_eq!(
            error_message(400, &json!({"message": "Slot taken", "error": "conflict"})),
            "Slot taken"
        );
        assert_eq!(error_message(401, &json!({"error": "Invalid token"})), "Invalid token");
        assert_eq!(error_message(500, &json!({"message": ""})), "HTTP 500");
        assert_eq!(error_message(502, &json!("Bad Gateway")), "HTTP 502");
    }
}
