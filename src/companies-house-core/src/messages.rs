//! Display text for the error codes the API puts in error bodies.
//!
//! Error bodies come in two shapes:
//!
//! ```json
//! {"error": "unauthorised"}
//! {"errors": [{"error": "etag-mismatch", "type": "ch:service"}]}
//! ```
//!
//! Each code is looked up in [`ERROR_MESSAGES`]; codes that are not in the
//! table are passed through unchanged.

use serde_json::{Map, Value};

/// Message used when an error body cannot be parsed as JSON.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Known API error codes and their display text. `{name}` placeholders are
/// filled from the error object's `error_values`.
pub const ERROR_MESSAGES: &[(&str, &str)] = &[
    ("unauthorised", "Unauthorised"),
    ("forbidden", "Forbidden"),
    ("access-denied", "Access denied"),
    ("invalid-authorization-header", "Invalid authorization header"),
    ("invalid-client-id", "Invalid client ID"),
    ("invalid-http-method", "Access denied for HTTP method {method}"),
    ("no-json-provided", "No JSON payload provided"),
    ("invalid-json", "Invalid JSON payload"),
    ("etag-mismatch", "ETag does not match latest version of resource"),
    ("company-profile-not-found", "Company profile not found"),
    ("not-authorised-for-company", "Not authorised to file for this company"),
    ("transaction-not-open", "Transaction is not open"),
    ("transaction-does-not-exist", "Transaction does not exist"),
    (
        "user-transactions-exceeded",
        "Number of open transactions for user has exceeded {limit}",
    ),
    ("max-length-exceeded", "Maximum length of {max} exceeded"),
];

pub fn lookup(code: &str) -> Option<&'static str> {
    ERROR_MESSAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// Resolve a single error code, substituting placeholders from `values`.
pub fn resolve(code: &str, values: Option<&Map<String, Value>>) -> String {
    let Some(template) = lookup(code) else {
        return code.to_string();
    };

    let mut message = template.to_string();
    if let Some(values) = values {
        for (name, value) in values {
            let replacement = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            message = message.replace(&format!("{{{name}}}"), &replacement);
        }
    }
    message
}

/// Build the display message for an error body.
///
/// Returns `None` when the body is empty or is JSON without an `error` or
/// `errors` field, so the caller can pick a status-specific default. A body
/// that is not JSON yields [`INVALID_RESPONSE_MESSAGE`].
pub fn extract_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => {
            tracing::debug!("Error body is not JSON: {}", e);
            return Some(INVALID_RESPONSE_MESSAGE.to_string());
        }
    };

    if let Some(code) = json.get("error").and_then(Value::as_str) {
        let values = json.get("error_values").and_then(Value::as_object);
        return Some(resolve(code, values));
    }

    let messages: Vec<String> = json
        .get("errors")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(|entry| {
            let code = entry.get("error").and_then(Value::as_str)?;
            let values = entry.get("error_values").and_then(Value::as_object);
            Some(resolve(code, values))
        })
        .collect();

    if messages.is_empty() {
        None
    } else {
        Some(messages.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_code_resolves() {
        assert_eq!(resolve("unauthorised", None), "Unauthorised");
        assert_eq!(
            resolve("etag-mismatch", None),
            "ETag does not match latest version of resource"
        );
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(resolve("unknown-code", None), "unknown-code");
        assert!(lookup("unknown-code").is_none());
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let values = json!({"limit": 10});
        assert_eq!(
            resolve("user-transactions-exceeded", values.as_object()),
            "Number of open transactions for user has exceeded 10"
        );

        let values = json!({"method": "DELETE"});
        assert_eq!(
            resolve("invalid-http-method", values.as_object()),
            "Access denied for HTTP method DELETE"
        );
    }

    #[test]
    fn test_single_error_field() {
        assert_eq!(
            extract_message(r#"{"error":"unauthorised"}"#).as_deref(),
            Some("Unauthorised")
        );
    }

    #[test]
    fn test_errors_list_joined_with_newlines() {
        let body = r#"{"errors":[{"error":"no-json-provided"},{"error":"unknown-code"}]}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("No JSON payload provided\nunknown-code")
        );
    }

    #[test]
    fn test_errors_without_codes_are_skipped() {
        let body = r#"{"errors":[{"type":"ch:validation"},{"error":"forbidden"}]}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Forbidden"));

        assert!(extract_message(r#"{"errors":[]}"#).is_none());
    }

    #[test]
    fn test_unparseable_body_gives_invalid_response() {
        assert_eq!(
            extract_message("<html>502 Bad Gateway</html>").as_deref(),
            Some(INVALID_RESPONSE_MESSAGE)
        );
    }

    #[test]
    fn test_body_without_error_fields() {
        assert!(extract_message("").is_none());
        assert!(extract_message("   ").is_none());
        assert!(extract_message(r#"{"message":"slow down"}"#).is_none());
    }
}
