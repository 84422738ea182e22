//! Mapping of raw responses onto results and typed errors.

use crate::{ApiError, Result};
use companies_house_core::{messages, ApiResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Strict classification: 200 with a JSON object or array is the only success,
/// everything else (404 included) is an error.
pub fn classify(response: ApiResponse) -> Result<Value> {
    if response.status == 200 {
        return match response.json() {
            Some(body @ (Value::Object(_) | Value::Array(_))) => Ok(body),
            _ => Err(ApiError::MalformedResponse {
                response: Box::new(response),
            }),
        };
    }

    let message = messages::extract_message(&response.body)
        .unwrap_or_else(|| default_message(response.status));
    let response = Box::new(response);

    Err(match response.status {
        401 => ApiError::Unauthorised { message, response },
        404 => ApiError::NotFound { message, response },
        429 => ApiError::RateLimited { message, response },
        _ => ApiError::Api { message, response },
    })
}

/// The policy used by the endpoint methods: a 404 is an absent result.
pub fn handle_response(response: ApiResponse) -> Result<Option<Value>> {
    match classify(response) {
        Ok(body) => Ok(Some(body)),
        Err(ApiError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Decode the result of an endpoint call into a typed resource.
pub fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<Option<T>> {
    Ok(companies_house_core::decode(value)?)
}

fn default_message(status: u16) -> String {
    match status {
        401 => "Unauthorised".to_string(),
        404 => "Resource not found".to_string(),
        429 => "Rate limit exceeded".to_string(),
        _ => format!("Unexpected response status {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_body_returned_unchanged() {
        let body = r#"{"company_number":"00000006","company_name":"X"}"#;
        let value = handle_response(ApiResponse::new(200, body)).unwrap();
        assert_eq!(
            value,
            Some(json!({"company_number": "00000006", "company_name": "X"}))
        );
    }

    #[test]
    fn test_array_body_is_accepted() {
        let value = handle_response(ApiResponse::new(200, "[1,2]")).unwrap();
        assert_eq!(value, Some(json!([1, 2])));
    }

    #[test]
    fn test_not_found_is_absent() {
        let value = handle_response(ApiResponse::new(404, r#"{"errors":[]}"#)).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_classify_reports_not_found() {
        let err = classify(ApiResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Resource not found");
    }

    #[test]
    fn test_unauthorised() {
        let err = handle_response(ApiResponse::new(401, r#"{"error":"unauthorised"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorised { .. }));
        assert_eq!(err.to_string(), "Unauthorised");
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.body(), Some(json!({"error": "unauthorised"})));
    }

    #[test]
    fn test_rate_limited_regardless_of_body() {
        for body in ["", "not json", r#"{"error":"forbidden"}"#, "[]"] {
            let err = handle_response(ApiResponse::new(429, body)).unwrap_err();
            assert!(matches!(err, ApiError::RateLimited { .. }), "body: {body}");
        }
    }

    #[test]
    fn test_rate_limited_exposes_headers() {
        let response = ApiResponse::new(429, "")
            .with_header("X-Ratelimit-Limit", "600")
            .with_header("X-Ratelimit-Remain", "0");
        let err = handle_response(response).unwrap_err();
        assert_eq!(err.to_string(), "Rate limit exceeded");
        assert_eq!(err.rate_limit().unwrap().remaining, Some(0));
    }

    #[test]
    fn test_scalar_success_body_is_malformed() {
        let err = handle_response(ApiResponse::new(200, r#""not-an-object""#)).unwrap_err();
        match err {
            ApiError::MalformedResponse { response } => {
                assert_eq!(response.status, 200);
                assert_eq!(response.body, r#""not-an-object""#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_success_body_is_malformed() {
        let err = handle_response(ApiResponse::new(200, "<html></html>")).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn test_generic_error_joins_messages() {
        let body = r#"{"errors":[{"error":"no-json-provided"},{"error":"unknown-code"}]}"#;
        let err = handle_response(ApiResponse::new(400, body)).unwrap_err();
        assert!(matches!(err, ApiError::Api { .. }));
        assert_eq!(err.to_string(), "No JSON payload provided\nunknown-code");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_unparseable_error_body_stays_generic() {
        let err = handle_response(ApiResponse::new(500, "<h1>Internal error</h1>")).unwrap_err();
        assert!(matches!(err, ApiError::Api { .. }));
        assert_eq!(err.to_string(), messages::INVALID_RESPONSE_MESSAGE);
        assert_eq!(err.response().unwrap().body, "<h1>Internal error</h1>");
    }

    #[test]
    fn test_decode_typed_resource() {
        let value = handle_response(ApiResponse::new(200, r#"{"company_number":"00000006"}"#)).unwrap();
        let profile: Option<crate::CompanyProfile> = decode(value).unwrap();
        assert_eq!(profile.unwrap().company_number, "00000006");

        let missing: Option<crate::CompanyProfile> = decode(None).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_decode_wrong_shape_is_serialization_error() {
        let err = decode::<crate::CompanyProfile>(Some(json!({"company_name": 42}))).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
        assert!(err.status().is_none());
    }

    #[test]
    fn test_other_success_statuses_are_errors() {
        for status in [201, 204, 301, 302] {
            let err = handle_response(ApiResponse::new(status, "")).unwrap_err();
            assert!(matches!(err, ApiError::Api { .. }), "status {status}");
            assert_eq!(
                err.to_string(),
                format!("Unexpected response status {}", status)
            );
        }
    }
}
