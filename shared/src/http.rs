//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::ApiResponse;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";

/// Create a JSON response with the envelope payload, permissive CORS headers
/// included.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json; charset=utf-8")
        .header("access-control-allow-origin", "*")
        .header("access-control-allow-methods", ALLOWED_METHODS)
        .header("access-control-allow-headers", ALLOWED_HEADERS)
        .header("access-control-max-age", "86400")
        .body(Body::from(serde_json::to_string(data)?))
        .expect("Failed to build response"))
}

/// Create an error response with the given status code and message.
pub fn error_response(
    status: u16,
    message: impl Into<String>,
) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ApiResponse::<()>::error(message))
}

/// CORS preflight response: 200, headers only, no body.
pub fn preflight_response() -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(200)
        .header("access-control-allow-origin", "*")
        .header("access-control-allow-methods", ALLOWED_METHODS)
        .header("access-control-allow-headers", ALLOWED_HEADERS)
        .header("access-control-max-age", "86400")
        .body(Body::Empty)
        .expect("Failed to build response"))
}

/// Parse request body as JSON, returning a 400 response on failure.
///
/// Returns `Ok(Ok(T))` on successful parse, `Ok(Err(Response))` on parse error (400),
/// or `Err(lambda_http::Error)` on serialization failure.
pub fn parse_json_body<T: DeserializeOwned>(
    body: &Body,
) -> Result<Result<T, Response<Body>>, lambda_http::Error> {
    match serde_json::from_slice(body.as_ref()) {
        Ok(parsed) => Ok(Ok(parsed)),
        Err(e) => {
            let response = error_response(400, format!("Invalid request body: {}", e))?;
            Ok(Err(response))
        }
    }
}

/// Macro to parse request body, returning early with 400 on parse error.
///
/// Usage:
/// ```ignore
/// let request: MyRequest = parse_body!(event.body());
/// ```
#[macro_export]
macro_rules! parse_body {
    ($body:expr) => {
        match shared::http::parse_json_body($body)? {
            Ok(parsed) => parsed,
            Err(response) => return Ok(response),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PutAssignmentRequest;

    #[test]
    fn test_json_response_headers() {
        let response = json_response(200, &ApiResponse::success("ok")).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"],
            "application/json; charset=utf-8"
        );
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[test]
    fn test_preflight_has_no_body() {
        let response = preflight_response().unwrap();
        assert_eq!(response.status(), 200);
        assert!(matches!(response.body(), Body::Empty));
        assert_eq!(response.headers()["access-control-max-age"], "86400");
    }

    #[test]
    fn test_parse_json_body_rejects_garbage() {
        let body = Body::from("{not json");
        let parsed = parse_json_body::<PutAssignmentRequest>(&body).unwrap();
        let response = parsed.expect_err("should be a 400 response");
        assert_eq!(response.status(), 400);
    }

    #[test]
    fn test_parse_json_body_accepts_valid() {
        let body = Body::from(r#"{"content":"Math p.1-2"}"#);
        let parsed = parse_json_body::<PutAssignmentRequest>(&body)
            .unwrap()
            .expect("should parse");
        assert_eq!(parsed.content, "Math p.1-2");
    }
}
