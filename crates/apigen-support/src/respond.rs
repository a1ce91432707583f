//! JSON error envelopes and success responses used by generated handlers.
//!
//! Every response body has the shape `{"error": ...}` or
//! `{"error": "", "response": ...}` and carries `Content-Type: application/json`.

use http::{HeaderValue, StatusCode, header::CONTENT_TYPE};
use serde::Serialize;
use serde_json::json;

use crate::{ApiError, ApiResponse, HandlerError};

pub fn json(status: StatusCode, body: &serde_json::Value) -> ApiResponse {
  let mut response = ApiResponse::new(body.to_string());
  *response.status_mut() = status;
  response
    .headers_mut()
    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
  response
}

pub fn error_envelope(status: StatusCode, message: &str) -> ApiResponse {
  json(status, &json!({ "error": message }))
}

pub fn unknown_method() -> ApiResponse {
  error_envelope(StatusCode::NOT_FOUND, "unknown method")
}

pub fn unauthorized() -> ApiResponse {
  error_envelope(StatusCode::FORBIDDEN, "unauthorized")
}

pub fn bad_method() -> ApiResponse {
  error_envelope(StatusCode::NOT_ACCEPTABLE, "bad method")
}

pub fn api_error(err: &ApiError) -> ApiResponse {
  error_envelope(err.status, &err.message)
}

/// Reports a business-method failure, using its own status when it has one.
pub fn handler_error<E: HandlerError + ?Sized>(err: &E) -> ApiResponse {
  let status = err.http_status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
  error_envelope(status, &err.to_string())
}

pub fn success<T: Serialize + ?Sized>(value: &T) -> ApiResponse {
  match serde_json::to_value(value) {
    Ok(response) => json(StatusCode::OK, &json!({ "error": "", "response": response })),
    Err(err) => error_envelope(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
  }
}
