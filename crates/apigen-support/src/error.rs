use std::fmt::Display;

use http::StatusCode;

/// Error carrying the HTTP status it should be reported with.
///
/// Generated decoders and validators produce it, and business methods may
/// return it (directly or wrapped) to choose their own status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
  pub status: StatusCode,
  pub message: String,
}

impl ApiError {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn internal(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

/// Errors a business method may return from a generated endpoint.
///
/// `http_status` returns `Some` only for errors that carry a structured status;
/// everything else is reported as `500 Internal Server Error`.
pub trait HandlerError: Display {
  fn http_status(&self) -> Option<StatusCode> {
    None
  }
}

impl HandlerError for ApiError {
  fn http_status(&self) -> Option<StatusCode> {
    Some(self.status)
  }
}

impl HandlerError for anyhow::Error {
  fn http_status(&self) -> Option<StatusCode> {
    self.downcast_ref::<ApiError>().map(|err| err.status)
  }
}

impl HandlerError for Box<dyn std::error::Error + Send + Sync> {
  fn http_status(&self) -> Option<StatusCode> {
    self.downcast_ref::<ApiError>().map(|err| err.status)
  }
}

impl HandlerError for std::io::Error {}

impl HandlerError for String {}

impl HandlerError for &str {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_keeps_status() {
    let err = ApiError::new(StatusCode::CONFLICT, "user exists");
    assert_eq!(err.http_status(), Some(StatusCode::CONFLICT));
    assert_eq!(err.to_string(), "user exists");
  }

  #[test]
  fn test_anyhow_wrapping_api_error_keeps_status() {
    let err = anyhow::Error::new(ApiError::not_found("user not exist"));
    assert_eq!(err.http_status(), Some(StatusCode::NOT_FOUND));
  }

  #[test]
  fn test_plain_errors_have_no_status() {
    let err = anyhow::anyhow!("bad user");
    assert_eq!(err.http_status(), None);
    assert_eq!(String::from("oops").http_status(), None);
  }

  #[test]
  fn test_boxed_error_downcasts() {
    let err: Box<dyn std::error::Error + Send + Sync> = Box::new(ApiError::bad_request("nope"));
    assert_eq!(err.http_status(), Some(StatusCode::BAD_REQUEST));
  }
}
