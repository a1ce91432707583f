use http::Method;
use serde::Deserialize;

/// JSON object embedded after the marker in a method's doc comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointConfig {
  #[serde(alias = "route")]
  pub url: String,
  #[serde(default)]
  pub auth: bool,
  #[serde(default)]
  pub method: Option<String>,
}

/// Routing metadata for one annotated method.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct EndpointDescriptor {
  #[builder(into)]
  pub receiver: String,
  #[builder(into)]
  pub method: String,
  #[builder(into)]
  pub route: String,
  #[builder(default)]
  pub auth: bool,
  pub http_method: Option<Method>,
  #[builder(into)]
  pub param_type: String,
  #[builder(default)]
  pub is_async: bool,
}

impl EndpointDescriptor {
  /// Verb shown in listings; `ANY` when the endpoint accepts every method.
  pub fn http_method_label(&self) -> &str {
    self.http_method.as_ref().map_or("ANY", Method::as_str)
  }
}
