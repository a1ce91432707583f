use http::Method;

use crate::generator::{API_MARKER, GeneratorError, ast::EndpointConfig};

/// Returns the first doc line carrying the marker token.
pub(crate) fn find_marker(docs: &[String]) -> Option<&str> {
  docs.iter().map(String::as_str).find(|line| line.contains(API_MARKER))
}

/// Parses the JSON object that follows the marker on `line`.
///
/// Text after the closing brace is ignored.
pub(crate) fn parse_config(method: &str, line: &str) -> Result<EndpointConfig, GeneratorError> {
  let after_marker = line
    .find(API_MARKER)
    .map_or(line, |pos| &line[pos + API_MARKER.len()..]);
  let start = after_marker
    .find('{')
    .ok_or_else(|| GeneratorError::config(method, "expected a JSON object after the marker"))?;

  let config = serde_json::Deserializer::from_str(&after_marker[start..])
    .into_iter::<EndpointConfig>()
    .next()
    .ok_or_else(|| GeneratorError::config(method, "expected a JSON object after the marker"))?
    .map_err(|err| GeneratorError::config(method, err.to_string()))?;

  if config.url.trim().is_empty() {
    return Err(GeneratorError::config(method, "`url` must not be empty"));
  }

  Ok(config)
}

/// Normalizes the configured verb; absent or blank means any method is accepted.
pub(crate) fn resolve_http_method(method: &str, config: &EndpointConfig) -> Result<Option<Method>, GeneratorError> {
  match config.method.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(verb) => Method::from_bytes(verb.to_ascii_uppercase().as_bytes())
      .map(Some)
      .map_err(|_| GeneratorError::config(method, format!("'{verb}' is not a valid HTTP method"))),
  }
}
