use http::{
  HeaderMap, HeaderValue, Method,
  header::{CONTENT_TYPE, HeaderName},
};
use url::form_urlencoded;

use crate::{AUTH_HEADER, AUTH_TOKEN};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Inbound request as seen by generated handlers.
///
/// Form data merges an urlencoded body with the query string, body first.
/// Keys are lower-cased on the way in, so lookups are case-insensitive and the
/// first value for a key wins.
#[derive(Debug, Clone)]
pub struct ApiRequest {
  method: Method,
  path: String,
  headers: HeaderMap,
  form: Vec<(String, String)>,
}

impl ApiRequest {
  /// Builds a request from a method and a target such as `/user/create?login=bob`.
  pub fn new(method: Method, target: &str) -> Self {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    Self {
      method,
      path: path.to_string(),
      headers: HeaderMap::new(),
      form: parse_form(query.as_bytes()).collect(),
    }
  }

  /// Converts an `http::Request`, reading its body as form data when the
  /// content type says so.
  pub fn from_http<B: AsRef<[u8]>>(req: &http::Request<B>) -> Self {
    let uri = req.uri();
    let is_form = req
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

    let mut form = Vec::new();
    if is_form {
      form.extend(parse_form(req.body().as_ref()));
    }
    form.extend(parse_form(uri.query().unwrap_or_default().as_bytes()));

    Self {
      method: req.method().clone(),
      path: uri.path().to_string(),
      headers: req.headers().clone(),
      form,
    }
  }

  #[must_use]
  pub fn with_header(mut self, name: &str, value: &str) -> Self {
    if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
      self.headers.append(name, value);
    }
    self
  }

  /// Prepends urlencoded body fields, matching how `from_http` orders them.
  #[must_use]
  pub fn with_form_body(mut self, body: &str) -> Self {
    let mut form: Vec<_> = parse_form(body.as_bytes()).collect();
    form.append(&mut self.form);
    self.form = form;
    self
  }

  pub fn method(&self) -> &Method {
    &self.method
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn headers(&self) -> &HeaderMap {
    &self.headers
  }

  /// Returns the first form value stored under `name`, or `""` when absent.
  pub fn form_value(&self, name: &str) -> &str {
    let name = name.to_lowercase();
    self
      .form
      .iter()
      .find(|(key, _)| *key == name)
      .map_or("", |(_, value)| value.as_str())
  }

  /// Checks the trust token of authenticated endpoints.
  pub fn is_authorized(&self) -> bool {
    self
      .headers
      .get(AUTH_HEADER)
      .is_some_and(|value| value.as_bytes() == AUTH_TOKEN.as_bytes())
  }
}

fn parse_form(input: &[u8]) -> impl Iterator<Item = (String, String)> + '_ {
  form_urlencoded::parse(input).map(|(key, value)| (key.to_lowercase(), value.into_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_query_values_are_decoded() {
    let req = ApiRequest::new(Method::GET, "/user/profile?login=rvasily&full_name=Vasily+Romanov%21");
    assert_eq!(req.path(), "/user/profile");
    assert_eq!(req.form_value("login"), "rvasily");
    assert_eq!(req.form_value("full_name"), "Vasily Romanov!");
  }

  #[test]
  fn test_lookup_is_case_insensitive() {
    let req = ApiRequest::new(Method::GET, "/x?Full_Name=bob");
    assert_eq!(req.form_value("full_name"), "bob");
    assert_eq!(req.form_value("FULL_NAME"), "bob");
  }

  #[test]
  fn test_form_pairs_follow_urlencoded_rules() {
    let req = ApiRequest::new(Method::GET, "/x?&flag&name=a%3Db&empty=&name=second&note=%E2%9C%93+ok");
    assert_eq!(req.form_value("flag"), "");
    assert_eq!(req.form_value("name"), "a=b");
    assert_eq!(req.form_value("empty"), "");
    assert_eq!(req.form_value("note"), "\u{2713} ok");
  }

  #[test]
  fn test_absent_key_is_empty() {
    let req = ApiRequest::new(Method::GET, "/x");
    assert_eq!(req.form_value("login"), "");
  }

  #[test]
  fn test_body_takes_precedence_over_query() {
    let req = ApiRequest::new(Method::POST, "/x?login=query").with_form_body("login=body");
    assert_eq!(req.form_value("login"), "body");
  }

  #[test]
  fn test_from_http_reads_form_body() {
    let req = http::Request::builder()
      .method(Method::POST)
      .uri("/user/create?age=12")
      .header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8")
      .header("X-Auth", "100500")
      .body("login=mr.moderator&status=moderator")
      .unwrap();

    let req = ApiRequest::from_http(&req);
    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.path(), "/user/create");
    assert_eq!(req.form_value("login"), "mr.moderator");
    assert_eq!(req.form_value("status"), "moderator");
    assert_eq!(req.form_value("age"), "12");
    assert!(req.is_authorized());
  }

  #[test]
  fn test_from_http_ignores_non_form_body() {
    let req = http::Request::builder()
      .uri("/x")
      .header(CONTENT_TYPE, "application/json")
      .body(r#"{"login":"bob"}"#)
      .unwrap();
    assert_eq!(ApiRequest::from_http(&req).form_value("login"), "");
  }

  #[test]
  fn test_authorization_requires_exact_token() {
    let missing = ApiRequest::new(Method::POST, "/x");
    let wrong = ApiRequest::new(Method::POST, "/x").with_header("X-Auth", "123");
    let right = ApiRequest::new(Method::POST, "/x").with_header("X-Auth", "100500");
    assert!(!missing.is_authorized());
    assert!(!wrong.is_authorized());
    assert!(right.is_authorized());
  }
}
