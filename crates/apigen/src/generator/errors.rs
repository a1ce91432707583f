use strum::Display;

/// Fatal generation errors. Any of them aborts the run before output is written.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GeneratorError {
  #[strum(to_string = "input file '{path}' does not exist")]
  InputNotFound { path: String },
  #[strum(to_string = "cannot parse source: {message}")]
  Parse { message: String },
  #[strum(to_string = "invalid {marker} configuration on method '{method}': {reason}")]
  Config {
    marker: &'static str,
    method: String,
    reason: String,
  },
  #[strum(to_string = "cannot resolve {context}: {reason}")]
  Resolution { context: String, reason: String },
  #[strum(to_string = "invalid validator tag on '{owner}.{field}': {reason}")]
  Tag {
    owner: String,
    field: String,
    reason: String,
  },
  #[strum(to_string = "duplicate route '{route}' on receiver '{receiver}'")]
  DuplicateRoute { receiver: String, route: String },
}

impl std::error::Error for GeneratorError {}

impl GeneratorError {
  pub(crate) fn config(method: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Config {
      marker: super::API_MARKER,
      method: method.into(),
      reason: reason.into(),
    }
  }

  pub(crate) fn resolution(context: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Resolution {
      context: context.into(),
      reason: reason.into(),
    }
  }

  pub(crate) fn tag(owner: impl Into<String>, field: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Tag {
      owner: owner.into(),
      field: field.into(),
      reason: reason.into(),
    }
  }
}

impl From<syn::Error> for GeneratorError {
  fn from(err: syn::Error) -> Self {
    Self::Parse {
      message: err.to_string(),
    }
  }
}
