use std::fmt::{Display, Formatter};

use strum::{Display as StrumDisplay, EnumString};

/// Validator kinds understood by the tag grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RuleKind {
  Required,
  Min,
  Max,
  Enum,
  Default,
  Paramname,
}

/// One `kind[=argument]` entry of a field tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRule {
  pub kind: RuleKind,
  pub argument: String,
}

impl ValidatorRule {
  pub fn new(kind: RuleKind, argument: impl Into<String>) -> Self {
    Self {
      kind,
      argument: argument.into(),
    }
  }

  /// Literal set of an `enum` rule, in declared order.
  pub fn enum_values(&self) -> Vec<&str> {
    self.argument.split('|').collect()
  }
}

impl Display for ValidatorRule {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.argument.is_empty() {
      write!(f, "{}", self.kind)
    } else {
      write!(f, "{}={}", self.kind, self.argument)
    }
  }
}
