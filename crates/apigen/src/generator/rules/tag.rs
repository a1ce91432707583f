use itertools::Itertools;

use crate::generator::{
  VALIDATOR_TAG,
  ast::{RuleKind, ValidatorRule},
};

/// Finds the `apivalidator:"..."` tag in a field's doc lines and returns its body.
pub fn extract_tag(docs: &[String]) -> Result<Option<&str>, String> {
  let prefix = format!("{VALIDATOR_TAG}:\"");

  for line in docs {
    let Some(pos) = line.find(&prefix) else {
      continue;
    };
    let body = &line[pos + prefix.len()..];
    let end = body
      .find('"')
      .ok_or_else(|| format!("unterminated {VALIDATOR_TAG} tag: missing closing quote"))?;
    return Ok(Some(&body[..end]));
  }

  Ok(None)
}

/// Splits a tag body into rules in the order they are written.
///
/// Tokens are separated by `,` and split on the first `=`; a token without
/// `=` has an empty argument. Blank tokens are skipped.
pub fn parse_tag(tag: &str) -> Result<Vec<ValidatorRule>, String> {
  tag
    .split(',')
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .map(|token| {
      let (kind, argument) = token.split_once('=').unwrap_or((token, ""));
      let kind = kind
        .trim()
        .parse::<RuleKind>()
        .map_err(|_| format!("unknown validator `{}`", kind.trim()))?;
      Ok(ValidatorRule::new(kind, argument))
    })
    .collect()
}

/// Renders rules back into tag syntax.
pub fn render_tag(rules: &[ValidatorRule]) -> String {
  rules.iter().join(",")
}
