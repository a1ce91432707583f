//! Validator Rule Compiler: turns parameter-struct declarations into field descriptors.

pub mod tag;

use crate::generator::{
  GeneratorError,
  ast::{FieldDescriptor, FieldKind, ParamStructDescriptor, RuleKind, ValidatorRule},
  scanner::{FieldDecl, StructDecl},
};


pub struct RuleCompiler;

impl RuleCompiler {
  pub fn compile_struct(decl: &StructDecl) -> Result<ParamStructDescriptor, GeneratorError> {
    let fields = decl
      .fields
      .iter()
      .map(|field| Self::compile_field(&decl.name, field))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(
      ParamStructDescriptor::builder()
        .name(decl.name.as_str())
        .visibility(decl.visibility)
        .fields(fields)
        .build(),
    )
  }

  pub fn compile_field(owner: &str, field: &FieldDecl) -> Result<FieldDescriptor, GeneratorError> {
    let kind = FieldKind::from_type_name(&field.type_name).ok_or_else(|| {
      GeneratorError::resolution(
        format!("field `{owner}.{}`", field.name),
        format!(
          "type `{}` cannot be decoded from request data; use `String` or an integer primitive",
          field.type_name
        ),
      )
    })?;
    let tag_error = |reason: String| GeneratorError::tag(owner, &field.name, reason);

    let tag = tag::extract_tag(&field.docs).map_err(tag_error)?.unwrap_or_default();
    let rules = tag::parse_tag(tag).map_err(tag_error)?;

    let mut external_name: Option<String> = None;
    let mut validators = Vec::with_capacity(rules.len());
    for rule in rules {
      check_argument(&rule, kind).map_err(tag_error)?;
      if rule.kind == RuleKind::Paramname {
        if external_name.replace(rule.argument).is_some() {
          return Err(tag_error("`paramname` is given more than once".to_string()));
        }
      } else {
        validators.push(rule);
      }
    }

    Ok(
      FieldDescriptor::builder()
        .name(field.name.as_str())
        .external_name(external_name.unwrap_or_else(|| field.name.clone()))
        .kind(kind)
        .validators(validators)
        .build(),
    )
  }
}

fn check_argument(rule: &ValidatorRule, kind: FieldKind) -> Result<(), String> {
  let argument = rule.argument.as_str();
  match (rule.kind, kind) {
    (RuleKind::Required, _) if !argument.is_empty() => Err(format!("`required` takes no argument, found `{argument}`")),
    (RuleKind::Min | RuleKind::Max, FieldKind::Text) if argument.parse::<usize>().is_err() => Err(format!(
      "`{}` on a string field expects a length, found `{argument}`",
      rule.kind
    )),
    (RuleKind::Min | RuleKind::Max, FieldKind::Integer(primitive)) if !primitive.accepts(argument) => Err(format!(
      "`{}` expects a {primitive} value, found `{argument}`",
      rule.kind
    )),
    (RuleKind::Enum, _) if rule.enum_values().iter().any(|value| value.is_empty()) => {
      Err("`enum` expects a `|`-separated list of non-empty values".to_string())
    }
    (RuleKind::Enum, FieldKind::Integer(primitive)) => match rule.enum_values().into_iter().find(|v| !primitive.accepts(v)) {
      Some(value) => Err(format!("`enum` value `{value}` is not a valid {primitive}")),
      None => Ok(()),
    },
    (RuleKind::Default, FieldKind::Integer(primitive)) if !primitive.accepts(argument) => Err(format!(
      "`default` expects a {primitive} value, found `{argument}`"
    )),
    (RuleKind::Paramname, _) if argument.is_empty() || argument.contains(char::is_whitespace) => {
      Err(format!("`paramname` expects a parameter name, found `{argument}`"))
    }
    _ => Ok(()),
  }
}
