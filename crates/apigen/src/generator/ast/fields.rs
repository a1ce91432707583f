use std::fmt::{Display, Formatter};

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use strum::{Display as StrumDisplay, EnumString};
use syn::Ident;

use super::{RuleKind, ValidatorRule, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum IntegerPrimitive {
  I8,
  I16,
  I32,
  I64,
  I128,
  Isize,
  U8,
  U16,
  U32,
  U64,
  U128,
  Usize,
}

impl IntegerPrimitive {
  /// Whether `literal` is a valid value of this primitive.
  pub fn accepts(self, literal: &str) -> bool {
    match self {
      Self::I8 => literal.parse::<i8>().is_ok(),
      Self::I16 => literal.parse::<i16>().is_ok(),
      Self::I32 => literal.parse::<i32>().is_ok(),
      Self::I64 => literal.parse::<i64>().is_ok(),
      Self::I128 => literal.parse::<i128>().is_ok(),
      Self::Isize => literal.parse::<isize>().is_ok(),
      Self::U8 => literal.parse::<u8>().is_ok(),
      Self::U16 => literal.parse::<u16>().is_ok(),
      Self::U32 => literal.parse::<u32>().is_ok(),
      Self::U64 => literal.parse::<u64>().is_ok(),
      Self::U128 => literal.parse::<u128>().is_ok(),
      Self::Usize => literal.parse::<usize>().is_ok(),
    }
  }
}

impl ToTokens for IntegerPrimitive {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    Ident::new(&self.to_string(), Span::call_site()).to_tokens(tokens);
  }
}

/// Primitive kind a field is decoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
  Text,
  Integer(IntegerPrimitive),
}

impl FieldKind {
  /// Maps a declared field type to a kind; `None` for unsupported types.
  pub fn from_type_name(type_name: &str) -> Option<Self> {
    match type_name {
      "String" | "std::string::String" | "alloc::string::String" => Some(Self::Text),
      other => other.parse::<IntegerPrimitive>().ok().map(Self::Integer),
    }
  }
}

impl Display for FieldKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Text => f.write_str("String"),
      Self::Integer(primitive) => write!(f, "{primitive}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct FieldDescriptor {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub external_name: String,
  pub kind: FieldKind,
  #[builder(default)]
  pub validators: Vec<ValidatorRule>,
}

impl FieldDescriptor {
  /// Literal of the first `default` rule, if the field declares one.
  pub fn default_literal(&self) -> Option<&str> {
    self
      .validators
      .iter()
      .find(|rule| rule.kind == RuleKind::Default)
      .map(|rule| rule.argument.as_str())
  }

  /// Name used in validation messages.
  pub fn message_name(&self) -> String {
    self.name.to_lowercase()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ParamStructDescriptor {
  #[builder(into)]
  pub name: String,
  #[builder(default)]
  pub visibility: Visibility,
  #[builder(default)]
  pub fields: Vec<FieldDescriptor>,
}
