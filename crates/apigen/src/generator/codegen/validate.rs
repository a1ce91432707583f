use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{int_literal, rust_ident, validator_fn_ident};
use crate::generator::ast::{FieldDescriptor, FieldKind, ParamStructDescriptor, RuleKind, ValidatorRule};

/// Module-level `validate_<struct>` function applying every field's rules in tag order.
///
/// The function mutates the parameters in place so `default` can fill zero
/// values, and returns the first failure as a 400 `ApiError`.
#[derive(Clone, Debug)]
pub(crate) struct ValidatorFragment<'a> {
  def: &'a ParamStructDescriptor,
}

impl<'a> ValidatorFragment<'a> {
  pub(crate) fn new(def: &'a ParamStructDescriptor) -> Self {
    Self { def }
  }
}

impl ToTokens for ValidatorFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let vis = self.def.visibility.to_tokens();
    let name = rust_ident(&self.def.name);
    let fn_name = validator_fn_ident(&self.def.name);
    let checks = self
      .def
      .fields
      .iter()
      .filter(|field| !field.validators.is_empty())
      .map(FieldRulesFragment::new)
      .collect::<Vec<_>>();
    let params = if checks.is_empty() {
      quote! { _params }
    } else {
      quote! { params }
    };

    tokens.extend(quote! {
      #vis fn #fn_name(#params: &mut #name) -> Result<(), apigen_support::ApiError> {
        #(#checks)*
        Ok(())
      }
    });
  }
}

/// Checks for a single field, one block per rule in declared order.
#[derive(Clone, Debug)]
struct FieldRulesFragment<'a> {
  field: &'a FieldDescriptor,
}

impl<'a> FieldRulesFragment<'a> {
  fn new(field: &'a FieldDescriptor) -> Self {
    Self { field }
  }

  fn access(&self) -> TokenStream {
    let ident = rust_ident(&self.field.name);
    quote! { params.#ident }
  }

  fn is_zero(&self) -> TokenStream {
    let access = self.access();
    match self.field.kind {
      FieldKind::Text => quote! { #access.is_empty() },
      FieldKind::Integer(_) => quote! { #access == 0 },
    }
  }

  fn literal(&self, value: &str) -> TokenStream {
    match self.field.kind {
      FieldKind::Text => quote! { String::from(#value) },
      FieldKind::Integer(_) => int_literal(value),
    }
  }

  fn fail(message: &str) -> TokenStream {
    quote! { return Err(apigen_support::ApiError::bad_request(#message)); }
  }

  /// The first `default` literal declared after the rule at `index`.
  ///
  /// A `required` rule followed by a `default` becomes the substitution
  /// itself, so the rules in between see the default instead of the zero value.
  fn later_default(&self, index: usize) -> Option<&'a str> {
    self.field.validators[index + 1..]
      .iter()
      .find(|rule| rule.kind == RuleKind::Default)
      .map(|rule| rule.argument.as_str())
  }

  fn rule(&self, index: usize, rule: &ValidatorRule) -> Option<TokenStream> {
    let name = self.field.message_name();
    let access = self.access();
    let zero = self.is_zero();

    let block = match (rule.kind, self.field.kind) {
      (RuleKind::Required, _) => match self.later_default(index) {
        Some(default) => {
          let value = self.literal(default);
          quote! { if #zero { #access = #value; } }
        }
        None => {
          let fail = Self::fail(&format!("{name} must not be empty"));
          quote! { if #zero { #fail } }
        }
      },
      (RuleKind::Default, _) => {
        let value = self.literal(&rule.argument);
        quote! { if #zero { #access = #value; } }
      }
      (RuleKind::Min, FieldKind::Text) => {
        let bound = int_literal(&rule.argument);
        let fail = Self::fail(&format!("{name} len must be >= {}", display_int(&rule.argument)));
        quote! { if #access.len() < #bound { #fail } }
      }
      (RuleKind::Max, FieldKind::Text) => {
        let bound = int_literal(&rule.argument);
        let fail = Self::fail(&format!("{name} len must be <= {}", display_int(&rule.argument)));
        quote! { if #access.len() > #bound { #fail } }
      }
      (RuleKind::Min, FieldKind::Integer(_)) => {
        let bound = int_literal(&rule.argument);
        let fail = Self::fail(&format!("{name} must be >= {}", display_int(&rule.argument)));
        quote! { if #access < #bound { #fail } }
      }
      (RuleKind::Max, FieldKind::Integer(_)) => {
        let bound = int_literal(&rule.argument);
        let fail = Self::fail(&format!("{name} must be <= {}", display_int(&rule.argument)));
        quote! { if #access > #bound { #fail } }
      }
      (RuleKind::Enum, kind) => {
        let values = rule.enum_values();
        let fail = Self::fail(&format!("{name} must be one of [{}]", values.iter().join(", ")));
        let membership = match kind {
          FieldKind::Text => quote! { [#(#values),*].contains(&#access.as_str()) },
          FieldKind::Integer(_) => {
            let literals = values.iter().map(|value| int_literal(value));
            quote! { [#(#literals),*].contains(&#access) }
          }
        };
        match self.field.default_literal() {
          Some(default) => {
            let value = self.literal(default);
            quote! {
              if #zero {
                #access = #value;
              } else if !#membership {
                #fail
              }
            }
          }
          None => quote! { if !#membership { #fail } },
        }
      }
      (RuleKind::Paramname, _) => return None,
    };

    Some(block)
  }
}

impl ToTokens for FieldRulesFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let blocks = self
      .field
      .validators
      .iter()
      .enumerate()
      .filter_map(|(index, rule)| self.rule(index, rule));
    tokens.extend(quote! { #(#blocks)* });
  }
}

fn display_int(literal: &str) -> &str {
  literal.trim_start_matches('+')
}
