//! Code Emitter: renders the descriptor set into handler, validation and decoding code.
//!
//! Every emitted item names runtime types by absolute `apigen_support::` paths,
//! so the output needs no `use` items and can be `include!`d next to the
//! annotated types.

use inflections::Inflect;
use proc_macro2::{Literal, Span, TokenStream};
use quote::{ToTokens, format_ident, quote};
use syn::Ident;

use crate::generator::{GeneratorError, ast::DescriptorSet};

pub(crate) mod decode;
pub(crate) mod dispatch;
pub(crate) mod handler;
pub(crate) mod validate;

#[cfg(test)]
mod tests;

pub(crate) fn generate(set: &DescriptorSet) -> Result<TokenStream, GeneratorError> {
  let receivers = set
    .endpoints
    .iter()
    .map(|(receiver, endpoints)| dispatch::ReceiverFragment::new(receiver, endpoints, &set.structs))
    .collect::<Result<Vec<_>, _>>()?;
  let validators = set.structs.values().map(validate::ValidatorFragment::new);
  let helpers = decode::DecodeHelpersFragment::new(set.structs.values());

  Ok(quote! {
    #(#receivers)*

    #(#validators)*

    #helpers
  })
}

/// Identifier for a Rust name, falling back to a raw identifier for keywords.
pub(crate) fn rust_ident(name: &str) -> Ident {
  syn::parse_str::<Ident>(name).unwrap_or_else(|_| Ident::new_raw(name, Span::call_site()))
}

pub(crate) fn validator_fn_ident(struct_name: &str) -> Ident {
  format_ident!("validate_{}", struct_name.to_snake_case())
}

pub(crate) fn handler_ident(method: &str) -> Ident {
  format_ident!("handle_{}", method)
}

/// Integer literal tokens for an already validated literal such as `-5` or `128`.
pub(crate) fn int_literal(literal: &str) -> TokenStream {
  let literal = literal.trim_start_matches('+');
  let (negative, digits) = match literal.strip_prefix('-') {
    Some(digits) => (true, digits),
    None => (false, literal),
  };

  match digits.parse::<u128>() {
    Ok(value) if negative => {
      let lit = Literal::u128_unsuffixed(value);
      quote! { -#lit }
    }
    Ok(value) => Literal::u128_unsuffixed(value).into_token_stream(),
    Err(_) => {
      let message = format!("invalid integer literal `{literal}`");
      quote! { compile_error!(#message) }
    }
  }
}
