use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{
  decode::{FieldDecodeFragment, local_ident},
  handler_ident, rust_ident, validator_fn_ident,
};
use crate::generator::ast::{EndpointDescriptor, ParamStructDescriptor};

/// Per-endpoint handler: gates, decoding, validation and the business call.
///
/// The steps run in a fixed order and the first failing one produces the
/// response: auth (403), method (406), decode (400), validation (400).
#[derive(Clone, Debug)]
pub(crate) struct HandlerFragment<'a> {
  endpoint: &'a EndpointDescriptor,
  params: &'a ParamStructDescriptor,
}

impl<'a> HandlerFragment<'a> {
  pub(crate) fn new(endpoint: &'a EndpointDescriptor, params: &'a ParamStructDescriptor) -> Self {
    Self { endpoint, params }
  }

  fn auth_gate(&self) -> Option<TokenStream> {
    self.endpoint.auth.then(|| {
      quote! {
        if !req.is_authorized() {
          return apigen_support::respond::unauthorized();
        }
      }
    })
  }

  fn method_gate(&self) -> Option<TokenStream> {
    self.endpoint.http_method.as_ref().map(|method| {
      let verb = method.as_str();
      quote! {
        if req.method().as_str() != #verb {
          return apigen_support::respond::bad_method();
        }
      }
    })
  }

  fn business_call(&self) -> TokenStream {
    let method = rust_ident(&self.endpoint.method);
    if self.endpoint.is_async {
      quote! { self.#method(ctx, params).await }
    } else {
      quote! { self.#method(ctx, params) }
    }
  }
}

impl ToTokens for HandlerFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let handler = handler_ident(&self.endpoint.method);
    let param_type = rust_ident(&self.params.name);
    let validate = validator_fn_ident(&self.params.name);

    let auth_gate = self.auth_gate();
    let method_gate = self.method_gate();
    let decodes = self.params.fields.iter().map(FieldDecodeFragment::new);
    let field_names = self.params.fields.iter().map(|field| rust_ident(&field.name));
    let locals = self.params.fields.iter().map(local_ident);
    let call = self.business_call();

    tokens.extend(quote! {
      async fn #handler(&self, req: &apigen_support::ApiRequest) -> apigen_support::ApiResponse {
        #auth_gate
        #method_gate

        #(#decodes)*

        let mut params = #param_type {
          #(#field_names: #locals,)*
        };
        if let Err(err) = #validate(&mut params) {
          return apigen_support::respond::api_error(&err);
        }

        let ctx = apigen_support::Context::background();
        match #call {
          Ok(response) => apigen_support::respond::success(&response),
          Err(err) => apigen_support::respond::handler_error(&err),
        }
      }
    });
  }
}
