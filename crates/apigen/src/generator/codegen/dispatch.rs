use indexmap::IndexMap;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{handler::HandlerFragment, handler_ident, rust_ident};
use crate::generator::{
  GeneratorError,
  ast::{EndpointDescriptor, ParamStructDescriptor},
};

/// `serve_http` entry point plus one handler per endpoint for a receiver.
///
/// Routes are matched exactly against the request path; anything else gets
/// the 404 `"unknown method"` envelope.
#[derive(Clone, Debug)]
pub(crate) struct ReceiverFragment<'a> {
  receiver: &'a str,
  handlers: Vec<(&'a EndpointDescriptor, HandlerFragment<'a>)>,
}

impl<'a> ReceiverFragment<'a> {
  pub(crate) fn new(
    receiver: &'a str,
    endpoints: &'a [EndpointDescriptor],
    structs: &'a IndexMap<String, ParamStructDescriptor>,
  ) -> Result<Self, GeneratorError> {
    let handlers = endpoints
      .iter()
      .map(|endpoint| {
        let params = structs.get(&endpoint.param_type).ok_or_else(|| {
          GeneratorError::resolution(
            format!("parameter type `{}` of {receiver}::{}", endpoint.param_type, endpoint.method),
            "no descriptor was compiled for this struct",
          )
        })?;
        Ok((endpoint, HandlerFragment::new(endpoint, params)))
      })
      .collect::<Result<Vec<_>, GeneratorError>>()?;

    Ok(Self { receiver, handlers })
  }
}

impl ToTokens for ReceiverFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let receiver = rust_ident(self.receiver);
    let routes = self.handlers.iter().map(|(endpoint, _)| endpoint.route.as_str());
    let handler_names = self.handlers.iter().map(|(endpoint, _)| handler_ident(&endpoint.method));
    let handlers = self.handlers.iter().map(|(_, handler)| handler);

    tokens.extend(quote! {
      impl #receiver {
        pub async fn serve_http(&self, req: &apigen_support::ApiRequest) -> apigen_support::ApiResponse {
          match req.path() {
            #(#routes => self.#handler_names(req).await,)*
            _ => apigen_support::respond::unknown_method(),
          }
        }

        #(#handlers)*
      }
    });
  }
}
