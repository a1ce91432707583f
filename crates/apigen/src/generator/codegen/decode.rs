use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};

use crate::generator::ast::{FieldDescriptor, FieldKind, ParamStructDescriptor};

/// Local binding that holds a field's decoded value inside a handler.
pub(crate) fn local_ident(field: &FieldDescriptor) -> syn::Ident {
  format_ident!("field_{}", field.name)
}

/// Decodes one field from the request form into its local binding.
///
/// Text fields are copied as-is. Integer fields short-circuit the handler with
/// a 400 `"<name> must be int"` response when the value does not parse.
#[derive(Clone, Debug)]
pub(crate) struct FieldDecodeFragment<'a> {
  field: &'a FieldDescriptor,
}

impl<'a> FieldDecodeFragment<'a> {
  pub(crate) fn new(field: &'a FieldDescriptor) -> Self {
    Self { field }
  }
}

impl ToTokens for FieldDecodeFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let local = local_ident(self.field);
    let external = self.field.external_name.to_lowercase();

    tokens.extend(match self.field.kind {
      FieldKind::Text => quote! {
        let #local = apigen_decode::text(req, #external);
      },
      FieldKind::Integer(primitive) => quote! {
        let #local = match apigen_decode::integer::<#primitive>(req, #external) {
          Ok(value) => value,
          Err(err) => return apigen_support::respond::api_error(&err),
        };
      },
    });
  }
}

/// Private `apigen_decode` module with the helpers the emitted handlers call.
///
/// Only the helpers some field actually needs are emitted, and the module is
/// omitted entirely when no struct has fields.
#[derive(Clone, Debug, Default)]
pub(crate) struct DecodeHelpersFragment {
  text: bool,
  integer: bool,
}

impl DecodeHelpersFragment {
  pub(crate) fn new<'a>(structs: impl IntoIterator<Item = &'a ParamStructDescriptor>) -> Self {
    structs
      .into_iter()
      .flat_map(|def| &def.fields)
      .fold(Self::default(), |acc, field| match field.kind {
        FieldKind::Text => Self { text: true, ..acc },
        FieldKind::Integer(_) => Self { integer: true, ..acc },
      })
  }
}

impl ToTokens for DecodeHelpersFragment {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    if !self.text && !self.integer {
      return;
    }

    let text = self.text.then(|| {
      quote! {
        pub(super) fn text(req: &apigen_support::ApiRequest, name: &str) -> String {
          req.form_value(name).to_string()
        }
      }
    });
    let integer = self.integer.then(|| {
      quote! {
        pub(super) fn integer<T: std::str::FromStr>(
          req: &apigen_support::ApiRequest,
          name: &str,
        ) -> Result<T, apigen_support::ApiError> {
          req
            .form_value(name)
            .parse::<T>()
            .map_err(|_| apigen_support::ApiError::bad_request(format!("{name} must be int")))
        }
      }
    });

    tokens.extend(quote! {
      mod apigen_decode {
        #text

        #integer
      }
    });
  }
}
