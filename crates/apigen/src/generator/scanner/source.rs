//! Parser front-end: turns Rust source text into a [`SourceDocument`].
//!
//! This is the only place that touches `syn`'s item tree. The scanner and the
//! rule compiler work on the plain declaration model defined here.

use indexmap::IndexMap;
use itertools::Itertools;
use quote::ToTokens;
use syn::{
  Attribute, Expr, ExprLit, Fields, FnArg, ImplItem, Item, ItemImpl, ItemStruct, Lit, Meta, Type, TypePath, ext::IdentExt,
};

use crate::generator::{GeneratorError, ast::Visibility};

/// Declarations found at the top level of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
  /// Methods of inherent `impl` blocks, in declaration order.
  pub methods: Vec<MethodDecl>,
  /// Structs keyed by name, in declaration order.
  pub structs: IndexMap<String, StructDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
  pub receiver: String,
  /// Whether the enclosing `impl` block has generic parameters.
  pub receiver_is_generic: bool,
  pub name: String,
  pub docs: Vec<String>,
  pub takes_self: bool,
  pub is_async: bool,
  pub params: Vec<ParamDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
  /// Type as written, e.g. `CreateParams` or `&str`.
  pub type_name: String,
  /// Set when the type is a bare single-segment path such as `CreateParams`.
  pub type_ident: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
  pub name: String,
  pub visibility: Visibility,
  /// `false` for tuple and unit structs.
  pub has_named_fields: bool,
  pub is_generic: bool,
  pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
  pub name: String,
  /// Type as written, e.g. `String`, `i32`, `Option<String>`.
  pub type_name: String,
  pub docs: Vec<String>,
}

impl SourceDocument {
  pub fn parse(source: &str) -> Result<Self, GeneratorError> {
    let file = syn::parse_file(source)?;
    let mut document = Self::default();

    for item in &file.items {
      match item {
        Item::Impl(item_impl) if item_impl.trait_.is_none() => document.collect_methods(item_impl),
        Item::Struct(item_struct) => {
          let decl = StructDecl::from(item_struct);
          document.structs.insert(decl.name.clone(), decl);
        }
        _ => {}
      }
    }

    Ok(document)
  }

  fn collect_methods(&mut self, item_impl: &ItemImpl) {
    let Some(receiver) = self_type_name(&item_impl.self_ty) else {
      return;
    };
    let receiver_is_generic = !item_impl.generics.params.is_empty();

    for impl_item in &item_impl.items {
      let ImplItem::Fn(method) = impl_item else {
        continue;
      };
      let sig = &method.sig;
      let takes_self = matches!(sig.inputs.first(), Some(FnArg::Receiver(_)));
      let params = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
          FnArg::Typed(pat_type) => Some(ParamDecl::from(pat_type.ty.as_ref())),
          FnArg::Receiver(_) => None,
        })
        .collect();

      self.methods.push(MethodDecl {
        receiver: receiver.clone(),
        receiver_is_generic,
        name: sig.ident.unraw().to_string(),
        docs: doc_lines(&method.attrs),
        takes_self,
        is_async: sig.asyncness.is_some(),
        params,
      });
    }
  }
}

impl From<&Type> for ParamDecl {
  fn from(ty: &Type) -> Self {
    let type_ident = match ty {
      Type::Path(type_path) if type_path.qself.is_none() => type_path
        .path
        .get_ident()
        .map(|ident| ident.unraw().to_string()),
      _ => None,
    };
    Self {
      type_name: render_type(ty),
      type_ident,
    }
  }
}

impl From<&ItemStruct> for StructDecl {
  fn from(item: &ItemStruct) -> Self {
    let fields = match &item.fields {
      Fields::Named(named) => named
        .named
        .iter()
        .filter_map(|field| {
          let name = field.ident.as_ref()?.unraw().to_string();
          Some(FieldDecl {
            name,
            type_name: render_type(&field.ty),
            docs: doc_lines(&field.attrs),
          })
        })
        .collect(),
      Fields::Unnamed(_) | Fields::Unit => vec![],
    };

    Self {
      name: item.ident.unraw().to_string(),
      visibility: Visibility::from(&item.vis),
      has_named_fields: matches!(item.fields, Fields::Named(_)),
      is_generic: !item.generics.params.is_empty(),
      fields,
    }
  }
}

impl From<&syn::Visibility> for Visibility {
  fn from(vis: &syn::Visibility) -> Self {
    match vis {
      syn::Visibility::Public(_) => Visibility::Public,
      syn::Visibility::Restricted(_) => Visibility::Crate,
      syn::Visibility::Inherited => Visibility::File,
    }
  }
}

fn self_type_name(ty: &Type) -> Option<String> {
  match ty {
    Type::Path(type_path) if type_path.qself.is_none() => type_path
      .path
      .segments
      .last()
      .map(|segment| segment.ident.unraw().to_string()),
    _ => None,
  }
}

/// Collects `///` lines and `#[doc = "..."]` attributes, one entry per attribute.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
  attrs
    .iter()
    .filter(|attr| attr.path().is_ident("doc"))
    .filter_map(|attr| match &attr.meta {
      Meta::NameValue(name_value) => match &name_value.value {
        Expr::Lit(ExprLit { lit: Lit::Str(text), .. }) => Some(text.value()),
        _ => None,
      },
      _ => None,
    })
    .collect()
}

/// Plain paths render from their segments, so `::std::string::String` and
/// `std::string::String` give the same name. Other types fall back to their
/// tokens with the spacing collapsed.
fn render_type(ty: &Type) -> String {
  if let Type::Path(TypePath { qself: None, path }) = ty
    && path.segments.iter().all(|segment| segment.arguments.is_none())
  {
    return path
      .segments
      .iter()
      .map(|segment| segment.ident.unraw().to_string())
      .join("::");
  }

  ty.to_token_stream()
    .to_string()
    .replace(" :: ", "::")
    .replace(":: ", "::")
    .replace(" <", "<")
    .replace("< ", "<")
    .replace(" >", ">")
    .replace("& ", "&")
}
