//! Declaration Scanner: finds annotated methods and the structs they take.

mod marker;
pub mod source;

use indexmap::IndexMap;

pub use source::{FieldDecl, MethodDecl, ParamDecl, SourceDocument, StructDecl};

use crate::generator::{GeneratorError, ast::EndpointDescriptor};


/// Endpoints grouped by receiver, plus every struct they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
  pub endpoints: IndexMap<String, Vec<EndpointDescriptor>>,
  pub structs: IndexMap<String, StructDecl>,
}

pub struct DeclarationScanner<'a> {
  document: &'a SourceDocument,
}

impl<'a> DeclarationScanner<'a> {
  pub fn new(document: &'a SourceDocument) -> Self {
    Self { document }
  }

  /// Builds an endpoint for every marked method, in declaration order.
  pub fn scan(&self) -> Result<ScanResult, GeneratorError> {
    let mut result = ScanResult::default();

    for method in &self.document.methods {
      let Some(marker_line) = marker::find_marker(&method.docs) else {
        continue;
      };

      let endpoint = Self::build_endpoint(method, marker_line)?;
      let param_struct = self.resolve_param_struct(method, &endpoint.param_type)?;
      result
        .structs
        .entry(param_struct.name.clone())
        .or_insert_with(|| param_struct.clone());

      let endpoints = result.endpoints.entry(endpoint.receiver.clone()).or_default();
      if endpoints.iter().any(|existing| existing.route == endpoint.route) {
        return Err(GeneratorError::DuplicateRoute {
          receiver: endpoint.receiver,
          route: endpoint.route,
        });
      }
      endpoints.push(endpoint);
    }

    Ok(result)
  }

  fn build_endpoint(method: &MethodDecl, marker_line: &str) -> Result<EndpointDescriptor, GeneratorError> {
    let qualified = format!("{}::{}", method.receiver, method.name);
    let config = marker::parse_config(&qualified, marker_line)?;
    let http_method = marker::resolve_http_method(&qualified, &config)?;

    if method.receiver_is_generic {
      return Err(GeneratorError::resolution(
        &qualified,
        "methods of generic impl blocks are not supported",
      ));
    }
    if !method.takes_self {
      return Err(GeneratorError::resolution(&qualified, "annotated methods must take `self`"));
    }
    let [_, param] = method.params.as_slice() else {
      return Err(GeneratorError::resolution(
        &qualified,
        format!(
          "expected two parameters (context, params), found {}",
          method.params.len()
        ),
      ));
    };
    let Some(param_type) = &param.type_ident else {
      return Err(GeneratorError::resolution(
        &qualified,
        format!("parameter type `{}` must be a plain struct name", param.type_name),
      ));
    };

    Ok(
      EndpointDescriptor::builder()
        .receiver(method.receiver.as_str())
        .method(method.name.as_str())
        .route(config.url.trim())
        .auth(config.auth)
        .maybe_http_method(http_method)
        .param_type(param_type.as_str())
        .is_async(method.is_async)
        .build(),
    )
  }

  fn resolve_param_struct(&self, method: &MethodDecl, type_name: &str) -> Result<&'a StructDecl, GeneratorError> {
    let context = format!("parameter type `{type_name}` of {}::{}", method.receiver, method.name);
    let decl = self
      .document
      .structs
      .get(type_name)
      .ok_or_else(|| GeneratorError::resolution(&context, "no struct with this name is declared in the source file"))?;

    if !decl.has_named_fields {
      return Err(GeneratorError::resolution(&context, "only structs with named fields are supported"));
    }
    if decl.is_generic {
      return Err(GeneratorError::resolution(&context, "generic parameter structs are not supported"));
    }
    Ok(decl)
  }
}
