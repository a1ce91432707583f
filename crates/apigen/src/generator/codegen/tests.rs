use http::Method;
use quote::{ToTokens, quote};

use super::{
  decode::{DecodeHelpersFragment, FieldDecodeFragment},
  dispatch::ReceiverFragment,
  handler::HandlerFragment,
  int_literal, rust_ident,
  validate::ValidatorFragment,
  validator_fn_ident,
};
use crate::generator::{
  GeneratorError,
  ast::{
    DescriptorSet, EndpointDescriptor, FieldDescriptor, FieldKind, IntegerPrimitive, ParamStructDescriptor, RuleKind,
    ValidatorRule, Visibility,
  },
};

fn text_field(name: &str, rules: &[(RuleKind, &str)]) -> FieldDescriptor {
  FieldDescriptor::builder()
    .name(name)
    .external_name(name)
    .kind(FieldKind::Text)
    .validators(rules.iter().map(|(kind, arg)| ValidatorRule::new(*kind, *arg)).collect())
    .build()
}

fn int_field(name: &str, rules: &[(RuleKind, &str)]) -> FieldDescriptor {
  FieldDescriptor::builder()
    .name(name)
    .external_name(name)
    .kind(FieldKind::Integer(IntegerPrimitive::I32))
    .validators(rules.iter().map(|(kind, arg)| ValidatorRule::new(*kind, *arg)).collect())
    .build()
}

fn params(fields: Vec<FieldDescriptor>) -> ParamStructDescriptor {
  ParamStructDescriptor::builder().name("CreateParams").fields(fields).build()
}

fn render(fragment: impl ToTokens) -> String {
  fragment.to_token_stream().to_string()
}

#[test]
fn naming_helpers() {
  assert_eq!(validator_fn_ident("CreateParams").to_string(), "validate_create_params");
  assert_eq!(validator_fn_ident("OtherCreateParams").to_string(), "validate_other_create_params");
  assert_eq!(rust_ident("login").to_string(), "login");
  assert_eq!(rust_ident("type").to_string(), "r#type");
}

#[test]
fn integer_literals() {
  assert_eq!(int_literal("128").to_string(), "128");
  assert_eq!(int_literal("+7").to_string(), "7");
  assert_eq!(int_literal("-5").to_string(), quote! { -5 }.to_string());
}

#[test]
fn required_then_min_on_text() {
  let def = params(vec![text_field("login", &[(RuleKind::Required, ""), (RuleKind::Min, "10")])]);
  let expected = quote! {
    pub fn validate_create_params(params: &mut CreateParams) -> Result<(), apigen_support::ApiError> {
      if params.login.is_empty() {
        return Err(apigen_support::ApiError::bad_request("login must not be empty"));
      }
      if params.login.len() < 10 {
        return Err(apigen_support::ApiError::bad_request("login len must be >= 10"));
      }
      Ok(())
    }
  };
  assert_eq!(render(ValidatorFragment::new(&def)), expected.to_string());
}

#[test]
fn required_is_superseded_by_later_default() {
  let def = params(vec![text_field(
    "login",
    &[(RuleKind::Required, ""), (RuleKind::Default, "guest")],
  )]);
  let code = render(ValidatorFragment::new(&def));
  assert!(!code.contains("must not be empty"), "{code}");
  let expected = quote! {
    if params.login.is_empty() {
      params.login = String::from("guest");
    }
  };
  assert!(code.contains(&expected.to_string()), "{code}");
}

#[test]
fn required_substitutes_default_before_intermediate_rules() {
  let def = params(vec![text_field(
    "nick",
    &[(RuleKind::Required, ""), (RuleKind::Min, "3"), (RuleKind::Default, "guest")],
  )]);
  let expected = quote! {
    pub fn validate_create_params(params: &mut CreateParams) -> Result<(), apigen_support::ApiError> {
      if params.nick.is_empty() {
        params.nick = String::from("guest");
      }
      if params.nick.len() < 3 {
        return Err(apigen_support::ApiError::bad_request("nick len must be >= 3"));
      }
      if params.nick.is_empty() {
        params.nick = String::from("guest");
      }
      Ok(())
    }
  };
  assert_eq!(render(ValidatorFragment::new(&def)), expected.to_string());
}

#[test]
fn enum_with_default_substitutes_zero_value() {
  let def = params(vec![text_field(
    "status",
    &[(RuleKind::Enum, "user|moderator|admin"), (RuleKind::Default, "user")],
  )]);
  let expected = quote! {
    if params.status.is_empty() {
      params.status = String::from("user");
    } else if !["user", "moderator", "admin"].contains(&params.status.as_str()) {
      return Err(apigen_support::ApiError::bad_request("status must be one of [user, moderator, admin]"));
    }
  };
  let code = render(ValidatorFragment::new(&def));
  assert!(code.contains(&expected.to_string()), "{code}");
}

#[test]
fn enum_without_default_on_integer() {
  let def = params(vec![int_field("level", &[(RuleKind::Enum, "1|2|-3")])]);
  let expected = quote! {
    if ![1, 2, -3].contains(&params.level) {
      return Err(apigen_support::ApiError::bad_request("level must be one of [1, 2, -3]"));
    }
  };
  let code = render(ValidatorFragment::new(&def));
  assert!(code.contains(&expected.to_string()), "{code}");
}

#[test]
fn integer_bounds_compare_values() {
  let def = params(vec![int_field("Age", &[(RuleKind::Min, "0"), (RuleKind::Max, "128")])]);
  let expected = quote! {
    if params.Age < 0 {
      return Err(apigen_support::ApiError::bad_request("age must be >= 0"));
    }
    if params.Age > 128 {
      return Err(apigen_support::ApiError::bad_request("age must be <= 128"));
    }
  };
  let code = render(ValidatorFragment::new(&def));
  assert!(code.contains(&expected.to_string()), "{code}");
}

#[test]
fn validator_visibility_follows_struct() {
  let cases = [
    (Visibility::Public, "pub fn validate_create_params"),
    (Visibility::Crate, "pub (crate) fn validate_create_params"),
    (Visibility::File, "fn validate_create_params"),
  ];
  for (visibility, prefix) in cases {
    let mut def = params(vec![]);
    def.visibility = visibility;
    let code = render(ValidatorFragment::new(&def));
    assert!(code.starts_with(prefix), "{visibility:?}: {code}");
  }
}

#[test]
fn validator_without_rules_ignores_params() {
  let def = params(vec![text_field("name", &[])]);
  let expected = quote! {
    pub fn validate_create_params(_params: &mut CreateParams) -> Result<(), apigen_support::ApiError> {
      Ok(())
    }
  };
  assert_eq!(render(ValidatorFragment::new(&def)), expected.to_string());
}

#[test]
fn field_decoding_uses_lowercased_external_name() {
  let field = FieldDescriptor::builder()
    .name("name")
    .external_name("Full_Name")
    .kind(FieldKind::Text)
    .build();
  let expected = quote! {
    let field_name = apigen_decode::text(req, "full_name");
  };
  assert_eq!(render(FieldDecodeFragment::new(&field)), expected.to_string());

  let field = int_field("age", &[]);
  let expected = quote! {
    let field_age = match apigen_decode::integer::<i32>(req, "age") {
      Ok(value) => value,
      Err(err) => return apigen_support::respond::api_error(&err),
    };
  };
  assert_eq!(render(FieldDecodeFragment::new(&field)), expected.to_string());
}

#[test]
fn decode_helpers_follow_field_kinds() {
  let text_only = params(vec![text_field("login", &[])]);
  let code = render(DecodeHelpersFragment::new([&text_only]));
  assert!(code.contains("fn text"), "{code}");
  assert!(!code.contains("fn integer"), "{code}");

  let mixed = params(vec![text_field("login", &[]), int_field("age", &[])]);
  let code = render(DecodeHelpersFragment::new([&mixed]));
  assert!(code.contains("fn text") && code.contains("fn integer"), "{code}");
  assert!(code.contains("\"{name} must be int\""), "{code}");

  assert!(render(DecodeHelpersFragment::new([&params(vec![])])).is_empty());
}

fn endpoint(method: &str, route: &str) -> EndpointDescriptor {
  EndpointDescriptor::builder()
    .receiver("MyApi")
    .method(method)
    .route(route)
    .param_type("CreateParams")
    .build()
}

#[test]
fn handler_gates_run_before_decoding() {
  let mut descriptor = endpoint("create", "/user/create");
  descriptor.auth = true;
  descriptor.http_method = Some(Method::POST);
  descriptor.is_async = true;
  let def = params(vec![text_field("login", &[])]);

  let expected = quote! {
    async fn handle_create(&self, req: &apigen_support::ApiRequest) -> apigen_support::ApiResponse {
      if !req.is_authorized() {
        return apigen_support::respond::unauthorized();
      }
      if req.method().as_str() != "POST" {
        return apigen_support::respond::bad_method();
      }
      let field_login = apigen_decode::text(req, "login");
      let mut params = CreateParams { login: field_login, };
      if let Err(err) = validate_create_params(&mut params) {
        return apigen_support::respond::api_error(&err);
      }
      let ctx = apigen_support::Context::background();
      match self.create(ctx, params).await {
        Ok(response) => apigen_support::respond::success(&response),
        Err(err) => apigen_support::respond::handler_error(&err),
      }
    }
  };
  assert_eq!(render(HandlerFragment::new(&descriptor, &def)), expected.to_string());
}

#[test]
fn handler_without_gates_calls_sync_method() {
  let descriptor = endpoint("profile", "/user/profile");
  let def = params(vec![]);
  let code = render(HandlerFragment::new(&descriptor, &def));
  assert!(!code.contains("is_authorized"), "{code}");
  assert!(!code.contains("bad_method"), "{code}");
  assert!(code.contains(&quote! { self.profile(ctx, params) }.to_string()), "{code}");
  assert!(!code.contains(&quote! { .await }.to_string()), "{code}");
}

#[test]
fn receiver_dispatches_exact_routes() {
  let endpoints = vec![endpoint("profile", "/user/profile"), endpoint("create", "/user/create")];
  let mut set = DescriptorSet::default();
  set
    .structs
    .insert("CreateParams".to_string(), params(vec![text_field("login", &[])]));

  let fragment = ReceiverFragment::new("MyApi", &endpoints, &set.structs).unwrap();
  let code = render(fragment);
  let expected = quote! {
    match req.path() {
      "/user/profile" => self.handle_profile(req).await,
      "/user/create" => self.handle_create(req).await,
      _ => apigen_support::respond::unknown_method(),
    }
  };
  assert!(code.starts_with(&quote! { impl MyApi }.to_string()), "{code}");
  assert!(code.contains(&expected.to_string()), "{code}");
}

#[test]
fn receiver_requires_compiled_param_struct() {
  let endpoints = vec![endpoint("profile", "/user/profile")];
  let set = DescriptorSet::default();
  let err = ReceiverFragment::new("MyApi", &endpoints, &set.structs).unwrap_err();
  assert!(matches!(err, GeneratorError::Resolution { .. }), "{err}");
}
