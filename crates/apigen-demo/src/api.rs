use std::{
  collections::HashMap,
  sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
  },
};

use apigen_support::{ApiError, Context, StatusCode};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
  pub id: u64,
  pub login: String,
  pub full_name: String,
  pub status: String,
  pub age: i32,
}

pub struct MyApi {
  users: Mutex<HashMap<String, User>>,
  next_id: AtomicU64,
}

impl Default for MyApi {
  fn default() -> Self {
    Self::new()
  }
}

impl MyApi {
  pub fn new() -> Self {
    let seed = User {
      id: 42,
      login: "rvasily".to_string(),
      full_name: "Vasily Romanov".to_string(),
      status: "user".to_string(),
      age: 30,
    };
    Self {
      users: Mutex::new(HashMap::from([(seed.login.clone(), seed)])),
      next_id: AtomicU64::new(43),
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileParams {
  /// apivalidator:"required"
  pub login: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateParams {
  /// apivalidator:"required,min=10"
  pub login: String,
  /// apivalidator:"paramname=full_name"
  pub name: String,
  /// apivalidator:"enum=user|moderator|admin,default=user"
  pub status: String,
  /// apivalidator:"min=0,max=128"
  pub age: i32,
}

impl MyApi {
  /// Looks a user up by login.
  ///
  /// apigen:api {"url": "/user/profile", "auth": false}
  pub fn profile(&self, _ctx: Context, params: ProfileParams) -> Result<User, ApiError> {
    let users = self
      .users
      .lock()
      .map_err(|_| ApiError::internal("user store is unavailable"))?;
    users
      .get(&params.login)
      .cloned()
      .ok_or_else(|| ApiError::not_found("user not exist"))
  }

  /// Registers a new user.
  ///
  /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
  pub async fn create(&self, _ctx: Context, params: CreateParams) -> anyhow::Result<User> {
    if params.login == "bad_username" {
      anyhow::bail!("bad user");
    }

    let mut users = self
      .users
      .lock()
      .map_err(|_| ApiError::internal("user store is unavailable"))?;
    if users.contains_key(&params.login) {
      return Err(ApiError::new(StatusCode::CONFLICT, format!("user {} exist", params.login)).into());
    }

    let user = User {
      id: self.next_id.fetch_add(1, Ordering::Relaxed),
      login: params.login,
      full_name: params.name,
      status: params.status,
      age: params.age,
    };
    users.insert(user.login.clone(), user.clone());
    Ok(user)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherUser {
  pub id: u64,
  pub login: String,
  pub full_name: String,
  pub class: String,
  pub level: u8,
}

#[derive(Debug, Default)]
pub struct OtherApi;

#[derive(Debug, Clone, Default)]
pub struct OtherCreateParams {
  /// apivalidator:"required,min=3"
  pub username: String,
  /// apivalidator:"paramname=account_name"
  pub name: String,
  /// apivalidator:"enum=warrior|sorcerer|rouge,default=warrior"
  pub class: String,
  /// apivalidator:"min=1,max=50"
  pub level: u8,
}

#[derive(Debug, Clone, Default)]
pub struct JoinParams {
  /// apivalidator:"required,min=5,default=adventurer"
  pub nick: String,
}

impl OtherApi {
  /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
  pub fn create(
    &self,
    _ctx: Context,
    params: OtherCreateParams,
  ) -> Result<OtherUser, Box<dyn std::error::Error + Send + Sync>> {
    if params.username == "bad_username" {
      return Err("bad user".into());
    }
    Ok(OtherUser {
      id: 12,
      login: params.username,
      full_name: params.name,
      class: params.class,
      level: params.level,
    })
  }

  /// apigen:api {"url": "/guild/join"}
  pub fn join(&self, _ctx: Context, params: JoinParams) -> Result<String, ApiError> {
    Ok(format!("{} joined", params.nick))
  }
}

include!(concat!(env!("OUT_DIR"), "/api_handlers.rs"));
