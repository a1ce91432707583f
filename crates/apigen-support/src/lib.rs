//! Runtime support for handlers emitted by `apigen`.
//!
//! Generated code references this crate by absolute path (`apigen_support::...`),
//! so the crate that hosts the generated handlers only needs it as a dependency.

mod context;
mod error;
mod request;
pub mod respond;

pub use context::Context;
pub use error::{ApiError, HandlerError};
pub use http::{Method, StatusCode};
pub use request::ApiRequest;

/// Response type produced by every generated handler.
pub type ApiResponse = http::Response<String>;

/// Header carrying the trust token checked by authenticated endpoints.
pub const AUTH_HEADER: &str = "x-auth";

/// Token value an authenticated request must present in [`AUTH_HEADER`].
pub const AUTH_TOKEN: &str = "100500";
