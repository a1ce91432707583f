//! Sample user API served through handlers that `apigen` generates at build time.
//!
//! The business types live in [`api`]; `build.rs` runs the generator over that
//! file and the output is `include!`d at its end.

pub mod api;

pub use api::{MyApi, OtherApi};
