#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
//! Generates HTTP dispatch, request decoding and validation code for Rust
//! methods annotated with an `apigen:api` doc comment.
//!
//! The pipeline lives in [`generator`]; [`generator::orchestrator::Orchestrator`]
//! is the entry point for build scripts and the `apigen` binary alike.

pub mod generator;
