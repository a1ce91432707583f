pub mod ast;
pub(crate) mod codegen;
pub mod errors;
pub mod orchestrator;
pub mod rules;
pub mod scanner;


pub use errors::GeneratorError;

/// Doc-comment token that marks a method for generation.
pub const API_MARKER: &str = "apigen:api";

/// Name of the validation tag on parameter-struct fields.
pub const VALIDATOR_TAG: &str = "apivalidator";
