//! Orchestration for the annotated-source to handler-code pipeline.
//!
//! The orchestrator runs the three stages in order (scan, compile rules,
//! emit) and formats the result. Any stage error aborts the run before a
//! single line of output is produced.
//!
//! ## Usage
//!
//! ```no_run
//! use apigen::generator::orchestrator::Orchestrator;
//!
//! # fn example() -> anyhow::Result<()> {
//! let source = std::fs::read_to_string("src/api.rs")?;
//!
//! let orchestrator = Orchestrator::new(source);
//! let (code, stats) = orchestrator.generate_with_header("src/api.rs")?;
//!
//! println!("Generated {} handlers for {} receivers", stats.endpoints, stats.receivers);
//! std::fs::write("src/api_handlers.rs", code)?;
//! # Ok(())
//! # }
//! ```

use indexmap::IndexMap;

use crate::generator::{
  ast::DescriptorSet,
  codegen,
  rules::RuleCompiler,
  scanner::{DeclarationScanner, SourceDocument},
};

/// High-level entry point for generating handler code from one source file.
pub struct Orchestrator {
  source: String,
}

/// Statistics about the code generation process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
  /// Receiver types that got a `serve_http` dispatcher
  pub receivers: usize,
  /// Annotated methods turned into handlers
  pub endpoints: usize,
  /// Parameter structs that got a validation function
  pub param_structs: usize,
  /// Validator rules compiled across all fields
  pub validators: usize,
}

impl From<&DescriptorSet> for GenerationStats {
  fn from(set: &DescriptorSet) -> Self {
    Self {
      receivers: set.receiver_count(),
      endpoints: set.endpoint_count(),
      param_structs: set.structs.len(),
      validators: set.validator_count(),
    }
  }
}

impl Orchestrator {
  pub fn new(source: impl Into<String>) -> Self {
    Self { source: source.into() }
  }

  /// Runs the scanner and the rule compiler, returning the descriptor set.
  ///
  /// # Errors
  ///
  /// Returns the first parse, configuration, resolution, tag or duplicate
  /// route error found.
  pub fn descriptors(&self) -> anyhow::Result<DescriptorSet> {
    let document = SourceDocument::parse(&self.source)?;
    let scan = DeclarationScanner::new(&document).scan()?;

    let structs = scan
      .structs
      .values()
      .map(|decl| RuleCompiler::compile_struct(decl).map(|def| (decl.name.clone(), def)))
      .collect::<Result<IndexMap<_, _>, _>>()?;

    Ok(DescriptorSet {
      endpoints: scan.endpoints,
      structs,
    })
  }

  /// Generates formatted handler code without a file header.
  ///
  /// The output contains no inner attributes or doc comments, so it can be
  /// pulled into a module with `include!`.
  ///
  /// # Errors
  ///
  /// Returns the same errors as `descriptors()`, or an error if the emitted
  /// tokens are not a valid Rust file.
  pub fn generate(&self) -> anyhow::Result<(String, GenerationStats)> {
    let set = self.descriptors()?;
    Ok((Self::render(&set)?, GenerationStats::from(&set)))
  }

  /// Generates handler code with an auto-generated file header.
  ///
  /// # Arguments
  ///
  /// * `source_path` - Path of the annotated input file (for documentation)
  ///
  /// # Errors
  ///
  /// Returns the same errors as `generate()`.
  pub fn generate_with_header(&self, source_path: &str) -> anyhow::Result<(String, GenerationStats)> {
    let set = self.descriptors()?;
    Ok((Self::render_with_header(&set, source_path)?, GenerationStats::from(&set)))
  }

  /// Emits and formats the handlers for an already scanned descriptor set.
  ///
  /// # Errors
  ///
  /// Returns an error if a descriptor cannot be emitted or the emitted tokens
  /// are not a valid Rust file.
  pub fn render(set: &DescriptorSet) -> anyhow::Result<String> {
    let code = codegen::generate(set)?;
    let syntax_tree = syn::parse2::<syn::File>(code)?;
    Ok(prettyplease::unparse(&syntax_tree))
  }

  /// Same as `render()`, prefixed with the `//!` file header.
  ///
  /// # Errors
  ///
  /// Returns the same errors as `render()`.
  pub fn render_with_header(set: &DescriptorSet, source_path: &str) -> anyhow::Result<String> {
    let code = Self::render(set)?;

    Ok(format!(
      r#"//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Source: {}
//! Generated by `apigen` {}

{}"#,
      source_path,
      env!("CARGO_PKG_VERSION"),
      code
    ))
  }
}
