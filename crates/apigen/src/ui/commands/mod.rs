pub mod generate;
pub mod list;

pub use generate::{GenerateConfig, generate_code};
pub use list::list_endpoints;

use std::path::Path;

use apigen::generator::GeneratorError;

/// Reads the annotated source, reporting a missing file as `InputNotFound`.
async fn read_source(input: &Path) -> anyhow::Result<String> {
  if !tokio::fs::try_exists(input).await? {
    return Err(
      GeneratorError::InputNotFound {
        path: input.display().to_string(),
      }
      .into(),
    );
  }
  Ok(tokio::fs::read_to_string(input).await?)
}
