use std::{env, fs, path::PathBuf};

use apigen::generator::orchestrator::Orchestrator;

const API_SOURCE: &str = "src/api.rs";

fn main() -> anyhow::Result<()> {
  println!("cargo:rerun-if-changed={API_SOURCE}");

  let source = fs::read_to_string(API_SOURCE)?;
  let (code, _) = Orchestrator::new(source).generate()?;

  let output = PathBuf::from(env::var("OUT_DIR")?).join("api_handlers.rs");
  fs::write(output, code)?;
  Ok(())
}
