use std::path::PathBuf;

use apigen::generator::{
  ast::DescriptorSet,
  orchestrator::{GenerationStats, Orchestrator},
};
use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use super::read_source;
use crate::ui::{Colors, Commands};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: Commands) -> anyhow::Result<Self> {
    let Commands::Generate {
      input,
      output,
      verbose,
      quiet,
    } = command
    else {
      anyhow::bail!("expected the generate command");
    };

    Ok(Self {
      input,
      output,
      verbose,
      quiet,
    })
  }

  async fn write_output(&self, code: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, code).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Scanning annotated source: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating handlers...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    self.stat("Receivers:", stats.receivers.to_string());
    self.stat("Endpoints:", stats.endpoints.to_string());
    self.stat("Parameter structs:", stats.param_structs.to_string());
    self.stat("Validator rules:", stats.validators.to_string());
  }

  fn print_endpoints(&self, set: &DescriptorSet) {
    if !self.config.verbose || self.config.quiet {
      return;
    }

    for endpoint in set.iter_endpoints() {
      println!(
        "              {} {} {}",
        format!("{:<6}", endpoint.http_method_label()).with(self.colors.accent()),
        endpoint.route.as_str().with(self.colors.value()),
        format!("-> {}::{}", endpoint.receiver, endpoint.method).with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated handlers".with(self.colors.success())
      );
    }
  }
}

/// Runs the full pipeline and writes the output file once everything has rendered.
pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<GenerationStats> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let source = read_source(&config.input).await?;

  logger.log_generating();
  let orchestrator = Orchestrator::new(source);
  let source_path = config.input.display().to_string();
  let set = orchestrator.descriptors()?;
  let code = Orchestrator::render_with_header(&set, &source_path)?;
  let stats = GenerationStats::from(&set);

  logger.print_statistics(&stats);
  logger.print_endpoints(&set);

  logger.log_writing();
  config.write_output(code).await?;

  logger.log_success();
  Ok(stats)
}

#[cfg(test)]
mod tests {
  use apigen::generator::GeneratorError;

  use super::*;
  use crate::ui::colors::Theme;

  const SOURCE: &str = r#"
pub struct Api;

pub struct Params {
  /// apivalidator:"required"
  pub login: String,
}

impl Api {
  /// apigen:api {"url": "/login"}
  pub fn login(&self, ctx: Context, params: Params) -> Result<String, ApiError> {
    Ok(params.login)
  }
}
"#;

  fn config(input: PathBuf, output: PathBuf) -> GenerateConfig {
    GenerateConfig {
      input,
      output,
      verbose: false,
      quiet: true,
    }
  }

  #[tokio::test]
  async fn writes_generated_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.rs");
    let output = dir.path().join("generated").join("api_handlers.rs");
    std::fs::write(&input, SOURCE).unwrap();

    let stats = generate_code(config(input, output.clone()), &Colors::new(false, Theme::Dark))
      .await
      .unwrap();

    assert_eq!(stats.endpoints, 1);
    let code = std::fs::read_to_string(output).unwrap();
    assert!(code.starts_with("//! AUTO-GENERATED CODE - DO NOT EDIT!"));
    assert!(code.contains("fn handle_login("));
  }

  #[tokio::test]
  async fn verbose_run_lists_endpoints_from_one_scan() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.rs");
    let output = dir.path().join("api_handlers.rs");
    std::fs::write(&input, SOURCE).unwrap();

    let config = GenerateConfig {
      verbose: true,
      quiet: false,
      ..config(input, output.clone())
    };
    let stats = generate_code(config, &Colors::new(false, Theme::Dark)).await.unwrap();

    assert_eq!(stats.receivers, 1);
    assert_eq!(stats.validators, 1);
    assert!(output.exists());
  }

  #[tokio::test]
  async fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.rs");
    let output = dir.path().join("out.rs");

    let err = generate_code(config(input, output.clone()), &Colors::new(false, Theme::Dark))
      .await
      .unwrap_err();

    assert!(matches!(
      err.downcast_ref::<GeneratorError>(),
      Some(GeneratorError::InputNotFound { .. })
    ));
    assert!(!output.exists());
  }

  #[tokio::test]
  async fn failed_generation_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("api.rs");
    let output = dir.path().join("out.rs");
    std::fs::write(&input, SOURCE.replace("\"required\"", "\"required,bogus\"")).unwrap();

    let err = generate_code(config(input, output.clone()), &Colors::new(false, Theme::Dark))
      .await
      .unwrap_err();

    assert!(err.to_string().contains("unknown validator `bogus`"), "{err}");
    assert!(!output.exists());
  }

  #[test]
  fn config_from_generate_command() {
    let command = Commands::Generate {
      input: PathBuf::from("in.rs"),
      output: PathBuf::from("out.rs"),
      verbose: true,
      quiet: false,
    };
    let config = GenerateConfig::from_command(command).unwrap();
    assert_eq!(config.input, PathBuf::from("in.rs"));
    assert!(config.verbose);

    let list = Commands::List {
      input: PathBuf::from("in.rs"),
    };
    assert!(GenerateConfig::from_command(list).is_err());
  }
}
