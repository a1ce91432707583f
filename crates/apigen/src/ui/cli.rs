use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(author, version, about = "HTTP handler generator for annotated Rust methods")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Generate handler code from an annotated source file
  Generate {
    /// Rust source file containing annotated methods
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path where the generated Rust code will be written
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Enable verbose output with per-endpoint details
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Suppress non-essential output (errors only)
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,
  },
  /// List the endpoints discovered in an annotated source file
  List {
    /// Rust source file containing annotated methods
    #[arg(value_name = "INPUT")]
    input: PathBuf,
  },
}
