pub mod cli;
pub mod colors;
pub mod commands;

pub use cli::{Cli, Commands};
pub use colors::Colors;

fn term_width() -> u16 {
  crossterm::terminal::size().map_or(80, |(width, _)| width)
}
