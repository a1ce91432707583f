use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// Palette for terminal output; every accessor returns `Color::Reset` when color is off.
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, dark: Color, light: Color) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    match self.theme {
      Theme::Dark => dark,
      Theme::Light => light,
    }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(Color::Rgb { r: 118, g: 166, b: 166 }, Color::Rgb { r: 92, g: 62, b: 38 })
  }

  pub const fn primary(&self) -> Color {
    self.pick(Color::Rgb { r: 191, g: 126, b: 4 }, Color::Rgb { r: 70, g: 42, b: 25 })
  }

  pub const fn accent(&self) -> Color {
    self.pick(Color::Rgb { r: 166, g: 84, b: 55 }, Color::Rgb { r: 211, g: 99, b: 70 })
  }

  pub const fn success(&self) -> Color {
    self.pick(Color::Rgb { r: 118, g: 166, b: 166 }, Color::Rgb { r: 34, g: 142, b: 90 })
  }

  pub const fn label(&self) -> Color {
    self.pick(Color::Rgb { r: 217, g: 164, b: 4 }, Color::Rgb { r: 176, g: 103, b: 66 })
  }

  pub const fn value(&self) -> Color {
    self.pick(Color::Rgb { r: 242, g: 211, b: 56 }, Color::Rgb { r: 199, g: 146, b: 76 })
  }

  /// Same palette converted for `comfy_table` cells.
  pub fn cell(color: Color) -> ComfyColor {
    match color {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
      _ => ComfyColor::Reset,
    }
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, RgbColor, Style, Styles};

    const fn rgb(color: Color) -> Option<ClapColor> {
      match color {
        Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
        _ => None,
      }
    }

    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(rgb(colors.label())))
      .usage(Style::new().bold().fg_color(rgb(colors.label())))
      .literal(Style::new().fg_color(rgb(colors.success())))
      .error(Style::new().bold().fg_color(rgb(colors.accent())))
      .invalid(Style::new().bold().fg_color(rgb(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .and_then(|value| value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
      .map_or(Theme::Dark, |bg| if bg >= 8 { Theme::Light } else { Theme::Dark }),
  }
}
