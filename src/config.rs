//! Configuration file handling.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/scorewatch/config.toml`.
//! Every field has a default so a partial (or missing) file works. Theme
//! colors accept named values, `#hex`, or `r,g,b` strings.

use crate::formatting::BoxChars;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Seconds between automatic score refreshes.
    pub refresh_interval: u32,
    /// strftime format for the "last updated" clock in the status bar.
    pub time_format: String,
    pub use_unicode: bool,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub live_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub disabled_fg: Option<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            refresh_interval: 30,
            time_format: "%H:%M:%S".to_string(),
            use_unicode: true,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            live_fg: Color::Red,
            error_fg: Color::Red,
            disabled_fg: None,
        }
    }
}

impl ThemeConfig {
    /// Disabled-row color, falling back to 50% darker than the selection color.
    pub fn disabled_fg(&self) -> Color {
        self.disabled_fg.unwrap_or_else(|| dim(self.selection_fg, 0.5))
    }
}

impl Config {
    /// Resolve the file-level config into the values widgets render with.
    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            selection_fg: self.theme.selection_fg,
            live_fg: self.theme.live_fg,
            error_fg: self.theme.error_fg,
            disabled_fg: self.theme.disabled_fg(),
            time_format: self.time_format.clone(),
            box_chars: BoxChars::from_use_unicode(self.use_unicode),
        }
    }
}

/// Runtime display configuration passed to every widget render call.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub selection_fg: Color,
    pub live_fg: Color,
    pub error_fg: Color,
    pub disabled_fg: Color,
    pub time_format: String,
    pub box_chars: BoxChars,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Config::default().display()
    }
}

/// Scale an RGB color toward black; named colors pass through unchanged.
fn dim(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_color(&raw).ok_or_else(|| invalid_color::<D>(&raw))
}

fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_color(&raw).ok_or_else(|| invalid_color::<D>(&raw)))
        .transpose()
}

fn invalid_color<'de, D: serde::Deserializer<'de>>(raw: &str) -> D::Error {
    serde::de::Error::custom(format!("Invalid color: {}", raw))
}

/// Parse "red", "#ff6600" / "#f60", or "255,165,0" into a color.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    named_color(&s)
        .or_else(|| s.strip_prefix('#').and_then(hex_color))
        .or_else(|| rgb_color(&s))
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "orange" => Color::Rgb(255, 165, 0),
        _ => return None,
    };
    Some(color)
}

/// Six-digit hex or the three-digit shorthand, without the leading '#'.
fn hex_color(hex: &str) -> Option<Color> {
    let expanded;
    let hex = match hex.len() {
        6 => hex,
        3 => {
            expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
            &expanded
        }
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(1)?, channel(2)?))
}

fn rgb_color(s: &str) -> Option<Color> {
    let mut parts = s.splitn(3, ',').map(|part| part.trim().parse::<u8>().ok());
    let r = parts.next()??;
    let g = parts.next()??;
    let b = parts.next()??;
    Some(Color::Rgb(r, g, b))
}

pub fn get_config_path() -> Option<PathBuf> {
    let xdg_dirs = BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"));
    Some(xdg_dirs.get_config_home()?.join("config.toml"))
}

/// Read the config file, falling back to defaults when it is missing or
/// does not parse.
pub fn read() -> Config {
    get_config_path()
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_named() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("blue"), Some(Color::Blue));
        assert_eq!(parse_color("orange"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("WHITE"), Some(Color::White));
    }

    #[test]
    fn parse_color_hex() {
        assert_eq!(parse_color("#FF6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#f60"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn parse_color_rgb_tuple() {
        assert_eq!(parse_color("255,165,0"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("255, 102, 0"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn parse_color_rejects_garbage() {
        assert_eq!(parse_color("invalid"), None);
        assert_eq!(parse_color("#ZZZ"), None);
        assert_eq!(parse_color("#ff66"), None);
        assert_eq!(parse_color("256,0,0"), None);
        assert_eq!(parse_color("1,2"), None);
    }

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.refresh_interval, 30);
        assert_eq!(config.theme.selection_fg, Color::Rgb(255, 165, 0));
        assert!(config.use_unicode);
    }

    #[test]
    fn disabled_fg_darkens_selection() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.disabled_fg(), Color::Rgb(127, 82, 0));
    }

    #[test]
    fn config_from_partial_toml() {
        let toml_str = r##"
refresh_interval = 15
use_unicode = false

[theme]
selection_fg = "cyan"
live_fg = "#ff0000"
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.refresh_interval, 15);
        assert!(!config.use_unicode);
        assert_eq!(config.theme.selection_fg, Color::Cyan);
        assert_eq!(config.theme.live_fg, Color::Rgb(255, 0, 0));
        // Unspecified fields keep defaults
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn display_config_resolution() {
        let display = Config::default().display();
        assert_eq!(display.selection_fg, Color::Rgb(255, 165, 0));
        assert_eq!(display.box_chars.vertical, "│");
    }
}
