//! Configuration types and parsing.
//!
//! `Config` is the flat settings snapshot consumed by stylesheet generation.
//! It is stored on disk as TOML and merged over the embedded defaults, so
//! every field is always present by the time the composer sees it.
//!
//! Range checks live in [`Config::validate`]. The composer never calls it:
//! generation must produce output for any stored value.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toml::Table;

use crate::error::{Error, Result};

/// Embedded default configuration TOML, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config.toml");

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Path where config was found, if any.
    pub source: Option<PathBuf>,
    /// Whether defaults were used (no config file found).
    pub used_defaults: bool,
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Geometry and custom-icon switches shared by all three buttons.
    pub buttons: ButtonsConfig,

    /// GTK 3 specific sizing.
    pub legacy: LegacyConfig,

    /// Headerbar height and title text handling.
    pub header: HeaderConfig,

    pub close: ButtonConfig,
    pub minimize: ButtonConfig,
    pub maximize: ButtonConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buttons: ButtonsConfig::default(),
            legacy: LegacyConfig::default(),
            header: HeaderConfig::default(),
            close: ButtonConfig::with_color("#ff5f57"),
            minimize: ButtonConfig::with_color("#febc2e"),
            maximize: ButtonConfig::with_color("#28c840"),
        }
    }
}

impl Config {
    /// Load configuration from the embedded default TOML string.
    pub fn from_default_toml() -> Result<Self> {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, merging with embedded defaults.
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_with_defaults(&content)
    }

    /// Parse a user TOML string, deep-merged over the embedded defaults.
    pub fn load_with_defaults(user_toml: &str) -> Result<Self> {
        let mut base: Table = toml::from_str(DEFAULT_CONFIG_TOML)?;
        let user: Table = toml::from_str(user_toml)?;

        deep_merge_toml(&mut base, user);

        let config: Config = base.try_into()?;
        Ok(config)
    }

    /// Find and load configuration using the XDG lookup chain.
    ///
    /// An explicit path is used strictly (no fallback). Otherwise searches,
    /// in order:
    /// 1. `$XDG_CONFIG_HOME/titlebuttons/config.toml`
    /// 2. `~/.config/titlebuttons/config.toml`
    /// 3. `./config.toml`
    ///
    /// A file that exists but fails to load is an error. Only when no file
    /// exists at all are the embedded defaults used.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<ConfigLoadResult> {
        if let Some(path) = explicit_path {
            let config = Self::load(path)?;
            return Ok(ConfigLoadResult {
                config,
                source: Some(path.to_path_buf()),
                used_defaults: false,
            });
        }

        let search_paths = Self::config_search_paths();

        for path in &search_paths {
            if !path.exists() {
                continue;
            }
            return match Self::load(path) {
                Ok(config) => Ok(ConfigLoadResult {
                    config,
                    source: Some(path.clone()),
                    used_defaults: false,
                }),
                Err(e) => {
                    tracing::error!("Config file {:?} exists but failed to load: {}", path, e);
                    Err(e)
                }
            };
        }

        tracing::info!("No config file found, using built-in default config");
        tracing::debug!(
            "Searched: {}",
            search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(ConfigLoadResult {
            config: Self::from_default_toml()?,
            source: None,
            used_defaults: true,
        })
    }

    /// Get the list of paths to search for config files.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("titlebuttons/config.toml"));
        }

        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/titlebuttons/config.toml"));
        }

        paths.push(PathBuf::from("config.toml"));

        paths
    }

    /// Settings for one of the three window buttons.
    pub fn button(&self, button: Button) -> &ButtonConfig {
        match button {
            Button::Close => &self.close,
            Button::Minimize => &self.minimize,
            Button::Maximize => &self.maximize,
        }
    }

    /// Whether `button` renders a custom icon instead of the theme icon.
    ///
    /// Requires the global switch and a non-blank icon source; a button with
    /// the switch on but nothing to show keeps its theme icon.
    pub fn uses_custom_icon(&self, button: Button) -> bool {
        self.buttons.use_custom_icons && self.button(button).custom_icon().is_some()
    }

    /// Check every value against the ranges the settings editor allows.
    ///
    /// All problems are collected into a single error.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        check_range(&mut errors, "buttons.icon_size", self.buttons.icon_size, 16, 48);
        check_range(&mut errors, "buttons.border_radius", self.buttons.border_radius, 0, 999);
        check_range(&mut errors, "buttons.padding", self.buttons.padding, 0, 20);
        check_hex(&mut errors, "buttons.background_color", &self.buttons.background_color);
        check_opacity(&mut errors, "buttons.custom_icon_opacity", self.buttons.custom_icon_opacity);
        check_opacity(
            &mut errors,
            "buttons.custom_icon_hover_opacity",
            self.buttons.custom_icon_hover_opacity,
        );

        check_range(&mut errors, "legacy.min_height", self.legacy.min_height, 20, 60);
        check_range(&mut errors, "legacy.min_width", self.legacy.min_width, 20, 60);
        check_range(&mut errors, "legacy.margin_top", self.legacy.margin_top, 0, 20);
        check_range(&mut errors, "legacy.margin_bottom", self.legacy.margin_bottom, 0, 20);
        check_range(&mut errors, "legacy.margin_left", self.legacy.margin_left, 0, 20);
        check_range(&mut errors, "legacy.margin_right", self.legacy.margin_right, 0, 20);
        if !(0.5..=3.0).contains(&self.legacy.icon_scale) {
            errors.push(format!(
                "legacy.icon_scale: invalid value '{}', must be between 0.5 and 3.0",
                self.legacy.icon_scale
            ));
        }

        check_range(&mut errors, "header.max_height", self.header.max_height, 30, 80);

        for button in Button::ALL {
            let name = button.name();
            let cfg = self.button(button);
            check_hex(&mut errors, &format!("{name}.color"), &cfg.color);
            check_hex(&mut errors, &format!("{name}.icon_color"), &cfg.icon_color);
            check_hex(&mut errors, &format!("{name}.hover_color"), &cfg.hover_color);
            check_hex(&mut errors, &format!("{name}.hover_icon_color"), &cfg.hover_icon_color);
            check_opacity(&mut errors, &format!("{name}.bg_opacity"), cfg.bg_opacity);
            check_opacity(&mut errors, &format!("{name}.hover_opacity"), cfg.hover_opacity);
            if cfg.icon_size != 0 {
                check_range(&mut errors, &format!("{name}.icon_size"), cfg.icon_size, 16, 48);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation(errors))
        }
    }

    /// Human-readable summary of the configuration.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Buttons:".to_string());
        lines.push(format!("  icon_size: {}px", self.buttons.icon_size));
        lines.push(format!("  border_radius: {}px", self.buttons.border_radius));
        lines.push(format!("  padding: {}px", self.buttons.padding));
        if self.buttons.margin.trim().is_empty() {
            lines.push("  margin: (discrete legacy margins)".to_string());
        } else {
            lines.push(format!("  margin: {}", self.buttons.margin));
        }
        lines.push(format!("  background_color: {}", self.buttons.background_color));
        lines.push(format!(
            "  custom icons: {}",
            if self.buttons.use_custom_icons {
                "enabled"
            } else {
                "disabled"
            }
        ));

        lines.push("\nGTK 3:".to_string());
        lines.push(format!(
            "  min size: {}x{}px, icon_scale: {}",
            self.legacy.min_width, self.legacy.min_height, self.legacy.icon_scale
        ));
        lines.push(format!(
            "  margins: top {} / bottom {} / left {} / right {}",
            self.legacy.margin_top,
            self.legacy.margin_bottom,
            self.legacy.margin_left,
            self.legacy.margin_right
        ));

        lines.push("\nHeader:".to_string());
        lines.push(format!("  max_height: {}px", self.header.max_height));
        lines.push(format!("  title_mode: {}", self.header.title_mode));

        for button in Button::ALL {
            let cfg = self.button(button);
            let source = if !self.uses_custom_icon(button) {
                "theme icon"
            } else if cfg.custom_icon_svg.trim().is_empty() {
                "custom icon (file)"
            } else {
                "custom icon (inline svg)"
            };
            lines.push(format!("\n{}:", button.label()));
            lines.push(format!(
                "  color: {} @ {}, hover: {} @ {}",
                cfg.color, cfg.bg_opacity, cfg.hover_color, cfg.hover_opacity
            ));
            lines.push(format!("  icon: {}", source));
        }

        lines.join("\n")
    }
}

fn check_range(errors: &mut Vec<String>, key: &str, value: i32, min: i32, max: i32) {
    if !(min..=max).contains(&value) {
        errors.push(format!(
            "{key}: invalid value '{value}', must be between {min} and {max}"
        ));
    }
}

fn check_opacity(errors: &mut Vec<String>, key: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(format!(
            "{key}: invalid value '{value}', must be between 0.0 and 1.0"
        ));
    }
}

fn check_hex(errors: &mut Vec<String>, key: &str, value: &str) {
    if !crate::color::is_hex_color(value) {
        errors.push(format!(
            "{key}: invalid value '{value}', expected a hex color like '#3584e4'"
        ));
    }
}

/// Deep merge two TOML tables, with `overlay` values taking precedence.
///
/// Nested tables merge recursively; any other value replaces the base value.
fn deep_merge_toml(base: &mut Table, overlay: Table) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(&key), overlay_value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge_toml(base_table, overlay_table);
            }
            (_, overlay_value) => {
                base.insert(key, overlay_value);
            }
        }
    }
}

/// One of the three window-control buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Close,
    Minimize,
    Maximize,
}

impl Button {
    /// All buttons, in the order their rules are emitted.
    pub const ALL: [Button; 3] = [Button::Close, Button::Minimize, Button::Maximize];

    /// Config section name, which is also the GTK style class.
    pub fn name(self) -> &'static str {
        match self {
            Button::Close => "close",
            Button::Minimize => "minimize",
            Button::Maximize => "maximize",
        }
    }

    /// Title-cased name for comments and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Button::Close => "Close",
            Button::Minimize => "Minimize",
            Button::Maximize => "Maximize",
        }
    }
}

/// What to do with the window title text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleMode {
    /// Leave the title alone.
    #[default]
    Show,
    /// Hide the title label entirely.
    Hide,
    /// Replace the title with the window's application name.
    AppName,
}

impl fmt::Display for TitleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TitleMode::Show => "show",
            TitleMode::Hide => "hide",
            TitleMode::AppName => "app-name",
        })
    }
}

/// Geometry shared by all buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonsConfig {
    /// Icon size in pixels.
    pub icon_size: i32,

    /// Corner radius in pixels (999 = pill).
    pub border_radius: i32,

    /// Inner padding in pixels.
    pub padding: i32,

    /// GTK 4 margin shorthand (e.g. "0 3px").
    /// When empty, GTK 4 uses the discrete `[legacy]` margins instead.
    pub margin: String,

    /// Background shared by every button unless a per-button rule overrides it.
    pub background_color: String,

    /// Render `custom_icon_svg` / `custom_icon_path` instead of theme icons.
    pub use_custom_icons: bool,

    /// Element opacity of custom-icon buttons.
    pub custom_icon_opacity: f64,

    /// Element opacity of custom-icon buttons on hover.
    pub custom_icon_hover_opacity: f64,
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            icon_size: 16,
            border_radius: 999,
            padding: 4,
            margin: "0 3px".to_string(),
            background_color: "#3d3d3d".to_string(),
            use_custom_icons: false,
            custom_icon_opacity: 1.0,
            custom_icon_hover_opacity: 0.8,
        }
    }
}

/// GTK 3 sizing. GTK 3 ignores `-gtk-icon-size`, so icons are scaled instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegacyConfig {
    pub min_height: i32,
    pub min_width: i32,
    pub margin_top: i32,
    pub margin_bottom: i32,
    pub margin_left: i32,
    pub margin_right: i32,
    /// Multiplier applied to icons (and custom icon backgrounds) on GTK 3.
    pub icon_scale: f64,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            min_height: 24,
            min_width: 24,
            margin_top: 0,
            margin_bottom: 0,
            margin_left: 3,
            margin_right: 3,
            icon_scale: 1.0,
        }
    }
}

/// Headerbar configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Fixed headerbar height in pixels.
    pub max_height: i32,

    /// Title text handling.
    pub title_mode: TitleMode,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            max_height: 46,
            title_mode: TitleMode::Show,
        }
    }
}

/// Per-button colors and icon sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonConfig {
    /// Base background color.
    pub color: String,

    /// Foreground color of the icon (also substituted into custom SVGs).
    pub icon_color: String,

    /// Background opacity applied to `color`.
    pub bg_opacity: f64,

    /// Background color on hover.
    pub hover_color: String,

    /// Background opacity applied to `hover_color`.
    pub hover_opacity: f64,

    /// Icon color substituted into custom SVGs on hover.
    pub hover_icon_color: String,

    /// Icon size override in pixels; 0 inherits `buttons.icon_size`.
    pub icon_size: i32,

    /// Image file used as the custom icon.
    pub custom_icon_path: String,

    /// Inline SVG markup used as the custom icon. Wins over `custom_icon_path`.
    pub custom_icon_svg: String,
}

/// Neutral grey fallback used by serde for keys missing from a button table.
///
/// The real per-button colors live in `Config::default()` and
/// `config.toml`. `Config::load` and `Config::load_with_defaults` merge the
/// user file over `config.toml` before deserializing, so a partial
/// `[close]` table keeps the close button's colors. Parsing a partial table
/// directly with `toml::from_str` does not, and gets this grey instead.
impl Default for ButtonConfig {
    fn default() -> Self {
        Self::with_color("#888888")
    }
}

impl ButtonConfig {
    fn with_color(color: &str) -> Self {
        Self {
            color: color.to_string(),
            icon_color: "#ffffff".to_string(),
            bg_opacity: 0.8,
            hover_color: color.to_string(),
            hover_opacity: 1.0,
            hover_icon_color: "#ffffff".to_string(),
            icon_size: 0,
            custom_icon_path: String::new(),
            custom_icon_svg: String::new(),
        }
    }

    /// The authoritative custom icon source, if any.
    ///
    /// Inline markup takes precedence over a file path. Blank values count as
    /// absent.
    pub fn custom_icon(&self) -> Option<IconSource<'_>> {
        if !self.custom_icon_svg.trim().is_empty() {
            Some(IconSource::Markup(&self.custom_icon_svg))
        } else if !self.custom_icon_path.trim().is_empty() {
            Some(IconSource::Path(&self.custom_icon_path))
        } else {
            None
        }
    }

    /// Icon size for this button, falling back to the global size.
    pub fn effective_icon_size(&self, global: i32) -> i32 {
        if self.icon_size > 0 {
            self.icon_size
        } else {
            global
        }
    }
}

/// Where a custom icon comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource<'a> {
    /// Image file on disk.
    Path(&'a str),
    /// Raw SVG markup containing the `currentColor` placeholder.
    Markup(&'a str),
}
