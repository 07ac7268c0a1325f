//! Stylesheet generation for GTK 4 and GTK 3 window controls.
//!
//! Each document is assembled from a fixed, ordered list of section
//! builders. A builder takes the config and the target dialect and returns
//! a CSS fragment (possibly empty):
//!
//! 1. banner with the generation timestamp
//! 2. `sections::header_geometry` - headerbar height limits
//! 3. `sections::title_text` - hide / app-name title handling
//! 4. `sections::window_controls` - theme reset, radius, margins, icon sizing
//! 5. `buttons::css` - close, minimize, maximize colors or custom icons
//! 6. `sections::active_fix` - clears the pressed-state theme decoration
//!
//! The order never changes, so identical configs give identical output apart
//! from the timestamp line.

mod buttons;
mod sections;

use std::path::{Path, PathBuf};

use crate::Config;

/// Every line carrying the generation time starts with this prefix.
pub const TIMESTAMP_PREFIX: &str = "   Generated: ";

/// A section builder.
type Section = fn(&Config, Dialect) -> String;

/// Section builders after the banner, in emission order.
const SECTIONS: [Section; 5] = [
    sections::header_geometry,
    sections::title_text,
    sections::window_controls,
    buttons::css,
    sections::active_fix,
];

/// Target toolkit generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// GTK 4 (`windowcontrols > button`).
    Gtk4,
    /// GTK 3 (`button.titlebutton`).
    Gtk3,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Gtk4, Dialect::Gtk3];

    /// Display name ("GTK 4" / "GTK 3").
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Gtk4 => "GTK 4",
            Dialect::Gtk3 => "GTK 3",
        }
    }

    /// Directory under `~/.config` that the toolkit reads `gtk.css` from.
    pub fn config_dir(self) -> &'static str {
        match self {
            Dialect::Gtk4 => "gtk-4.0",
            Dialect::Gtk3 => "gtk-3.0",
        }
    }

    /// Full path of the user stylesheet for this toolkit.
    pub fn target_path(self, home: &Path) -> PathBuf {
        home.join(".config").join(self.config_dir()).join("gtk.css")
    }

    /// Selector of a window-control button, relative to the headerbar.
    fn button_selector(self) -> &'static str {
        match self {
            Dialect::Gtk4 => "windowcontrols > button",
            Dialect::Gtk3 => "button.titlebutton",
        }
    }

    /// Selector of the title label, relative to the headerbar.
    fn title_selector(self) -> &'static str {
        match self {
            Dialect::Gtk4 => "windowtitle > label",
            Dialect::Gtk3 => "label.title",
        }
    }
}

/// Prefix `selector` with both headerbar flavours (CSD headerbars and
/// `.titlebar` used by SSD-less windows).
fn scoped(selector: &str) -> String {
    format!("headerbar {selector},\n.titlebar {selector}")
}

/// One generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStylesheet {
    pub dialect: Dialect,
    pub text: String,
}

impl GeneratedStylesheet {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The document with the banner's timestamp line removed.
    ///
    /// Only the first timestamp line inside the leading comment block is
    /// dropped; identical text further down (e.g. from a config value) is
    /// kept and still takes part in comparisons.
    pub fn without_timestamp(&self) -> String {
        let mut in_banner = true;
        let mut stripped = false;

        self.text
            .lines()
            .filter(|line| {
                let is_stamp = in_banner && !stripped && line.starts_with(TIMESTAMP_PREFIX);
                stripped |= is_stamp;
                if line.trim_end().ends_with("*/") {
                    in_banner = false;
                }
                !is_stamp
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when both documents differ at most in their timestamp.
    pub fn same_content(&self, other: &GeneratedStylesheet) -> bool {
        self.dialect == other.dialect && self.without_timestamp() == other.without_timestamp()
    }
}

/// The pair of documents produced by one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheets {
    pub gtk4: GeneratedStylesheet,
    pub gtk3: GeneratedStylesheet,
}

impl Stylesheets {
    pub fn get(&self, dialect: Dialect) -> &GeneratedStylesheet {
        match dialect {
            Dialect::Gtk4 => &self.gtk4,
            Dialect::Gtk3 => &self.gtk3,
        }
    }

    /// Both documents, GTK 4 first.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedStylesheet> {
        [&self.gtk4, &self.gtk3].into_iter()
    }
}

/// Generate both stylesheets, stamped with the current local time.
pub fn generate(config: &Config) -> Stylesheets {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    generate_at(config, &timestamp)
}

/// Generate both stylesheets with an explicit timestamp.
pub fn generate_at(config: &Config, timestamp: &str) -> Stylesheets {
    Stylesheets {
        gtk4: compose(config, Dialect::Gtk4, timestamp),
        gtk3: compose(config, Dialect::Gtk3, timestamp),
    }
}

/// Assemble one document from the banner and the ordered section list.
pub fn compose(config: &Config, dialect: Dialect, timestamp: &str) -> GeneratedStylesheet {
    let mut text = sections::banner(dialect, timestamp);
    for section in SECTIONS {
        text.push_str(&section(config, dialect));
    }

    GeneratedStylesheet { dialect, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_paths() {
        let home = Path::new("/home/user");
        assert_eq!(
            Dialect::Gtk4.target_path(home),
            PathBuf::from("/home/user/.config/gtk-4.0/gtk.css")
        );
        assert_eq!(
            Dialect::Gtk3.target_path(home),
            PathBuf::from("/home/user/.config/gtk-3.0/gtk.css")
        );
    }

    #[test]
    fn test_scoped_selector() {
        assert_eq!(
            scoped("button.titlebutton"),
            "headerbar button.titlebutton,\n.titlebar button.titlebutton"
        );
    }

    #[test]
    fn test_compose_starts_with_banner() {
        let sheet = compose(&Config::default(), Dialect::Gtk3, "now");
        assert!(sheet.text.starts_with("/* ====="));
        assert!(sheet.text.contains("GTK 3"));
        assert!(sheet.text.contains("   Generated: now\n"));
    }

    #[test]
    fn test_without_timestamp_drops_only_that_line() {
        let a = compose(&Config::default(), Dialect::Gtk4, "2024-01-01 10:00:00");
        let b = compose(&Config::default(), Dialect::Gtk4, "2025-06-30 23:59:59");
        assert_ne!(a, b);
        assert!(a.same_content(&b));
        assert!(!a.without_timestamp().contains("Generated:"));
        assert!(a.without_timestamp().contains("WINDOW CONTROLS"));
    }

    #[test]
    fn test_same_content_detects_changes() {
        let a = compose(&Config::default(), Dialect::Gtk4, "t");
        let mut config = Config::default();
        config.buttons.border_radius = 4;
        let b = compose(&config, Dialect::Gtk4, "t");
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_same_content_sees_timestamp_like_config_text() {
        let mut a = Config::default();
        a.buttons.margin = format!("0 3px;\n{TIMESTAMP_PREFIX}x");
        let mut b = Config::default();
        b.buttons.margin = format!("0 3px;\n{TIMESTAMP_PREFIX}y");

        let a = compose(&a, Dialect::Gtk4, "t");
        let b = compose(&b, Dialect::Gtk4, "t");
        assert!(!a.same_content(&b));
        assert!(a.without_timestamp().contains("   Generated: x"));
        assert!(!a.without_timestamp().contains("   Generated: t"));
    }

    #[test]
    fn test_same_content_requires_same_dialect() {
        let a = compose(&Config::default(), Dialect::Gtk4, "t");
        let b = compose(&Config::default(), Dialect::Gtk3, "t");
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_generate_produces_both_dialects() {
        let sheets = generate(&Config::default());
        assert_eq!(sheets.gtk4.dialect, Dialect::Gtk4);
        assert_eq!(sheets.gtk3.dialect, Dialect::Gtk3);
        assert_eq!(sheets.iter().count(), 2);
        assert_eq!(sheets.get(Dialect::Gtk3), &sheets.gtk3);
    }
}
