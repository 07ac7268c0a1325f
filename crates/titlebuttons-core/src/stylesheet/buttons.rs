//! Per-button color rules.
//!
//! The same builder runs for close, minimize and maximize in that order.
//! Each button takes exactly one of two branches:
//! - custom icon: the button background draws the user's image and the theme
//!   icon is hidden
//! - theme icon: the theme icon is tinted and given a colored background

use super::{Dialect, scoped};
use crate::color::hex_to_rgba;
use crate::config::{Button, ButtonConfig, IconSource};
use crate::{Config, svg};

pub(super) fn css(config: &Config, dialect: Dialect) -> String {
    let mut css = String::from(
        "
/* ==========================================================================
   BUTTON COLORS
   ========================================================================== */",
    );

    for button in Button::ALL {
        css.push_str(&button_css(config, button, dialect));
    }

    css
}

fn button_css(config: &Config, button: Button, dialect: Dialect) -> String {
    let settings = config.button(button);
    let selector = format!("{}.{}", dialect.button_selector(), button.name());

    match settings.custom_icon() {
        Some(source) if config.buttons.use_custom_icons => {
            custom_icon_css(config, settings, source, button, &selector, dialect)
        }
        _ => theme_icon_css(settings, button, &selector, dialect),
    }
}

/// Theme icon: GTK 4 colors the image node (which carries the padding),
/// GTK 3 colors the button itself.
fn theme_icon_css(
    settings: &ButtonConfig,
    button: Button,
    selector: &str,
    dialect: Dialect,
) -> String {
    let (normal, hover) = match dialect {
        Dialect::Gtk4 => (
            scoped(&format!("{selector} image")),
            scoped(&format!("{selector}:hover image")),
        ),
        Dialect::Gtk3 => (scoped(selector), scoped(&format!("{selector}:hover"))),
    };

    // Only GTK 4 understands -gtk-icon-size; GTK 3 scales globally.
    let icon_size = if dialect == Dialect::Gtk4 && settings.icon_size > 0 {
        format!("    -gtk-icon-size: {}px;\n", settings.icon_size)
    } else {
        String::new()
    };

    format!(
        "
/* {label} Button */
{normal} {{
    color: {icon_color};
    background-color: {background};
{icon_size}}}
{hover} {{
    background-color: {hover_background} !important;
}}
",
        label = button.label(),
        icon_color = settings.icon_color,
        background = hex_to_rgba(&settings.color, settings.bg_opacity),
        hover_background = hex_to_rgba(&settings.hover_color, settings.hover_opacity),
    )
}

/// CSS image value for a custom icon tinted with `color`.
fn icon_image(source: IconSource<'_>, color: &str) -> String {
    match source {
        IconSource::Markup(markup) => svg::data_uri(markup, color),
        IconSource::Path(path) => format!("url(\"{}\")", escape_css_string(path)),
    }
}

/// Escape a value for use inside a double-quoted CSS string.
///
/// Line breaks cannot appear raw inside a CSS string, so they become hex
/// escapes; the trailing space ends the escape.
fn escape_css_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\A "),
            '\r' => escaped.push_str("\\D "),
            '\u{c}' => escaped.push_str("\\C "),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Custom icon drawn as the button background.
///
/// `background-image` is always `!important` because the reset section
/// strips background images with `!important`. Hover rules mark everything
/// `!important` to beat theme hover styles.
fn custom_icon_css(
    config: &Config,
    settings: &ButtonConfig,
    source: IconSource<'_>,
    button: Button,
    selector: &str,
    dialect: Dialect,
) -> String {
    let icon_size = settings.effective_icon_size(config.buttons.icon_size);
    let background_size = match dialect {
        Dialect::Gtk4 => format!("{icon_size}px {icon_size}px"),
        Dialect::Gtk3 => {
            let scaled = f64::from(icon_size) * config.legacy.icon_scale;
            format!("{scaled}px {scaled}px")
        }
    };

    // GTK 4 hides the image node; GTK 3 icons follow the text color.
    let (hide_text, hide_icon) = match dialect {
        Dialect::Gtk4 => (
            String::new(),
            format!(
                "{} {{\n    opacity: 0;\n}}\n",
                scoped(&format!("{selector} image"))
            ),
        ),
        Dialect::Gtk3 => ("    color: transparent;\n".to_string(), String::new()),
    };

    format!(
        "
/* {label} Button (custom icon) */
{normal} {{
{hide_text}    background-color: {background};
    background-image: {image} !important;
    background-size: {background_size};
    background-position: center;
    background-repeat: no-repeat;
    opacity: {opacity};
}}
{hide_icon}{hover} {{
{hide_text}    background-color: {hover_background} !important;
    background-image: {hover_image} !important;
    background-size: {background_size} !important;
    background-position: center !important;
    background-repeat: no-repeat !important;
    opacity: {hover_opacity} !important;
}}
",
        label = button.label(),
        normal = scoped(selector),
        hover = scoped(&format!("{selector}:hover")),
        background = hex_to_rgba(&settings.color, settings.bg_opacity),
        image = icon_image(source, &settings.icon_color),
        opacity = config.buttons.custom_icon_opacity,
        hover_background = hex_to_rgba(&settings.hover_color, settings.hover_opacity),
        hover_image = icon_image(source, &settings.hover_icon_color),
        hover_opacity = config.buttons.custom_icon_hover_opacity,
    )
}
