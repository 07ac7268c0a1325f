//! Fixed sections: banner, header geometry, title text, control reset and
//! the active-state fix.

use super::{Dialect, TIMESTAMP_PREFIX, scoped};
use crate::{Config, TitleMode};

/// Gap between the headerbar height and the GTK 4 title box.
const TITLE_HEIGHT_OFFSET: i32 = 8;

/// Keeps long titles on one line instead of growing the headerbar.
const SINGLE_LINE: &str = "    white-space: nowrap;
    overflow: hidden;
    text-overflow: ellipsis;
";

/// Section heading comment.
fn heading(title: &str) -> String {
    format!(
        "
/* ==========================================================================
   {title}
   ========================================================================== */
"
    )
}

pub(super) fn banner(dialect: Dialect, timestamp: &str) -> String {
    format!(
        "/* ==========================================================================
   Title Buttons - Auto-generated ({name})
{TIMESTAMP_PREFIX}{timestamp}
   ========================================================================== */
",
        name = dialect.name(),
    )
}

pub(super) fn header_geometry(config: &Config, dialect: Dialect) -> String {
    let height = config.header.max_height;
    let title = scoped(dialect.title_selector());

    let mut css = heading("HEADER SIZE: Limit headerbar height");
    css.push_str(&format!(
        "headerbar,
.titlebar {{
    min-height: {height}px;
    max-height: {height}px;
    padding-top: 0;
    padding-bottom: 0;
}}

/* Constrain title text to prevent header expansion */
{title} {{
    font-size: 1em;
    line-height: 1.2;
    margin: 0;
    padding: 0;
"
    ));

    match dialect {
        Dialect::Gtk4 => css.push_str(&format!(
            "}}

/* Force single line with ellipsis for long titles */
{title_box} {{
    max-height: {inner}px;
    overflow: hidden;
}}

{title} {{
{ellipsis}    max-width: 100%;
}}
",
            title_box = scoped("windowtitle"),
            inner = height.saturating_sub(TITLE_HEIGHT_OFFSET),
            ellipsis = SINGLE_LINE,
        )),
        Dialect::Gtk3 => css.push_str(&format!("{SINGLE_LINE}    max-width: 600px;\n}}\n")),
    }

    css
}

pub(super) fn title_text(config: &Config, dialect: Dialect) -> String {
    let label = scoped(dialect.title_selector());

    match config.header.title_mode {
        TitleMode::Show => String::new(),
        TitleMode::Hide => {
            let mut css = heading("TITLE TEXT: Hidden");
            css.push_str(&format!(
                "{label} {{
    font-size: 0;
    opacity: 0;
    color: transparent;
}}
"
            ));
            css
        }
        TitleMode::AppName => {
            let mut css = heading("TITLE TEXT: Application name");
            css.push_str(&format!(
                "{label} {{
    font-size: 0;
    opacity: 0;
}}

{after} {{
    content: attr(wm-class);
    text-transform: capitalize;
    font-size: 1rem;
    opacity: 1;
}}
",
                after = scoped(&format!("{}::after", dialect.title_selector())),
            ));
            css
        }
    }
}

/// Margin declarations for the button rule.
///
/// GTK 3 always gets the four discrete sides. GTK 4 uses the shorthand when
/// one is configured and falls back to the discrete sides otherwise.
fn margin_declarations(config: &Config, dialect: Dialect) -> String {
    let shorthand = config.buttons.margin.trim();
    if dialect == Dialect::Gtk4 && !shorthand.is_empty() {
        return format!("    margin: {shorthand};\n");
    }

    let legacy = &config.legacy;
    format!(
        "    margin-top: {}px;
    margin-bottom: {}px;
    margin-left: {}px;
    margin-right: {}px;
",
        legacy.margin_top, legacy.margin_bottom, legacy.margin_left, legacy.margin_right
    )
}

pub(super) fn window_controls(config: &Config, dialect: Dialect) -> String {
    let buttons = &config.buttons;
    let button = scoped(dialect.button_selector());
    let image = scoped(&format!("{} image", dialect.button_selector()));
    let margins = margin_declarations(config, dialect);

    let mut css = heading("WINDOW CONTROLS: Reset & Configuration");

    match dialect {
        Dialect::Gtk4 => css.push_str(&format!(
            "{button} {{
    background-image: none !important;
    box-shadow: none !important;
    border: none !important;
    -gtk-icon-shadow: none !important;
    outline: none !important;

    border-radius: {radius}px;
    padding: 0;
{margins}    transition: all 0.2s ease-in-out;

    background-color: transparent;
}}

/* Icon Size */
{image} {{
    -gtk-icon-size: {icon_size}px;
    padding: {padding}px;
}}
",
            radius = buttons.border_radius,
            icon_size = buttons.icon_size,
            padding = buttons.padding,
        )),
        Dialect::Gtk3 => css.push_str(&format!(
            "{button} {{
    background-image: none !important;
    box-shadow: none !important;
    border: none !important;
    text-shadow: none !important;
    -gtk-icon-shadow: none !important;
    outline: none !important;

    border-radius: {radius}px;
    padding: {padding}px;
    transition: all 0.2s ease-in-out;

    min-height: {min_height}px;
    min-width: {min_width}px;
{margins}
    background-color: {background};
}}

/* Icon Scale */
{image} {{
    -gtk-icon-transform: scale({scale});
    padding: 0;
}}
",
            radius = buttons.border_radius,
            padding = buttons.padding,
            min_height = config.legacy.min_height,
            min_width = config.legacy.min_width,
            background = buttons.background_color,
            scale = config.legacy.icon_scale,
        )),
    }

    css
}

/// Pressed buttons keep no theme gradient or shadow. Same text for both
/// dialects; it does not depend on the config.
pub(super) fn active_fix(_config: &Config, _dialect: Dialect) -> String {
    "
/* Active State Fix */
headerbar windowcontrols > button:active,
.titlebar windowcontrols > button:active,
headerbar button.titlebutton:active,
.titlebar button.titlebutton:active {
    background-image: none !important;
    box-shadow: none !important;
}
"
    .to_string()
}
