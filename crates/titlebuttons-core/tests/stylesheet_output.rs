//! End-to-end checks on generated stylesheets.

use titlebuttons_core::color::hex_to_rgba;
use titlebuttons_core::svg::prepare;
use titlebuttons_core::{Button, Config, Dialect, TitleMode, generate, generate_at};

const TS: &str = "2024-01-01 00:00:00";

fn custom_config() -> Config {
    let mut config = Config::default();
    config.buttons.use_custom_icons = true;
    config.close.custom_icon_svg =
        "<svg viewBox=\"0 0 16 16\"><path fill=\"currentColor\" d=\"M4 4l8 8\"/></svg>".to_string();
    config.minimize.custom_icon_path = "/usr/share/icons/min.svg".to_string();
    config
}

fn assert_balanced(css: &str) {
    assert_eq!(
        css.matches('{').count(),
        css.matches('}').count(),
        "unbalanced braces"
    );
    assert_eq!(css.matches('"').count() % 2, 0, "odd number of double quotes");
}

#[test]
fn test_documented_color_example() {
    assert_eq!(hex_to_rgba("#336699", 0.5), "rgba(51, 102, 153, 0.5)");
}

#[test]
fn test_documented_svg_example() {
    assert_eq!(
        prepare("<svg fill=\"currentColor\">\n\t<path/></svg>", "#ff0000"),
        "%3Csvg fill='%23ff0000'%3E %3Cpath/%3E%3C/svg%3E"
    );
}

#[test]
fn test_default_output_is_balanced() {
    for sheet in generate(&Config::default()).iter() {
        assert_balanced(sheet.as_str());
    }
    for sheet in generate(&custom_config()).iter() {
        assert_balanced(sheet.as_str());
    }
}

#[test]
fn test_generation_is_total_for_odd_values() {
    let mut config = Config::default();
    config.buttons.icon_size = -5;
    config.buttons.border_radius = i32::MAX;
    config.buttons.margin = String::new();
    config.legacy.icon_scale = f64::NAN;
    config.header.max_height = 0;
    config.close.color = "not a color".to_string();
    config.minimize.bg_opacity = 7.5;
    config.maximize.hover_color = "#é".to_string();
    config.buttons.use_custom_icons = true;
    config.maximize.custom_icon_svg = "<<<&&&###".to_string();

    let sheets = generate_at(&config, TS);
    assert!(sheets.gtk4.as_str().contains("rgba(0, 0, 0, 0.8)"));
    assert!(sheets.gtk4.as_str().contains("rgba(254, 188, 46, 7.5)"));
    assert!(sheets.gtk3.as_str().contains("scale(NaN)"));
}

#[test]
fn test_identical_configs_differ_only_in_timestamp() {
    let config = custom_config();
    let a = generate_at(&config, "2024-01-01 00:00:00");
    let b = generate_at(&config, "2030-12-31 23:59:59");

    for dialect in Dialect::ALL {
        assert_ne!(a.get(dialect).as_str(), b.get(dialect).as_str());
        assert!(a.get(dialect).same_content(b.get(dialect)));
    }
    assert_eq!(generate_at(&config, TS), generate_at(&config, TS));
}

#[test]
fn test_sections_appear_in_fixed_order() {
    let mut config = Config::default();
    config.header.title_mode = TitleMode::Hide;

    for sheet in generate_at(&config, TS).iter() {
        let css = sheet.as_str();
        let order = [
            "Auto-generated",
            "HEADER SIZE",
            "TITLE TEXT",
            "WINDOW CONTROLS",
            "BUTTON COLORS",
            "Active State Fix",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|marker| css.find(marker).unwrap_or_else(|| panic!("missing {marker}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }
}

#[test]
fn test_title_modes_are_exclusive() {
    let cases = [
        (TitleMode::Show, 0, 0),
        (TitleMode::Hide, 1, 0),
        (TitleMode::AppName, 0, 1),
    ];

    for (mode, hidden, app_name) in cases {
        let mut config = Config::default();
        config.header.title_mode = mode;
        for sheet in generate_at(&config, TS).iter() {
            let css = sheet.as_str();
            assert_eq!(css.matches("TITLE TEXT: Hidden").count(), hidden, "{mode}");
            assert_eq!(
                css.matches("TITLE TEXT: Application name").count(),
                app_name,
                "{mode}"
            );
        }
    }
}

#[test]
fn test_each_button_takes_exactly_one_branch() {
    let config = custom_config();
    let sheets = generate_at(&config, TS);

    for sheet in sheets.iter() {
        let css = sheet.as_str();
        for button in Button::ALL {
            let theme = css.matches(&format!("/* {} Button */", button.label())).count();
            let custom = css
                .matches(&format!("/* {} Button (custom icon) */", button.label()))
                .count();
            assert_eq!(theme + custom, 1, "{:?} in {}", button, sheet.dialect.name());
            assert_eq!(custom == 1, config.uses_custom_icon(button));
        }
    }
}

#[test]
fn test_custom_markup_is_inlined_per_state() {
    let mut config = custom_config();
    config.close.icon_color = "#101010".to_string();
    config.close.hover_icon_color = "#202020".to_string();

    let css = generate_at(&config, TS).gtk4.text;
    assert!(css.contains("fill='%23101010'"));
    assert!(css.contains("fill='%23202020'"));
    assert!(css.contains("url(\"/usr/share/icons/min.svg\")"));
}

#[test]
fn test_gtk3_custom_background_follows_icon_scale() {
    let mut config = custom_config();
    config.legacy.icon_scale = 2.0;

    let sheets = generate_at(&config, TS);
    assert!(sheets.gtk3.as_str().contains("background-size: 32px 32px;"));
    assert!(sheets.gtk4.as_str().contains("background-size: 16px 16px;"));
}

#[test]
fn test_dialect_selectors_do_not_leak() {
    let sheets = generate_at(&Config::default(), TS);
    assert!(sheets.gtk4.as_str().contains("windowcontrols > button"));
    assert!(!sheets.gtk3.as_str().contains("windowcontrols > button {"));
    assert!(sheets.gtk3.as_str().contains("button.titlebutton.close"));
    assert!(!sheets.gtk4.as_str().contains("button.titlebutton.close"));
}
