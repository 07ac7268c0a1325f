//! Inline SVG preparation for `data:` URIs.
//!
//! Custom icons are written with a `currentColor` placeholder so one piece of
//! markup can be tinted per button and per hover state. The prepared string
//! goes inside `url("data:image/svg+xml;utf8,...")`.

/// Token in the markup replaced by the resolved icon color.
pub const COLOR_PLACEHOLDER: &str = "currentColor";

/// Percent-encodings applied last, in this order. `%` itself is never
/// encoded so sequences the user already escaped survive unchanged.
const ENCODINGS: [(char, &str); 4] = [('#', "%23"), ('<', "%3C"), ('>', "%3E"), ('&', "%26")];

/// Substitute `color` for the placeholder and escape the markup for a data URI.
///
/// Whitespace runs collapse to a single space and the result is trimmed;
/// double quotes become single quotes so the value can sit inside a
/// double-quoted `url()`. Well-formedness is not checked.
pub fn prepare(markup: &str, color: &str) -> String {
    let colored = markup.replace(COLOR_PLACEHOLDER, color);
    let collapsed = colored.split_whitespace().collect::<Vec<_>>().join(" ");
    let quoted = collapsed.replace('"', "'");

    ENCODINGS
        .iter()
        .fold(quoted, |acc, (from, to)| acc.replace(*from, to))
}

/// Wrap prepared markup in a CSS `url()` data URI.
pub fn data_uri(markup: &str, color: &str) -> String {
    format!("url(\"data:image/svg+xml;utf8,{}\")", prepare(markup, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_full_pipeline() {
        let out = prepare("<svg fill=\"currentColor\">\n\t<path/></svg>", "#ff0000");
        assert_eq!(out, "%3Csvg fill='%23ff0000'%3E %3Cpath/%3E%3C/svg%3E");
    }

    #[test]
    fn test_prepare_replaces_every_placeholder() {
        let out = prepare(
            "<g fill=\"currentColor\" stroke=\"currentColor\"/>",
            "rgb(1, 2, 3)",
        );
        assert!(!out.contains(COLOR_PLACEHOLDER));
        assert_eq!(out.matches("rgb(1, 2, 3)").count(), 2);
    }

    #[test]
    fn test_prepare_collapses_and_trims_whitespace() {
        let out = prepare("  \r\n<svg>\n\n   <path/>\t\t</svg>\n  ", "#000000");
        assert_eq!(out, "%3Csvg%3E %3Cpath/%3E %3C/svg%3E");
    }

    #[test]
    fn test_prepare_does_not_reencode_percent_sequences() {
        let out = prepare("<text>50%25 &amp;</text>", "#000000");
        assert_eq!(out, "%3Ctext%3E50%25 %26amp;%3C/text%3E");
    }

    #[test]
    fn test_prepare_empty_markup() {
        assert_eq!(prepare("", "#ffffff"), "");
    }

    #[test]
    fn test_data_uri_wraps_in_url() {
        let uri = data_uri("<svg/>", "#ffffff");
        assert_eq!(uri, "url(\"data:image/svg+xml;utf8,%3Csvg/%3E\")");
    }

    #[test]
    fn test_prepared_output_has_no_double_quotes() {
        let out = prepare("<svg a=\"1\" b=\"2\"/>", "#123456");
        assert!(!out.contains('"'));
    }
}
