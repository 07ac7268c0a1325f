//! Hex color helpers.
//!
//! Conversion is deliberately lenient: the composer feeds whatever the user
//! stored straight through here, so nothing in this module may panic on
//! malformed input.

/// Parse one two-digit hex channel. Anything unreadable becomes 0.
fn channel(hex: &str, start: usize) -> u8 {
    hex.get(start..start + 2)
        .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        .unwrap_or(0)
}

/// Convert a `#rrggbb` string plus alpha into a CSS `rgba()` expression.
///
/// Channels are read from positions 0-1, 2-3 and 4-5 after the leading `#`.
/// Alpha is printed as given, without rounding or clamping, so `0.5` stays
/// `0.5` and `1.7` stays `1.7`. Unreadable channels render as 0.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    format!(
        "rgba({}, {}, {}, {})",
        channel(hex, 0),
        channel(hex, 2),
        channel(hex, 4),
        alpha
    )
}

/// Return true for a strict `#rrggbb` color (hex digits in either case).
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgba() {
        assert_eq!(hex_to_rgba("#336699", 0.5), "rgba(51, 102, 153, 0.5)");
        assert_eq!(hex_to_rgba("#ff0000", 1.0), "rgba(255, 0, 0, 1)");
        assert_eq!(hex_to_rgba("#000000", 0.0), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn test_hex_to_rgba_is_case_insensitive() {
        assert_eq!(hex_to_rgba("#AbCdEf", 0.25), hex_to_rgba("#abcdef", 0.25));
    }

    #[test]
    fn test_hex_to_rgba_without_hash() {
        assert_eq!(hex_to_rgba("336699", 0.8), "rgba(51, 102, 153, 0.8)");
    }

    #[test]
    fn test_hex_to_rgba_passes_alpha_through() {
        assert_eq!(hex_to_rgba("#ffffff", 1.7), "rgba(255, 255, 255, 1.7)");
        assert_eq!(hex_to_rgba("#ffffff", -0.2), "rgba(255, 255, 255, -0.2)");
        assert_eq!(hex_to_rgba("#ffffff", f64::NAN), "rgba(255, 255, 255, NaN)");
    }

    #[test]
    fn test_hex_to_rgba_malformed_does_not_panic() {
        assert_eq!(hex_to_rgba("", 0.5), "rgba(0, 0, 0, 0.5)");
        assert_eq!(hex_to_rgba("#ff", 0.5), "rgba(255, 0, 0, 0.5)");
        assert_eq!(hex_to_rgba("#zz0000", 0.5), "rgba(0, 0, 0, 0.5)");
        // Multi-byte characters must not split on a char boundary
        assert_eq!(hex_to_rgba("#1é2345", 0.5), "rgba(0, 0, 52, 0.5)");
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#3584e4"));
        assert!(is_hex_color("#ABCDEF"));
        assert!(!is_hex_color("3584e4"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("#gggggg"));
    }
}
