//! Helpers for reading and writing CSS-like property values.

/// Read the leading integer of a value the way `parseInt(value, 10)` does.
///
/// Leading whitespace and a single sign are accepted, then as many decimal
/// digits as follow. Everything after the digits is ignored, so `"500px"`
/// reads as `500` and `"12.9"` as `12`. Returns `None` when no digit is
/// found.
pub fn parse_int(value: &str) -> Option<f64> {
    let rest = value.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .bytes()
        .fold(0.0_f64, |acc, b| acc.mul_add(10.0, f64::from(b - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

/// Format a number the way JavaScript's `Number#toString` prints it for the
/// values layout arithmetic can produce.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers -0 as well.
        return "0".to_string();
    }
    format!("{value}")
}

/// Format a number as a pixel length, `350` becoming `"350px"`.
pub fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

/// Largest magnitude a length takes in layout, in cells.
pub const MAX_CELLS: i32 = 1 << 20;

/// Read a length as a whole number of cells, clamped to
/// `-MAX_CELLS..=MAX_CELLS`. `NaN` lengths read as `None`.
#[allow(clippy::cast_possible_truncation)]
pub fn cells(value: &str) -> Option<i32> {
    parse_int(value).map(|v| v.clamp(f64::from(-MAX_CELLS), f64::from(MAX_CELLS)) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_like_javascript() {
        assert_eq!(parse_int("500px"), Some(500.0));
        assert_eq!(parse_int(" 42"), Some(42.0));
        assert_eq!(parse_int("-3em"), Some(-3.0));
        assert_eq!(parse_int("+7"), Some(7.0));
        assert_eq!(parse_int("12.9"), Some(12.0));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("px500"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(350.0), "350");
        assert_eq!(format_number(350.5), "350.5");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(px(f64::NAN), "NaNpx");
        assert_eq!(px(10.5), "10.5px");
    }

    #[test]
    fn test_cells() {
        assert_eq!(cells("40px"), Some(40));
        assert_eq!(cells("auto"), None);
        assert_eq!(cells("-3000000000px"), Some(-MAX_CELLS));
        assert_eq!(cells("99999999999999999999px"), Some(MAX_CELLS));
    }
}
