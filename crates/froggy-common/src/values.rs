//! Cell value conversions.
//!
//! Spreadsheet exports mix integers, floats and free text in the same column,
//! so every helper here is lenient about the input shape and strict about
//! finiteness.

use polars::prelude::AnyValue;

/// Renders a Polars cell as plain text.
///
/// Nulls become the empty string and floats drop a trailing `.0`.
///
/// ```
/// use polars::prelude::AnyValue;
/// use froggy_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(40.0)), "40");
/// assert_eq!(any_to_string(AnyValue::String("Rana temporaria")), "Rana temporaria");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.to_owned(),
        AnyValue::StringOwned(text) => text.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string().trim_matches('"').to_owned(),
    }
}

/// Formats a number the way it would be typed into a sheet.
///
/// ```
/// use froggy_common::format_numeric;
///
/// assert_eq!(format_numeric(15.0), "15");
/// assert_eq!(format_numeric(21.5), "21.5");
/// ```
pub fn format_numeric(value: f64) -> String {
    // Display already omits a zero fraction; only the sign of zero needs care.
    if value == 0.0 {
        return "0".to_owned();
    }
    value.to_string()
}

/// Reads a Polars cell as a finite `f64`, parsing text cells.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Null | AnyValue::Boolean(_) => None,
        AnyValue::String(text) => parse_finite_f64(text),
        AnyValue::StringOwned(text) => parse_finite_f64(&text),
        other => other.extract::<f64>(),
    };
    number.filter(|v| v.is_finite())
}

/// Parses trimmed text as a finite `f64`. `"nan"` and `"inf"` are rejected.
pub fn parse_finite_f64(text: &str) -> Option<f64> {
    match text.trim() {
        "" => None,
        trimmed => trimmed.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

/// Parses an integer category code; `"2.0"` is accepted as `2`.
pub fn parse_code(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if let Ok(code) = trimmed.parse::<i64>() {
        return Some(code);
    }
    parse_finite_f64(trimmed)
        .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
        .map(|v| v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_floats_render_without_fraction() {
        assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(15.0)), "15");
    }

    #[test]
    fn numeric_formatting() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(1000.0), "1000");
        assert_eq!(format_numeric(-2.25), "-2.25");
    }

    #[test]
    fn non_finite_cells_are_not_numbers() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_f64(AnyValue::Float64(f64::INFINITY)), None);
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("large")), None);
    }

    #[test]
    fn text_parsing() {
        for rejected in ["", "  ", "nan", "NaN", "inf", "-", "12 mm"] {
            assert_eq!(parse_finite_f64(rejected), None, "{rejected:?}");
        }
        assert_eq!(parse_finite_f64("  21.5  "), Some(21.5));
    }

    #[test]
    fn codes() {
        assert_eq!(parse_code(" 2 "), Some(2));
        assert_eq!(parse_code("2.0"), Some(2));
        assert_eq!(parse_code("2.5"), None);
        assert_eq!(parse_code("-"), None);
        assert_eq!(parse_code(""), None);
    }
}
