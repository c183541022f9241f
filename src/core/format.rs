//! Parsing and display rules for the two amount fields.
//!
//! Euro amounts are shown with exactly two decimals and no grouping
//! (`2.00`). Toman amounts are shown with comma-grouped thousands and exactly
//! two decimals (`87,120.00`). Unparseable input counts as zero.

use numfmt::{Formatter, Precision};

const TOMAN_SUFFIX: &str = "تومان";

/// Rounds to two decimal places. Values too large to scale by 100 already
/// have no fractional part and are returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Maps Persian and Arabic-Indic digits to ASCII so pasted amounts parse.
fn normalize_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '۰'..='۹' => char::from(b'0' + (c as u32 - '۰' as u32) as u8),
            '٠'..='٩' => char::from(b'0' + (c as u32 - '٠' as u32) as u8),
            '٫' => '.',
            _ => c,
        })
        .collect()
}

fn parse_or_zero(cleaned: &str) -> f64 {
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

pub fn parse_euro_input(raw: &str) -> f64 {
    parse_or_zero(&normalize_digits(raw))
}

/// Strips grouping separators (`,`, `٬`, whitespace) and a trailing
/// "تومان" before parsing.
pub fn parse_toman_input(raw: &str) -> f64 {
    let normalized = normalize_digits(raw);
    let without_suffix = normalized.trim().trim_end_matches(TOMAN_SUFFIX);
    let cleaned: String = without_suffix
        .chars()
        .filter(|c| !matches!(c, ',' | '٬') && !c.is_whitespace())
        .collect();
    parse_or_zero(&cleaned)
}

/// Non-finite values display as zero.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

pub fn format_euro(value: f64) -> String {
    let value = finite_or_zero(round2(finite_or_zero(value)));
    // avoid "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.2}")
}

pub fn format_toman(value: f64) -> String {
    let value = finite_or_zero(round2(finite_or_zero(value)));
    if value == 0.0 {
        return "0.00".to_string();
    }

    let Ok(formatter) = Formatter::new().separator(',') else {
        return format!("{value:.2}");
    };
    let mut formatter = formatter.precision(Precision::Decimals(2));
    let grouped = formatter.fmt(value).to_string();

    with_two_decimals(&grouped)
}

/// The formatter drops trailing zeros, so pad (or cut) the fraction to two digits.
fn with_two_decimals(formatted: &str) -> String {
    match formatted.find('.') {
        Some(decimal_index) => {
            let decimals = formatted.len() - decimal_index - 1;
            match decimals {
                0 => format!("{formatted}00"),
                1 => format!("{formatted}0"),
                2 => formatted.to_string(),
                _ => formatted[..decimal_index + 3].to_string(),
            }
        }
        None => format!("{formatted}.00"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_toman_grouping() {
        assert_eq!(format_toman(0.0), "0.00");
        assert_eq!(format_toman(999.0), "999.00");
        assert_eq!(format_toman(1000.0), "1,000.00");
        assert_eq!(format_toman(87120.0), "87,120.00");
        assert_eq!(format_toman(190000.0), "190,000.00");
        assert_eq!(format_toman(1234567.891), "1,234,567.89");
        assert_eq!(format_toman(-4500.5), "-4,500.50");
    }

    #[test]
    fn test_with_two_decimals() {
        assert_eq!(with_two_decimals("87,120"), "87,120.00");
        assert_eq!(with_two_decimals("87,120."), "87,120.00");
        assert_eq!(with_two_decimals("4,500.5"), "4,500.50");
        assert_eq!(with_two_decimals("1.25"), "1.25");
        assert_eq!(with_two_decimals("1.256"), "1.25");
    }

    #[test]
    fn test_huge_values_stay_finite() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert!(!format_euro(1e307).contains("inf"));
        assert!(format_euro(1e307).ends_with(".00"));
        assert!(!format_toman(1e307).contains("inf"));
    }

    #[test]
    fn test_format_toman_non_finite() {
        assert_eq!(format_toman(f64::NAN), "0.00");
        assert_eq!(format_toman(f64::INFINITY), "0.00");
    }

    #[test]
    fn test_format_euro() {
        assert_eq!(format_euro(2.0), "2.00");
        assert_eq!(format_euro(1.005_1), "1.01");
        assert_eq!(format_euro(1234.5), "1234.50");
        assert_eq!(format_euro(-0.001), "0.00");
        assert_eq!(format_euro(f64::NAN), "0.00");
    }

    #[test]
    fn test_parse_euro_input() {
        assert_eq!(parse_euro_input("2"), 2.0);
        assert_eq!(parse_euro_input(" 12.5 "), 12.5);
        assert_eq!(parse_euro_input(""), 0.0);
        assert_eq!(parse_euro_input("abc"), 0.0);
        assert_eq!(parse_euro_input("inf"), 0.0);
        assert_eq!(parse_euro_input("۱۲٫۵"), 12.5);
    }

    #[test]
    fn test_parse_toman_input() {
        assert_eq!(parse_toman_input("174240"), 174240.0);
        assert_eq!(parse_toman_input("174,240"), 174240.0);
        assert_eq!(parse_toman_input("1,234,567.50"), 1234567.5);
        assert_eq!(parse_toman_input("۱۷۴٬۲۴۰ تومان"), 174240.0);
        assert_eq!(parse_toman_input("1 000"), 1000.0);
        assert_eq!(parse_toman_input(""), 0.0);
        assert_eq!(parse_toman_input("n/a"), 0.0);
    }
}
