//! Number formatting for history cells.
//!
//! The game owns the canonical number formatter; the core only depends on
//! the [`NumberFormat`] trait. [`ShortNumberFormat`] is the stand-in used by
//! the CLI and the tests.

use resetlog_types::BigNumber;

/// Magnitude at which [`ShortNumberFormat`] switches to scientific notation.
const SCIENTIFIC_THRESHOLD: f64 = 1e6;

/// Formats arbitrary-magnitude numbers as display strings.
pub trait NumberFormat {
    /// Format `value` with `precision` decimals.
    ///
    /// Without `force_decimals`, trailing zero decimals may be dropped.
    fn format(&self, value: &BigNumber, precision: usize, force_decimals: bool) -> String;

    /// Format a plain `f64`.
    fn format_f64(&self, value: f64, precision: usize, force_decimals: bool) -> String {
        self.format(&BigNumber::from_f64(value), precision, force_decimals)
    }
}

/// Thousands-separated decimals below one million, `m.mmme<exp>` above.
///
/// ```
/// use resetlog_core::format::{NumberFormat, ShortNumberFormat};
/// use resetlog_types::BigNumber;
///
/// let f = ShortNumberFormat;
/// assert_eq!(f.format_f64(1234.0, 0, false), "1,234");
/// assert_eq!(f.format_f64(2.0, 3, true), "2.000");
/// assert_eq!(f.format_f64(2.5, 3, false), "2.5");
/// assert_eq!(f.format(&"2.5e1000".parse::<BigNumber>().unwrap(), 0, false), "2.500e1000");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortNumberFormat;

impl NumberFormat for ShortNumberFormat {
    fn format(&self, value: &BigNumber, precision: usize, force_decimals: bool) -> String {
        if !value.is_finite() {
            let raw = value.to_f64();
            return if raw.is_nan() {
                "NaN".to_owned()
            } else if raw < 0.0 {
                "-Infinity".to_owned()
            } else {
                "Infinity".to_owned()
            };
        }

        let (mantissa, exponent) = value.parts();
        let small = value.to_f64();
        if exponent < 6 && small.abs() < SCIENTIFIC_THRESHOLD {
            return format_fixed(small, precision, force_decimals);
        }
        format_scientific(mantissa, exponent)
    }
}

/// Fixed-point with thousands separators.
fn format_fixed(value: f64, precision: usize, force_decimals: bool) -> String {
    let text = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = if force_decimals {
        frac_part
    } else {
        frac_part.trim_end_matches('0')
    };

    let mut out = String::with_capacity(text.len().saturating_add(8));
    let nonzero = int_part.chars().chain(frac.chars()).any(|c| c != '0');
    if value < 0.0 && nonzero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `m.mmm` mantissa and exponent, carrying into the exponent on round-up.
fn format_scientific(mantissa: f64, exponent: i64) -> String {
    let mut m = (mantissa * 1000.0).round() / 1000.0;
    let mut e = exponent;
    if m.abs() >= 10.0 {
        m /= 10.0;
        e = e.saturating_add(1);
    }
    format!("{m:.3}e{e}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len.saturating_add(len / 3));
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && len.saturating_sub(i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Drop the mantissa of a formatted number: `"2.5e1000"` becomes `"e1000"`.
///
/// Strings without an exponent are returned unchanged.
pub fn strip_mantissa(formatted: &str) -> String {
    let Some((_, rest)) = formatted.split_once('e') else {
        return formatted.to_owned();
    };
    let digits = rest.strip_prefix('+').unwrap_or(rest);
    if digits.is_empty() {
        formatted.to_owned()
    } else {
        format!("e{digits}")
    }
}
