//! Number formatting compatible with the host language's number-to-string
//! conversion.
//!
//! Rust's shortest round-trip float formatting supplies the significant digits;
//! this module only decides where the decimal point goes and when to switch to
//! exponent notation.

/// Formats `x` the way the host language prints numbers.
///
/// Both zeros format as `"0"`; callers that need to distinguish negative zero
/// check the sign themselves.
///
/// ```ignore
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(0.000001), "0.000001");
/// assert_eq!(format_number(1e-7), "1e-7");
/// ```
#[must_use]
pub fn format_number(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x < 0.0 {
        return format!("-{}", format_number(-x));
    }

    let (digits, exponent) = shortest_digits(x);
    let k = digits.len() as i32;
    // Position of the decimal point relative to the start of `digits`.
    let n = exponent + 1;

    if k <= n && n <= 21 {
        let mut out = digits;
        out.extend(std::iter::repeat('0').take((n - k) as usize));
        out
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", e.abs())
        }
    }
}

/// Splits a positive finite `x` into its shortest significant digits and the
/// decimal exponent of the first digit.
fn shortest_digits(x: f64) -> (String, i32) {
    let text = format!("{x:e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    (digits.to_string(), exponent.parse().unwrap_or(0))
}
