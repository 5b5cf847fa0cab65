//! Numeric parsing, rounding, and rendering policy
//!
//! Every computed result is rounded to 8 fractional decimal digits and
//! re-rendered as the shortest decimal string that round-trips back to
//! the same value. Plain decimal notation is used at every magnitude;
//! exponents never appear in a rendered number. This is the only
//! precision-control mechanism; there is no big-decimal arithmetic.

/// Parse a display string as a number.
///
/// The display alphabet is digits, at most one decimal point, and the
/// rendered sentinels "NaN", "Infinity", and "-Infinity", all of which
/// `f64`'s `FromStr` accepts. Anything unparseable degrades to NaN
/// rather than an error.
pub fn parse_display(display: &str) -> f64 {
    display.parse::<f64>().unwrap_or(f64::NAN)
}

/// Round to 8 fractional decimal digits.
///
/// Non-finite values pass through untouched.
pub fn round8(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.8}").parse().unwrap_or(value)
}

/// Render a number as its shortest round-trip decimal string.
///
/// Trailing zeros and bare decimal points never appear. NaN renders as
/// the literal "NaN", infinities as "Infinity"/"-Infinity", and negative
/// zero is normalized to "0".
pub fn render_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        }
        .to_string();
    }
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_string()
}
