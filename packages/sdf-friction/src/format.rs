//! Compact numeric formatting for friction coefficients.

/// Significant digits kept when writing a coefficient.
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Format a coefficient in general notation with 6 significant digits.
///
/// Uses fixed notation when the decimal exponent lies in `-4..6` and
/// scientific notation otherwise. Trailing zeros and a dangling decimal
/// point are dropped in both forms.
///
/// # Examples
/// ```
/// use sdf_friction::format::format_coefficient;
///
/// assert_eq!(format_coefficient(1.1), "1.1");
/// assert_eq!(format_coefficient(0.15), "0.15");
/// assert_eq!(format_coefficient(2.0), "2");
/// assert_eq!(format_coefficient(0.123456789), "0.123457");
/// assert_eq!(format_coefficient(1e-7), "1e-07");
/// ```
pub fn format_coefficient(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Round to the requested precision first; the exponent can shift (9.999995 -> 1e1).
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Strip trailing zeros after a decimal point, then the point itself.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values() {
        assert_eq!(format_coefficient(1.1), "1.1");
        assert_eq!(format_coefficient(0.9), "0.9");
        assert_eq!(format_coefficient(0.3), "0.3");
        assert_eq!(format_coefficient(0.15), "0.15");
        assert_eq!(format_coefficient(1.0), "1");
        assert_eq!(format_coefficient(100.0), "100");
    }

    #[test]
    fn test_rounds_to_six_significant_digits() {
        assert_eq!(format_coefficient(1.23456789), "1.23457");
        assert_eq!(format_coefficient(123456.7), "123457");
        assert_eq!(format_coefficient(0.000123456789), "0.000123457");
    }

    #[test]
    fn test_rounding_carries_into_exponent() {
        assert_eq!(format_coefficient(9.9999996), "10");
        assert_eq!(format_coefficient(999999.7), "1e+06");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(format_coefficient(1234567.0), "1.23457e+06");
        assert_eq!(format_coefficient(0.00001), "1e-05");
        assert_eq!(format_coefficient(-2.5e-10), "-2.5e-10");
        assert_eq!(format_coefficient(1e100), "1e+100");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_coefficient(0.0), "0");
        assert_eq!(format_coefficient(-0.0), "-0");
        assert_eq!(format_coefficient(f64::INFINITY), "inf");
        assert_eq!(format_coefficient(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_coefficient(f64::NAN), "nan");
    }

    #[test]
    fn test_negative_fixed() {
        assert_eq!(format_coefficient(-0.5), "-0.5");
    }
}
