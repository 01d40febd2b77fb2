//! Shared number rendering for every value that appears in a trace.

/// Render a value for display.
///
/// Integral values with magnitude below `1e10` print without a decimal point.
/// Everything else prints with six decimals, then trailing zeros and a bare
/// trailing point are stripped.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "undefined".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if value == value.round() && value.abs() < 1e10 {
        let n = value as i64;
        return n.to_string();
    }

    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn integers_have_no_point() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn fractions_are_trimmed() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(2.25), "2.25");
    }

    #[test]
    fn float_noise_collapses() {
        assert_eq!(format_number(0.49999999999999994), "0.5");
        assert_eq!(format_number(1.2246467991473532e-16), "0");
        assert_eq!(format_number(-1.2246467991473532e-16), "0");
    }

    #[test]
    fn large_integers_use_fixed_notation() {
        assert_eq!(format_number(1e12), "1000000000000");
        assert_eq!(format_number(2432902008176640000.0), "2432902008176640000");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_number(f64::NAN), "undefined");
        assert_eq!(format_number(f64::INFINITY), "∞");
    }
}
