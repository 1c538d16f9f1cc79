//! Display formatting for monetary amounts and quantities.

/// Format a monetary amount with exactly two decimal places.
///
/// Rounds half away from zero at the cent: 0.005 becomes "0.01" and
/// -0.005 becomes "-0.01". The tie rule applies to the f64 value as it
/// is, so a decimal literal that lands slightly below a half cent in
/// binary still rounds down. This is the only place a monetary value
/// is rounded; accumulation keeps full f64 precision.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return format!("{:.2}", value);
    }
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Format a quantity as its raw numeric value: no forced decimals, so
/// 100 prints as "100" and 2.5 as "2.5".
pub fn format_quantity(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_decimal_places_always() {
        assert_eq!(format_amount(740.0), "740.00");
        assert_eq!(format_amount(148.0), "148.00");
        assert_eq!(format_amount(2.5), "2.50");
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_amount(0.005), "0.01");
        assert_eq!(format_amount(-0.005), "-0.01");
        assert_eq!(format_amount(0.025), "0.03");
        assert_eq!(format_amount(0.004), "0.00");
        assert_eq!(format_amount(0.996), "1.00");
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(format_amount(-45.0), "-45.00");
        assert_eq!(format_amount(-0.4), "-0.40");
    }

    #[test]
    fn negative_zero_formats_as_zero() {
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn non_finite_does_not_panic() {
        assert_eq!(format_amount(f64::NAN), "NaN");
        assert_eq!(format_amount(f64::INFINITY), "inf");
    }

    #[test]
    fn quantity_is_raw() {
        assert_eq!(format_quantity(100.0), "100");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(-3.0), "-3");
    }
}
