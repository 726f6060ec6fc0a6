//! Small shared helpers.

/// Round a monetary amount to 2 decimal places.
///
/// Every money field that leaves the core goes through this, so totals
/// can be compared with `==` downstream.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format a numeric string without a trailing `.0` for integral values.
///
/// Extraction carries numeric observations as strings (`"11"`, `"1.1"`);
/// this keeps parsed floats in that canonical form.
pub fn trim_numeric(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_truncates_to_cents() {
        assert_eq!(round2(10.554), 10.55);
        assert_eq!(round2(10.556), 10.56);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(-3.141), -3.14);
    }

    #[test]
    fn trim_numeric_drops_integral_fraction() {
        assert_eq!(trim_numeric(11.0), "11");
        assert_eq!(trim_numeric(1.1), "1.1");
        assert_eq!(trim_numeric(0.0), "0");
    }
}
