//! Free-text currency parsing
//!
//! The landing page sends totals as display text like `"1,999 ج.م"`. The
//! attribution providers need a number, so everything that is not an ASCII
//! digit or decimal point is stripped before parsing. The policy lives here
//! so it can be tested and changed in one place.

/// Order value reported when the total text is absent or unparseable.
pub const DEFAULT_ORDER_VALUE: f64 = 1999.0;

/// Parse a numeric order value out of free-form currency text.
///
/// `"1,999 ج.م"` parses to `1999.0`. Thousands separators are dropped, not
/// treated as decimal points.
pub fn parse_order_value(total: Option<&str>) -> f64 {
    let cleaned: String = total
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    cleaned.parse().unwrap_or(DEFAULT_ORDER_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_egp_display_text() {
        assert_eq!(parse_order_value(Some("1,999 ج.م")), 1999.0);
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(parse_order_value(Some("2500")), 2500.0);
    }

    #[test]
    fn test_decimal_point_survives() {
        assert_eq!(parse_order_value(Some("1999.50 EGP")), 1999.5);
    }

    #[test]
    fn test_absent_total_falls_back() {
        assert_eq!(parse_order_value(None), DEFAULT_ORDER_VALUE);
    }

    #[test]
    fn test_unparseable_text_falls_back() {
        assert_eq!(parse_order_value(Some("مجانا")), DEFAULT_ORDER_VALUE);
        assert_eq!(parse_order_value(Some("")), DEFAULT_ORDER_VALUE);
    }
}
