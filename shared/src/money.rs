//! Money conversion helpers
//!
//! All amounts are carried as minor-unit integers (cents) so cart and
//! order arithmetic is exact. Conversion to and from major units goes
//! through `rust_decimal` to avoid floating drift at the boundary.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Convert a major-unit decimal amount to cents (rounds half-up at 2 digits)
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shared::money::decimal_to_cents;
///
/// assert_eq!(decimal_to_cents(Decimal::new(1250, 2)), Some(1250));
/// assert_eq!(decimal_to_cents(Decimal::new(1, 2)), Some(1));
/// ```
pub fn decimal_to_cents(amount: Decimal) -> Option<i64> {
    (amount * Decimal::from(100)).round().to_i64()
}

/// Convert cents to a major-unit decimal amount
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shared::money::cents_to_decimal;
///
/// assert_eq!(cents_to_decimal(1250), Decimal::new(1250, 2));
/// ```
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Parse a user-facing amount string ("12.50") into cents
pub fn parse_cents(text: &str) -> Option<i64> {
    text.trim().parse::<Decimal>().ok().and_then(decimal_to_cents)
}

/// Format cents as a currency string
///
/// # Examples
///
/// ```
/// use shared::money::format_cents;
///
/// assert_eq!(format_cents(1250), "$12.50");
/// assert_eq!(format_cents(100), "$1.00");
/// ```
pub fn format_cents(cents: i64) -> String {
    format!("${}", cents_to_decimal(cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_round_trip() {
        for cents in [0i64, 1, 99, 100, 1250, 9999, 100_000] {
            let dec = cents_to_decimal(cents);
            assert_eq!(decimal_to_cents(dec), Some(cents), "failed for {}", cents);
        }
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("12.50"), Some(1250));
        assert_eq!(parse_cents("0.01"), Some(1));
        assert_eq!(parse_cents(" 3 "), Some(300));
        assert_eq!(parse_cents("abc"), None);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1250), "$12.50");
        assert_eq!(format_cents(1), "$0.01");
        assert_eq!(format_cents(0), "$0.00");
    }
}
