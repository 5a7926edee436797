//! Vietnamese dong amounts.
//!
//! The backend reports all prices and transaction amounts as whole dong.
//! Display formatting follows the vi-VN convention: dot-grouped thousands
//! with a trailing dong sign, e.g. `1.250.000 ₫`.

use std::fmt;

/// An amount of Vietnamese dong.
///
/// # Examples
///
/// ```
/// use admin_server::domain::Vnd;
///
/// assert_eq!(Vnd::new(1_250_000).to_string(), "1.250.000 ₫");
/// assert_eq!(Vnd::new(0).to_string(), "0 ₫");
/// assert_eq!(Vnd::new(-50_000).to_string(), "-50.000 ₫");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vnd(i64);

impl Vnd {
    /// Lowest price the backend accepts for a trip schedule.
    pub const MIN_SCHEDULE_PRICE: Vnd = Vnd(100_000);

    /// Wrap a whole-dong amount.
    pub fn new(amount: i64) -> Self {
        Vnd(amount)
    }

    /// Returns the raw amount in dong.
    pub fn amount(&self) -> i64 {
        self.0
    }

    /// Sum of two amounts, saturating at the i64 bounds.
    pub fn saturating_add(self, other: Vnd) -> Vnd {
        Vnd(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Vnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();

        // Group digits in threes from the right with '.'
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - offset) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        if negative {
            write!(f, "-{grouped} \u{20ab}")
        } else {
            write!(f, "{grouped} \u{20ab}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_small_amounts() {
        assert_eq!(Vnd::new(0).to_string(), "0 ₫");
        assert_eq!(Vnd::new(5).to_string(), "5 ₫");
        assert_eq!(Vnd::new(999).to_string(), "999 ₫");
    }

    #[test]
    fn format_grouped_amounts() {
        assert_eq!(Vnd::new(1_000).to_string(), "1.000 ₫");
        assert_eq!(Vnd::new(100_000).to_string(), "100.000 ₫");
        assert_eq!(Vnd::new(1_250_000).to_string(), "1.250.000 ₫");
        assert_eq!(Vnd::new(987_654_321).to_string(), "987.654.321 ₫");
    }

    #[test]
    fn format_negative_amounts() {
        assert_eq!(Vnd::new(-1).to_string(), "-1 ₫");
        assert_eq!(Vnd::new(-50_000).to_string(), "-50.000 ₫");
        assert_eq!(Vnd::new(-1_000_000).to_string(), "-1.000.000 ₫");
    }

    #[test]
    fn min_schedule_price() {
        assert_eq!(Vnd::MIN_SCHEDULE_PRICE.amount(), 100_000);
        assert!(Vnd::new(99_999) < Vnd::MIN_SCHEDULE_PRICE);
        assert!(Vnd::new(100_000) >= Vnd::MIN_SCHEDULE_PRICE);
    }

    #[test]
    fn saturating_add() {
        assert_eq!(
            Vnd::new(1_000).saturating_add(Vnd::new(500)).amount(),
            1_500
        );
        assert_eq!(
            Vnd::new(i64::MAX).saturating_add(Vnd::new(1)).amount(),
            i64::MAX
        );
    }

    #[test]
    fn ordering_by_amount() {
        assert!(Vnd::new(100) < Vnd::new(200));
        assert!(Vnd::new(-100) < Vnd::new(0));
    }
}
