//! Price arithmetic - effective price, discount application and cent rounding.
//!
//! These functions never fail and never validate. They trust that the values they
//! receive already passed [`crate::core::validation`], and produce mathematically
//! consistent output even when they did not (a negative percentage yields a price
//! above the original).

/// Rounds a price to two decimal places, half away from zero.
///
/// The scaled value is rounded first, then nudged one cent outward when the
/// midpoint between the candidate and the next cent does not exceed `amount`.
/// That makes decimal midpoints that are stored just below the true half round
/// up as written: `1.005` becomes `1.01` and `0.145` becomes `0.15`. Exact
/// midpoints such as `0.125` round up to `0.13`, where half-to-even would give
/// `0.12`.
#[must_use]
pub fn round_to_cents(amount: f64) -> f64 {
    const SCALE: f64 = 100.0;
    let mut cents = (amount * SCALE).round();
    if amount > 0.0 {
        if (cents + 0.5) / SCALE <= amount {
            cents += 1.0;
        }
    } else if (cents - 0.5) / SCALE >= amount {
        cents -= 1.0;
    }
    cents / SCALE
}

/// Applies a percentage discount to a price and rounds the result to cents.
///
/// Computes `price - price * percentage / 100`. No validation is performed.
///
/// # Examples
/// ```
/// use item_pricing::core::pricing::apply_discount;
///
/// assert!((apply_discount(100.0, 20) - 80.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn apply_discount(price: f64, percentage: i32) -> f64 {
    round_to_cents(price - price * f64::from(percentage) / 100.0)
}

/// Effective price of an item from its raw pricing fields.
///
/// Undiscounted items return `original_price` untouched (no rounding); discounted
/// items go through [`apply_discount`], so both paths agree bit for bit.
#[must_use]
pub fn effective_price(original_price: f64, has_discount: bool, discount_percentage: i32) -> f64 {
    if has_discount {
        apply_discount(original_price, discount_percentage)
    } else {
        original_price
    }
}
