//! Item validation - turns untrusted input into a [`ValidatedItem`].
//!
//! Every write path (`create_item`, `update_item`, config seeding) accepts only a
//! [`ValidatedItem`], so an item that breaks a rule can never reach the database.
//! All rules are checked on every call and every failure is reported, not just the
//! first one.

use crate::core::pricing;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Name given to items that do not set one.
pub const DEFAULT_ITEM_NAME: &str = "Item";

/// Discount percentages must stay strictly below this value.
pub const MAX_DISCOUNT_PERCENTAGE: f64 = 100.0;

/// A single rule violation on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Name of the offending field, e.g. `original_price`
    pub field: &'static str,
    /// Human-readable reason, e.g. `must be greater than 0`
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// All rule violations found while validating one item, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", join_violations(.violations))]
pub struct ValidationErrors {
    /// The individual field failures; never empty
    pub violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    /// Messages reported for `field`, empty when the field passed.
    #[must_use]
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }

    /// Whether `field` has at least one violation.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Unvalidated item input.
///
/// Fields are optional so that missing and explicitly-null values can be told apart
/// from valid ones. `discount_percentage` is a float so that fractional input can be
/// rejected rather than silently truncated. `Default` mirrors the column defaults:
/// no discount, `0` percent, default name, no price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDraft {
    /// Display label; `None` falls back to [`DEFAULT_ITEM_NAME`]
    #[serde(default)]
    pub name: Option<String>,
    /// Undiscounted price
    #[serde(default)]
    pub original_price: Option<f64>,
    /// Discount flag; `None` means the value was explicitly null
    #[serde(default = "default_has_discount")]
    pub has_discount: Option<bool>,
    /// Discount percentage; `None` means the value was explicitly null
    #[serde(default = "default_discount_percentage")]
    pub discount_percentage: Option<f64>,
}

#[allow(clippy::unnecessary_wraps)]
const fn default_has_discount() -> Option<bool> {
    Some(false)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_discount_percentage() -> Option<f64> {
    Some(0.0)
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            name: None,
            original_price: None,
            has_discount: default_has_discount(),
            discount_percentage: default_discount_percentage(),
        }
    }
}

impl ItemDraft {
    /// Draft for an undiscounted item at `original_price`.
    #[must_use]
    pub fn priced(original_price: f64) -> Self {
        Self {
            original_price: Some(original_price),
            ..Self::default()
        }
    }

    /// Draft for an item discounted by `percentage` off `original_price`.
    #[must_use]
    pub fn discounted(original_price: f64, percentage: i32) -> Self {
        Self {
            original_price: Some(original_price),
            has_discount: Some(true),
            discount_percentage: Some(f64::from(percentage)),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Checks every item rule and returns the validated item.
    ///
    /// Rules:
    /// - `original_price` present, a finite number, greater than 0
    /// - `has_discount` present (`true` or `false`)
    /// - `discount_percentage` present, a finite whole number, `>= 0` and `< 100`
    ///
    /// # Errors
    /// Returns [`ValidationErrors`] listing every violated rule.
    pub fn validate(self) -> Result<ValidatedItem, ValidationErrors> {
        let mut violations = Vec::new();

        let original_price = check_original_price(self.original_price, &mut violations);
        let has_discount = check_has_discount(self.has_discount, &mut violations);
        let discount_percentage =
            check_discount_percentage(self.discount_percentage, &mut violations);

        match (original_price, has_discount, discount_percentage) {
            (Some(original_price), Some(has_discount), Some(discount_percentage))
                if violations.is_empty() =>
            {
                Ok(ValidatedItem {
                    name: self
                        .name
                        .unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string()),
                    original_price,
                    has_discount,
                    discount_percentage,
                })
            }
            _ => Err(ValidationErrors { violations }),
        }
    }
}

fn check_original_price(value: Option<f64>, violations: &mut Vec<FieldViolation>) -> Option<f64> {
    const FIELD: &str = "original_price";
    let Some(price) = value else {
        violations.push(FieldViolation::new(FIELD, "can't be blank"));
        return None;
    };
    if !price.is_finite() {
        violations.push(FieldViolation::new(FIELD, "is not a number"));
        return None;
    }
    if price <= 0.0 {
        violations.push(FieldViolation::new(FIELD, "must be greater than 0"));
        return None;
    }
    Some(price)
}

fn check_has_discount(value: Option<bool>, violations: &mut Vec<FieldViolation>) -> Option<bool> {
    if value.is_none() {
        violations.push(FieldViolation::new("has_discount", "is not a boolean value"));
    }
    value
}

#[allow(clippy::cast_possible_truncation)]
fn check_discount_percentage(
    value: Option<f64>,
    violations: &mut Vec<FieldViolation>,
) -> Option<i32> {
    const FIELD: &str = "discount_percentage";
    let Some(percentage) = value else {
        violations.push(FieldViolation::new(FIELD, "can't be blank"));
        return None;
    };
    if !percentage.is_finite() {
        violations.push(FieldViolation::new(FIELD, "is not a number"));
        return None;
    }
    if percentage.fract() != 0.0 {
        violations.push(FieldViolation::new(FIELD, "must be an integer"));
        return None;
    }
    let mut valid = true;
    if percentage >= MAX_DISCOUNT_PERCENTAGE {
        violations.push(FieldViolation::new(FIELD, "must be less than 100"));
        valid = false;
    }
    if percentage < 0.0 {
        violations.push(FieldViolation::new(
            FIELD,
            "must be greater than or equal to 0",
        ));
        valid = false;
    }
    // Whole and within 0..100 here, so the cast is exact
    valid.then_some(percentage as i32)
}

/// An item that passed every rule in [`ItemDraft::validate`].
///
/// Fields are private so the only way to obtain one is through validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    name: String,
    original_price: f64,
    has_discount: bool,
    discount_percentage: i32,
}

impl ValidatedItem {
    /// Display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Undiscounted price, always greater than zero.
    #[must_use]
    pub const fn original_price(&self) -> f64 {
        self.original_price
    }

    /// Whether the discount applies.
    #[must_use]
    pub const fn has_discount(&self) -> bool {
        self.has_discount
    }

    /// Discount percentage in `0..100`.
    #[must_use]
    pub const fn discount_percentage(&self) -> i32 {
        self.discount_percentage
    }

    /// Effective price after any active discount.
    #[must_use]
    pub fn price(&self) -> f64 {
        pricing::effective_price(
            self.original_price,
            self.has_discount,
            self.discount_percentage,
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_default_draft_without_price_is_rejected() {
        let errors = ItemDraft::default().validate().unwrap_err();
        assert_eq!(errors.messages_for("original_price"), vec!["can't be blank"]);
        assert_eq!(errors.violations.len(), 1);
    }

    #[test]
    fn test_valid_draft_gets_default_name() {
        let item = ItemDraft::priced(12.5).validate().unwrap();
        assert_eq!(item.name(), DEFAULT_ITEM_NAME);
        assert_eq!(item.original_price(), 12.5);
        assert!(!item.has_discount());
        assert_eq!(item.discount_percentage(), 0);
    }

    #[test]
    fn test_explicit_name_is_kept() {
        let item = ItemDraft::priced(1.0).named("Lamp").validate().unwrap();
        assert_eq!(item.name(), "Lamp");
    }

    #[test]
    fn test_original_price_boundaries() {
        let errors = ItemDraft::priced(0.0).validate().unwrap_err();
        assert_eq!(
            errors.messages_for("original_price"),
            vec!["must be greater than 0"]
        );

        let errors = ItemDraft::priced(-3.0).validate().unwrap_err();
        assert!(errors.has_field("original_price"));

        let item = ItemDraft::priced(0.01).validate().unwrap();
        assert_eq!(item.original_price(), 0.01);
    }

    #[test]
    fn test_original_price_must_be_a_number() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let errors = ItemDraft::priced(bad).validate().unwrap_err();
            assert_eq!(errors.messages_for("original_price"), vec!["is not a number"]);
        }
    }

    #[test]
    fn test_has_discount_must_be_present() {
        let draft = ItemDraft {
            has_discount: None,
            ..ItemDraft::priced(10.0)
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.messages_for("has_discount"),
            vec!["is not a boolean value"]
        );
    }

    #[test]
    fn test_discount_percentage_boundaries() {
        let item = ItemDraft::discounted(10.0, 99).validate().unwrap();
        assert_eq!(item.discount_percentage(), 99);

        let errors = ItemDraft::discounted(10.0, 100).validate().unwrap_err();
        assert_eq!(
            errors.messages_for("discount_percentage"),
            vec!["must be less than 100"]
        );

        let item = ItemDraft::discounted(10.0, 0).validate().unwrap();
        assert_eq!(item.discount_percentage(), 0);
    }

    #[test]
    fn test_negative_discount_percentage_is_rejected() {
        let errors = ItemDraft::discounted(10.0, -1).validate().unwrap_err();
        assert_eq!(
            errors.messages_for("discount_percentage"),
            vec!["must be greater than or equal to 0"]
        );
    }

    #[test]
    fn test_discount_percentage_must_be_whole_and_present() {
        let draft = ItemDraft {
            discount_percentage: Some(12.5),
            ..ItemDraft::priced(10.0)
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.messages_for("discount_percentage"),
            vec!["must be an integer"]
        );

        let draft = ItemDraft {
            discount_percentage: None,
            ..ItemDraft::priced(10.0)
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.messages_for("discount_percentage"),
            vec!["can't be blank"]
        );
    }

    #[test]
    fn test_all_violations_are_reported_together() {
        let draft = ItemDraft {
            name: None,
            original_price: Some(0.0),
            has_discount: None,
            discount_percentage: Some(150.0),
        };
        let errors = draft.validate().unwrap_err();
        let fields: Vec<_> = errors.violations.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["original_price", "has_discount", "discount_percentage"]
        );
        assert_eq!(
            errors.to_string(),
            "Validation failed: original_price must be greater than 0, \
             has_discount is not a boolean value, discount_percentage must be less than 100"
        );
    }

    #[test]
    fn test_validated_price_applies_discount() {
        let plain = ItemDraft::priced(100.0).validate().unwrap();
        assert_eq!(plain.price(), 100.0);

        let discounted = ItemDraft::discounted(100.0, 20).validate().unwrap();
        assert_eq!(discounted.price(), 80.0);
    }

    #[test]
    fn test_draft_deserializes_with_column_defaults() {
        let draft: ItemDraft = toml::from_str("original_price = 9.99").unwrap();
        assert_eq!(draft, ItemDraft::priced(9.99));
    }
}
