/// Average effective price across all stored items
pub mod average;

/// Category creation and item linking
pub mod category;

/// Item lifecycle: create, read, update, delete
pub mod item;

/// Price arithmetic: discounts and cent rounding
pub mod pricing;

/// Item validation rules
pub mod validation;
