//! # Validation Module
//!
//! Input validation for the collaborators that build orders and promotions.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Collaborator (order fixtures, config files)                  │
//! │  ├── Parsing (numbers, required columns)                               │
//! │  └── THIS MODULE: value rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: PricingEngine                                                │
//! │  └── No checks. Everything it receives is trusted.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Lipstick").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "productName".to_string(),
        });
    }

    Ok(())
}

/// Validates a category, on a product or as a promotion target.
///
/// An absent category is fine; a present one must not be blank, since a
/// blank target would silently match nothing.
pub fn validate_category(category: Option<&str>) -> ValidationResult<()> {
    match category {
        Some(category) if category.trim().is_empty() => Err(ValidationError::Required {
            field: "category".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity.
///
/// ## Rules
/// - Must be positive (>= 1)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_units(10)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_units(-1)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    non_negative("unitPrice", price)
}

/// Validates a promotion threshold (>= 0).
pub fn validate_threshold(threshold: Money) -> ValidationResult<()> {
    non_negative("threshold", threshold)
}

/// Validates a promotion discount (>= 0).
pub fn validate_discount(discount: Money) -> ValidationResult<()> {
    non_negative("discount", discount)
}

/// Validates the free units granted by a quantity promotion (>= 0).
pub fn validate_free_units(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "free_units".to_string(),
        });
    }

    Ok(())
}

fn non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
