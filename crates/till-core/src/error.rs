//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-cli errors (separate crate)                                      │
//! │  └── CliError         - Config, fixture and output failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself never fails. These errors belong to the
//! collaborators that build orders and read summaries.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line in the order carries a product with this name.
    ///
    /// ## When This Occurs
    /// - A caller insists on a product's final quantity via
    ///   [`Order::require_line`](crate::types::Order::require_line)
    /// - The product was never added to the order
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] before an order or promotion is built.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., non-numeric quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
