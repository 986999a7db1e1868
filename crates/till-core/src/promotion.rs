//! # Promotions
//!
//! The two promotion kinds the pricing engine understands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Promotion Kinds                                  │
//! │                                                                         │
//! │  QuantityPromotion ("buy one get one")    AmountPromotion (threshold)   │
//! │  ─────────────────────────────────────    ───────────────────────────   │
//! │  • Touches: effective quantity            • Touches: nothing (pure)     │
//! │  • Scope:   lines in target category      • Scope:   whole order        │
//! │  • Effect:  + free_units per line         • Effect:  fixed discount     │
//! │  • Stacks:  additively, per promotion     • Stacks:  summed, no cap     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both kinds deserialize from the promotion config file:
//! ```toml
//! [[promotions.quantity]]
//! target_category = "cosmetics"
//!
//! [[promotions.threshold]]
//! threshold = 100
//! discount = 10
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::Money;
use crate::types::{Order, Product};

/// Free units granted per matching line when a config does not say otherwise.
pub const DEFAULT_FREE_UNITS: i64 = 1;

fn default_free_units() -> i64 {
    DEFAULT_FREE_UNITS
}

// =============================================================================
// Quantity Promotion
// =============================================================================

/// Grants free units on every line whose product is in the target category.
///
/// The customer is charged for the requested quantity only; the free units
/// show up in the line's effective quantity.
///
/// ## Example
/// ```rust
/// use till_core::{Money, Order, Product, QuantityPromotion};
///
/// let mut order = Order::new();
/// order.add_item(Product::with_category("Lipstick", Money::from_units(10), "cosmetics"), 2);
///
/// QuantityPromotion::new("cosmetics").apply(&mut order);
/// assert_eq!(order.final_quantity("Lipstick"), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityPromotion {
    target_category: String,
    #[serde(default = "default_free_units")]
    free_units: i64,
}

impl QuantityPromotion {
    /// One free unit per matching line.
    pub fn new(target_category: impl Into<String>) -> Self {
        QuantityPromotion {
            target_category: target_category.into(),
            free_units: DEFAULT_FREE_UNITS,
        }
    }

    /// Overrides the number of free units granted per matching line.
    pub fn with_free_units(mut self, free_units: i64) -> Self {
        self.free_units = free_units;
        self
    }

    #[inline]
    pub fn target_category(&self) -> &str {
        &self.target_category
    }

    #[inline]
    pub fn free_units(&self) -> i64 {
        self.free_units
    }

    /// Checks whether `product` falls under this promotion.
    pub fn matches(&self, product: &Product) -> bool {
        product.is_in_category(&self.target_category)
    }

    /// Adds the free units to every matching line of `order`.
    ///
    /// Lines without a category, or with a different one, are left alone.
    /// Running the same promotion twice grants the units twice.
    pub fn apply(&self, order: &mut Order) {
        let mut matched = 0usize;
        for line in order.lines_mut() {
            if self.matches(line.product()) {
                line.grant_free_units(self.free_units);
                matched += 1;
            }
        }

        debug!(
            category = %self.target_category,
            free_units = self.free_units,
            matched,
            "Applied quantity promotion"
        );
    }
}

// =============================================================================
// Amount Promotion
// =============================================================================

/// Fixed discount granted once the order subtotal reaches a threshold.
///
/// ## Threshold Check
/// ```text
/// subtotal = Σ(unit_price × requested_quantity)
///      │
///      ├── subtotal >= threshold → discount
///      │
///      └── otherwise             → 0
/// ```
///
/// The subtotal is always the pre-promotion one: free units and other
/// discounts never feed back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountPromotion {
    threshold: Money,
    discount: Money,
}

impl AmountPromotion {
    pub fn new(threshold: Money, discount: Money) -> Self {
        AmountPromotion {
            threshold,
            discount,
        }
    }

    #[inline]
    pub fn threshold(&self) -> Money {
        self.threshold
    }

    #[inline]
    pub fn discount(&self) -> Money {
        self.discount
    }

    /// Checks whether `subtotal` meets or exceeds the threshold.
    #[inline]
    pub fn is_met_by(&self, subtotal: Money) -> bool {
        subtotal >= self.threshold
    }

    /// Returns the discount this promotion contributes to `order`.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{AmountPromotion, Money, Order, Product};
    ///
    /// let mut order = Order::new();
    /// order.add_item(Product::new("Widget", Money::from_units(60)), 2);
    ///
    /// let promotion = AmountPromotion::new(Money::from_units(100), Money::from_units(10));
    /// assert_eq!(promotion.evaluate(&order).units(), 10);
    /// ```
    pub fn evaluate(&self, order: &Order) -> Money {
        let subtotal = order.subtotal();
        let granted = if self.is_met_by(subtotal) {
            self.discount
        } else {
            Money::zero()
        };

        debug!(
            subtotal = %subtotal,
            threshold = %self.threshold,
            granted = %granted,
            "Evaluated amount promotion"
        );

        granted
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
