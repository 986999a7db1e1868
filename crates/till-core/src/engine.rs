//! # Pricing Engine
//!
//! Runs an order through the registered promotions and writes its summary.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PricingEngine::process                            │
//! │                                                                         │
//! │  1. original_amount = Σ(unit_price × requested_quantity)               │
//! │         │   fixed here, never recomputed                                │
//! │         ▼                                                               │
//! │  2. quantity promotions, registration order ──► effective quantities   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. amount promotions, registration order ──► Σ discounts              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. total_amount = original_amount - discount   (no clamping)          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  5. order handed back to the caller                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine keeps no per-order state. Once promotions are registered it can
//! be shared by reference across threads, each pricing its own `Order`.

use tracing::{debug, warn};

use crate::money::Money;
use crate::promotion::{AmountPromotion, QuantityPromotion};
use crate::types::{Order, OrderSummary};

/// Holds the active promotions and prices orders with them.
///
/// ## Example
/// ```rust
/// use till_core::{AmountPromotion, Money, Order, PricingEngine, Product, QuantityPromotion};
///
/// let engine = PricingEngine::new()
///     .with_quantity_promotion(QuantityPromotion::new("cosmetics"))
///     .with_amount_promotion(AmountPromotion::new(Money::from_units(15), Money::from_units(5)));
///
/// let mut order = Order::new();
/// order.add_item(Product::with_category("Lipstick", Money::from_units(10), "cosmetics"), 2);
///
/// let order = engine.process(order);
/// assert_eq!(order.original_amount().units(), 20);
/// assert_eq!(order.discount().units(), 5);
/// assert_eq!(order.total_amount().units(), 15);
/// assert_eq!(order.final_quantity("Lipstick"), Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    quantity_promotions: Vec<QuantityPromotion>,
    amount_promotions: Vec<AmountPromotion>,
}

impl PricingEngine {
    /// Creates an engine with no promotions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine from already-ordered promotion lists.
    pub fn from_promotions(
        quantity_promotions: Vec<QuantityPromotion>,
        amount_promotions: Vec<AmountPromotion>,
    ) -> Self {
        PricingEngine {
            quantity_promotions,
            amount_promotions,
        }
    }

    /// Registers a quantity promotion after the ones already present.
    pub fn add_quantity_promotion(&mut self, promotion: QuantityPromotion) {
        self.quantity_promotions.push(promotion);
    }

    /// Registers an amount promotion after the ones already present.
    pub fn add_amount_promotion(&mut self, promotion: AmountPromotion) {
        self.amount_promotions.push(promotion);
    }

    pub fn with_quantity_promotion(mut self, promotion: QuantityPromotion) -> Self {
        self.add_quantity_promotion(promotion);
        self
    }

    pub fn with_amount_promotion(mut self, promotion: AmountPromotion) -> Self {
        self.add_amount_promotion(promotion);
        self
    }

    #[inline]
    pub fn quantity_promotions(&self) -> &[QuantityPromotion] {
        &self.quantity_promotions
    }

    #[inline]
    pub fn amount_promotions(&self) -> &[AmountPromotion] {
        &self.amount_promotions
    }

    /// Checks if no promotion of either kind is registered.
    pub fn is_empty(&self) -> bool {
        self.quantity_promotions.is_empty() && self.amount_promotions.is_empty()
    }

    /// Prices `order` and hands it back.
    pub fn process(&self, mut order: Order) -> Order {
        self.process_in_place(&mut order);
        order
    }

    /// Prices `order` in place and returns its summary.
    ///
    /// Processing an already processed order recomputes the summary from the
    /// requested quantities, but the quantity promotions grant their free
    /// units again.
    pub fn process_in_place(&self, order: &mut Order) -> OrderSummary {
        let original_amount = order.subtotal();

        for promotion in &self.quantity_promotions {
            promotion.apply(order);
        }

        let discount: Money = self
            .amount_promotions
            .iter()
            .map(|promotion| promotion.evaluate(order))
            .sum();

        order.record_amounts(original_amount, discount);
        let summary = order.summary();

        debug!(
            order_id = %order.id(),
            lines = summary.line_count,
            original_amount = %summary.original_amount,
            discount = %summary.discount,
            total_amount = %summary.total_amount,
            "Order priced"
        );

        if summary.is_total_negative() {
            warn!(
                order_id = %order.id(),
                original_amount = %summary.original_amount,
                discount = %summary.discount,
                "Stacked discounts exceed the original amount, total is negative"
            );
        }

        summary
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
