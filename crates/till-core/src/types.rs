//! # Domain Types
//!
//! Catalog and order types shared by the promotions and the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │     OrderLine       │   │     Order       │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  name           │◄──│  product            │◄──│  lines (Vec)    │   │
//! │  │  unit_price     │   │  requested_quantity │   │  original_amount│   │
//! │  │  category?      │   │  effective_quantity │   │  discount       │   │
//! │  └─────────────────┘   └─────────────────────┘   │  total_amount   │   │
//! │                                                  └────────┬────────┘   │
//! │                                                           │ From<&>    │
//! │                                                  ┌────────▼────────┐   │
//! │                                                  │  OrderSummary   │   │
//! │                                                  └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Requested vs Effective Quantity
//! The requested quantity is what the customer ordered and what they pay for.
//! The effective quantity is what they receive once free units are granted.
//! Pricing always reads the requested quantity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product as it appears on an order line.
///
/// Immutable once built. A product without a category never matches a
/// category-scoped promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    name: String,
    unit_price: Money,
    category: Option<String>,
}

impl Product {
    /// Creates an uncategorised product.
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        Product {
            name: name.into(),
            unit_price,
            category: None,
        }
    }

    /// Creates a product that belongs to `category`.
    pub fn with_category(
        name: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
    ) -> Self {
        Product {
            name: name.into(),
            unit_price,
            category: Some(category.into()),
        }
    }

    /// Display name, also the identity used by name lookups.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of one unit.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Case-sensitive exact match against the product's category.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Money, Product};
    ///
    /// let lipstick = Product::with_category("Lipstick", Money::from_units(10), "cosmetics");
    /// assert!(lipstick.is_in_category("cosmetics"));
    /// assert!(!lipstick.is_in_category("Cosmetics"));
    ///
    /// let widget = Product::new("Widget", Money::from_units(100));
    /// assert!(!widget.is_in_category("cosmetics"));
    /// ```
    pub fn is_in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One product and quantity entry within an order.
///
/// ## Invariants
/// - `requested_quantity` never changes after creation
/// - `effective_quantity` starts equal to `requested_quantity` and only grows,
///   through quantity promotions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    product: Product,
    requested_quantity: i64,
    effective_quantity: i64,
}

impl OrderLine {
    /// Creates a line with no free units yet.
    pub fn new(product: Product, requested_quantity: i64) -> Self {
        OrderLine {
            product,
            requested_quantity,
            effective_quantity: requested_quantity,
        }
    }

    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity the customer ordered and pays for.
    #[inline]
    pub fn requested_quantity(&self) -> i64 {
        self.requested_quantity
    }

    /// Quantity the customer receives.
    #[inline]
    pub fn effective_quantity(&self) -> i64 {
        self.effective_quantity
    }

    /// Units granted on top of the requested quantity.
    #[inline]
    pub fn free_units(&self) -> i64 {
        self.effective_quantity - self.requested_quantity
    }

    /// Priced subtotal: unit price × requested quantity.
    ///
    /// Free units are never charged, so the effective quantity plays no part.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.product.unit_price().multiply_quantity(self.requested_quantity)
    }

    pub(crate) fn grant_free_units(&mut self, units: i64) {
        self.effective_quantity += units;
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order and, once priced, its summary amounts.
///
/// ## Lifecycle
/// ```text
/// Order::new() ──► add_item()/add_line() ──► PricingEngine::process() ──► read summary
///  (amounts 0)        (insertion order)        (writes amounts)
/// ```
///
/// Lines are kept in insertion order and never merged. When two lines share a
/// product name, name lookups see the first one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: String,
    created_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
    original_amount: Money,
    discount: Money,
    total_amount: Money,
}

impl Order {
    /// Creates an empty, unpriced order.
    pub fn new() -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            lines: Vec::new(),
            original_amount: Money::zero(),
            discount: Money::zero(),
            total_amount: Money::zero(),
        }
    }

    /// Unique identifier (UUID v4), used to correlate log events.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Appends a line. Duplicate product names are kept as separate lines.
    pub fn add_line(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    /// Appends a line for `product` with `quantity` requested units.
    pub fn add_item(&mut self, product: Product, quantity: i64) {
        self.add_line(OrderLine::new(product, quantity));
    }

    #[inline]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> impl Iterator<Item = &mut OrderLine> {
        self.lines.iter_mut()
    }

    /// First line whose product carries `name`.
    pub fn line_by_product_name(&self, name: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.product().name() == name)
    }

    /// Like [`Order::line_by_product_name`], but absence is an error.
    pub fn require_line(&self, name: &str) -> CoreResult<&OrderLine> {
        self.line_by_product_name(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))
    }

    /// Final (effective) quantity of the first line carrying `name`.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Money, Order, Product};
    ///
    /// let mut order = Order::new();
    /// order.add_item(Product::new("Widget", Money::from_units(100)), 1);
    ///
    /// assert_eq!(order.final_quantity("Widget"), Some(1));
    /// assert_eq!(order.final_quantity("Gadget"), None);
    /// ```
    pub fn final_quantity(&self, name: &str) -> Option<i64> {
        self.line_by_product_name(name)
            .map(OrderLine::effective_quantity)
    }

    /// Pre-promotion subtotal: Σ(unit price × requested quantity).
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of requested quantities across all lines.
    pub fn total_requested_quantity(&self) -> i64 {
        self.lines.iter().map(OrderLine::requested_quantity).sum()
    }

    /// Sum of effective quantities across all lines.
    pub fn total_effective_quantity(&self) -> i64 {
        self.lines.iter().map(OrderLine::effective_quantity).sum()
    }

    /// Amount before promotions. Zero until the order is processed.
    #[inline]
    pub fn original_amount(&self) -> Money {
        self.original_amount
    }

    /// Sum of all amount-promotion discounts. Zero until processed.
    #[inline]
    pub fn discount(&self) -> Money {
        self.discount
    }

    /// `original_amount - discount`, not clamped. Zero until processed.
    #[inline]
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Snapshot of the summary fields.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from(self)
    }

    pub(crate) fn record_amounts(&mut self, original_amount: Money, discount: Money) {
        self.original_amount = original_amount;
        self.discount = discount;
        self.total_amount = original_amount - discount;
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Order summary handed to consumers (reports, frontends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub line_count: usize,
    pub total_requested_quantity: i64,
    pub total_effective_quantity: i64,
    pub original_amount: Money,
    pub discount: Money,
    pub total_amount: Money,
}

impl OrderSummary {
    /// Stacked discounts exceeded the original amount.
    pub fn is_total_negative(&self) -> bool {
        self.total_amount.is_negative()
    }
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        OrderSummary {
            line_count: order.line_count(),
            total_requested_quantity: order.total_requested_quantity(),
            total_effective_quantity: order.total_effective_quantity(),
            original_amount: order.original_amount(),
            discount: order.discount(),
            total_amount: order.total_amount(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lipstick() -> Product {
        Product::with_category("Lipstick", Money::from_units(10), "cosmetics")
    }

    #[test]
    fn test_product_category_matching() {
        let product = lipstick();
        assert_eq!(product.category(), Some("cosmetics"));
        assert!(product.is_in_category("cosmetics"));
        assert!(!product.is_in_category("COSMETICS"));
        assert!(!product.is_in_category(""));

        let plain = Product::new("Widget", Money::from_units(100));
        assert_eq!(plain.category(), None);
        assert!(!plain.is_in_category(""));
    }

    #[test]
    fn test_line_starts_without_free_units() {
        let line = OrderLine::new(lipstick(), 2);
        assert_eq!(line.requested_quantity(), 2);
        assert_eq!(line.effective_quantity(), 2);
        assert_eq!(line.free_units(), 0);
        assert_eq!(line.subtotal().units(), 20);
    }

    #[test]
    fn test_free_units_do_not_change_subtotal() {
        let mut line = OrderLine::new(lipstick(), 2);
        line.grant_free_units(1);

        assert_eq!(line.effective_quantity(), 3);
        assert_eq!(line.free_units(), 1);
        assert_eq!(line.subtotal().units(), 20);
    }

    #[test]
    fn test_new_order_is_unpriced() {
        let order = Order::new();
        assert!(order.is_empty());
        assert!(order.original_amount().is_zero());
        assert!(order.discount().is_zero());
        assert!(order.total_amount().is_zero());
        assert!(!order.id().is_empty());
    }

    #[test]
    fn test_order_ids_are_unique() {
        assert_ne!(Order::new().id(), Order::default().id());
    }

    #[test]
    fn test_order_subtotal_uses_requested_quantity() {
        let mut order = Order::new();
        order.add_item(Product::new("Widget", Money::from_units(60)), 2);
        order.add_item(lipstick(), 2);
        order.lines_mut().for_each(|line| line.grant_free_units(5));

        assert_eq!(order.subtotal().units(), 140);
        assert_eq!(order.total_requested_quantity(), 4);
        assert_eq!(order.total_effective_quantity(), 14);
    }

    #[test]
    fn test_lookup_returns_first_matching_line() {
        let mut order = Order::new();
        order.add_item(lipstick(), 2);
        order.add_item(lipstick(), 7);

        assert_eq!(order.line_count(), 2);
        assert_eq!(order.final_quantity("Lipstick"), Some(2));
        assert_eq!(
            order
                .line_by_product_name("Lipstick")
                .map(OrderLine::requested_quantity),
            Some(2)
        );
    }

    #[test]
    fn test_lookup_of_absent_product() {
        let order = Order::new();
        assert_eq!(order.final_quantity("Lipstick"), None);
        assert!(matches!(
            order.require_line("Lipstick"),
            Err(CoreError::ProductNotFound(name)) if name == "Lipstick"
        ));
    }

    #[test]
    fn test_record_amounts_does_not_clamp() {
        let mut order = Order::new();
        order.record_amounts(Money::from_units(20), Money::from_units(30));

        let summary = order.summary();
        assert_eq!(summary.total_amount.units(), -10);
        assert!(summary.is_total_negative());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let mut order = Order::new();
        order.add_item(Product::new("Widget", Money::from_units(100)), 1);
        order.record_amounts(Money::from_units(100), Money::zero());

        let json = serde_json::to_value(order.summary()).unwrap();
        assert_eq!(json["originalAmount"], 100);
        assert_eq!(json["discount"], 0);
        assert_eq!(json["totalAmount"], 100);
        assert_eq!(json["lineCount"], 1);
    }

    #[test]
    fn test_order_serializes_lines_and_timestamp() {
        let mut order = Order::new();
        order.add_item(lipstick(), 2);
        order.add_item(Product::new("Widget", Money::from_units(100)), 1);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], order.id());
        let created_at: DateTime<Utc> = json["createdAt"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(created_at, order.created_at());
        assert_eq!(json["lines"][0]["product"]["unitPrice"], 10);
        assert_eq!(json["lines"][0]["effectiveQuantity"], 2);
        assert!(json["lines"][1]["product"]["category"].is_null());
    }
}
