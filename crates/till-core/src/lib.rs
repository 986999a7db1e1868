//! # till-core: Pure Pricing Logic for Till
//!
//! This crate prices customer orders against a set of promotions. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli (collaborator)                       │   │
//! │  │    till.toml ──► PricingEngine     order table ──► Order         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ promotion │  │  engine   │  │ validation│  │   │
//! │  │   │  Product  │  │ Quantity  │  │ Pricing   │  │   rules   │  │   │
//! │  │   │   Order   │  │  Amount   │  │  Engine   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, OrderLine, Order, OrderSummary
//! - [`money`] - Money type with integer arithmetic
//! - [`promotion`] - Quantity (free units) and amount (threshold) promotions
//! - [`engine`] - The pricing pipeline
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules for order and promotion builders
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{AmountPromotion, Money, Order, PricingEngine, Product};
//!
//! let engine = PricingEngine::new()
//!     .with_amount_promotion(AmountPromotion::new(Money::from_units(100), Money::from_units(10)));
//!
//! let mut order = Order::new();
//! order.add_item(Product::new("Widget", Money::from_units(60)), 2);
//!
//! let order = engine.process(order);
//! assert_eq!(order.total_amount().units(), 110);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod money;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::PricingEngine;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use promotion::{AmountPromotion, QuantityPromotion, DEFAULT_FREE_UNITS};
pub use types::*;
