//! # till-cli: Command-Line Collaborator for till-core
//!
//! Everything around the pricing engine that touches the outside world:
//!
//! - [`config`] - promotion and output settings (TOML file + environment)
//! - [`table`] - orders built from pipe-delimited fixture tables
//! - [`report`] - summary rendering (text tables or JSON)
//! - [`error`] - CLI error type
//!
//! ## Flow
//! ```text
//! till.toml ──► TillConfig ──► PricingEngine ─┐
//!                                             ├──► process() ──► report::render
//! order.table ──► table::read_order ──► Order ┘
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod table;

pub use config::{OutputFormat, TillConfig};
pub use error::{CliError, CliResult};
