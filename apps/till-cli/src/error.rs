//! # CLI Error Types
//!
//! Everything that can go wrong between reading the inputs and printing the
//! summary. The pricing itself cannot fail; these cover the files around it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CLI Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │  Order Fixture  │  │      Output             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigParse    │  │  Table          │  │  Json                   │ │
//! │  │  InvalidConfig  │  │  Io             │  │  Core (not found)       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::{CoreError, ValidationError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an order table or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config parsed but breaks a rule (negative discount, blank category).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A row of the order table could not be turned into an order line.
    ///
    /// `line` is 1-based and counts every line of the input, blank or not.
    #[error("Order table line {line}: {reason}")]
    Table { line: usize, reason: String },

    /// Domain error from till-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(CoreError::Validation(err))
    }
}
