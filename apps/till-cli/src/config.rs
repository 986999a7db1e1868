//! # Till Configuration
//!
//! Which promotions are active, and how the summary is printed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --format json                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TILL_OUTPUT_FORMAT=json                                            │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/till/till.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.till.till/till.toml (macOS)      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     No promotions, text output                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [output]
//! format = "text"  # text | json
//!
//! [[promotions.quantity]]
//! target_category = "cosmetics"
//! free_units = 1   # optional
//!
//! [[promotions.threshold]]
//! threshold = 100
//! discount = 10
//! ```
//!
//! Promotions are registered with the engine in file order.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use till_core::validation::{
    validate_category, validate_discount, validate_free_units, validate_threshold,
};
use till_core::{AmountPromotion, Money, PricingEngine, QuantityPromotion};

use crate::error::{CliError, CliResult};

/// Environment variable overriding `[output] format`.
pub const OUTPUT_FORMAT_ENV: &str = "TILL_OUTPUT_FORMAT";

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "till.toml";

/// Log filter used when `RUST_LOG` is unset: every promotion decision from
/// the till crates, `info` from everything else.
pub const DEFAULT_LOG_FILTER: &str = "info,till=debug";

// =============================================================================
// Output Settings
// =============================================================================

/// How the order summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Pipe-delimited tables, the same shape as the order fixtures.
    #[default]
    Text,

    /// A single JSON document.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Promotion Settings
// =============================================================================

/// Active promotions, in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionSettings {
    /// Buy-one-get-one style promotions.
    #[serde(default)]
    pub quantity: Vec<QuantityPromotion>,

    /// Threshold discounts.
    #[serde(default)]
    pub threshold: Vec<AmountPromotion>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete Till configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TillConfig {
    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub promotions: PromotionSettings,
}

impl TillConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file just means "no promotions".
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::InvalidConfig(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::read_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load till config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config document. No environment overrides, no validation.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn read_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading till config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validates every configured promotion.
    pub fn validate(&self) -> CliResult<()> {
        for (index, promotion) in self.promotions.quantity.iter().enumerate() {
            validate_category(Some(promotion.target_category()))
                .and_then(|_| validate_free_units(promotion.free_units()))
                .map_err(|e| {
                    CliError::InvalidConfig(format!("promotions.quantity[{}]: {}", index, e))
                })?;
        }

        let mut total_discount = Money::zero();
        for (index, promotion) in self.promotions.threshold.iter().enumerate() {
            validate_threshold(promotion.threshold())
                .and_then(|_| validate_discount(promotion.discount()))
                .map_err(|e| {
                    CliError::InvalidConfig(format!("promotions.threshold[{}]: {}", index, e))
                })?;

            // Discounts are summed unchecked when an order is priced.
            total_discount = total_discount
                .checked_add(promotion.discount())
                .ok_or_else(|| {
                    CliError::InvalidConfig(format!(
                        "promotions.threshold[{}]: combined discount overflows",
                        index
                    ))
                })?;
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup(OUTPUT_FORMAT_ENV) {
            match format.parse::<OutputFormat>() {
                Ok(parsed) => {
                    debug!(format = %format, "Overriding output format from environment");
                    self.output.format = parsed;
                }
                Err(_) => warn!(format = %format, "Unknown output format in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "till")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Builds a pricing engine with the configured promotions.
    pub fn build_engine(&self) -> PricingEngine {
        let engine = PricingEngine::from_promotions(
            self.promotions.quantity.clone(),
            self.promotions.threshold.clone(),
        );

        info!(
            quantity_promotions = engine.quantity_promotions().len(),
            amount_promotions = engine.amount_promotions().len(),
            "Pricing engine ready"
        );

        engine
    }
}
