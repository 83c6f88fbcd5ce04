use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::domain::billing::Currency;
use crate::domain::listing::DEFAULT_PAGE_SIZE;

// Default value functions
fn default_debounce_seconds() -> u64 {
  30
}

fn default_page_size() -> u32 {
  DEFAULT_PAGE_SIZE
}

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub billing: BillingConfig,
  #[serde(default)]
  pub autosave: AutosaveConfig,
  #[serde(default)]
  pub listing: ListingConfig,
}

/// Billing configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingConfig {
  /// Currency used when formatting amounts for display
  #[serde(default)]
  pub currency: Currency,
}

/// Draft autosave configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AutosaveConfig {
  /// Quiet period after the last edit before the draft is saved
  #[serde(default = "default_debounce_seconds")]
  pub debounce_seconds: u64,
}

impl AutosaveConfig {
  pub fn window(&self) -> Duration {
    Duration::from_secs(self.debounce_seconds)
  }
}

impl Default for AutosaveConfig {
  fn default() -> Self {
    Self {
      debounce_seconds: default_debounce_seconds(),
    }
  }
}

/// Invoice list configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
  #[serde(default = "default_page_size")]
  pub page_size: u32,
}

impl Default for ListingConfig {
  fn default() -> Self {
    Self {
      page_size: default_page_size(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml (if exists)
  /// 2. config/local.toml (if exists)
  /// 3. Environment variables with FACTURIO_ prefix
  ///
  /// Every value has a built-in default, so loading succeeds with no
  /// files present at all.
  ///
  /// # Example
  ///
  /// ```no_run
  /// use facturio::infrastructure::config::Config;
  ///
  /// let config = Config::load().expect("Failed to load configuration");
  /// println!("Autosave window: {:?}", config.autosave.window());
  /// ```
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the FACTURIO_ prefix and are separated by double underscores:
  /// - `FACTURIO_BILLING__CURRENCY=USD`
  /// - `FACTURIO_AUTOSAVE__DEBOUNCE_SECONDS=10`
  /// - `FACTURIO_LISTING__PAGE_SIZE=50`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if:
  /// - Configuration files contain invalid TOML
  /// - Configuration values have invalid types
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      // Start with default configuration
      .add_source(File::with_name("config/default").required(false))
      // Add optional local configuration (for local development overrides)
      .add_source(File::with_name("config/local").required(false))
      // Add optional environment-specific configuration
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // Add environment variables with FACTURIO_ prefix
      // Use double underscore as separator: FACTURIO_LISTING__PAGE_SIZE=50
      .add_source(
        Environment::with_prefix("FACTURIO")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
