use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

// Default timeout functions
fn default_send_timeout() -> u64 {
  10
}

fn default_smtp_port() -> u16 {
  587
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  pub server: ServerConfig,
  pub sender: SenderConfig,
  pub issuer: IssuerConfig,
  #[serde(default)]
  pub primary_smtp: Option<SmtpSettings>,
  #[serde(default)]
  pub secondary_smtp: Option<SmtpSettings>,
  #[serde(default)]
  pub delivery: DeliveryConfig,
}

/// Server configuration - base URL used to build public share links
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub public_base_url: String,
}

/// From-header identity for outgoing mail
#[derive(Debug, Clone, Deserialize)]
pub struct SenderConfig {
  pub from_name: String,
  pub from_address: String,
}

/// Issuer details printed on invoices and in payment instructions
#[derive(Debug, Clone, Deserialize)]
pub struct IssuerConfig {
  pub name: String,
  #[serde(default)]
  pub address_lines: Vec<String>,
  pub email: Option<String>,
  pub tax_number: Option<String>,
  pub iban: String,
  pub bank_name: String,
  /// Optional PNG logo drawn in the page header. A missing file is skipped
  /// with a warning, not a render failure.
  pub logo_path: Option<String>,
}

/// One SMTP transport destination
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSettings {
  pub host: String,
  #[serde(default = "default_smtp_port")]
  pub port: u16,
  /// true = implicit TLS (SMTPS), false = STARTTLS upgrade
  #[serde(default)]
  pub secure: bool,
  pub username: String,
  pub password: String,
}

/// Delivery tuning
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
  #[serde(default = "default_send_timeout")]
  pub timeout_seconds: u64,
}

impl Default for DeliveryConfig {
  fn default() -> Self {
    Self {
      timeout_seconds: default_send_timeout(),
    }
  }
}

impl AppConfig {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with BILLPOST_ prefix
  ///
  /// Environment variables use double underscores as section separators:
  /// - `BILLPOST_PRIMARY_SMTP__HOST=smtp.example.com`
  /// - `BILLPOST_PRIMARY_SMTP__PASSWORD=...`
  /// - `BILLPOST_SENDER__FROM_ADDRESS=billing@example.com`
  pub fn load() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("BILLPOST")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }

  /// Startup check for the two transport slots. A missing transport is
  /// logged loudly but never crashes the process; sends through that slot
  /// fail fast later with a configuration error.
  pub fn validate_transports(&self) -> TransportAvailability {
    if self.primary_smtp.is_none() {
      tracing::warn!(
        "Primary SMTP transport is not configured; sends will fail over to the secondary"
      );
    }
    if self.secondary_smtp.is_none() {
      tracing::warn!("Secondary SMTP transport is not configured; no fallback is available");
    }
    TransportAvailability {
      primary: self.primary_smtp.is_some(),
      secondary: self.secondary_smtp.is_some(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportAvailability {
  pub primary: bool,
  pub secondary: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            public_base_url = "https://app.example.com"

            [sender]
            from_name = "Example Billing"
            from_address = "billing@example.com"

            [issuer]
            name = "Example Studio"
            address_lines = ["Main Street 1", "10115 Berlin"]
            iban = "DE89 3704 0044 0532 0130 00"
            bank_name = "Example Bank"

            [primary_smtp]
            host = "smtp.example.com"
            username = "billing"
            password = "secret"
        "#;

    let config: AppConfig = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.public_base_url, "https://app.example.com");
    assert_eq!(config.sender.from_address, "billing@example.com");
    assert_eq!(config.issuer.iban, "DE89 3704 0044 0532 0130 00");
    assert_eq!(config.issuer.logo_path, None);

    let primary = config.primary_smtp.as_ref().expect("primary smtp");
    assert_eq!(primary.host, "smtp.example.com");
    assert_eq!(primary.port, 587); // default
    assert!(!primary.secure); // default

    assert!(config.secondary_smtp.is_none());
    assert_eq!(config.delivery.timeout_seconds, 10); // default
  }

  #[test]
  fn test_validate_transports_reports_missing_slots() {
    let toml = r#"
            [server]
            public_base_url = "https://app.example.com"

            [sender]
            from_name = "Example Billing"
            from_address = "billing@example.com"

            [issuer]
            name = "Example Studio"
            iban = "DE89 3704 0044 0532 0130 00"
            bank_name = "Example Bank"
        "#;

    let config: AppConfig = toml::from_str(toml).expect("Failed to parse config");
    let availability = config.validate_transports();
    assert!(!availability.primary);
    assert!(!availability.secondary);
  }
}
