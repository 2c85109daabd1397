use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid invoice status: {0}")]
  InvalidStatus(String),
  #[error("Invalid email address: {0}")]
  InvalidEmailAddress(String),
}

// Invoice Number - Human-readable identifier, user-editable text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Invoice Status - closed set, read-only input to this component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Issued,
  Paid,
  Overdue,
  Canceled,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Issued => "issued",
      InvoiceStatus::Paid => "paid",
      InvoiceStatus::Overdue => "overdue",
      InvoiceStatus::Canceled => "canceled",
    }
  }

  /// Payment instructions are only shown while the invoice can still be paid.
  pub fn expects_payment(&self) -> bool {
    !matches!(self, InvoiceStatus::Paid | InvoiceStatus::Canceled)
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "issued" => Ok(InvoiceStatus::Issued),
      "paid" => Ok(InvoiceStatus::Paid),
      "overdue" => Ok(InvoiceStatus::Overdue),
      "canceled" => Ok(InvoiceStatus::Canceled),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

// Currency Code - ISO-4217-like, rendered as plain text next to amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_uppercase()) {
      return Err(ValueObjectError::InvalidCurrency(format!(
        "Expected a three-letter currency code, got: {}",
        value
      )));
    }
    Ok(Self(trimmed))
  }

  pub fn eur() -> Self {
    Self("EUR".to_string())
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl Default for CurrencyCode {
  fn default() -> Self {
    Self::eur()
  }
}

impl fmt::Display for CurrencyCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Email Address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidEmailAddress(
        "Email address cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 254 {
      return Err(ValueObjectError::InvalidEmailAddress(
        "Email address cannot exceed 254 characters".to_string(),
      ));
    }
    let Some((local, domain)) = trimmed.split_once('@') else {
      return Err(ValueObjectError::InvalidEmailAddress(format!(
        "Missing @ in address: {}",
        trimmed
      )));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
      return Err(ValueObjectError::InvalidEmailAddress(format!(
        "Malformed address: {}",
        trimmed
      )));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for EmailAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
