use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::DocumentError;
use super::value_objects::{CurrencyCode, EmailAddress, InvoiceNumber, InvoiceStatus};

// Invoice Line Item - rendered as given, totals are not recomputed here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
  pub description: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub total: Decimal,
}

impl InvoiceItem {
  pub fn new(description: String, quantity: Decimal, unit_price: Decimal, total: Decimal) -> Self {
    Self {
      description,
      quantity,
      unit_price,
      total,
    }
  }
}

// Invoice - read-only input owned by the business-data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub number: InvoiceNumber,
  pub date: NaiveDate,
  pub due_date: NaiveDate,
  pub paid_date: Option<NaiveDate>,
  pub items: Vec<InvoiceItem>,
  pub status: InvoiceStatus,
  pub total_amount: Decimal,
  pub paid_amount: Option<Decimal>,
  #[serde(default)]
  pub currency: CurrencyCode,
  pub notes: Option<String>,
}

impl Invoice {
  /// Boundary validation before any rendering begins. A document with
  /// malformed item data fails fast instead of producing silently blank
  /// sections.
  pub fn validate(&self) -> Result<(), DocumentError> {
    for (index, item) in self.items.iter().enumerate() {
      if item.description.trim().is_empty() {
        return Err(DocumentError::InvalidItem {
          index,
          reason: "description is empty".to_string(),
        });
      }
      if item.quantity.is_sign_negative() {
        return Err(DocumentError::InvalidItem {
          index,
          reason: format!("negative quantity: {}", item.quantity),
        });
      }
      if item.unit_price.is_sign_negative() {
        return Err(DocumentError::InvalidItem {
          index,
          reason: format!("negative unit price: {}", item.unit_price),
        });
      }
    }
    if self.total_amount.is_sign_negative() {
      return Err(DocumentError::InvalidAmount(format!(
        "negative total amount: {}",
        self.total_amount
      )));
    }
    if let Some(paid) = self.paid_amount {
      if paid.is_sign_negative() {
        return Err(DocumentError::InvalidAmount(format!(
          "negative paid amount: {}",
          paid
        )));
      }
    }
    Ok(())
  }

  /// The project's financial currency overrides the invoice currency for
  /// display purposes.
  pub fn display_currency<'a>(&'a self, project: &'a Project) -> &'a CurrencyCode {
    project.currency_override.as_ref().unwrap_or(&self.currency)
  }

  pub fn outstanding_amount(&self) -> Decimal {
    let paid = self.paid_amount.unwrap_or(Decimal::ZERO);
    let remaining = self.total_amount - paid;
    if remaining.is_sign_negative() {
      Decimal::ZERO
    } else {
      remaining
    }
  }

  pub fn is_partially_paid(&self) -> bool {
    match self.paid_amount {
      Some(paid) => paid > Decimal::ZERO && paid < self.total_amount,
      None => false,
    }
  }

  pub fn has_notes(&self) -> bool {
    self
      .notes
      .as_ref()
      .is_some_and(|n| !n.trim().is_empty())
  }
}

// Client - recipient of invoices and share notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
  pub name: String,
  pub email: Option<EmailAddress>,
  pub company_name: Option<String>,
  pub tax_number: Option<String>,
  pub address: Option<String>,
}

// Share Link - identifies a public access link to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareLink {
  pub token: String,
  pub expires_at: Option<NaiveDate>,
}

// Project - read-only input, carries the client and display currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
  pub name: String,
  pub description: Option<String>,
  pub client: Client,
  pub currency_override: Option<CurrencyCode>,
  pub sharing: Option<ShareLink>,
}
