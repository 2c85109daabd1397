use serde::Deserialize;
use std::sync::Arc;

use crate::domain::billing::{DocumentError, Invoice, Project};
use crate::infrastructure::pdf::InvoicePdfRenderer;

#[derive(Debug, Deserialize)]
pub struct RenderInvoicePdfCommand {
  pub invoice: Invoice,
  pub project: Project,
}

#[derive(Debug)]
pub struct RenderInvoicePdfResponse {
  pub bytes: Vec<u8>,
  pub page_count: usize,
  /// Ready for a `Content-Disposition: attachment` header.
  pub filename: String,
  pub content_type: &'static str,
}

pub struct RenderInvoicePdfUseCase {
  renderer: Arc<InvoicePdfRenderer>,
}

impl RenderInvoicePdfUseCase {
  pub fn new(renderer: Arc<InvoicePdfRenderer>) -> Self {
    Self { renderer }
  }

  pub fn execute(
    &self,
    command: RenderInvoicePdfCommand,
  ) -> Result<RenderInvoicePdfResponse, DocumentError> {
    let rendered = self.renderer.render(&command.invoice, &command.project)?;

    tracing::info!(
      invoice = %command.invoice.number,
      pages = rendered.page_count,
      "Invoice document rendered"
    );

    Ok(RenderInvoicePdfResponse {
      bytes: rendered.bytes,
      page_count: rendered.page_count,
      filename: rendered.filename,
      content_type: "application/pdf",
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::{
    Client, CurrencyCode, InvoiceItem, InvoiceNumber, InvoiceStatus,
  };
  use crate::infrastructure::config::IssuerConfig;
  use chrono::NaiveDate;
  use rust_decimal_macros::dec;

  fn use_case() -> RenderInvoicePdfUseCase {
    let issuer = IssuerConfig {
      name: "Example Studio".to_string(),
      address_lines: vec![],
      email: None,
      tax_number: None,
      iban: "DE89 3704 0044 0532 0130 00".to_string(),
      bank_name: "Example Bank".to_string(),
      logo_path: None,
    };
    RenderInvoicePdfUseCase::new(Arc::new(InvoicePdfRenderer::new(issuer)))
  }

  fn command() -> RenderInvoicePdfCommand {
    RenderInvoicePdfCommand {
      invoice: Invoice {
        number: InvoiceNumber::new("INV-2024-001".to_string()).unwrap(),
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        paid_date: None,
        items: vec![InvoiceItem::new(
          "Design work".to_string(),
          dec!(1),
          dec!(500),
          dec!(500),
        )],
        status: InvoiceStatus::Issued,
        total_amount: dec!(500),
        paid_amount: None,
        currency: CurrencyCode::default(),
        notes: None,
      },
      project: Project {
        name: "Website redesign".to_string(),
        description: None,
        client: Client {
          name: "Acme GmbH".to_string(),
          email: None,
          company_name: None,
          tax_number: None,
          address: None,
        },
        currency_override: None,
        sharing: None,
      },
    }
  }

  #[test]
  fn test_execute_returns_document_with_headers_material() {
    let response = use_case().execute(command()).unwrap();
    assert!(response.bytes.starts_with(b"%PDF"));
    assert_eq!(response.page_count, 1);
    assert_eq!(response.filename, "INV-2024-001.pdf");
    assert_eq!(response.content_type, "application/pdf");
  }

  #[test]
  fn test_execute_propagates_validation_errors() {
    let mut command = command();
    command.invoice.items[0].description = "  ".to_string();
    assert!(matches!(
      use_case().execute(command),
      Err(DocumentError::InvalidItem { index: 0, .. })
    ));
  }
}
