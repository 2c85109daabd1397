use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::billing::{Invoice, Project};
use crate::domain::notification::{
  DeliveryReport, Language, NotificationError, OutboundEmail, TransportKind,
};
use crate::infrastructure::email::{DeliveryPipeline, NotificationTemplates};

#[derive(Debug, Deserialize)]
pub struct SendInvoiceNotificationCommand {
  pub invoice: Invoice,
  pub project: Project,
  /// Two-letter language code; unknown codes fall back to the primary
  /// language.
  pub language: String,
}

#[derive(Debug, Serialize)]
pub struct SendInvoiceNotificationResponse {
  pub success: bool,
  pub message_id: Option<String>,
  pub transport_used: Option<TransportKind>,
  pub error: Option<String>,
}

impl From<DeliveryReport> for SendInvoiceNotificationResponse {
  fn from(report: DeliveryReport) -> Self {
    Self {
      success: report.success,
      message_id: report.message_id.clone(),
      transport_used: report.transport_used,
      error: report.error_detail(),
    }
  }
}

pub struct SendInvoiceNotificationUseCase {
  templates: NotificationTemplates,
  pipeline: Arc<DeliveryPipeline>,
}

impl SendInvoiceNotificationUseCase {
  pub fn new(templates: NotificationTemplates, pipeline: Arc<DeliveryPipeline>) -> Self {
    Self {
      templates,
      pipeline,
    }
  }

  /// Renders the localized invoice email and pushes it through the
  /// failover pipeline. A delivery failure is not an error here; it is
  /// reported in the response for the caller to act on.
  pub async fn execute(
    &self,
    command: SendInvoiceNotificationCommand,
  ) -> Result<SendInvoiceNotificationResponse, NotificationError> {
    let recipient = command
      .project
      .client
      .email
      .clone()
      .ok_or(NotificationError::MissingRecipient)?;

    let language = Language::from_code(&command.language);
    let rendered =
      self
        .templates
        .render_invoice_issued(&command.invoice, &command.project, language)?;

    let email = OutboundEmail::new(recipient, rendered);
    let report = self.pipeline.send(&email).await;

    Ok(report.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::{
    Client, CurrencyCode, EmailAddress, InvoiceItem, InvoiceNumber, InvoiceStatus,
  };
  use crate::domain::notification::{MailTransport, TransportError};
  use async_trait::async_trait;
  use chrono::NaiveDate;
  use rust_decimal_macros::dec;
  use std::sync::Mutex;

  struct RecordingTransport {
    kind: TransportKind,
    fail: bool,
    last_subject: Mutex<Option<String>>,
  }

  impl RecordingTransport {
    fn new(kind: TransportKind, fail: bool) -> Arc<Self> {
      Arc::new(Self {
        kind,
        fail,
        last_subject: Mutex::new(None),
      })
    }
  }

  #[async_trait]
  impl MailTransport for RecordingTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, TransportError> {
      if self.fail {
        return Err(TransportError::SendFailed("boom".to_string()));
      }
      *self.last_subject.lock().unwrap() = Some(email.subject.clone());
      Ok(Some("250 ok".to_string()))
    }

    fn kind(&self) -> TransportKind {
      self.kind
    }

    fn is_configured(&self) -> bool {
      true
    }
  }

  fn command(with_email: bool, language: &str) -> SendInvoiceNotificationCommand {
    SendInvoiceNotificationCommand {
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
          email: with_email
            .then(|| EmailAddress::new("client@example.com".to_string()).unwrap()),
          company_name: None,
          tax_number: None,
          address: None,
        },
        currency_override: None,
        sharing: None,
      },
      language: language.to_string(),
    }
  }

  fn use_case(
    primary: Arc<RecordingTransport>,
    secondary: Arc<RecordingTransport>,
  ) -> SendInvoiceNotificationUseCase {
    let templates = NotificationTemplates::new(
      "Example Billing".to_string(),
      "https://app.example.com".to_string(),
    )
    .unwrap();
    SendInvoiceNotificationUseCase::new(
      templates,
      Arc::new(DeliveryPipeline::new(primary, secondary)),
    )
  }

  #[tokio::test]
  async fn test_localized_email_reaches_primary_transport() {
    let primary = RecordingTransport::new(TransportKind::Primary, false);
    let secondary = RecordingTransport::new(TransportKind::Secondary, false);

    let response = use_case(primary.clone(), secondary)
      .execute(command(true, "de"))
      .await
      .unwrap();

    assert!(response.success);
    assert_eq!(response.transport_used, Some(TransportKind::Primary));
    assert!(response.error.is_none());
    let subject = primary.last_subject.lock().unwrap().clone().unwrap();
    assert_eq!(subject, "Neue Rechnung: INV-2024-001");
  }

  #[tokio::test]
  async fn test_missing_recipient_is_rejected_before_any_send() {
    let primary = RecordingTransport::new(TransportKind::Primary, false);
    let secondary = RecordingTransport::new(TransportKind::Secondary, false);

    let result = use_case(primary.clone(), secondary)
      .execute(command(false, "en"))
      .await;

    assert!(matches!(result, Err(NotificationError::MissingRecipient)));
    assert!(primary.last_subject.lock().unwrap().is_none());
  }

  #[tokio::test]
  async fn test_total_delivery_failure_surfaces_in_response() {
    let primary = RecordingTransport::new(TransportKind::Primary, true);
    let secondary = RecordingTransport::new(TransportKind::Secondary, true);

    let response = use_case(primary, secondary)
      .execute(command(true, "en"))
      .await
      .unwrap();

    assert!(!response.success);
    assert!(response.transport_used.is_none());
    let error = response.error.unwrap();
    assert!(error.contains("primary"));
    assert!(error.contains("secondary"));
  }
}
