use serde::{Deserialize, Serialize};

use super::value_objects::TransportKind;
use crate::domain::billing::EmailAddress;

/// Localized subject/body pair produced by the template layer. Contains
/// everything needed to send except the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEmail {
  pub subject: String,
  pub html: String,
}

/// A fully addressed message handed to a transport.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
  pub to: EmailAddress,
  pub subject: String,
  pub html: String,
}

impl OutboundEmail {
  pub fn new(to: EmailAddress, rendered: RenderedEmail) -> Self {
    Self {
      to,
      subject: rendered.subject,
      html: rendered.html,
    }
  }
}

/// One failed hop through the pipeline, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttempt {
  pub transport: TransportKind,
  pub error: String,
}

/// Ephemeral outcome of a send. Never persisted; logged and returned to the
/// caller only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
  pub success: bool,
  pub message_id: Option<String>,
  pub transport_used: Option<TransportKind>,
  pub attempts: Vec<DeliveryAttempt>,
}

impl DeliveryReport {
  pub fn delivered(
    transport: TransportKind,
    message_id: Option<String>,
    attempts: Vec<DeliveryAttempt>,
  ) -> Self {
    Self {
      success: true,
      message_id,
      transport_used: Some(transport),
      attempts,
    }
  }

  pub fn failed(attempts: Vec<DeliveryAttempt>) -> Self {
    Self {
      success: false,
      message_id: None,
      transport_used: None,
      attempts,
    }
  }

  /// Combined error detail for callers that want a single string.
  pub fn error_detail(&self) -> Option<String> {
    if self.attempts.is_empty() {
      return None;
    }
    Some(
      self
        .attempts
        .iter()
        .map(|a| format!("{}: {}", a.transport, a.error))
        .collect::<Vec<_>>()
        .join("; "),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_detail_joins_attempts() {
    let report = DeliveryReport::failed(vec![
      DeliveryAttempt {
        transport: TransportKind::Primary,
        error: "connection refused".to_string(),
      },
      DeliveryAttempt {
        transport: TransportKind::Secondary,
        error: "auth rejected".to_string(),
      },
    ]);
    let detail = report.error_detail().unwrap();
    assert!(detail.contains("primary: connection refused"));
    assert!(detail.contains("secondary: auth rejected"));
  }

  #[test]
  fn test_error_detail_empty_on_clean_success() {
    let report = DeliveryReport::delivered(TransportKind::Primary, None, vec![]);
    assert!(report.error_detail().is_none());
  }
}
