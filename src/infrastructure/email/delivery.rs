use std::sync::Arc;

use crate::domain::notification::{
  DeliveryAttempt, DeliveryReport, MailTransport, OutboundEmail,
};

/// Where a send currently stands. One fallback hop only: a failure while
/// trying the secondary ends the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeliveryPhase {
  TryingPrimary,
  TryingSecondary,
}

/// Primary-then-secondary failover. No retries, no queuing, no
/// persistence; a message that both transports reject is reported back to
/// the caller with both errors retained.
pub struct DeliveryPipeline {
  primary: Arc<dyn MailTransport>,
  secondary: Arc<dyn MailTransport>,
}

impl DeliveryPipeline {
  pub fn new(primary: Arc<dyn MailTransport>, secondary: Arc<dyn MailTransport>) -> Self {
    Self { primary, secondary }
  }

  pub async fn send(&self, email: &OutboundEmail) -> DeliveryReport {
    let mut attempts: Vec<DeliveryAttempt> = Vec::new();
    let mut phase = DeliveryPhase::TryingPrimary;

    loop {
      let transport = match phase {
        DeliveryPhase::TryingPrimary => &self.primary,
        DeliveryPhase::TryingSecondary => &self.secondary,
      };
      let kind = transport.kind();

      match transport.send(email).await {
        Ok(message_id) => {
          tracing::info!(
            transport = %kind,
            to = %email.to,
            subject = %email.subject,
            "Notification delivered"
          );
          return DeliveryReport::delivered(kind, message_id, attempts);
        }
        Err(e) => {
          tracing::warn!(
            transport = %kind,
            to = %email.to,
            error = %e,
            "Transport failed"
          );
          attempts.push(DeliveryAttempt {
            transport: kind,
            error: e.to_string(),
          });
        }
      }

      match phase {
        DeliveryPhase::TryingPrimary => phase = DeliveryPhase::TryingSecondary,
        DeliveryPhase::TryingSecondary => {
          tracing::error!(
            to = %email.to,
            subject = %email.subject,
            "All transports failed; notification not delivered"
          );
          return DeliveryReport::failed(attempts);
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::EmailAddress;
  use crate::domain::notification::{TransportError, TransportKind};
  use async_trait::async_trait;
  use std::sync::atomic::{AtomicU64, Ordering};

  struct MockTransport {
    kind: TransportKind,
    fail_with: Option<TransportError>,
    sends: AtomicU64,
  }

  impl MockTransport {
    fn ok(kind: TransportKind) -> Arc<Self> {
      Arc::new(Self {
        kind,
        fail_with: None,
        sends: AtomicU64::new(0),
      })
    }

    fn failing(kind: TransportKind, error: TransportError) -> Arc<Self> {
      Arc::new(Self {
        kind,
        fail_with: Some(error),
        sends: AtomicU64::new(0),
      })
    }

    fn send_count(&self) -> u64 {
      self.sends.load(Ordering::SeqCst)
    }
  }

  #[async_trait]
  impl MailTransport for MockTransport {
    async fn send(&self, _email: &OutboundEmail) -> Result<Option<String>, TransportError> {
      self.sends.fetch_add(1, Ordering::SeqCst);
      match &self.fail_with {
        Some(e) => Err(e.clone()),
        None => Ok(Some(format!("msg-{}", self.kind))),
      }
    }

    fn kind(&self) -> TransportKind {
      self.kind
    }

    fn is_configured(&self) -> bool {
      true
    }
  }

  fn email() -> OutboundEmail {
    OutboundEmail {
      to: EmailAddress::new("client@example.com".to_string()).unwrap(),
      subject: "New invoice: INV-2024-001".to_string(),
      html: "<p>Body</p>".to_string(),
    }
  }

  #[tokio::test]
  async fn test_primary_success_skips_secondary() {
    let primary = MockTransport::ok(TransportKind::Primary);
    let secondary = MockTransport::ok(TransportKind::Secondary);
    let pipeline = DeliveryPipeline::new(primary.clone(), secondary.clone());

    let report = pipeline.send(&email()).await;

    assert!(report.success);
    assert_eq!(report.transport_used, Some(TransportKind::Primary));
    assert_eq!(report.message_id.as_deref(), Some("msg-primary"));
    assert!(report.attempts.is_empty());
    assert_eq!(primary.send_count(), 1);
    assert_eq!(secondary.send_count(), 0);
  }

  #[tokio::test]
  async fn test_primary_failure_falls_over_to_secondary() {
    let primary = MockTransport::failing(
      TransportKind::Primary,
      TransportError::SendFailed("connection refused".to_string()),
    );
    let secondary = MockTransport::ok(TransportKind::Secondary);
    let pipeline = DeliveryPipeline::new(primary.clone(), secondary.clone());

    let report = pipeline.send(&email()).await;

    assert!(report.success);
    assert_eq!(report.transport_used, Some(TransportKind::Secondary));
    assert_eq!(report.attempts.len(), 1);
    assert_eq!(report.attempts[0].transport, TransportKind::Primary);
    assert!(report.attempts[0].error.contains("connection refused"));
    assert_eq!(secondary.send_count(), 1);
  }

  #[tokio::test]
  async fn test_both_failures_retain_both_errors_in_order() {
    let primary = MockTransport::failing(
      TransportKind::Primary,
      TransportError::SendFailed("connection refused".to_string()),
    );
    let secondary = MockTransport::failing(
      TransportKind::Secondary,
      TransportError::SendFailed("auth rejected".to_string()),
    );
    let pipeline = DeliveryPipeline::new(primary, secondary);

    let report = pipeline.send(&email()).await;

    assert!(!report.success);
    assert_eq!(report.transport_used, None);
    assert_eq!(report.message_id, None);
    assert_eq!(report.attempts.len(), 2);
    assert_eq!(report.attempts[0].transport, TransportKind::Primary);
    assert_eq!(report.attempts[1].transport, TransportKind::Secondary);
    let detail = report.error_detail().unwrap();
    assert!(detail.contains("primary: "));
    assert!(detail.contains("secondary: "));
  }

  #[tokio::test]
  async fn test_unconfigured_primary_fails_fast_into_fallback() {
    let primary = MockTransport::failing(
      TransportKind::Primary,
      TransportError::NotConfigured("primary SMTP transport has no settings".to_string()),
    );
    let secondary = MockTransport::ok(TransportKind::Secondary);
    let pipeline = DeliveryPipeline::new(primary, secondary);

    let report = pipeline.send(&email()).await;

    assert!(report.success);
    assert_eq!(report.transport_used, Some(TransportKind::Secondary));
    assert!(report.attempts[0].error.contains("not configured"));
  }
}
