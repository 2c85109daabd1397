use async_trait::async_trait;
use lettre::{
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
  message::{Mailbox, header::ContentType},
  transport::smtp::authentication::Credentials,
};
use std::time::Duration;

use crate::domain::notification::{MailTransport, OutboundEmail, TransportError, TransportKind};
use crate::infrastructure::config::{SenderConfig, SmtpSettings};

/// One SMTP transport slot. An unconfigured slot still constructs; sends
/// through it fail fast with `NotConfigured` instead of attempting a
/// connection.
pub struct SmtpMailer {
  kind: TransportKind,
  from: Mailbox,
  transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
  timeout_seconds: u64,
}

impl SmtpMailer {
  pub fn new(
    kind: TransportKind,
    settings: Option<&SmtpSettings>,
    sender: &SenderConfig,
    timeout_seconds: u64,
  ) -> Result<Self, TransportError> {
    let from: Mailbox = format!("{} <{}>", sender.from_name, sender.from_address)
      .parse()
      .map_err(|e| TransportError::InvalidMailbox(format!("sender address: {}", e)))?;

    let transport = match settings {
      Some(settings) => Some(Self::build_transport(settings, timeout_seconds)?),
      None => None,
    };

    Ok(Self {
      kind,
      from,
      transport,
      timeout_seconds,
    })
  }

  fn build_transport(
    settings: &SmtpSettings,
    timeout_seconds: u64,
  ) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportError> {
    let creds = Credentials::new(settings.username.clone(), settings.password.clone());

    // secure = implicit TLS from the first byte; otherwise a STARTTLS
    // upgrade on the submission port.
    let builder = if settings.secure {
      AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
    }
    .map_err(|e| TransportError::NotConfigured(format!("SMTP relay setup failed: {}", e)))?;

    Ok(
      builder
        .port(settings.port)
        .credentials(creds)
        .timeout(Some(Duration::from_secs(timeout_seconds)))
        .build(),
    )
  }
}

#[async_trait]
impl MailTransport for SmtpMailer {
  async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, TransportError> {
    let transport = self.transport.as_ref().ok_or_else(|| {
      TransportError::NotConfigured(format!("{} SMTP transport has no settings", self.kind))
    })?;

    let to: Mailbox = email
      .to
      .as_str()
      .parse()
      .map_err(|e| TransportError::InvalidMailbox(format!("recipient: {}", e)))?;

    let message = Message::builder()
      .from(self.from.clone())
      .to(to)
      .subject(&email.subject)
      .header(ContentType::TEXT_HTML)
      .body(email.html.clone())
      .map_err(|e| TransportError::MessageBuild(e.to_string()))?;

    let send = transport.send(message);
    let response = tokio::time::timeout(Duration::from_secs(self.timeout_seconds), send)
      .await
      .map_err(|_| TransportError::Timeout(self.timeout_seconds))?
      .map_err(|e| TransportError::SendFailed(e.to_string()))?;

    Ok(response.message().next().map(|s| s.to_string()))
  }

  fn kind(&self) -> TransportKind {
    self.kind
  }

  fn is_configured(&self) -> bool {
    self.transport.is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::EmailAddress;

  fn sender() -> SenderConfig {
    SenderConfig {
      from_name: "Example Billing".to_string(),
      from_address: "billing@example.com".to_string(),
    }
  }

  fn settings() -> SmtpSettings {
    SmtpSettings {
      host: "smtp.example.com".to_string(),
      port: 587,
      secure: false,
      username: "billing".to_string(),
      password: "secret".to_string(),
    }
  }

  #[test]
  fn test_unconfigured_slot_constructs_but_reports_unavailable() {
    let mailer = SmtpMailer::new(TransportKind::Primary, None, &sender(), 10).unwrap();
    assert!(!mailer.is_configured());
    assert_eq!(mailer.kind(), TransportKind::Primary);
  }

  #[tokio::test]
  async fn test_configured_slot_reports_available() {
    let mailer =
      SmtpMailer::new(TransportKind::Secondary, Some(&settings()), &sender(), 10).unwrap();
    assert!(mailer.is_configured());
    assert_eq!(mailer.kind(), TransportKind::Secondary);
  }

  #[test]
  fn test_malformed_sender_address_is_rejected() {
    let mut sender = sender();
    sender.from_address = "not an address".to_string();
    let result = SmtpMailer::new(TransportKind::Primary, None, &sender, 10);
    assert!(matches!(result, Err(TransportError::InvalidMailbox(_))));
  }

  #[tokio::test]
  async fn test_send_through_unconfigured_slot_fails_fast() {
    let mailer = SmtpMailer::new(TransportKind::Primary, None, &sender(), 10).unwrap();
    let email = OutboundEmail {
      to: EmailAddress::new("client@example.com".to_string()).unwrap(),
      subject: "Subject".to_string(),
      html: "<p>Body</p>".to_string(),
    };

    let result = mailer.send(&email).await;
    assert!(matches!(result, Err(TransportError::NotConfigured(_))));
  }
}
