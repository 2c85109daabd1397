use async_trait::async_trait;

use super::entities::OutboundEmail;
use super::errors::TransportError;
use super::value_objects::TransportKind;

/// A configured SMTP destination. Implementations must be cheap to share
/// across requests; configuration is read-only after startup.
#[async_trait]
pub trait MailTransport: Send + Sync {
  /// Delivers one message, returning the server-issued message id when the
  /// transport reports one.
  async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, TransportError>;

  fn kind(&self) -> TransportKind;

  fn is_configured(&self) -> bool;
}
