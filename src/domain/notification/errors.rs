use thiserror::Error;

/// Per-transport failure. `NotConfigured` is raised before any network
/// activity so a missing deployment secret surfaces immediately instead of
/// as a connection timeout.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
  #[error("Transport is not configured: {0}")]
  NotConfigured(String),

  #[error("Invalid mailbox: {0}")]
  InvalidMailbox(String),

  #[error("Failed to build message: {0}")]
  MessageBuild(String),

  #[error("Send failed: {0}")]
  SendFailed(String),

  #[error("Send timed out after {0} seconds")]
  Timeout(u64),
}

#[derive(Debug, Error)]
pub enum NotificationError {
  #[error("Client has no email address; cannot deliver notification")]
  MissingRecipient,

  #[error("Project has no share link; nothing to announce")]
  MissingShareLink,

  #[error("Template rendering failed: {0}")]
  Template(#[from] tera::Error),
}
