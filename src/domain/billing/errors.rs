use super::value_objects::ValueObjectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invalid line item at index {index}: {reason}")]
  InvalidItem { index: usize, reason: String },

  #[error("Invalid amount: {0}")]
  InvalidAmount(String),

  #[error("PDF rendering failed: {0}")]
  RenderFailed(String),
}
