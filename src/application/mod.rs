//! Application layer
//!
//! Use cases that orchestrate domain logic: render an invoice document,
//! or render a localized notification and push it through the delivery
//! pipeline. Each use case takes a command and returns a response DTO.

pub mod render_invoice_pdf;
pub mod send_invoice_notification;
pub mod send_project_shared_notification;

pub use render_invoice_pdf::{
  RenderInvoicePdfCommand, RenderInvoicePdfResponse, RenderInvoicePdfUseCase,
};
pub use send_invoice_notification::{
  SendInvoiceNotificationCommand, SendInvoiceNotificationResponse, SendInvoiceNotificationUseCase,
};
pub use send_project_shared_notification::{
  SendProjectSharedNotificationCommand, SendProjectSharedNotificationResponse,
  SendProjectSharedNotificationUseCase,
};
