//! Invoice document rendering and transactional notification delivery.
//!
//! Three capabilities behind one crate boundary:
//! - a deterministic invoice-to-PDF renderer with pagination, status
//!   styling and payment instructions,
//! - localized notification templates producing `{subject, html}` pairs,
//! - an SMTP delivery pipeline with primary/secondary failover.
//!
//! Invoice and project records come in from the caller; this crate never
//! touches a data store. Wiring starts from [`infrastructure::config::AppConfig`].

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{
  RenderInvoicePdfUseCase, SendInvoiceNotificationUseCase, SendProjectSharedNotificationUseCase,
};
pub use domain::billing::{Client, Invoice, InvoiceItem, InvoiceStatus, Project, ShareLink};
pub use domain::notification::{DeliveryReport, Language, MailTransport, TransportKind};
pub use infrastructure::config::AppConfig;
pub use infrastructure::email::{DeliveryPipeline, NotificationTemplates, SmtpMailer};
pub use infrastructure::pdf::{InvoicePdfRenderer, RenderedInvoice};
