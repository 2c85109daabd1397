pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::{DeliveryAttempt, DeliveryReport, OutboundEmail, RenderedEmail};
pub use errors::{NotificationError, TransportError};
pub use ports::MailTransport;
pub use value_objects::{Language, TransportKind};
