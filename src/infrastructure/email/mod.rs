pub mod delivery;
pub mod smtp;
pub mod templates;

pub use delivery::DeliveryPipeline;
pub use smtp::SmtpMailer;
pub use templates::NotificationTemplates;
