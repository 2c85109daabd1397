pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Client, Invoice, InvoiceItem, Project, ShareLink};
pub use errors::DocumentError;
pub use value_objects::{
  CurrencyCode, EmailAddress, InvoiceNumber, InvoiceStatus, ValueObjectError,
};
