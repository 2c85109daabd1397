pub mod layout;
pub mod renderer;
pub mod style;

pub use renderer::{InvoicePdfRenderer, RenderedInvoice};
