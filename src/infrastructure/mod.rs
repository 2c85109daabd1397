pub mod config;
pub mod email;
pub mod locales;
pub mod pdf;
