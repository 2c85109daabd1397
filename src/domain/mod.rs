pub mod billing;
pub mod notification;
