//! Outbound notifications

pub mod email;

pub use email::{build_message, send, Notification};
