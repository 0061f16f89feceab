//! Outgoing mail transports.

mod http;
mod log;

pub use http::{HttpMailer, MailConfig};
pub use log::LogMailer;
