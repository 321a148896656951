//! Notification module
//!
//! Best-effort email dispatch for report lifecycle events.

mod mailer;

pub use mailer::Mailer;
