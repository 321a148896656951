pub mod admin_handler;

pub use admin_handler::{analytics, list_all_reports, update_report};
