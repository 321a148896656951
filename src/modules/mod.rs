//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services like storage and email.

pub mod notify;
pub mod storage;
