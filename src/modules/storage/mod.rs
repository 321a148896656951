//! Storage module for report media
//!
//! Provides a MinIO/S3-compatible storage client for image uploads and
//! deletion-handle bookkeeping.

mod minio_client;

pub use minio_client::{MinIOClient, StoredObject};
