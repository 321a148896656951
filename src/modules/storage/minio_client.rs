//! MinIO/S3-compatible storage client
//!
//! Holds report and proof images. Every stored object is addressed by a
//! key; the key doubles as the deletion handle recorded on the report row.
//!
//! Uses rust-s3 crate for lightweight S3 operations.

use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::MinIOConfig;
use crate::core::error::AppError;

/// Result of a successful upload: the public URL stored on the report and
/// the object key used to delete it later.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub url: String,
    pub key: String,
}

/// MinIO/S3-compatible storage client
pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    public_endpoint: String,
}

impl MinIOClient {
    /// Create a new MinIO client from configuration
    pub fn new(config: MinIOConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        Ok(Self {
            bucket,
            region,
            credentials,
            public_endpoint: config.public_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Try to create bucket - if it already exists, MinIO will return an error
        // which we can safely ignore
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    async fn create_bucket(&self) -> Result<(), AppError> {
        let bucket_config = BucketConfiguration::default();

        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            bucket_config,
        )
        .await
        .map_err(|e| {
            AppError::Internal(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    /// Upload an image into the given folder.
    ///
    /// The object key is generated from a fresh UUID so uploads never
    /// collide; the original file name only contributes its extension.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        folder: &str,
        file_name: &str,
        content_type: &str,
    ) -> Result<StoredObject, AppError> {
        let key = Self::generate_key(folder, file_name);

        self.bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| {
                AppError::ExternalService(format!("Failed to upload file '{}': {}", key, e))
            })?;

        debug!("Uploaded file '{}' to bucket '{}'", key, self.bucket.name());

        let url = format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key);
        Ok(StoredObject { url, key })
    }

    /// Delete a stored object by its key
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.bucket.delete_object(key).await.map_err(|e| {
            AppError::ExternalService(format!("Failed to delete file '{}': {}", key, e))
        })?;

        debug!(
            "Deleted file '{}' from bucket '{}'",
            key,
            self.bucket.name()
        );
        Ok(())
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    fn generate_key(folder: &str, file_name: &str) -> String {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        match extension {
            Some(ext) => format!("{}/{}.{}", folder, Uuid::new_v4(), ext.to_lowercase()),
            None => format!("{}/{}", folder, Uuid::new_v4()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_keeps_extension() {
        let key = MinIOClient::generate_key("civic_reports", "pothole.JPG");
        assert!(key.starts_with("civic_reports/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn generated_key_drops_suspicious_extension() {
        let key = MinIOClient::generate_key("civic_reports", "weird.name.");
        let object = key.strip_prefix("civic_reports/").unwrap();
        assert!(!object.contains('.'));
    }

    #[test]
    fn generated_keys_are_unique() {
        let a = MinIOClient::generate_key("civic_reports", "a.png");
        let b = MinIOClient::generate_key("civic_reports", "a.png");
        assert_ne!(a, b);
    }
}
