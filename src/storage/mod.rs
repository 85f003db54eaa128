//! Release archive access.
//!
//! The verifier only ever needs one storage operation: fetch a single object
//! into a local file. It is modeled as a trait so the engine can be tested
//! against an in-memory store without network access.

use crate::config::StorageConfig;
use crate::utils::errors::{Result, VerifierError};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Fetches objects from the release archive.
pub trait ObjectStore {
    /// Download `key` from `bucket` and write its contents to `dest`.
    fn fetch_object(&self, bucket: &str, key: &str, dest: &Path) -> Result<()>;
}

/// `ObjectStore` backed by plain HTTPS GETs against an S3-style endpoint.
///
/// Release archive objects are world-readable, so no signing is needed.
pub struct S3HttpStore {
    client: reqwest::blocking::Client,
    region: String,
    endpoint: Option<String>,
}

impl S3HttpStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
            None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, self.region, key),
        }
    }
}

impl ObjectStore for S3HttpStore {
    fn fetch_object(&self, bucket: &str, key: &str, dest: &Path) -> Result<()> {
        let url = self.object_url(bucket, key);
        info!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| VerifierError::Retrieval {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(VerifierError::Retrieval {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().map_err(|e| VerifierError::Retrieval {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        fs::write(dest, &bytes)?;
        debug!("Wrote {} bytes to {}", bytes.len(), dest.display());

        Ok(())
    }
}
