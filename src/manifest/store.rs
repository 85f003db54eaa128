//! Fetch-once manifest cache.
//!
//! Manifests are fetched from the release archive at most once per
//! (release, step) per process. The fetched copy is also written to the
//! working directory; a later run in the same directory finds it there and
//! skips the network entirely.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

use super::{Manifest, ManifestKey};
use crate::storage::ObjectStore;
use crate::utils::errors::Result;

pub struct ManifestStore {
    store: Box<dyn ObjectStore>,
    bucket: String,
    file_name: String,
    work_dir: PathBuf,
    cache: HashMap<ManifestKey, Manifest>,
}

impl ManifestStore {
    pub fn new(
        store: Box<dyn ObjectStore>,
        bucket: impl Into<String>,
        file_name: impl Into<String>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            file_name: file_name.into(),
            work_dir: work_dir.into(),
            cache: HashMap::new(),
        }
    }

    /// The manifest for `key`, fetching it on first use.
    ///
    /// A failed fetch or parse leaves the cache untouched, so a retry by a
    /// later run starts clean.
    pub fn get(&mut self, key: &ManifestKey) -> Result<&Manifest> {
        if !self.cache.contains_key(key) {
            let manifest = self.load(key)?;
            info!("Loaded manifest for {} ({} files)", key, manifest.len());
            self.cache.insert(key.clone(), manifest);
        } else {
            debug!("Manifest cache hit for {}", key);
        }

        Ok(&self.cache[key])
    }

    /// Where the fetched manifest lands on disk. Its presence is the
    /// cache-hit signal across process runs.
    pub fn local_path(&self) -> PathBuf {
        self.work_dir.join(&self.file_name)
    }

    fn load(&self, key: &ManifestKey) -> Result<Manifest> {
        let local_path = self.local_path();
        if !local_path.exists() {
            let remote_key = key.remote_key(&self.file_name);
            self.store
                .fetch_object(&self.bucket, &remote_key, &local_path)?;
        } else {
            debug!("Using cached manifest at {}", local_path.display());
        }

        Manifest::from_file(&local_path)
    }
}
