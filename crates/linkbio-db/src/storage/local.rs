//! Filesystem implementation of BlobStore
//!
//! Stores avatar blobs under a base directory with extension-less keys so a
//! re-upload for the same identity overwrites in place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::instrument;

use linkbio_core::error::DomainError;
use linkbio_core::traits::{BlobStore, RepoResult};

/// Filesystem implementation of BlobStore
#[derive(Clone)]
pub struct LocalBlobStore {
    base_dir: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore rooted at `base_dir`, serving objects
    /// under `public_base_url`
    pub fn new(base_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, key: &str) -> RepoResult<PathBuf> {
        // Keys are identity-derived, never user-controlled paths
        if key.is_empty() || key.contains('/') || key.contains("..") {
            return Err(DomainError::StorageError(format!("invalid blob key: {key}")));
        }
        Ok(self.base_dir.join(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

fn map_io_error(e: std::io::Error) -> DomainError {
    DomainError::StorageError(e.to_string())
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> RepoResult<String> {
        if !content_type.starts_with("image/") {
            return Err(DomainError::ValidationError(format!(
                "unsupported content type: {content_type}"
            )));
        }

        let path = self.object_path(key)?;
        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }

        fs::write(&path, bytes).await.map_err(map_io_error)?;

        Ok(self.public_url(key))
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> RepoResult<()> {
        let path = self.object_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(e)),
        }
    }
}

async fn ensure_dir(dir: &Path) -> RepoResult<()> {
    fs::create_dir_all(dir).await.map_err(map_io_error)
}
