use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

/// File-storage collaborator: binary upload plus a public URL for the
/// stored object.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(&self, path: &str, bytes: &[u8]) -> AppResult<()>;
    fn public_url(&self, path: &str) -> String;
}

/// Writes uploads under a local media directory; the binary serves that
/// directory at /media.
#[derive(Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    base_url: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> AppResult<()> {
        // Uploads are keyed by server-generated names; reject anything that
        // would escape the media root.
        if Path::new(path)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(AppError::BadRequest("Invalid upload path".to_string()));
        }

        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/media/{path}", self.base_url)
    }
}
