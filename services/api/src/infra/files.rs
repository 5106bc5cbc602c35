use std::path::PathBuf;

use uuid::Uuid;

use crate::domain::repository::ReportFileStore;
use crate::domain::types::StoredFile;
use crate::error::ApiError;

/// Local-disk report storage. The upload handler has already bounded the
/// payload to a PDF of acceptable size; this adapter only writes bytes and
/// hands back a locator.
#[derive(Clone)]
pub struct DiskFileStore {
    pub dir: PathBuf,
    pub public_base_url: String,
}

fn sanitize(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl ReportFileStore for DiskFileStore {
    async fn store(&self, bytes: &[u8], filename: &str) -> Result<StoredFile, ApiError> {
        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize(filename));
        let path = self.dir.join(&stored_name);

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            tracing::warn!(error = %e, dir = %self.dir.display(), "report dir unavailable");
            ApiError::FileStorage
        })?;
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            tracing::warn!(error = %e, path = %path.display(), "report write failed");
            ApiError::FileStorage
        })?;

        Ok(StoredFile {
            url: format!(
                "{}/{}",
                self.public_base_url.trim_end_matches('/'),
                stored_name
            ),
            stored_name,
        })
    }
}
