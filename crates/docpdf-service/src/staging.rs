//! Staging directories for uploads and converter outputs.
//!
//! Both directories hold flat files named `{uuid}_{filename}`; a path is
//! always reconstructible from the identifier and the filename.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use docpdf_core::config::StagingConfig;
use docpdf_core::AppResult;
use docpdf_core::error::AppError;

use crate::upload::ValidatedUpload;

/// The pair of directories shared by every request.
#[derive(Debug, Clone)]
pub struct StagingArea {
    /// Staged uploads.
    upload_dir: PathBuf,
    /// Converter outputs awaiting download.
    output_dir: PathBuf,
}

impl StagingArea {
    /// Create a staging area over two directories.
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Create a staging area from configuration.
    pub fn from_config(config: &StagingConfig) -> Self {
        Self::new(&config.upload_dir, &config.output_dir)
    }

    /// Create both directories if they are missing.
    pub async fn ensure_directories(&self) -> AppResult<()> {
        for dir in [&self.upload_dir, &self.output_dir] {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                AppError::storage(format!("Failed to create dir '{}': {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    /// Directory for staged uploads.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Directory for converter outputs.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `{id}_{file_name}`.
    pub fn staged_name(id: Uuid, file_name: &str) -> String {
        format!("{id}_{file_name}")
    }

    /// Path of a staged upload.
    pub fn input_path(&self, id: Uuid, file_name: &str) -> PathBuf {
        self.upload_dir.join(Self::staged_name(id, file_name))
    }

    /// Path of a converter output.
    pub fn output_path(&self, id: Uuid, file_name: &str) -> PathBuf {
        self.output_dir.join(Self::staged_name(id, file_name))
    }

    /// Persist a validated upload under a fresh identifier.
    pub async fn stage(&self, upload: &ValidatedUpload) -> AppResult<StagedInput> {
        let id = Uuid::new_v4();
        let path = self.input_path(id, &upload.file_name());

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                AppError::with_source(
                    docpdf_core::ErrorKind::Storage,
                    format!("Failed to stage upload: {e}"),
                    e,
                )
            })?;

        // From here on the guard owns the file, so a failed write still removes it.
        let staged = StagedInput { id, path };

        file.write_all(&upload.data).await?;
        file.flush().await?;

        tracing::debug!(
            id = %staged.id,
            path = %staged.path.display(),
            size = upload.data.len(),
            "Staged upload"
        );

        Ok(staged)
    }
}

/// A staged upload on disk.
///
/// Dropping the value deletes the file, so every exit path of a
/// conversion (including a cancelled request) releases it. Deletion is
/// best-effort and never reported.
#[derive(Debug)]
pub struct StagedInput {
    id: Uuid,
    path: PathBuf,
}

impl StagedInput {
    /// Identifier shared with the output and the download reference.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Location of the staged bytes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedInput {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove staged input"
                );
            }
        }
    }
}

/// Delete a file, ignoring every failure.
pub async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!(path = %path.display(), error = %e, "Best-effort removal failed");
        }
    }
}
