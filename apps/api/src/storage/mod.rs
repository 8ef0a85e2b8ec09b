//! Durable storage for uploaded CV files.

use std::path::PathBuf;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persists `bytes` under `stored_name` and returns its location.
    async fn put(&self, stored_name: &str, content_type: &str, bytes: Bytes) -> Result<String, AppError>;

    /// Deletes a file previously written by `put`.
    async fn remove(&self, stored_name: &str) -> Result<(), AppError>;
}

/// Writes uploads into a directory on the API host.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, stored_name: &str, _content_type: &str, bytes: Bytes) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::Storage(format!("failed to create {}: {e}", self.root.display()))
        })?;

        let path = self.root.join(stored_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::Storage(format!("failed to write {}: {e}", path.display())))?;

        info!("Stored upload at {}", path.display());
        Ok(path.to_string_lossy().into_owned())
    }

    async fn remove(&self, stored_name: &str) -> Result<(), AppError> {
        let path = self.root.join(stored_name);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| AppError::Storage(format!("failed to remove {}: {e}", path.display())))
    }
}

/// Writes uploads into an S3 / MinIO bucket under `cvs/`.
pub struct S3FileStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3FileStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl FileStore for S3FileStore {
    async fn put(&self, stored_name: &str, content_type: &str, bytes: Bytes) -> Result<String, AppError> {
        let key = format!("cvs/{stored_name}");
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded CV to s3://{}/{}", self.bucket, key);
        Ok(format!("s3://{}/{}", self.bucket, key))
    }

    async fn remove(&self, stored_name: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(format!("cvs/{stored_name}"))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 delete failed: {e}")))?;
        Ok(())
    }
}
