use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, Client as S3Client};
use std::sync::Arc;

const AUDIO_CONTENT_TYPE: &str = "audio/mp3";

/// Object storage for synthesized audio.
///
/// Writes are keyed by path; writing the same path twice replaces the object.
#[async_trait]
pub trait AudioRepository: Send + Sync {
    async fn upload(&self, path: &str, audio: Vec<u8>) -> AppResult<()>;
}

/// S3 implementation of the audio repository
pub struct S3AudioRepository {
    s3_client: Arc<S3Client>,
    bucket: String,
}

impl S3AudioRepository {
    pub fn new(s3_client: Arc<S3Client>, bucket: impl Into<String>) -> Self {
        Self {
            s3_client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl AudioRepository for S3AudioRepository {
    async fn upload(&self, path: &str, audio: Vec<u8>) -> AppResult<()> {
        let size = audio.len();

        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(AUDIO_CONTENT_TYPE)
            .body(ByteStream::from(audio))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    bucket = %self.bucket,
                    key = path,
                    "S3 put_object failed"
                );
                AppError::Storage(format!(
                    "upload of s3://{}/{} failed: {}",
                    self.bucket,
                    path,
                    DisplayErrorContext(&e)
                ))
            })?;

        tracing::debug!(bucket = %self.bucket, key = path, size, "Audio uploaded");
        Ok(())
    }
}
