//! Export sink. Consumes rendered markup and puts it somewhere the user can
//! fetch it. `AppState` holds an `Arc<dyn ExportSink>`: files on disk by
//! default, S3 when a bucket is configured.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Relative path; may contain a `shared/` prefix but never `..`.
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReceipt {
    pub filename: String,
    pub location: String,
}

#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn export(&self, artifact: ExportArtifact) -> Result<ExportReceipt, AppError>;
}

/// Filename hint from the document: `<fullName>_Resume.<ext>`, falling back to
/// `Resume_Resume.<ext>` when no name is set.
pub fn filename_hint(doc: &ResumeDocument, extension: &str) -> String {
    let stem = match doc.personal.full_name.trim() {
        "" => "Resume",
        name => name,
    };
    format!("{}_Resume.{extension}", sanitize(stem))
}

fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Writes artifacts under a local directory.
pub struct FileExportSink {
    dir: PathBuf,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn target(&self, filename: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(filename);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(AppError::Export(format!("Refusing export path '{filename}'")));
        }
        Ok(self.dir.join(relative))
    }
}

#[async_trait]
impl ExportSink for FileExportSink {
    async fn export(&self, artifact: ExportArtifact) -> Result<ExportReceipt, AppError> {
        let path = self.target(&artifact.filename)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Export(format!("Cannot create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, artifact.body.as_bytes())
            .await
            .map_err(|e| AppError::Export(format!("Cannot write {}: {e}", path.display())))?;

        info!("Exported {} to {}", artifact.filename, path.display());
        Ok(ExportReceipt {
            filename: artifact.filename,
            location: path.display().to_string(),
        })
    }
}

/// Uploads artifacts to an S3 (or MinIO) bucket.
pub struct S3ExportSink {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ExportSink {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ExportSink for S3ExportSink {
    async fn export(&self, artifact: ExportArtifact) -> Result<ExportReceipt, AppError> {
        let key = format!("exports/{}", artifact.filename);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(artifact.body.into_bytes()))
            .content_type(artifact.content_type)
            .send()
            .await
            .map_err(|e| AppError::Export(format!("S3 upload failed: {e}")))?;

        info!("Uploaded export to s3://{}/{}", self.bucket, key);
        Ok(ExportReceipt {
            filename: artifact.filename,
            location: format!("s3://{}/{}", self.bucket, key),
        })
    }
}
