//! File-reference service.
//!
//! The stores only ever hold reference strings such as
//! `/uploads/1727516700000_photos.zip`; raw bytes stay here.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::container::SharedClock;

/// URL prefix of every reference.
pub const UPLOAD_PREFIX: &str = "/uploads/";

/// Attempts at finding a free file name before giving up.
const MAX_NAME_ATTEMPTS: u64 = 16;

/// Result of one stored upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Name supplied by the client.
    pub original_name: String,
    /// Stored name, `<millis>_<name>`.
    pub file_name: String,
    /// Stable reference kept in application documents and violation evidence.
    pub reference: String,
    /// Payload size in bytes.
    pub size: usize,
}

/// Upload errors.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file name: {name:?}")]
    InvalidName { name: String },

    #[error("Empty upload: {name}")]
    Empty { name: String },

    #[error("Upload {name} is {size} bytes, limit is {limit}")]
    TooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    #[error("Upload I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns raw upload bytes into stable reference strings.
#[async_trait]
pub trait FileReferenceService: Send + Sync {
    /// Stores one file and returns its receipt.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<UploadReceipt, UploadError>;

    /// Stores several files in order. Stops at the first failure.
    async fn store_many(
        &self,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<Vec<UploadReceipt>, UploadError> {
        let mut receipts = Vec::with_capacity(files.len());
        for (name, bytes) in files {
            receipts.push(self.store(&name, &bytes).await?);
        }
        Ok(receipts)
    }
}

/// Writes uploads under a local directory.
pub struct LocalUploadService {
    root: PathBuf,
    max_bytes: usize,
    clock: SharedClock,
}

impl LocalUploadService {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize, clock: SharedClock) -> Self {
        Self {
            root: root.into(),
            max_bytes,
            clock,
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

/// Last path component of a client-supplied name.
fn sanitize(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    match base {
        "" | "." | ".." => None,
        base => Some(base),
    }
}

async fn write_contents<W>(out: &mut W, bytes: &[u8]) -> std::io::Result<()>
where
    W: AsyncWriteExt + Unpin,
{
    out.write_all(bytes).await?;
    out.flush().await
}

/// Removes a file left behind by a failed write.
async fn discard_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => warn!("[uploads] Discarded partial file {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(
            "[uploads] Could not remove partial file {}: {}",
            path.display(),
            e
        ),
    }
}

#[async_trait]
impl FileReferenceService for LocalUploadService {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<UploadReceipt, UploadError> {
        let name = sanitize(file_name).ok_or_else(|| UploadError::InvalidName {
            name: file_name.to_string(),
        })?;
        if bytes.is_empty() {
            return Err(UploadError::Empty {
                name: name.to_string(),
            });
        }
        if bytes.len() > self.max_bytes {
            warn!(
                "[uploads] Rejecting {} ({} bytes > {})",
                name,
                bytes.len(),
                self.max_bytes
            );
            return Err(UploadError::TooLarge {
                name: name.to_string(),
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        tokio::fs::create_dir_all(&self.root).await?;

        let now = self.clock.now();
        for offset in 0..MAX_NAME_ATTEMPTS {
            let stored = format!("{}_{}", now + offset, name);
            let path = self.root.join(&stored);
            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            if let Err(e) = write_contents(&mut file, bytes).await {
                drop(file);
                discard_partial(&path).await;
                return Err(e.into());
            }

            info!("[uploads] Stored {} ({} bytes)", stored, bytes.len());
            return Ok(UploadReceipt {
                original_name: name.to_string(),
                reference: format!("{}{}", UPLOAD_PREFIX, stored),
                file_name: stored,
                size: bytes.len(),
            });
        }

        Err(UploadError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free name for {}", name),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ManualTimeSource;
    use std::sync::Arc;

    fn service(dir: &tempfile::TempDir, max: usize) -> LocalUploadService {
        let clock: SharedClock = Arc::new(ManualTimeSource::new(1_727_516_700_000));
        LocalUploadService::new(dir.path().join("uploads"), max, clock)
    }

    #[tokio::test]
    async fn test_reference_format() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = service(&dir, 1024);

        let receipt = uploads.store("photos.zip", b"zipdata").await.unwrap();
        assert_eq!(receipt.reference, "/uploads/1727516700000_photos.zip");
        assert_eq!(receipt.original_name, "photos.zip");
        assert_eq!(receipt.size, 7);

        let written = tokio::fs::read(uploads.root().join(&receipt.file_name))
            .await
            .unwrap();
        assert_eq!(written, b"zipdata");
    }

    #[tokio::test]
    async fn test_same_name_same_millis_gets_distinct_reference() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = service(&dir, 1024);
        let a = uploads.store("a.pdf", b"1").await.unwrap();
        let b = uploads.store("a.pdf", b"2").await.unwrap();
        assert_ne!(a.reference, b.reference);
    }

    #[tokio::test]
    async fn test_path_components_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = service(&dir, 1024);
        let receipt = uploads.store("../../etc/passwd", b"x").await.unwrap();
        assert_eq!(receipt.original_name, "passwd");
        assert!(uploads.root().join(&receipt.file_name).exists());
    }

    #[tokio::test]
    async fn test_rejections() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = service(&dir, 4);
        assert!(matches!(
            uploads.store("", b"x").await,
            Err(UploadError::InvalidName { .. })
        ));
        assert!(matches!(
            uploads.store("dir/..", b"x").await,
            Err(UploadError::InvalidName { .. })
        ));
        assert!(matches!(
            uploads.store("a.pdf", b"").await,
            Err(UploadError::Empty { .. })
        ));
        assert!(matches!(
            uploads.store("a.pdf", b"12345").await,
            Err(UploadError::TooLarge {
                size: 5,
                limit: 4,
                ..
            })
        ));
    }

    /// Accepts a few bytes, then fails like a full disk.
    struct FullDisk {
        room: usize,
    }

    impl tokio::io::AsyncWrite for FullDisk {
        fn poll_write(
            mut self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            if self.room == 0 {
                return std::task::Poll::Ready(Err(std::io::Error::new(
                    ErrorKind::Other,
                    "no space left",
                )));
            }
            let n = buf.len().min(self.room);
            self.room -= n;
            std::task::Poll::Ready(Ok(n))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_write_contents_reports_short_write() {
        let mut out = FullDisk { room: 3 };
        let err = write_contents(&mut out, b"zipdata").await.unwrap_err();
        assert_eq!(err.to_string(), "no space left");
    }

    #[tokio::test]
    async fn test_discard_partial_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1727516700000_photos.zip");
        tokio::fs::write(&path, b"zip").await.unwrap();

        discard_partial(&path).await;
        assert!(!path.exists());

        // A second call finds nothing to remove.
        discard_partial(&path).await;
    }

    #[tokio::test]
    async fn test_store_many_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = service(&dir, 1024);
        let receipts = uploads
            .store_many(vec![
                ("certificate.pdf".into(), b"c".to_vec()),
                ("quality-standards.pdf".into(), b"q".to_vec()),
            ])
            .await
            .unwrap();
        let names: Vec<_> = receipts.iter().map(|r| r.original_name.as_str()).collect();
        assert_eq!(names, vec!["certificate.pdf", "quality-standards.pdf"]);
    }
}
