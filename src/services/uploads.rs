/*
 * Responsibility
 * - multipart で受け取ったファイルを disk に保存する
 * - 種類ごと (certificate file / facial image) の content-type 許可リストとサイズ上限
 * - 保存しながら SHA-256 を計算する (facial hash 用)
 */
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    InvalidType(&'static str),
    #[error("File too large")]
    TooLarge,
    #[error("io error")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    File,
    Facial,
}

const FILE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "application/pdf",
    "video/mp4",
    "video/quicktime",
    "video/x-msvideo",
    "video/x-matroska",
];

const FACIAL_TYPES: &[&str] = &["image/jpeg", "image/png"];

impl UploadKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            UploadKind::File => "files",
            UploadKind::Facial => "facial",
        }
    }

    pub fn max_bytes(&self) -> u64 {
        match self {
            UploadKind::File => 200 * 1024 * 1024,
            UploadKind::Facial => 10 * 1024 * 1024,
        }
    }

    pub fn allows(&self, content_type: &str) -> bool {
        let allowed = match self {
            UploadKind::File => FILE_TYPES,
            UploadKind::Facial => FACIAL_TYPES,
        };
        allowed.contains(&content_type)
    }

    fn rejection(&self) -> &'static str {
        match self {
            UploadKind::File => "Invalid file type",
            UploadKind::Facial => "Invalid facial image type",
        }
    }
}

/// A file that has been fully written to disk.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Path relative to the working directory, as stored in the database.
    pub path: PathBuf,
    pub filename: String,
    /// Public URL under which the static file service exposes it.
    pub url: String,
    pub size: u64,
    pub sha256: String,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn dir(&self, kind: UploadKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    pub async fn ensure_dirs(&self) -> Result<(), UploadError> {
        for kind in [UploadKind::File, UploadKind::Facial] {
            fs::create_dir_all(self.dir(kind)).await?;
        }
        Ok(())
    }

    /// Open a destination file for an incoming upload after checking its
    /// content type.
    pub async fn begin(
        &self,
        kind: UploadKind,
        field_name: &str,
        original_name: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<PendingUpload, UploadError> {
        if !content_type.is_some_and(|ct| kind.allows(ct)) {
            return Err(UploadError::InvalidType(kind.rejection()));
        }

        let filename = stored_filename(field_name, original_name);
        let path = self.dir(kind).join(&filename);
        let file = File::create(&path).await?;

        Ok(PendingUpload {
            file,
            path,
            url: format!("/{}/{}", kind.dir_name(), filename),
            filename,
            hasher: Sha256::new(),
            written: 0,
            limit: kind.max_bytes(),
        })
    }
}

/// An upload being streamed to disk.
pub struct PendingUpload {
    file: File,
    path: PathBuf,
    filename: String,
    url: String,
    hasher: Sha256,
    written: u64,
    limit: u64,
}

impl PendingUpload {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), UploadError> {
        self.written += chunk.len() as u64;
        if self.written > self.limit {
            return Err(UploadError::TooLarge);
        }
        self.hasher.update(chunk);
        self.file.write_all(chunk).await?;
        Ok(())
    }

    /// Flush and hand out the stored file. A failed flush removes the
    /// partial file before returning the error.
    pub async fn finish(mut self) -> Result<StoredUpload, UploadError> {
        if let Err(e) = self.file.flush().await {
            self.discard().await;
            return Err(e.into());
        }
        Ok(StoredUpload {
            path: self.path,
            filename: self.filename,
            url: self.url,
            size: self.written,
            sha256: hex::encode(self.hasher.finalize()),
        })
    }

    /// Drop the partial file.
    pub async fn discard(self) {
        let PendingUpload { file, path, .. } = self;
        drop(file);
        if let Err(e) = fs::remove_file(&path).await {
            warn!(error = %e, path = %path.display(), "failed to remove partial upload");
        }
    }
}

pub async fn remove_stored(upload: &StoredUpload) {
    if let Err(e) = fs::remove_file(&upload.path).await {
        warn!(error = %e, path = %upload.path.display(), "failed to remove upload");
    }
}

// <field>-<unix millis>-<random>[.<ext>]
fn stored_filename(field_name: &str, original_name: Option<&str>) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let random = Uuid::new_v4().as_u128() % 1_000_000_000;
    let field: String = field_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    match original_name.and_then(extension) {
        Some(ext) => format!("{field}-{millis}-{random}.{ext}"),
        None => format!("{field}-{millis}-{random}"),
    }
}

fn extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facial_uploads_accept_only_images() {
        assert!(UploadKind::Facial.allows("image/png"));
        assert!(UploadKind::Facial.allows("image/jpeg"));
        assert!(!UploadKind::Facial.allows("application/pdf"));
        assert!(UploadKind::File.allows("application/pdf"));
        assert!(UploadKind::File.allows("video/x-matroska"));
        assert!(!UploadKind::File.allows("text/plain"));
    }

    #[test]
    fn stored_names_keep_a_safe_extension() {
        let name = stored_filename("file", Some("scan.PDF"));
        assert!(name.starts_with("file-"));
        assert!(name.ends_with(".pdf"));

        let name = stored_filename("face", Some("../../etc/passwd"));
        assert!(!name.contains('/'));
        assert!(!name.contains('.'));

        let name = stored_filename("face", Some("photo.p/ng"));
        assert!(!name.contains('/'));
    }

    #[tokio::test]
    async fn streams_to_disk_and_hashes() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        store.ensure_dirs().await.unwrap();

        let mut pending = store
            .begin(UploadKind::Facial, "face", Some("me.png"), Some("image/png"))
            .await
            .unwrap();
        pending.write_chunk(b"hello ").await.unwrap();
        pending.write_chunk(b"world").await.unwrap();
        let stored = pending.finish().await.unwrap();

        assert_eq!(stored.size, 11);
        assert_eq!(
            stored.sha256,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert!(stored.url.starts_with("/facial/face-"));
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn rejects_disallowed_and_missing_content_types() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        store.ensure_dirs().await.unwrap();

        let err = store
            .begin(UploadKind::Facial, "face", Some("a.pdf"), Some("application/pdf"))
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Invalid facial image type");

        let err = store
            .begin(UploadKind::File, "file", Some("a.bin"), None)
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Invalid file type");
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        store.ensure_dirs().await.unwrap();

        let mut pending = store
            .begin(UploadKind::Facial, "face", Some("big.jpg"), Some("image/jpeg"))
            .await
            .unwrap();
        let path = pending.path.clone();
        let chunk = vec![0u8; 1024 * 1024];
        let mut result = Ok(());
        for _ in 0..11 {
            result = pending.write_chunk(&chunk).await;
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(result, Err(UploadError::TooLarge)));

        pending.discard().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn failed_write_or_flush_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.bin");
        std::fs::write(&path, b"").unwrap();

        // read-only handle: the buffered write fails once it reaches the OS
        let file = File::open(&path).await.unwrap();
        let mut pending = PendingUpload {
            file,
            path: path.clone(),
            filename: "partial.bin".to_string(),
            url: "/files/partial.bin".to_string(),
            hasher: Sha256::new(),
            written: 0,
            limit: UploadKind::File.max_bytes(),
        };

        let outcome = match pending.write_chunk(b"data").await {
            Ok(()) => pending.finish().await.map(|_| ()),
            Err(e) => {
                pending.discard().await;
                Err(e)
            }
        };

        assert!(matches!(outcome, Err(UploadError::Io(_))));
        assert!(!path.exists());
    }
}
