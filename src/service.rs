use std::sync::Arc;

use tracing::{debug, warn};

use crate::codec::{DefaultFilenameCodec, FilenameCodec};
use crate::store::{ByteStream, ObjectStore};
use crate::upload::UploadSource;
use crate::{FileInfo, StorageConfig, StorageError, StorageResult};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Orchestrates the filename codec and an object store into the upload,
/// retrieval, and deletion operations services embed.
///
/// Every operation is a single stateless round-trip against the backend;
/// the service itself holds no mutable state and a handle can be shared
/// freely across tasks.
pub struct StorageService {
    store: Arc<dyn ObjectStore>,
    codec: Arc<dyn FilenameCodec>,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service with the default filename codec
    pub fn new<S: ObjectStore + 'static>(store: S, config: StorageConfig) -> Self {
        Self {
            store: Arc::new(store),
            codec: Arc::new(DefaultFilenameCodec),
            config,
        }
    }

    /// Create with a custom filename codec
    pub fn with_codec<S, C>(store: S, codec: C, config: StorageConfig) -> Self
    where
        S: ObjectStore + 'static,
        C: FilenameCodec + 'static,
    {
        Self {
            store: Arc::new(store),
            codec: Arc::new(codec),
            config,
        }
    }

    /// Upload an object under a freshly generated stored name.
    ///
    /// An unparseable filename is reported as `InvalidName` before any
    /// transfer starts. A failure during the transfer itself is absorbed
    /// into the returned `FileInfo`: the partial object is deleted
    /// best-effort and the status is `Fail` with length 0.
    pub async fn put(
        &self,
        filename: &str,
        content_type: &str,
        stream: ByteStream,
    ) -> StorageResult<FileInfo> {
        let stored = self.codec.generate(filename)?;

        match self.store.put(&stored, Some(content_type), stream).await {
            Ok(result) => {
                debug!(
                    "Stored {} as {} ({} bytes)",
                    filename, stored, result.size_bytes
                );
                Ok(FileInfo::success(
                    filename,
                    stored,
                    content_type,
                    result.size_bytes,
                ))
            }
            Err(error) => {
                warn!("Upload of {} failed: {}", filename, error);
                self.discard_partial(&stored).await;
                Ok(FileInfo::failure(filename, stored, content_type))
            }
        }
    }

    /// Upload from an `UploadSource`, with the same semantics as `put`.
    ///
    /// A source whose declared length exceeds the configured maximum is a
    /// put failure: the backend is never touched and the returned info
    /// carries `Fail`.
    pub async fn put_source<U: UploadSource>(&self, mut source: U) -> StorageResult<FileInfo> {
        let filename = source.filename().to_owned();
        let content_type = source.content_type().to_owned();

        if source.len() > self.config.max_object_bytes {
            warn!(
                "Upload of {} refused: {} bytes exceeds maximum {}",
                filename,
                source.len(),
                self.config.max_object_bytes
            );
            let stored = self.codec.generate(&filename)?;
            return Ok(FileInfo::failure(filename, stored, content_type));
        }

        let stream = source.open_stream()?;
        self.put(&filename, &content_type, stream).await
    }

    /// Retrieve metadata for a stored object and recover its original name.
    ///
    /// Fails with `NotFound` when the backend reports the object absent.
    pub async fn get(&self, stored_filename: &str) -> StorageResult<FileInfo> {
        if !self.store.exists(stored_filename).await? {
            return Err(StorageError::not_found(stored_filename));
        }

        let head = self.store.head(stored_filename).await?;
        let filename = self.codec.restore(stored_filename)?;
        let file_type = head
            .content_type
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_owned());

        debug!(
            "Resolved {} to {} ({} bytes)",
            stored_filename, filename, head.size_bytes
        );
        Ok(FileInfo::success(
            filename,
            stored_filename,
            file_type,
            head.size_bytes,
        ))
    }

    /// Open a stored object for reading: metadata plus its content stream
    pub async fn open(&self, stored_filename: &str) -> StorageResult<OpenedObject> {
        let result = self.store.get(stored_filename).await?;
        let filename = self.codec.restore(stored_filename)?;
        let file_type = result
            .content_type
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_owned());

        let info = FileInfo::success(filename, stored_filename, file_type, result.size_bytes);
        Ok(OpenedObject {
            info,
            stream: result.stream,
        })
    }

    /// Delete a stored object.
    ///
    /// Returns `true` only when an existing object was deleted. An absent
    /// object or a recoverable backend failure yields `false`, never an
    /// error, so a second call on the same name is `false`.
    pub async fn remove(&self, stored_filename: &str) -> bool {
        match self.store.exists(stored_filename).await {
            Ok(true) => {}
            Ok(false) => return false,
            Err(error) => {
                warn!("Existence check for {} failed: {}", stored_filename, error);
                return false;
            }
        }

        match self.store.delete(stored_filename).await {
            Ok(()) => {
                debug!("Removed {}", stored_filename);
                true
            }
            Err(error) if error.is_not_found() => false,
            Err(error) => {
                warn!("Removal of {} failed: {}", stored_filename, error);
                false
            }
        }
    }

    /// Stored objects are immutable: always fails with `Unsupported`.
    /// Replace an object by `remove` plus a fresh `put`.
    pub async fn update<U: UploadSource>(
        &self,
        _stored_filename: &str,
        _source: U,
    ) -> StorageResult<FileInfo> {
        Err(StorageError::Unsupported)
    }

    /// Get configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Best-effort cleanup after a failed transfer. An object that never
    /// materialized is fine; anything else is logged and swallowed.
    async fn discard_partial(&self, stored_filename: &str) {
        match self.store.delete(stored_filename).await {
            Ok(()) => {}
            Err(error) if error.is_not_found() => {}
            Err(error) => {
                warn!(
                    "Cleanup of partial object {} failed: {}",
                    stored_filename, error
                );
            }
        }
    }
}

/// A stored object opened for reading
pub struct OpenedObject {
    pub info: FileInfo,
    pub stream: ByteStream,
}
