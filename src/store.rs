use async_trait::async_trait;
use bytes::Bytes;
use futures_core::Stream;
use std::pin::Pin;

use crate::StorageResult;

/// Stream of bytes for object content
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Core object storage operations - must be implemented by all backends.
///
/// A store serves exactly one container; which container that is belongs to
/// the store's own construction. Implementations must be safe for concurrent
/// use through a shared handle.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object from a stream under a key
    async fn put(
        &self,
        key: &str,
        content_type: Option<&str>,
        stream: ByteStream,
    ) -> StorageResult<PutResult>;

    /// Get an object's content as a stream
    async fn get(&self, key: &str) -> StorageResult<GetResult>;

    /// Get object metadata without content
    async fn head(&self, key: &str) -> StorageResult<ObjectHead>;

    /// Check whether an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Delete an object. Deleting an absent key is `NotFound`.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}

/// Result of a successful put operation
#[derive(Debug, Clone)]
pub struct PutResult {
    /// Bytes the backend confirmed written
    pub size_bytes: u64,
}

/// Result of a get operation
pub struct GetResult {
    pub stream: ByteStream,
    pub size_bytes: u64,
    pub content_type: Option<String>,
}

impl std::fmt::Debug for GetResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetResult")
            .field("stream", &"<stream>")
            .field("size_bytes", &self.size_bytes)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Metadata about a stored object
#[derive(Debug, Clone)]
pub struct ObjectHead {
    pub size_bytes: u64,
    pub content_type: Option<String>,
    pub last_modified: Option<i64>,
}
