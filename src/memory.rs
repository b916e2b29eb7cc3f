use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use futures_util::StreamExt;
use parking_lot::RwLock;

use crate::store::{ByteStream, GetResult, ObjectHead, ObjectStore, PutResult};
use crate::{StorageError, StorageResult};

/// One stored object: payload plus the metadata a real backend would keep
#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Bytes,
    content_type: Option<String>,
    last_modified: i64,
}

/// In-memory backend for testing and development.
///
/// Objects live in a single named container held in process memory. Clones
/// share the same underlying container state.
#[derive(Clone)]
pub struct MemoryStore {
    container: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl MemoryStore {
    pub fn new<S: Into<String>>(container: S) -> Self {
        Self {
            container: container.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Name of the container this store serves
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Number of live objects in the container
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(
        &self,
        key: &str,
        content_type: Option<&str>,
        mut stream: ByteStream,
    ) -> StorageResult<PutResult> {
        let mut buffer = Vec::new();
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }

        let size_bytes = buffer.len() as u64;
        let object = StoredObject {
            bytes: Bytes::from(buffer),
            content_type: content_type.map(str::to_owned),
            last_modified: Utc::now().timestamp(),
        };
        self.objects.write().insert(key.to_owned(), object);

        Ok(PutResult { size_bytes })
    }

    async fn get(&self, key: &str) -> StorageResult<GetResult> {
        let object = self
            .objects
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))?;

        let StoredObject {
            bytes, content_type, ..
        } = object;
        let size_bytes = bytes.len() as u64;
        let stream: ByteStream = Box::pin(futures::stream::once(async move { Ok(bytes) }));

        Ok(GetResult {
            stream,
            size_bytes,
            content_type,
        })
    }

    async fn head(&self, key: &str) -> StorageResult<ObjectHead> {
        let objects = self.objects.read();
        let object = objects.get(key).ok_or_else(|| StorageError::not_found(key))?;

        Ok(ObjectHead {
            size_bytes: object.bytes.len() as u64,
            content_type: object.content_type.clone(),
            last_modified: Some(object.last_modified),
        })
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().contains_key(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.objects
            .write()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_stream(data: &'static [u8]) -> ByteStream {
        Box::pin(futures::stream::once(async move {
            Ok(Bytes::from_static(data))
        }))
    }

    #[tokio::test]
    async fn put_then_get_returns_content_and_metadata() {
        let store = MemoryStore::new("test-container");

        let result = store
            .put("key-1", Some("text/plain"), byte_stream(b"hello"))
            .await
            .unwrap();
        assert_eq!(result.size_bytes, 5);

        let got = store.get("key-1").await.unwrap();
        assert_eq!(got.size_bytes, 5);
        assert_eq!(got.content_type.as_deref(), Some("text/plain"));

        let chunks: Vec<_> = got.stream.collect().await;
        let bytes: Vec<u8> = chunks
            .into_iter()
            .flat_map(|chunk| chunk.unwrap().to_vec())
            .collect();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn head_reports_metadata_without_content() {
        let store = MemoryStore::new("test-container");
        store
            .put("key-1", Some("image/png"), byte_stream(b"png-bytes"))
            .await
            .unwrap();

        let head = store.head("key-1").await.unwrap();
        assert_eq!(head.size_bytes, 9);
        assert_eq!(head.content_type.as_deref(), Some("image/png"));
        assert!(head.last_modified.is_some());
    }

    #[tokio::test]
    async fn missing_keys_are_not_found() {
        let store = MemoryStore::new("test-container");

        assert!(!store.exists("missing").await.unwrap());
        assert!(store.get("missing").await.unwrap_err().is_not_found());
        assert!(store.head("missing").await.unwrap_err().is_not_found());
        assert!(store.delete("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_the_object() {
        let store = MemoryStore::new("test-container");
        store
            .put("key-1", None, byte_stream(b"data"))
            .await
            .unwrap();
        assert!(store.exists("key-1").await.unwrap());

        store.delete("key-1").await.unwrap();
        assert!(!store.exists("key-1").await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn erroring_stream_stores_nothing() {
        let store = MemoryStore::new("test-container");

        let stream: ByteStream = Box::pin(futures::stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "connection reset",
            )),
        ]));

        let err = store.put("key-1", None, stream).await.unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!store.exists("key-1").await.unwrap());
    }
}
