use bytes::Bytes;

use crate::store::ByteStream;
use crate::StorageResult;

/// An upload in flight: name, content type, declared length, and a byte
/// stream that can be taken exactly once.
///
/// Hosting frameworks adapt their multipart/file types to this trait so the
/// service never depends on a concrete framework type.
pub trait UploadSource: Send {
    /// Original, human-given filename
    fn filename(&self) -> &str;

    /// Declared content type
    fn content_type(&self) -> &str;

    /// Declared payload length in bytes
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the byte stream. Yields the stream exactly once; a second call
    /// is an error.
    fn open_stream(&mut self) -> StorageResult<ByteStream>;
}

/// Upload source over an in-memory payload, for tests and small objects
#[derive(Debug, Clone)]
pub struct BytesUpload {
    filename: String,
    content_type: String,
    length: u64,
    payload: Option<Bytes>,
}

impl BytesUpload {
    pub fn new<F, C, B>(filename: F, content_type: C, payload: B) -> Self
    where
        F: Into<String>,
        C: Into<String>,
        B: Into<Bytes>,
    {
        let payload = payload.into();
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            length: payload.len() as u64,
            payload: Some(payload),
        }
    }
}

impl UploadSource for BytesUpload {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn len(&self) -> u64 {
        self.length
    }

    fn open_stream(&mut self) -> StorageResult<ByteStream> {
        let payload = self.payload.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "upload stream already taken")
        })?;
        Ok(Box::pin(futures::stream::once(async move { Ok(payload) })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn stream_yields_the_payload_once() {
        let mut upload = BytesUpload::new("a.txt", "text/plain", &b"abc"[..]);
        assert_eq!(upload.filename(), "a.txt");
        assert_eq!(upload.content_type(), "text/plain");
        assert_eq!(upload.len(), 3);

        let mut stream = upload.open_stream().unwrap();
        let chunk = stream.next().await.unwrap().unwrap();
        assert_eq!(&chunk[..], b"abc");
        assert!(stream.next().await.is_none());

        assert!(upload.open_stream().is_err());
        assert_eq!(upload.len(), 3, "declared length survives taking the stream");
    }
}
