//! File upload handles
//!
//! An [`Upload`] is a cheap, clonable reference to one file-bearing part.
//! The decoder only moves handles around; the content stream is handed to
//! the downstream consumer, which may take it exactly once.

use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Content stream of a file-bearing part
pub type ByteStream = BoxStream<'static, Result<Bytes, io::Error>>;

struct UploadInner {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    stream: Mutex<Option<ByteStream>>,
}

/// Handle to a file-bearing part
///
/// Clones share the same part. Two handles are equal iff they reference the
/// same part.
#[derive(Clone)]
pub struct Upload(Arc<UploadInner>);

impl Upload {
    /// Create a handle over a content stream
    pub fn new<S>(
        name: impl Into<String>,
        filename: Option<String>,
        content_type: Option<String>,
        stream: S,
    ) -> Self
    where
        S: Stream<Item = Result<Bytes, io::Error>> + Send + 'static,
    {
        Self(Arc::new(UploadInner {
            name: name.into(),
            filename,
            content_type,
            stream: Mutex::new(Some(stream.boxed())),
        }))
    }

    /// Create a handle over content already held in memory
    pub fn from_bytes(
        name: impl Into<String>,
        filename: Option<String>,
        content_type: Option<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let content = content.into();
        Self::new(
            name,
            filename,
            content_type,
            stream::once(async move { Ok(content) }),
        )
    }

    /// Part name (the file key used in the `map` part)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Client-declared filename
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.0.filename.as_deref()
    }

    /// Client-declared content type
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.0.content_type.as_deref()
    }

    /// Take the content stream
    ///
    /// Returns `None` once the stream has been taken by any clone.
    #[must_use]
    pub fn take_stream(&self) -> Option<ByteStream> {
        self.0.stream.lock().take()
    }

    /// Whether the content stream has already been taken
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.0.stream.lock().is_none()
    }

    /// Identity comparison
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Upload {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Upload {}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("name", &self.0.name)
            .field("filename", &self.0.filename)
            .field("content_type", &self.0.content_type)
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    fn upload() -> Upload {
        Upload::from_bytes("0", Some("a.txt".into()), Some("text/plain".into()), "hello")
    }

    #[test]
    fn metadata() {
        let upload = upload();
        assert_eq!(upload.name(), "0");
        assert_eq!(upload.filename(), Some("a.txt"));
        assert_eq!(upload.content_type(), Some("text/plain"));
    }

    #[test]
    fn equality_is_identity() {
        let a = upload();
        let b = upload();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn stream_is_taken_once_across_clones() {
        let a = upload();
        let b = a.clone();
        assert!(!b.is_consumed());

        let chunks: Vec<Bytes> = a.take_stream().unwrap().try_collect().await.unwrap();
        assert_eq!(chunks, vec![Bytes::from_static(b"hello")]);

        assert!(b.is_consumed());
        assert!(b.take_stream().is_none());
    }

    #[test]
    fn debug_hides_stream() {
        let rendered = format!("{:?}", upload());
        assert!(rendered.contains("a.txt"));
        assert!(rendered.contains("consumed: false"));
    }
}
