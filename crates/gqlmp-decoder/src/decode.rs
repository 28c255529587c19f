//! Structural decoding of individual parts
//!
//! [`PartDecoder`] turns one part into a requested shape. The JSON decoder
//! reads form fields from their bytes and drains a file-bearing part, since
//! an `operations` or `map` sent as a file is the document itself.

use crate::error::{DecodeError, Result};
use crate::part::{Part, PartKey};
use crate::upload::Upload;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use std::io;

/// Structural decode capability
#[async_trait]
pub trait PartDecoder: Send + Sync {
    /// Decode `part`, submitted as `key`, into `T`
    async fn decode<T>(&self, key: PartKey, part: &Part) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static;
}

/// [`PartDecoder`] backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPartDecoder;

#[async_trait]
impl PartDecoder for JsonPartDecoder {
    async fn decode<T>(&self, key: PartKey, part: &Part) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let body = match part {
            Part::Form(field) => field.value().clone(),
            Part::File(upload) => drain(key, upload).await?,
        };
        serde_json::from_slice(&body).map_err(|source| DecodeError::MalformedPart {
            part: key.to_string(),
            source,
        })
    }
}

async fn drain(key: PartKey, upload: &Upload) -> Result<Bytes> {
    let read_error = |source| DecodeError::PartRead {
        part: key.to_string(),
        source,
    };
    let stream = upload
        .take_stream()
        .ok_or_else(|| read_error(io::Error::other("content already consumed")))?;
    let body = stream
        .try_fold(BytesMut::new(), |mut body, chunk| async move {
            body.extend_from_slice(&chunk);
            Ok(body)
        })
        .await
        .map_err(read_error)?;
    tracing::debug!(part = %key, len = body.len(), "drained file-bearing part");
    Ok(body.freeze())
}
