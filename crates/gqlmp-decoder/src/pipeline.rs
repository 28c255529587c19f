//! Multipart decode pipeline
//!
//! Turns a [`MultipartForm`] into a [`RequestDocument`]:
//!
//! 1. `operations` and `map` are decoded concurrently
//! 2. the map is joined against the file-bearing parts by key
//! 3. each eligible (path, upload) pair is written into the operations tree
//! 4. the request is built from the patched tree
//!
//! The operations tree is owned by the call and never escapes before the
//! request is built. Dropping the future mid-way leaves nothing behind.

use crate::binding::{resolve_bindings, FileMap};
use crate::config::DecoderConfig;
use crate::decode::{JsonPartDecoder, PartDecoder};
use crate::error::{DecodeError, Result};
use crate::part::{MultipartForm, Part, PartKey};
use crate::request::RequestDocument;
use crate::value::Object;
use async_trait::async_trait;
use indexmap::IndexMap;

/// Decodes a multipart submission into a request
#[async_trait]
pub trait MultipartDecoder: Send + Sync {
    /// Decode `form`
    ///
    /// # Errors
    /// Returns [`DecodeError`] if a JSON part is malformed or unreadable, or
    /// a configured requirement is not met.
    async fn decode(&self, form: &MultipartForm) -> Result<RequestDocument>;
}

/// Decoder for the GraphQL multipart request convention
///
/// # Example
///
/// ```rust
/// use gqlmp_decoder::{
///     DecoderConfig, FormField, GraphQlMultipartDecoder, MultipartDecoder, MultipartForm, Upload,
/// };
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let form = MultipartForm::new()
///     .with_part(FormField::new("operations", r#"{"query": "q", "variables": {"file": null}}"#))
///     .with_part(FormField::new("map", r#"{"0": ["variables.file"]}"#))
///     .with_part(Upload::from_bytes("0", Some("a.txt".into()), None, "hello"));
///
/// let decoder = GraphQlMultipartDecoder::new(DecoderConfig::default());
/// let request = decoder.decode(&form).await.unwrap();
///
/// let variables = request.variables.unwrap();
/// assert_eq!(variables["file"].as_upload().and_then(|u| u.filename()), Some("a.txt"));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct GraphQlMultipartDecoder<D = JsonPartDecoder> {
    config: DecoderConfig,
    parts: D,
}

impl GraphQlMultipartDecoder {
    /// Create a decoder using the JSON part decoder
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self::with_part_decoder(config, JsonPartDecoder)
    }
}

impl Default for GraphQlMultipartDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl<D: PartDecoder> GraphQlMultipartDecoder<D> {
    /// Create a decoder with a custom part decoder
    #[must_use]
    pub fn with_part_decoder(config: DecoderConfig, parts: D) -> Self {
        tracing::info!(
            require_operations = config.require_operations,
            strict_fields = config.strict_fields,
            collision_policy = ?config.collision_policy,
            variables_root = %config.variables_root,
            "multipart decoder ready"
        );
        Self { config, parts }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    async fn decode_operations(&self, parts: &IndexMap<String, Part>) -> Result<Object> {
        let key = PartKey::Operations;
        match parts.get(key.wire_name()) {
            Some(part) => self.parts.decode(key, part).await,
            None if self.config.require_operations => {
                Err(DecodeError::MissingPart(key.to_string()))
            }
            None => {
                tracing::warn!(part = %key, "part missing, decoding as empty");
                Ok(Object::new())
            }
        }
    }

    async fn decode_map(&self, parts: &IndexMap<String, Part>) -> Result<FileMap> {
        let key = PartKey::Map;
        match parts.get(key.wire_name()) {
            Some(part) => self.parts.decode(key, part).await,
            None => {
                tracing::warn!(part = %key, "part missing, decoding as empty");
                Ok(FileMap::new())
            }
        }
    }
}

#[async_trait]
impl<D: PartDecoder> MultipartDecoder for GraphQlMultipartDecoder<D> {
    async fn decode(&self, form: &MultipartForm) -> Result<RequestDocument> {
        let parts = form.to_single_value_map();
        let (mut operations, file_map) =
            futures::try_join!(self.decode_operations(&parts), self.decode_map(&parts))?;
        tracing::debug!(
            operations = ?operations.keys().collect::<Vec<_>>(),
            files = ?file_map.keys().collect::<Vec<_>>(),
            "decoded json parts"
        );

        let files = form.file_parts();
        let bindings = resolve_bindings(
            &file_map,
            &files,
            &self.config.variables_root,
            self.config.collision_policy,
        );
        let bound = bindings
            .into_iter()
            .map(|binding| binding.apply(&mut operations))
            .filter(|applied| *applied)
            .count();
        tracing::debug!(bound, "uploads bound into operations");

        if self.config.strict_fields {
            Ok(RequestDocument::build_strict(&operations)?)
        } else {
            Ok(RequestDocument::build(&operations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::FormField;
    use crate::upload::Upload;
    use crate::value::Value;

    fn form(ops: &str, map: &str) -> MultipartForm {
        MultipartForm::new()
            .with_part(FormField::new("operations", ops.to_owned()))
            .with_part(FormField::new("map", map.to_owned()))
    }

    #[tokio::test]
    async fn binds_single_upload() {
        let upload = Upload::from_bytes("0", None, None, "x");
        let form = form(
            r#"{"query": "q", "variables": {"file": null}}"#,
            r#"{"0": ["variables.file"]}"#,
        )
        .with_part(upload.clone());

        let request = GraphQlMultipartDecoder::default().decode(&form).await.unwrap();
        assert_eq!(request.variables.unwrap()["file"], Value::Upload(upload));
    }

    #[tokio::test]
    async fn missing_operations_is_empty_unless_required() {
        let form = MultipartForm::new().with_part(FormField::new("map", "{}"));

        let request = GraphQlMultipartDecoder::default().decode(&form).await.unwrap();
        assert_eq!(request, RequestDocument::default());

        let strict = GraphQlMultipartDecoder::new(DecoderConfig::new().with_require_operations(true));
        let err = strict.decode(&form).await.unwrap_err();
        assert!(matches!(err, DecodeError::MissingPart(ref part) if part == "operations"));
    }

    #[tokio::test]
    async fn malformed_map_aborts() {
        let form = form(r#"{"query": "q"}"#, r#"{"0": "variables.file"}"#);
        let err = GraphQlMultipartDecoder::default().decode(&form).await.unwrap_err();
        assert_eq!(err.part(), Some("map"));
    }

    #[test]
    fn config_is_kept() {
        let decoder = GraphQlMultipartDecoder::new(DecoderConfig::new().with_strict_fields(true));
        assert!(decoder.config().strict_fields);
    }
}
