//! The `Upload` scalar
//!
//! Coercion rules a GraphQL executor applies to variables typed `Upload`.
//! Uploads only arrive through the multipart decoder: a bound value is
//! accepted, while inline literals and output serialization are refused.

use crate::error::CoercionError;
use crate::upload::Upload;
use crate::value::Value;
use gqlmp_graph::GraphNode;

/// Coercion contract of a custom scalar
pub trait ScalarCoercion {
    /// Scalar name in the schema
    const NAME: &'static str;

    /// Runtime type the scalar coerces to
    type Output;

    /// Coerce a variable value
    ///
    /// # Errors
    /// Returns [`CoercionError`] if the value cannot be coerced.
    fn parse_value(value: &Value) -> Result<Self::Output, CoercionError>;

    /// Coerce an inline literal from a query document
    ///
    /// # Errors
    /// Returns [`CoercionError`] if the literal cannot be coerced.
    fn parse_literal(literal: &str) -> Result<Self::Output, CoercionError>;

    /// Serialize a result value
    ///
    /// # Errors
    /// Returns [`CoercionError`] if the value cannot be serialized.
    fn serialize(output: &Self::Output) -> Result<Value, CoercionError>;
}

/// The `Upload` scalar
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadScalar;

impl UploadScalar {
    /// Schema description
    pub const DESCRIPTION: &'static str = "A file part of a multipart request";
}

impl ScalarCoercion for UploadScalar {
    const NAME: &'static str = "Upload";

    type Output = Upload;

    fn parse_value(value: &Value) -> Result<Upload, CoercionError> {
        value.as_upload().cloned().ok_or(CoercionError::NotAnUpload {
            found: value.type_name(),
        })
    }

    fn parse_literal(literal: &str) -> Result<Upload, CoercionError> {
        tracing::debug!(literal, "refused inline Upload literal");
        Err(CoercionError::LiteralUnsupported)
    }

    fn serialize(_output: &Upload) -> Result<Value, CoercionError> {
        Err(CoercionError::SerializeUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_bound_uploads() {
        let upload = Upload::from_bytes("0", None, None, "x");
        let parsed = UploadScalar::parse_value(&Value::Upload(upload.clone())).unwrap();
        assert_eq!(parsed, upload);

        assert_eq!(
            UploadScalar::parse_value(&Value::String("0".into())),
            Err(CoercionError::NotAnUpload { found: "string" })
        );
        assert_eq!(
            UploadScalar::parse_value(&Value::Null),
            Err(CoercionError::NotAnUpload { found: "null" })
        );
    }

    #[test]
    fn literal_and_serialize_are_refused() {
        let upload = Upload::from_bytes("0", None, None, "x");
        assert_eq!(
            UploadScalar::parse_literal("\"file\""),
            Err(CoercionError::LiteralUnsupported)
        );
        assert_eq!(
            UploadScalar::serialize(&upload),
            Err(CoercionError::SerializeUnsupported)
        );
        assert_eq!(UploadScalar::NAME, "Upload");
    }
}
