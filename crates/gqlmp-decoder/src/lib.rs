//! GQLMP Decoder
//!
//! Decodes submissions that follow the GraphQL multipart request convention
//! into a [`RequestDocument`] with file uploads bound into its variables.
//!
//! # Wire layout
//!
//! - `operations`: JSON object with `query`, `operationName`, `variables`
//!   and `extensions`
//! - `map`: JSON object mapping each file key to the dotted paths that file
//!   fills, e.g. `{"0": ["variables.files.0"]}`
//! - one file-bearing part per file key
//!
//! # Core Concepts
//!
//! - [`MultipartForm`]: the submitted parts, multi-valued and ordered
//! - [`Upload`]: shared handle to one file part; the stream is taken once
//! - [`Value`]: decoded operations tree that can hold uploads
//! - [`MultipartDecoder`]: the decode contract, implemented by
//!   [`GraphQlMultipartDecoder`] over any [`PartDecoder`]
//! - [`UploadScalar`]: coercion rules for variables typed `Upload`
//!
//! Malformed JSON parts are errors. Everything else a client can get wrong
//! (unknown file keys, paths outside `variables`, paths that do not
//! resolve) is skipped and logged.

#![warn(unreachable_pub)]

mod binding;
mod config;
mod decode;
mod error;
mod part;
mod pipeline;
mod request;
mod scalar;
mod upload;
mod value;

pub use binding::{resolve_bindings, Binding, FileMap};
pub use config::{CollisionPolicy, DecoderConfig};
pub use decode::{JsonPartDecoder, PartDecoder};
pub use error::{CoercionError, ConfigError, DecodeError, Result};
pub use part::{FormField, MultipartForm, Part, PartKey};
pub use pipeline::{GraphQlMultipartDecoder, MultipartDecoder};
pub use request::{
    RequestDocument, EXTENSIONS_FIELD, OPERATION_NAME_FIELD, QUERY_FIELD, VARIABLES_FIELD,
};
pub use scalar::{ScalarCoercion, UploadScalar};
pub use upload::{ByteStream, Upload};
pub use value::{Object, Value};

pub use gqlmp_graph::PathExpression;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
