//! Testing utilities for the GQLMP workspace
//!
//! Canonical multipart fixtures, part builders and tracing setup.

#![allow(missing_docs)]

use bytes::Bytes;
use futures::TryStreamExt;
use gqlmp_decoder::{FormField, MultipartForm, Part, Upload};
use serde_json::json;
use std::sync::Once;

pub const UPLOAD_QUERY: &str =
    "mutation ($files: [Upload!]!) { multipleUpload(files: $files) { id } }";
pub const OPERATION_NAME: &str = "uploadFiles";

/// `operations` JSON with two null file slots and one plain variable
pub fn operations_json(include_operation_name: bool, include_extensions: bool) -> String {
    let mut ops = json!({
        "query": UPLOAD_QUERY,
        "variables": {"files": [null, null], "foo": "bar"}
    });
    if include_operation_name {
        ops["operationName"] = json!(OPERATION_NAME);
    }
    if include_extensions {
        ops["extensions"] = json!({"persistedQuery": {"version": 1}});
    }
    ops.to_string()
}

/// `map` JSON binding files `0` and `1` to the two file slots
///
/// `invalid_variable_path` adds a path outside `variables` for file `1`;
/// `invalid_file_ref` adds a key `2` that has no file part.
pub fn file_map_json(invalid_variable_path: bool, invalid_file_ref: bool) -> String {
    let mut map = json!({
        "0": ["variables.files.0"],
        "1": ["variables.files.1"]
    });
    if invalid_variable_path {
        map["1"] = json!(["variables.files.1", "badVar"]);
    }
    if invalid_file_ref {
        map["2"] = json!(["variables.foo"]);
    }
    map.to_string()
}

pub fn form_field(name: &str, body: impl Into<Bytes>) -> Part {
    Part::Form(FormField::new(name, body))
}

pub fn file_part(name: &str, content: &'static str) -> Part {
    Part::File(Upload::from_bytes(
        name,
        Some(format!("{name}.txt")),
        Some("text/plain".to_string()),
        content,
    ))
}

/// Operations, map and two files (`0`, `1`)
pub fn canonical_form() -> MultipartForm {
    MultipartForm::new()
        .with_part(form_field("operations", operations_json(true, true)))
        .with_part(form_field("map", file_map_json(false, false)))
        .with_part(file_part("0", "file-0 content"))
        .with_part(file_part("1", "file-1 content"))
}

/// Read an upload's whole content
///
/// # Panics
/// Panics if the stream was already taken or fails.
pub async fn read_upload(upload: &Upload) -> Vec<u8> {
    let stream = upload.take_stream().expect("upload stream already taken");
    let chunks: Vec<Bytes> = stream.try_collect().await.expect("upload stream failed");
    chunks.concat()
}

/// Initialize tracing for tests (idempotent)
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_valid_json() {
        let ops: serde_json::Value = serde_json::from_str(&operations_json(true, false)).unwrap();
        assert_eq!(ops["operationName"], OPERATION_NAME);
        assert!(ops.get("extensions").is_none());

        let map: serde_json::Value = serde_json::from_str(&file_map_json(true, true)).unwrap();
        assert_eq!(map["1"][1], "badVar");
        assert_eq!(map["2"][0], "variables.foo");
    }

    #[test]
    fn canonical_form_has_four_parts() {
        let form = canonical_form();
        assert_eq!(form.len(), 4);
        assert_eq!(form.file_parts().len(), 2);
    }
}
