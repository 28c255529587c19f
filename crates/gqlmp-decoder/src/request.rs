//! The decoded GraphQL request

use crate::value::{Object, Value};
use gqlmp_graph::{FieldAccessor, FieldShapeMismatch, PathExpression, Reader};

/// Operations field holding the query document
pub const QUERY_FIELD: &str = "query";
/// Operations field holding the operation name
pub const OPERATION_NAME_FIELD: &str = "operationName";
/// Operations field holding the variables object
pub const VARIABLES_FIELD: &str = "variables";
/// Operations field holding the extensions object
pub const EXTENSIONS_FIELD: &str = "extensions";

/// A GraphQL request with uploads bound into its variables
///
/// Each field is taken from the decoded operations object only if it has
/// the expected shape: strings for the document and operation name, objects
/// for variables and extensions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestDocument {
    /// Query document
    pub document: Option<String>,
    /// Operation to run
    pub operation_name: Option<String>,
    /// Variables, with uploads bound
    pub variables: Option<Object>,
    /// Protocol extensions
    pub extensions: Option<Object>,
}

impl RequestDocument {
    /// Build from a decoded operations object
    ///
    /// A field that is missing, null, or of the wrong shape is absent.
    #[must_use]
    pub fn build(operations: &Object) -> Self {
        let fields = FieldAccessor::wrap(operations);
        Self {
            document: fields.get(QUERY_FIELD, Value::as_str).map(str::to_owned),
            operation_name: fields
                .get(OPERATION_NAME_FIELD, Value::as_str)
                .map(str::to_owned),
            variables: fields.get(VARIABLES_FIELD, Value::as_object).cloned(),
            extensions: fields.get(EXTENSIONS_FIELD, Value::as_object).cloned(),
        }
    }

    /// Build from a decoded operations object, rejecting wrongly shaped fields
    ///
    /// # Errors
    /// Returns [`FieldShapeMismatch`] for the first present, non-null field
    /// whose shape is wrong.
    pub fn build_strict(operations: &Object) -> Result<Self, FieldShapeMismatch> {
        let fields = FieldAccessor::wrap(operations);
        Ok(Self {
            document: fields
                .get_strict(QUERY_FIELD, "string", Value::as_str)?
                .map(str::to_owned),
            operation_name: fields
                .get_strict(OPERATION_NAME_FIELD, "string", Value::as_str)?
                .map(str::to_owned),
            variables: fields
                .get_strict(VARIABLES_FIELD, "object", Value::as_object)?
                .cloned(),
            extensions: fields
                .get_strict(EXTENSIONS_FIELD, "object", Value::as_object)?
                .cloned(),
        })
    }

    /// Variable value addressed by a path rooted at `variables`
    ///
    /// `variables.files.0` reads item 0 of the `files` variable.
    #[must_use]
    pub fn variable_at(&self, path: &PathExpression) -> Option<&Value> {
        let (root, rest) = path.segments().split_first()?;
        if root != VARIABLES_FIELD {
            return None;
        }
        let variables = self.variables.as_ref()?;
        let key = path.key()?;
        match rest.split_first() {
            None => variables.get(key),
            Some((first, rest)) => rest
                .iter()
                .fold(Reader::wrap(variables.get(first)), |node, segment| {
                    node.dereference(segment)
                })
                .get(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ops(raw: &str) -> Object {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn build_extracts_all_fields() {
        let request = RequestDocument::build(&ops(
            r#"{"query": "q", "operationName": "op", "variables": {"a": 1}, "extensions": {"e": true}}"#,
        ));
        assert_eq!(request.document.as_deref(), Some("q"));
        assert_eq!(request.operation_name.as_deref(), Some("op"));
        assert_eq!(request.variables.unwrap()["a"], Value::Number(1u64.into()));
        assert_eq!(request.extensions.unwrap()["e"], Value::Bool(true));
    }

    #[test]
    fn build_drops_wrong_shapes_and_nulls() {
        let request = RequestDocument::build(&ops(
            r#"{"query": 5, "operationName": null, "variables": [1], "extensions": "x"}"#,
        ));
        assert_eq!(request, RequestDocument::default());
    }

    #[test]
    fn build_strict_reports_first_mismatch() {
        let err = RequestDocument::build_strict(&ops(r#"{"query": "q", "variables": [1]}"#))
            .unwrap_err();
        assert_eq!(err.field, "variables");
        assert_eq!(err.found, "list");

        let ok = RequestDocument::build_strict(&ops(r#"{"query": "q", "operationName": null}"#))
            .unwrap();
        assert_eq!(ok.document.as_deref(), Some("q"));
        assert!(ok.operation_name.is_none());
    }

    #[test]
    fn variable_at_reads_below_variables() {
        let request = RequestDocument::build(&ops(
            r#"{"variables": {"files": [null, "b"], "one": 1}}"#,
        ));
        assert_eq!(
            request.variable_at(&"variables.files.1".into()),
            Some(&Value::String("b".into()))
        );
        assert_eq!(
            request.variable_at(&"variables.one".into()),
            Some(&Value::Number(1u64.into()))
        );
        assert!(request.variable_at(&"variables".into()).is_none());
        assert!(request.variable_at(&"extensions.one".into()).is_none());
        assert!(request.variable_at(&"variables.files.9".into()).is_none());
    }
}
