//! Multipart form model
//!
//! A submission is a multi-valued map of part name to parts, in arrival
//! order. Two names are reserved (see [`PartKey`]); every other name is a
//! candidate file key.

use crate::upload::Upload;
use bytes::Bytes;
use gqlmp_graph::combine::first_arg;
use indexmap::IndexMap;
use std::fmt;

/// Reserved part names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKey {
    /// The JSON operations document
    Operations,
    /// The JSON file-key to paths map
    Map,
}

impl PartKey {
    /// All reserved keys
    pub const ALL: [PartKey; 2] = [PartKey::Operations, PartKey::Map];

    /// Name used on the wire
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Operations => "operations",
            Self::Map => "map",
        }
    }

    /// Check whether a part name is reserved
    #[must_use]
    pub fn is_reserved(name: &str) -> bool {
        Self::ALL.iter().any(|key| key.wire_name() == name)
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Plain (non-file) form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    name: String,
    value: Bytes,
}

impl FormField {
    /// Create a form field
    pub fn new(name: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Field name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw field content
    #[must_use]
    pub fn value(&self) -> &Bytes {
        &self.value
    }
}

/// One part of a multipart submission
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Plain form field
    Form(FormField),
    /// File-bearing part
    File(Upload),
}

impl Part {
    /// Part name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Form(field) => field.name(),
            Self::File(upload) => upload.name(),
        }
    }

    /// Whether this part carries a file
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// The upload handle, if this part carries a file
    #[must_use]
    pub fn as_upload(&self) -> Option<&Upload> {
        match self {
            Self::File(upload) => Some(upload),
            Self::Form(_) => None,
        }
    }
}

impl From<FormField> for Part {
    fn from(field: FormField) -> Self {
        Self::Form(field)
    }
}

impl From<Upload> for Part {
    fn from(upload: Upload) -> Self {
        Self::File(upload)
    }
}

/// Ordered, multi-valued map of part name to parts
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: IndexMap<String, Vec<Part>>,
}

impl MultipartForm {
    /// Create an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part under its own name
    pub fn push(&mut self, part: impl Into<Part>) {
        let part = part.into();
        self.parts.entry(part.name().to_owned()).or_default().push(part);
    }

    /// Builder form of [`push`](Self::push)
    #[must_use]
    pub fn with_part(mut self, part: impl Into<Part>) -> Self {
        self.push(part);
        self
    }

    /// First part submitted under `name`
    #[must_use]
    pub fn get_first(&self, name: &str) -> Option<&Part> {
        self.parts.get(name).and_then(|parts| parts.first())
    }

    /// Every part submitted under `name`, in arrival order
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[Part] {
        self.parts.get(name).map_or(&[][..], Vec::as_slice)
    }

    /// Number of distinct part names
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the form has no parts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Collapse to one part per name; the first part submitted wins
    #[must_use]
    pub fn to_single_value_map(&self) -> IndexMap<String, Part> {
        self.parts
            .iter()
            .filter_map(|(name, parts)| {
                parts
                    .iter()
                    .cloned()
                    .reduce(first_arg())
                    .map(|part| (name.clone(), part))
            })
            .collect()
    }

    /// File-bearing parts by file key, excluding reserved names
    ///
    /// Only the first part per name is considered; a name whose first part
    /// is a plain field is not a file key.
    #[must_use]
    pub fn file_parts(&self) -> IndexMap<String, Upload> {
        self.parts
            .iter()
            .filter(|(name, _)| !PartKey::is_reserved(name))
            .filter_map(|(name, parts)| {
                let upload = parts.first()?.as_upload()?;
                Some((name.clone(), upload.clone()))
            })
            .collect()
    }
}

impl<P: Into<Part>> FromIterator<P> for MultipartForm {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut form = Self::new();
        form.extend(iter);
        form
    }
}

impl<P: Into<Part>> Extend<P> for MultipartForm {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for part in iter {
            self.push(part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> Upload {
        Upload::from_bytes(name, Some(format!("{name}.bin")), None, "x")
    }

    #[test]
    fn reserved_names() {
        assert!(PartKey::is_reserved("operations"));
        assert!(PartKey::is_reserved("map"));
        assert!(!PartKey::is_reserved("0"));
        assert_eq!(PartKey::Operations.to_string(), "operations");
    }

    #[test]
    fn first_part_per_name_wins() {
        let first = file("0");
        let form: MultipartForm = [
            Part::from(first.clone()),
            Part::from(file("0")),
            Part::from(FormField::new("map", "{}")),
        ]
        .into_iter()
        .collect();

        assert_eq!(form.len(), 2);
        assert_eq!(form.get_all("0").len(), 2);

        let single = form.to_single_value_map();
        assert_eq!(single.get("0").and_then(Part::as_upload), Some(&first));
        assert_eq!(form.get_first("0"), single.get("0"));
    }

    #[test]
    fn file_parts_skip_fields_and_reserved_names() {
        let form = MultipartForm::new()
            .with_part(FormField::new("operations", "{}"))
            .with_part(file("map"))
            .with_part(FormField::new("0", "not a file"))
            .with_part(file("1"));

        let files = form.file_parts();
        assert_eq!(files.keys().collect::<Vec<_>>(), vec!["1"]);
    }

    #[test]
    fn empty_form() {
        let form = MultipartForm::default();
        assert!(form.is_empty());
        assert!(form.get_first("operations").is_none());
        assert!(form.get_all("operations").is_empty());
        assert!(form.to_single_value_map().is_empty());
    }
}
