//! Dotted path expressions for addressing values inside a nested graph
//!
//! Provides [`PathExpression`], the parsed form of strings such as
//! `variables.input.files.0` found in the multipart `map` part.

use serde::{Deserialize, Deserializer};
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const SEPARATOR: char = '.';

/// Path into a nested graph, split into intermediate segments and a leaf key
///
/// Parsing never fails. The final token becomes the key, the remaining
/// tokens (in order) become the segments.
///
/// # Examples
/// - `variables.input.file` → segments `["variables", "input"]`, key `file`
/// - `variables` → segments `[]`, key `variables`
/// - `""` → segments `[]`, no key (invalid)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathExpression {
    key: Option<String>,
    segments: Vec<String>,
}

impl PathExpression {
    /// Parse an optional dotted string
    ///
    /// `None` and the empty string both yield the invalid empty path. A
    /// trailing separator yields an empty-string key, which is present and
    /// therefore valid.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::invalid(),
            Some(raw) => {
                let mut segments: Vec<String> = raw.split(SEPARATOR).map(str::to_owned).collect();
                let key = segments.pop();
                Self { key, segments }
            }
        }
    }

    /// The canonical invalid path (no key, no segments)
    #[inline]
    #[must_use]
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Leaf key, if present
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Intermediate segments leading to the key
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// A path is valid iff it has a key
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.key.is_some()
    }

    /// First intermediate segment (if any)
    #[inline]
    #[must_use]
    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Check that the path is valid and its first segment is exactly `root`
    ///
    /// A path consisting only of a key (`"variables"`) is not rooted: it has
    /// no segments.
    #[inline]
    #[must_use]
    pub fn is_rooted_at(&self, root: &str) -> bool {
        self.is_valid() && self.first_segment() == Some(root)
    }
}

impl Display for PathExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}[{}] {}",
            self.segments.join("."),
            self.key.as_deref().unwrap_or_default(),
            if self.is_valid() { "VALID" } else { "INVALID" }
        )
    }
}

impl FromStr for PathExpression {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(Some(s)))
    }
}

impl From<&str> for PathExpression {
    fn from(raw: &str) -> Self {
        Self::parse(Some(raw))
    }
}

impl From<Option<&str>> for PathExpression {
    fn from(raw: Option<&str>) -> Self {
        Self::parse(raw)
    }
}

impl<'de> Deserialize<'de> for PathExpression {
    /// Decodes from a JSON string; `null` decodes to the invalid path
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::parse(raw.as_deref()))
    }
}
