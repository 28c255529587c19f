//! Decoder configuration

use crate::error::ConfigError;
use gqlmp_graph::combine::{first_arg, last_arg};
use serde::{Deserialize, Serialize};

/// Which binding wins when several files target the same path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The first binding in map document order is kept
    FirstWins,
    /// The last binding in map document order is kept
    #[default]
    LastWins,
}

impl CollisionPolicy {
    /// Combinator implementing this policy
    #[must_use]
    pub fn combiner<T>(self) -> fn(T, T) -> T {
        match self {
            Self::FirstWins => first_arg(),
            Self::LastWins => last_arg(),
        }
    }
}

/// Decoder configuration
///
/// # Example
///
/// ```rust
/// use gqlmp_decoder::{CollisionPolicy, DecoderConfig};
///
/// let config = DecoderConfig::from_toml_str(r#"
///     require_operations = true
///     collision_policy = "first_wins"
/// "#).unwrap();
///
/// assert!(config.require_operations);
/// assert_eq!(config.collision_policy, CollisionPolicy::FirstWins);
/// assert_eq!(config.variables_root, "variables");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Fail with `MissingPart` instead of decoding an empty operations object
    pub require_operations: bool,
    /// Report request fields of the wrong shape instead of dropping them
    pub strict_fields: bool,
    /// Same-path collision resolution
    pub collision_policy: CollisionPolicy,
    /// First segment every upload target path must start with
    pub variables_root: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            require_operations: false,
            strict_fields: false,
            collision_policy: CollisionPolicy::default(),
            variables_root: "variables".to_string(),
        }
    }
}

impl DecoderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With required operations part
    #[inline]
    #[must_use]
    pub fn with_require_operations(mut self, required: bool) -> Self {
        self.require_operations = required;
        self
    }

    /// With strict request field checking
    #[inline]
    #[must_use]
    pub fn with_strict_fields(mut self, strict: bool) -> Self {
        self.strict_fields = strict;
        self
    }

    /// With collision policy
    #[inline]
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// With variables root segment
    #[inline]
    #[must_use]
    pub fn with_variables_root(mut self, root: impl Into<String>) -> Self {
        self.variables_root = root.into();
        self
    }

    /// Check that the configuration is usable
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidRoot`] if the variables root is empty or
    /// contains a path separator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variables_root.is_empty() || self.variables_root.contains('.') {
            return Err(ConfigError::InvalidRoot(self.variables_root.clone()));
        }
        Ok(())
    }

    /// Load from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the TOML is malformed or the result fails
    /// [`validate`](Self::validate).
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DecoderConfig::new();
        assert!(!config.require_operations);
        assert!(!config.strict_fields);
        assert_eq!(config.collision_policy, CollisionPolicy::LastWins);
        assert_eq!(config.variables_root, "variables");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder() {
        let config = DecoderConfig::new()
            .with_require_operations(true)
            .with_strict_fields(true)
            .with_collision_policy(CollisionPolicy::FirstWins)
            .with_variables_root("vars");
        assert!(config.require_operations);
        assert!(config.strict_fields);
        assert_eq!(config.collision_policy, CollisionPolicy::FirstWins);
        assert_eq!(config.variables_root, "vars");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(DecoderConfig::from_toml_str("").unwrap(), DecoderConfig::default());
    }

    #[test]
    fn toml_rejects_bad_root_and_unknown_policy() {
        assert!(matches!(
            DecoderConfig::from_toml_str(r#"variables_root = "a.b""#),
            Err(ConfigError::InvalidRoot(root)) if root == "a.b"
        ));
        assert!(matches!(
            DecoderConfig::from_toml_str(r#"collision_policy = "random""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn policy_combiners() {
        assert_eq!(CollisionPolicy::FirstWins.combiner()(1, 2), 1);
        assert_eq!(CollisionPolicy::LastWins.combiner()(1, 2), 2);
    }
}
