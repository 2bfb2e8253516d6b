//! Compiler configuration, loaded from YAML.

use std::path::Path;

use anyhow::{bail, Context, Result};
use arbor_core::ValueType;
use serde::{Deserialize, Serialize};

/// Knobs for reading node descriptions.
///
/// The defaults match the document format the engine was built for; every field may be omitted
/// from the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Attribute carrying the `Namespace.Category.Kind` qualifier.
    pub qualifier_attribute: String,

    /// Attribute names starting with this prefix are metadata, never keyword arguments.
    pub type_tag_prefix: String,

    /// Type tag of attribute `Name` is `{prefix}Name{suffix}`.
    pub type_tag_suffix: String,

    /// Loop repeat count attribute.
    pub loop_count_attribute: String,

    /// Lower-case condition/action names before binding them to capabilities.
    pub normalize_capability_names: bool,

    /// Also accept `str` as a type tag for `string`, as older documents spell it.
    pub legacy_type_tags: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            qualifier_attribute: "Class".to_string(),
            type_tag_prefix: "_".to_string(),
            type_tag_suffix: "Type".to_string(),
            loop_count_attribute: "Count".to_string(),
            normalize_capability_names: true,
            legacy_type_tags: false,
        }
    }
}

impl CompilerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Reject settings that would make every attribute metadata or leave nothing to look up.
    pub fn validate(&self) -> Result<()> {
        if self.type_tag_prefix.is_empty() {
            bail!("type_tag_prefix must not be empty");
        }
        if self.qualifier_attribute.is_empty() {
            bail!("qualifier_attribute must not be empty");
        }
        if self.loop_count_attribute.is_empty() {
            bail!("loop_count_attribute must not be empty");
        }
        Ok(())
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn type_tag_name(&self, attribute: &str) -> String {
        format!(
            "{}{}{}",
            self.type_tag_prefix, attribute, self.type_tag_suffix
        )
    }

    pub fn is_metadata(&self, attribute: &str) -> bool {
        attribute == self.qualifier_attribute || attribute.starts_with(&self.type_tag_prefix)
    }

    /// Resolve a type tag, honoring `legacy_type_tags`.
    pub fn value_type(&self, tag: &str) -> Option<ValueType> {
        match ValueType::from_tag(tag) {
            None if self.legacy_type_tags && tag == "str" => Some(ValueType::Str),
            resolved => resolved,
        }
    }

    pub fn capability_name(&self, kind: &str) -> String {
        if self.normalize_capability_names {
            kind.to_lowercase()
        } else {
            kind.to_string()
        }
    }
}
