//! Mappings configuration
//!
//! Bundles the static tables the engine is built from. `Default` gives the
//! built-in tables; YAML documents may override any subset of keys.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::classify::FieldClassifier;
use crate::error::MappingsError;
use crate::parameters::ParameterDefinitions;
use crate::types::{TypeDefinitions, TypeHierarchy};

/// Depth at and above which the visual editor is not offered.
pub const DEFAULT_MAX_DEPTH_EDITOR: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingsConfig {
    /// Editor ceiling for `max_nested_depth`.
    pub max_depth_default_editor: usize,
    pub types: TypeDefinitions,
    pub parameters: ParameterDefinitions,
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            max_depth_default_editor: DEFAULT_MAX_DEPTH_EDITOR,
            types: TypeDefinitions::default(),
            parameters: ParameterDefinitions::default(),
        }
    }
}

impl MappingsConfig {
    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MappingsError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        info!(
            types = config.types.len(),
            max_depth_default_editor = config.max_depth_default_editor,
            "loaded mappings config"
        );
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Whether a table of this depth may be edited in the visual editor.
    pub fn can_use_mappings_editor(&self, max_nested_depth: usize) -> bool {
        max_nested_depth < self.max_depth_default_editor
    }

    /// Classifier over this config's type table.
    pub fn classifier(&self) -> FieldClassifier {
        FieldClassifier::new(&self.types)
    }

    /// Subtype resolver over this config's type table.
    pub fn type_hierarchy(&self) -> TypeHierarchy {
        TypeHierarchy::new(&self.types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ChildFieldsName;
    use std::io::Write;

    #[test]
    fn test_can_use_mappings_editor() {
        let config = MappingsConfig::default();
        assert!(config.can_use_mappings_editor(0));
        assert!(config.can_use_mappings_editor(19));
        assert!(!config.can_use_mappings_editor(20));
        assert!(!config.can_use_mappings_editor(35));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = MappingsConfig::from_yaml_str("max_depth_default_editor: 3\n").unwrap();
        assert_eq!(config.max_depth_default_editor, 3);
        assert_eq!(config.types, TypeDefinitions::default());
        assert!(config.can_use_mappings_editor(2));
        assert!(!config.can_use_mappings_editor(3));
    }

    #[test]
    fn test_yaml_type_override() {
        let yaml = r#"
types:
  text:
    label: Text
    child_fields: fields
  flat_object:
    label: Flat object
    child_fields: properties
"#;
        let config = MappingsConfig::from_yaml_str(yaml).unwrap();
        let classifier = config.classifier();
        assert_eq!(
            classifier.child_fields_name(Some("flat_object")),
            Some(ChildFieldsName::Properties)
        );
        // replaced table no longer knows `object`
        assert_eq!(classifier.child_fields_name(Some("object")), None);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = MappingsConfig::from_yaml_str("max_depth_default_editor: [oops").unwrap_err();
        assert_eq!(err.code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth_default_editor: 5").unwrap();

        let config = MappingsConfig::load(file.path()).unwrap();
        assert_eq!(config.max_depth_default_editor, 5);
        assert_eq!(config.type_hierarchy().main_type("long"), Some("numeric"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MappingsConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
