//! Static type-definition table and the subtype -> main type resolver.
//!
//! The table is configuration, not ambient state: it is built once (from
//! `Default` or YAML) and handed to `FieldClassifier::new` and
//! `TypeHierarchy::new`.

use crate::classify::ChildFieldsName;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Key of the fallback definition used for unknown types.
pub const OTHER_TYPE: &str = "other";

/// Definition of one main type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Human-readable label.
    pub label: String,

    /// Subtypes grouped under this main type (e.g. `long` under `numeric`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_types: Option<Vec<String>>,

    /// Child container used by this type and its subtypes, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_fields: Option<ChildFieldsName>,
}

impl TypeDefinition {
    /// Create a definition with a label only.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sub_types: None,
            child_fields: None,
        }
    }

    /// Set the subtypes.
    pub fn with_sub_types<I, S>(mut self, sub_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_types = Some(sub_types.into_iter().map(Into::into).collect());
        self
    }

    /// Set the child container.
    pub fn with_child_fields(mut self, name: ChildFieldsName) -> Self {
        self.child_fields = Some(name);
        self
    }

    /// Whether this main type declares subtypes.
    pub fn has_sub_types(&self) -> bool {
        self.sub_types.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// Main type name -> definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDefinitions(BTreeMap<String, TypeDefinition>);

impl TypeDefinitions {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace a main type.
    pub fn with_type(mut self, name: impl Into<String>, definition: TypeDefinition) -> Self {
        self.0.insert(name.into(), definition);
        self
    }

    /// Look up a main type.
    pub fn get(&self, main_type: &str) -> Option<&TypeDefinition> {
        self.0.get(main_type)
    }

    /// Iterate main types in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDefinition)> {
        self.0.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Label for a main type, falling back to the `other` label.
    pub fn label_for(&self, main_type: &str) -> &str {
        self.get(main_type)
            .or_else(|| self.get(OTHER_TYPE))
            .map(|def| def.label.as_str())
            .unwrap_or(OTHER_TYPE)
    }

    /// Number of main types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TypeDefinitions {
    fn default() -> Self {
        use ChildFieldsName::{Fields, Properties};

        let mut table = Self::empty()
            .with_type("text", TypeDefinition::new("Text").with_child_fields(Fields))
            .with_type(
                "keyword",
                TypeDefinition::new("Keyword").with_child_fields(Fields),
            )
            .with_type(
                "object",
                TypeDefinition::new("Object").with_child_fields(Properties),
            )
            .with_type(
                "nested",
                TypeDefinition::new("Nested").with_child_fields(Properties),
            )
            .with_type(
                "numeric",
                TypeDefinition::new("Numeric").with_sub_types([
                    "long",
                    "integer",
                    "short",
                    "byte",
                    "double",
                    "float",
                    "half_float",
                    "scaled_float",
                ]),
            )
            .with_type(
                "date",
                TypeDefinition::new("Date").with_sub_types(["date", "date_nanos"]),
            )
            .with_type(
                "range",
                TypeDefinition::new("Range").with_sub_types([
                    "integer_range",
                    "float_range",
                    "long_range",
                    "double_range",
                    "date_range",
                    "ip_range",
                ]),
            );

        for (name, label) in [
            ("binary", "Binary"),
            ("boolean", "Boolean"),
            ("ip", "IP"),
            ("alias", "Alias"),
            ("completion", "Completion suggester"),
            ("constant_keyword", "Constant keyword"),
            ("dense_vector", "Dense vector"),
            ("flattened", "Flattened"),
            ("geo_point", "Geo-point"),
            ("geo_shape", "Geo-shape"),
            ("histogram", "Histogram"),
            ("join", "Join"),
            ("point", "Point"),
            ("rank_feature", "Rank feature"),
            ("rank_features", "Rank features"),
            ("search_as_you_type", "Search-as-you-type"),
            ("shape", "Shape"),
            ("token_count", "Token count"),
            ("version", "Version"),
            ("wildcard", "Wildcard"),
            (OTHER_TYPE, "Other"),
        ] {
            table = table.with_type(name, TypeDefinition::new(label));
        }

        table
    }
}

/// Subtype -> main type lookup, inverted from a `TypeDefinitions` table.
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    main_type_by_sub_type: HashMap<String, String>,
}

impl TypeHierarchy {
    /// Invert the subtype lists of `definitions`.
    pub fn new(definitions: &TypeDefinitions) -> Self {
        let main_type_by_sub_type = definitions
            .iter()
            .flat_map(|(main_type, def)| {
                def.sub_types
                    .iter()
                    .flatten()
                    .map(move |sub_type| (sub_type.clone(), main_type.to_string()))
            })
            .collect();

        Self {
            main_type_by_sub_type,
        }
    }

    /// Main type of a subtype. `None` for anything not listed as a subtype.
    pub fn main_type(&self, sub_type: &str) -> Option<&str> {
        self.main_type_by_sub_type.get(sub_type).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_type_resolution() {
        let hierarchy = TypeHierarchy::new(&TypeDefinitions::default());
        assert_eq!(hierarchy.main_type("long"), Some("numeric"));
        assert_eq!(hierarchy.main_type("scaled_float"), Some("numeric"));
        assert_eq!(hierarchy.main_type("date_nanos"), Some("date"));
        assert_eq!(hierarchy.main_type("ip_range"), Some("range"));
    }

    #[test]
    fn test_unlisted_sub_type_is_none() {
        let hierarchy = TypeHierarchy::new(&TypeDefinitions::default());
        assert_eq!(hierarchy.main_type("text"), None);
        assert_eq!(hierarchy.main_type("made_up"), None);
    }

    #[test]
    fn test_custom_table() {
        let defs = TypeDefinitions::empty().with_type(
            "vector",
            TypeDefinition::new("Vector").with_sub_types(["dense", "sparse"]),
        );
        let hierarchy = TypeHierarchy::new(&defs);
        assert_eq!(hierarchy.main_type("sparse"), Some("vector"));
        assert_eq!(hierarchy.main_type("long"), None);
    }

    #[test]
    fn test_labels_fall_back_to_other() {
        let defs = TypeDefinitions::default();
        assert_eq!(defs.label_for("text"), "Text");
        assert_eq!(defs.label_for("geo_point"), "Geo-point");
        assert_eq!(defs.label_for("unheard_of"), "Other");
        assert_eq!(TypeDefinitions::empty().label_for("text"), "other");
    }

    #[test]
    fn test_has_sub_types() {
        let defs = TypeDefinitions::default();
        assert!(defs.get("numeric").unwrap().has_sub_types());
        assert!(!defs.get("text").unwrap().has_sub_types());
    }

    #[test]
    fn test_yaml_table() {
        let yaml = r#"
text:
  label: Text
  child_fields: fields
numeric:
  label: Numeric
  sub_types: [long, integer]
"#;
        let defs: TypeDefinitions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(
            defs.get("text").unwrap().child_fields,
            Some(ChildFieldsName::Fields)
        );
        assert_eq!(
            TypeHierarchy::new(&defs).main_type("integer"),
            Some("numeric")
        );
    }
}
