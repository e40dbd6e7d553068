//! Field metadata classification.
//!
//! Decides, from a field's declared type alone, which child container the
//! field uses and whether that container currently holds anything.
//! Multi-field members never get a container of either kind.

use crate::field::Field;
use crate::id::FieldId;
use crate::types::TypeDefinitions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Name of the container that holds a field's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildFieldsName {
    /// Nested child fields (object-like types). Crossing it adds one level of depth.
    Properties,
    /// Multi-fields (text-like types). Members share the parent's depth.
    Fields,
}

impl ChildFieldsName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Fields => "fields",
        }
    }
}

impl fmt::Display for ChildFieldsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier-derived part of a normalized row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Container this field's type would use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_fields_name: Option<ChildFieldsName>,
    pub can_have_child_fields: bool,
    pub has_child_fields: bool,
    pub can_have_multi_fields: bool,
    pub has_multi_fields: bool,
    /// Ordered child ids. Present only while the field has children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_fields: Option<Vec<FieldId>>,
    /// Display-only expansion flag.
    #[serde(default)]
    pub is_expanded: bool,
}

impl FieldMeta {
    /// Whether the row has children of either kind.
    pub fn has_children(&self) -> bool {
        self.has_child_fields || self.has_multi_fields
    }

    /// Child ids, empty when there are none.
    pub fn children(&self) -> &[FieldId] {
        self.child_fields.as_deref().unwrap_or_default()
    }
}

/// Maps declared types to their child container.
#[derive(Debug, Clone, Default)]
pub struct FieldClassifier {
    container_by_type: HashMap<String, ChildFieldsName>,
}

impl FieldClassifier {
    /// Build from a type-definition table. Subtypes inherit their main
    /// type's container.
    pub fn new(definitions: &TypeDefinitions) -> Self {
        let mut container_by_type = HashMap::new();
        for (main_type, def) in definitions.iter() {
            let Some(container) = def.child_fields else {
                continue;
            };
            container_by_type.insert(main_type.to_string(), container);
            for sub_type in def.sub_types.iter().flatten() {
                container_by_type.insert(sub_type.clone(), container);
            }
        }
        Self { container_by_type }
    }

    /// Container used by a declared type.
    ///
    /// A missing type is an implicit object and uses `properties`; an
    /// unrecognized type has no container.
    pub fn child_fields_name(&self, data_type: Option<&str>) -> Option<ChildFieldsName> {
        match data_type {
            None => Some(ChildFieldsName::Properties),
            Some(t) => self.container_by_type.get(t).copied(),
        }
    }

    /// Classify a field. `child_fields` is left unset for the caller to fill.
    pub fn field_meta(&self, field: &Field, is_multi_field: bool) -> FieldMeta {
        let child_fields_name = self.child_fields_name(field.data_type.as_deref());

        let can_have_child_fields =
            !is_multi_field && child_fields_name == Some(ChildFieldsName::Properties);
        let can_have_multi_fields =
            !is_multi_field && child_fields_name == Some(ChildFieldsName::Fields);

        let container_non_empty = child_fields_name
            .and_then(|name| field.container(name))
            .is_some_and(|children| !children.is_empty());

        FieldMeta {
            child_fields_name,
            can_have_child_fields,
            has_child_fields: can_have_child_fields && container_non_empty,
            can_have_multi_fields,
            has_multi_fields: can_have_multi_fields && container_non_empty,
            child_fields: None,
            is_expanded: false,
        }
    }

    /// Whether changing a field from `old_type` to `new_type` must drop its
    /// children: true when the old type had a container and the new type uses
    /// a different one (or none).
    pub fn should_delete_child_fields_after_type_change(
        &self,
        old_type: Option<&str>,
        new_type: Option<&str>,
    ) -> bool {
        match self.child_fields_name(old_type) {
            Some(old_container) => self.child_fields_name(new_type) != Some(old_container),
            None => false,
        }
    }
}
