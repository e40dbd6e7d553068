//! Source (nested) form of a mappings definition.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered map of field name to field. Declaration order is preserved.
pub type Fields = IndexMap<String, Field>;

/// A single field as declared in the mappings tree.
///
/// `properties` holds nested child fields (object-like types), `fields` holds
/// multi-fields (alternate representations of text-like types). Every other
/// key is an opaque parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Declared type. Absent means an implicit `object`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    /// Nested child fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Fields>,

    /// Multi-fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,

    /// Remaining parameters, passed through untouched.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl Field {
    /// Create a field of the given type with no parameters.
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: Some(data_type.into()),
            ..Default::default()
        }
    }

    /// Add a nested child field under `properties`.
    pub fn with_property(mut self, name: impl Into<String>, field: Field) -> Self {
        self.properties
            .get_or_insert_with(Fields::new)
            .insert(name.into(), field);
        self
    }

    /// Add a multi-field under `fields`.
    pub fn with_multi_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields
            .get_or_insert_with(Fields::new)
            .insert(name.into(), field);
        self
    }

    /// Set an opaque parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get the container stored under `properties` or `fields`.
    pub(crate) fn container(&self, name: crate::ChildFieldsName) -> Option<&Fields> {
        match name {
            crate::ChildFieldsName::Properties => self.properties.as_ref(),
            crate::ChildFieldsName::Fields => self.fields.as_ref(),
        }
    }
}

/// A field's own data as stored in a normalized row: its name, type and
/// parameters, without any child containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSource {
    /// Field name (last path segment).
    pub name: String,

    /// Declared type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    /// Opaque parameters.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl FieldSource {
    /// Split a field into its own data, dropping the child containers.
    pub fn from_field(name: impl Into<String>, field: &Field) -> Self {
        Self {
            name: name.into(),
            data_type: field.data_type.clone(),
            params: field.params.clone(),
        }
    }

    /// Rebuild a field with no child containers.
    pub fn to_field(&self) -> Field {
        Field {
            data_type: self.data_type.clone(),
            properties: None,
            fields: None,
            params: self.params.clone(),
        }
    }
}
