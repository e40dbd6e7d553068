//! Parameter definitions - default input configuration per mapping parameter.
//!
//! The field configs are opaque to this crate; they are passed through to the
//! editor layer. A lookup for an unknown parameter or prop is a wiring bug in
//! the caller and fails.

use crate::error::MappingsError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Definition of one parameter (e.g. `doc_values`, `ignore_above`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Default input configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_config: Option<Value>,

    /// Sub-properties of a compound parameter, each with its own config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<BTreeMap<String, ParameterDefinition>>,
}

impl ParameterDefinition {
    pub fn new(field_config: Value) -> Self {
        Self {
            field_config: Some(field_config),
            props: None,
        }
    }

    /// Add a sub-property.
    pub fn with_prop(mut self, name: impl Into<String>, prop: ParameterDefinition) -> Self {
        self.props
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), prop);
        self
    }

    fn config_or_empty(&self) -> Value {
        self.field_config
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()))
    }
}

/// Parameter name -> definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterDefinitions(BTreeMap<String, ParameterDefinition>);

impl ParameterDefinitions {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace a parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, def: ParameterDefinition) -> Self {
        self.0.insert(name.into(), def);
        self
    }

    /// Look up a parameter.
    pub fn get(&self, param: &str) -> Option<&ParameterDefinition> {
        self.0.get(param)
    }

    /// Field config of `param`, or of its sub-property `prop`.
    ///
    /// A known parameter without config yields an empty object.
    ///
    /// # Errors
    /// `UnknownParameter` if `param` is not defined, `UnknownFieldConfig` if
    /// `prop` is given and not declared on `param`.
    pub fn field_config(&self, param: &str, prop: Option<&str>) -> Result<Value, MappingsError> {
        let def = self
            .get(param)
            .ok_or_else(|| MappingsError::UnknownParameter {
                param: param.to_string(),
            })?;

        match prop {
            None => Ok(def.config_or_empty()),
            Some(prop) => def
                .props
                .as_ref()
                .and_then(|props| props.get(prop))
                .map(ParameterDefinition::config_or_empty)
                .ok_or_else(|| MappingsError::UnknownFieldConfig {
                    param: param.to_string(),
                    prop: prop.to_string(),
                }),
        }
    }
}

impl Default for ParameterDefinitions {
    fn default() -> Self {
        let toggle = |default_value: bool| json!({ "type": "toggle", "default_value": default_value });
        let number = |default_value: Value| json!({ "type": "number", "default_value": default_value });

        Self::empty()
            .with_parameter(
                "name",
                ParameterDefinition::new(json!({ "label": "Field name", "default_value": "" })),
            )
            .with_parameter(
                "type",
                ParameterDefinition::new(json!({ "label": "Field type", "default_value": "text" })),
            )
            .with_parameter("store", ParameterDefinition::new(toggle(false)))
            .with_parameter("index", ParameterDefinition::new(toggle(true)))
            .with_parameter("doc_values", ParameterDefinition::new(toggle(true)))
            .with_parameter("norms", ParameterDefinition::new(toggle(true)))
            .with_parameter("coerce", ParameterDefinition::new(toggle(true)))
            .with_parameter("eager_global_ordinals", ParameterDefinition::new(toggle(false)))
            .with_parameter("fielddata", ParameterDefinition::new(toggle(false)))
            .with_parameter(
                "fielddata_frequency_filter",
                ParameterDefinition::new(json!({
                    "default_value": { "min": 0.01, "max": 1, "min_segment_size": 50 }
                }))
                .with_prop("min", ParameterDefinition::new(number(json!(0.01))))
                .with_prop("max", ParameterDefinition::new(number(json!(1))))
                .with_prop("min_segment_size", ParameterDefinition::new(number(json!(50)))),
            )
            .with_parameter("boost", ParameterDefinition::new(number(json!(1.0))))
            .with_parameter("ignore_above", ParameterDefinition::new(number(json!(256))))
            .with_parameter("scaling_factor", ParameterDefinition::new(number(json!(100))))
            .with_parameter("null_value", ParameterDefinition::new(json!({ "default_value": "" })))
            .with_parameter(
                "analyzer",
                ParameterDefinition::new(json!({ "label": "Analyzer", "default_value": "index_default" })),
            )
            .with_parameter("copy_to", ParameterDefinition::default())
            .with_parameter(
                "index_options",
                ParameterDefinition::new(json!({ "type": "select", "default_value": "positions" })),
            )
            .with_parameter(
                "dynamic",
                ParameterDefinition::new(json!({ "type": "toggle", "default_value": true }))
                    .with_prop("enabled", ParameterDefinition::new(toggle(true)))
                    .with_prop("strict", ParameterDefinition::new(toggle(false))),
            )
            .with_parameter("enabled", ParameterDefinition::new(toggle(true)))
            .with_parameter(
                "format",
                ParameterDefinition::new(json!({ "type": "combo_box", "default_value": [] })),
            )
    }
}
