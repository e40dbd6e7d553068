//! Normalizer - flattens a nested `Fields` tree into a `NormalizedFields` table.
//!
//! Depth-first, pre-order, one pass. For every field:
//! 1. generate an id and classify the field
//! 2. recurse into its container (if it has children)
//! 3. store the row with the containers stripped from `source`
//!
//! Depth grows by one when entering `properties`; multi-fields stay at the
//! depth of the field that owns them.

use crate::classify::{FieldClassifier, FieldMeta};
use crate::field::{FieldSource, Fields};
use crate::id::{FieldId, IdGenerator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Row lookup keyed by id.
pub type ById = BTreeMap<FieldId, NormalizedField>;

/// One row of the flat table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedField {
    pub id: FieldId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FieldId>,
    pub nested_depth: usize,
    pub is_multi_field: bool,
    /// Dot-joined names from the root down to this field.
    pub path: String,
    pub source: FieldSource,
    #[serde(flatten)]
    pub meta: FieldMeta,
}

impl NormalizedField {
    /// Field name (last path segment).
    pub fn name(&self) -> &str {
        &self.source.name
    }
}

/// The flat table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFields {
    pub by_id: ById,
    /// Ids of fields without parent, in declaration order.
    pub root_level_fields: Vec<FieldId>,
    pub max_nested_depth: usize,
}

impl NormalizedFields {
    /// Look up a row.
    pub fn get(&self, id: &FieldId) -> Option<&NormalizedField> {
        self.by_id.get(id)
    }

    /// Find a row by its dotted path.
    pub fn find_by_path(&self, path: &str) -> Option<&NormalizedField> {
        self.by_id.values().find(|field| field.path == path)
    }

    /// Highest `nested_depth` of any row, 0 for an empty table.
    pub fn compute_max_nested_depth(&self) -> usize {
        self.by_id
            .values()
            .map(|field| field.nested_depth)
            .max()
            .unwrap_or(0)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Flattens nested fields using a classifier.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    classifier: &'a FieldClassifier,
}

/// Position of the level being walked.
struct Level<'p> {
    parent_id: Option<&'p FieldId>,
    path: &'p [&'p str],
    nested_depth: usize,
    is_multi_field: bool,
}

impl<'a> Normalizer<'a> {
    pub fn new(classifier: &'a FieldClassifier) -> Self {
        Self { classifier }
    }

    /// Normalize a root-level field container.
    pub fn normalize<G: IdGenerator>(&self, fields: &Fields, ids: &mut G) -> NormalizedFields {
        let mut by_id = ById::new();
        let mut max_nested_depth = 0;

        let root = Level {
            parent_id: None,
            path: &[],
            nested_depth: 0,
            is_multi_field: false,
        };
        let root_level_fields =
            self.normalize_level(fields, &root, ids, &mut by_id, &mut max_nested_depth);

        let normalized = NormalizedFields {
            by_id,
            root_level_fields,
            max_nested_depth,
        };

        debug!(
            fields = normalized.len(),
            root_level = normalized.root_level_fields.len(),
            max_nested_depth = normalized.max_nested_depth,
            "normalized mappings fields"
        );
        debug_assert!(
            crate::validate::validate(&normalized).is_valid(),
            "normalizer produced an inconsistent table"
        );

        normalized
    }

    /// Normalize one container; returns the ids produced at this level.
    fn normalize_level<G: IdGenerator>(
        &self,
        fields: &Fields,
        level: &Level<'_>,
        ids: &mut G,
        by_id: &mut ById,
        max_nested_depth: &mut usize,
    ) -> Vec<FieldId> {
        let mut level_ids = Vec::with_capacity(fields.len());

        for (name, field) in fields {
            let id = ids.next_id();
            level_ids.push(id.clone());

            *max_nested_depth = (*max_nested_depth).max(level.nested_depth);

            let mut meta = self.classifier.field_meta(field, level.is_multi_field);

            if meta.has_children() {
                if let Some(children) = meta.child_fields_name.and_then(|n| field.container(n)) {
                    let mut child_path = level.path.to_vec();
                    child_path.push(name.as_str());

                    let child_level = Level {
                        parent_id: Some(&id),
                        path: &child_path,
                        nested_depth: if meta.can_have_child_fields {
                            level.nested_depth + 1
                        } else {
                            level.nested_depth
                        },
                        is_multi_field: meta.can_have_multi_fields,
                    };

                    meta.child_fields = Some(self.normalize_level(
                        children,
                        &child_level,
                        ids,
                        by_id,
                        max_nested_depth,
                    ));
                }
            }

            let path = if level.path.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", level.path.join("."), name)
            };

            by_id.insert(
                id.clone(),
                NormalizedField {
                    id,
                    parent_id: level.parent_id.cloned(),
                    nested_depth: level.nested_depth,
                    is_multi_field: level.is_multi_field,
                    path,
                    source: FieldSource::from_field(name.as_str(), field),
                    meta,
                },
            );
        }

        level_ids
    }
}
