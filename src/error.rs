//! Error types.

use crate::id::FieldId;
use thiserror::Error;

/// Failures of mapping operations and configuration lookups.
#[derive(Debug, Error)]
pub enum MappingsError {
    /// An edit referenced a field that is not in the table.
    #[error("Field not found: '{id}'")]
    FieldNotFound {
        /// Requested field id.
        id: FieldId,
    },

    /// No parameter definition exists under this name.
    #[error("Unknown parameter: '{param}'")]
    UnknownParameter {
        /// Parameter name.
        param: String,
    },

    /// The parameter exists but does not declare this prop.
    #[error("No field config found for prop '{prop}' on param '{param}'")]
    UnknownFieldConfig {
        /// Parameter name.
        param: String,
        /// Prop name.
        prop: String,
    },

    /// A sibling under the same parent already uses this name.
    #[error("Field name '{name}' already exists under {parent}")]
    DuplicateFieldName {
        /// Conflicting name.
        name: String,
        /// Parent whose children would clash.
        parent: ParentRef,
    },

    /// The YAML configuration could not be parsed.
    #[error("Invalid mappings configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl MappingsError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FieldNotFound { .. } => "FIELD_NOT_FOUND",
            Self::UnknownParameter { .. } => "UNKNOWN_PARAMETER",
            Self::UnknownFieldConfig { .. } => "UNKNOWN_FIELD_CONFIG",
            Self::DuplicateFieldName { .. } => "DUPLICATE_FIELD_NAME",
            Self::Config(_) => "INVALID_CONFIG",
        }
    }
}

/// Structural invariant violations found in a `NormalizedFields` table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A `child_fields`, `parent_id` or root entry points at a missing row.
    #[error("Dangling reference: {source_field} -> {target} (target not found in by_id)")]
    DanglingRef {
        /// Row holding the reference, `None` for the root list.
        source_field: ParentRef,
        /// Missing target.
        target: FieldId,
    },

    /// Map key and the row's own id differ.
    #[error("Field ID mismatch: map key '{key}' != field.id '{field_id}'")]
    IdMismatch {
        /// Map key.
        key: FieldId,
        /// Row's id field.
        field_id: FieldId,
    },

    /// A child's `parent_id` does not name the row listing it.
    #[error("Parent mismatch: '{child}' is listed under {listed_under} but has parent {parent_id}")]
    ParentMismatch {
        /// Child row.
        child: FieldId,
        /// Row whose `child_fields` contains the child (`None` = root list).
        listed_under: ParentRef,
        /// The child's own `parent_id`.
        parent_id: ParentRef,
    },

    /// A row is reachable from more than one place.
    #[error("Duplicate membership: '{id}' is listed more than once")]
    DuplicateMembership {
        /// Offending row.
        id: FieldId,
    },

    /// Two children of the same parent share a name, so they share a path.
    #[error("Duplicate sibling name: '{name}' is used by {} under {parent}", format_ids(ids))]
    DuplicateSiblingName {
        /// Parent listing the children.
        parent: ParentRef,
        /// Shared name.
        name: String,
        /// Rows carrying the name.
        ids: Vec<FieldId>,
    },

    /// A row is not reachable from `root_level_fields`.
    #[error("Unreachable field: '{id}' is not reachable from the root level")]
    Unreachable {
        /// Offending row.
        id: FieldId,
    },

    /// `child_fields` links form a cycle.
    #[error("Cycle detected in field table: {}", format_cycle(path))]
    CycleDetected {
        /// Rows forming the cycle.
        path: Vec<FieldId>,
    },

    /// Stored path differs from the one derived from the parent chain.
    #[error("Path mismatch: '{id}' has path '{actual}', expected '{expected}'")]
    PathMismatch {
        /// Offending row.
        id: FieldId,
        /// Path derived from names.
        expected: String,
        /// Stored path.
        actual: String,
    },

    /// Stored depth differs from the one derived from the parent chain.
    #[error("Depth mismatch: '{id}' has nested_depth {actual}, expected {expected}")]
    DepthMismatch {
        /// Offending row.
        id: FieldId,
        /// Derived depth.
        expected: usize,
        /// Stored depth.
        actual: usize,
    },
}

impl ValidationError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DanglingRef { .. } => "DANGLING_REF",
            Self::IdMismatch { .. } => "ID_MISMATCH",
            Self::ParentMismatch { .. } => "PARENT_MISMATCH",
            Self::DuplicateMembership { .. } => "DUPLICATE_MEMBERSHIP",
            Self::DuplicateSiblingName { .. } => "DUPLICATE_SIBLING_NAME",
            Self::Unreachable { .. } => "UNREACHABLE",
            Self::CycleDetected { .. } => "CYCLE_DETECTED",
            Self::PathMismatch { .. } => "PATH_MISMATCH",
            Self::DepthMismatch { .. } => "DEPTH_MISMATCH",
        }
    }

    /// Check if this is a blocking error (vs warning). Orphaned rows are
    /// ignored by every walk, so they only warn.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::Unreachable { .. })
    }
}

/// Parent side of a link: a row id, or `None` for the root level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef(pub Option<FieldId>);

impl std::fmt::Display for ParentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(id) => write!(f, "'{}'", id),
            None => f.write_str("<root>"),
        }
    }
}

fn format_cycle(path: &[FieldId]) -> String {
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_ids(ids: &[FieldId]) -> String {
    ids.iter()
        .map(|id| format!("'{}'", id))
        .collect::<Vec<_>>()
        .join(", ")
}
