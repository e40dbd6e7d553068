//! mappings-core - normalization engine for index mapping definitions.
//!
//! This crate converts a nested mappings tree into a flat, id-addressable
//! table and back, and keeps derived metadata consistent under edits:
//! - `FieldId` / `IdGenerator` - opaque row identifiers
//! - `FieldClassifier` - which container (`properties` / `fields`) a type uses
//! - `TypeHierarchy` - subtype to main type resolution
//! - `Normalizer` / `denormalize` - tree <-> table
//! - `update_paths_after_rename` - dotted path maintenance
//! - `all_child_fields` - transitive descendants
//! - `build_field_tree` - renderable outline
//! - `EditorState::validity` - tri-state validity aggregation
//!
//! # Architecture
//!
//! ```text
//! Fields (nested)
//! └── myObject { type: object }
//!     └── properties
//!         └── name { type: text }
//!             └── fields
//!                 └── raw { type: keyword }
//!
//!        normalize ──►
//!
//! NormalizedFields
//! ├── root_level_fields: [field-0]
//! ├── max_nested_depth: 1
//! └── by_id: { FieldId -> NormalizedField }
//!     ├── field-0  path "myObject"          depth 0  child_fields [field-1]
//!     ├── field-1  path "myObject.name"     depth 1  child_fields [field-2]
//!     └── field-2  path "myObject.name.raw" depth 1  multi-field
//! ```
//!
//! # Example
//!
//! ```
//! use mappings_core::{denormalize, FieldClassifier, Fields, Normalizer, SequentialIdGenerator};
//! use mappings_core::TypeDefinitions;
//!
//! let fields: Fields = serde_json::from_str(
//!     r#"{ "myObject": { "type": "object", "properties": { "name": { "type": "text" } } } }"#,
//! )
//! .unwrap();
//!
//! let classifier = FieldClassifier::new(&TypeDefinitions::default());
//! let normalized = Normalizer::new(&classifier).normalize(&fields, &mut SequentialIdGenerator::new());
//!
//! assert_eq!(normalized.by_id.len(), 2);
//! assert_eq!(normalized.max_nested_depth, 1);
//! assert_eq!(denormalize(&normalized), fields);
//! ```

mod classify;
mod config;
mod denormalize;
mod descendants;
pub mod edit;
mod error;
mod field;
mod id;
mod normalize;
mod parameters;
mod paths;
mod tree;
mod types;
mod validate;
mod validity;

// Re-exports
pub use classify::{ChildFieldsName, FieldClassifier, FieldMeta};
pub use config::{MappingsConfig, DEFAULT_MAX_DEPTH_EDITOR};
pub use denormalize::denormalize;
pub use descendants::all_child_fields;
pub use error::{MappingsError, ParentRef, ValidationError};
pub use field::{Field, FieldSource, Fields};
pub use id::{FieldId, IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use normalize::{ById, NormalizedField, NormalizedFields, Normalizer};
pub use parameters::{ParameterDefinition, ParameterDefinitions};
pub use paths::{update_paths_after_rename, PathUpdate};
pub use tree::{build_field_tree, TreeItem};
pub use types::{TypeDefinition, TypeDefinitions, TypeHierarchy};
pub use validate::{validate, ValidationResult};
pub use validity::{EditorState, SectionState, Validity};
