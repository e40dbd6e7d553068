//! Field identifiers and the generators that produce them.
//!
//! Ids are opaque: nothing may be derived from their content. Production
//! code uses `UuidIdGenerator`; tests inject `SequentialIdGenerator` to get
//! stable, readable ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a row in a `NormalizedFields` table.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldId({})", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Source of fresh row identifiers.
pub trait IdGenerator {
    /// Return an identifier not returned before by this generator.
    fn next_id(&mut self) -> FieldId;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> FieldId {
        FieldId(Uuid::new_v4().to_string())
    }
}

/// Deterministic `field-0`, `field-1`, ... identifiers.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    /// Start at `field-0`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> FieldId {
        let id = FieldId(format!("field-{}", self.next));
        self.next += 1;
        id
    }
}
