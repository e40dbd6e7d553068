//! Validity aggregation across independently validated editor sections.

use serde::{Deserialize, Serialize};

/// Tri-state validity of one section or of the whole editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    Valid,
    Invalid,
    /// Not determined yet (e.g. async validation still running).
    Pending,
}

impl Validity {
    /// Combine two states: `Pending` wins, otherwise logical AND.
    pub fn and(self, other: Validity) -> Validity {
        match (self, other) {
            (Self::Pending, _) | (_, Self::Pending) => Self::Pending,
            (Self::Valid, Self::Valid) => Self::Valid,
            _ => Self::Invalid,
        }
    }

    /// `Some(bool)` when determined, `None` when pending.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Valid => Some(true),
            Self::Invalid => Some(false),
            Self::Pending => None,
        }
    }
}

impl From<Option<bool>> for Validity {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Valid,
            Some(false) => Self::Invalid,
            None => Self::Pending,
        }
    }
}

/// Validity reported by one editor section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionState {
    pub is_valid: Validity,
}

impl SectionState {
    pub fn new(is_valid: Validity) -> Self {
        Self { is_valid }
    }
}

/// Validity snapshot of every editor section. Absent sections have not
/// reported yet and are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    #[serde(default)]
    pub configuration: Option<SectionState>,
    #[serde(default)]
    pub fields_json_editor: Option<SectionState>,
    #[serde(default)]
    pub field_form: Option<SectionState>,
    /// Tracked but not part of the overall result.
    #[serde(default)]
    pub templates: Option<SectionState>,
    /// Tracked but not part of the overall result.
    #[serde(default)]
    pub document_fields: Option<SectionState>,
}

impl EditorState {
    /// Overall validity of `configuration`, `fields_json_editor` and
    /// `field_form`.
    pub fn validity(&self) -> Validity {
        [self.configuration, self.fields_json_editor, self.field_form]
            .into_iter()
            .flatten()
            .fold(Validity::Valid, |acc, section| acc.and(section.is_valid))
    }
}
