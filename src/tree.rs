//! Tree view projection of a normalized table.

use crate::id::FieldId;
use crate::normalize::{ById, NormalizedField};
use serde::Serialize;

/// One entry of a rendered outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem<L> {
    pub label: L,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeItem<L>>>,
}

/// Build an outline for `ids`, recursing into each row's `child_fields`.
///
/// `render` turns a row into its label. Rows with no `child_fields` get
/// `children: None`. Unknown ids are skipped.
pub fn build_field_tree<L, F>(ids: &[FieldId], by_id: &ById, render: F) -> Vec<TreeItem<L>>
where
    F: Fn(&NormalizedField) -> L,
{
    build_level(ids, by_id, &render)
}

fn build_level<L, F>(ids: &[FieldId], by_id: &ById, render: &F) -> Vec<TreeItem<L>>
where
    F: Fn(&NormalizedField) -> L,
{
    ids.iter()
        .filter_map(|id| by_id.get(id))
        .map(|field| TreeItem {
            label: render(field),
            children: field
                .meta
                .child_fields
                .as_ref()
                .map(|child_ids| build_level(child_ids, by_id, render)),
        })
        .collect()
}
