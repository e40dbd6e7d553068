//! Path maintenance after a field rename.
//!
//! A row's `path` must always equal the dot-join of the names along its
//! parent chain. A rename therefore rewrites the renamed row and every
//! descendant in one pass.

use crate::id::FieldId;
use crate::normalize::{ById, NormalizedField, NormalizedFields};
use tracing::debug;

/// Result of a path update.
#[derive(Debug, Clone, PartialEq)]
pub struct PathUpdate {
    /// New path of the renamed field.
    pub path: String,
    /// Copy of the table rows with every affected path replaced.
    pub by_id: ById,
}

/// Recompute paths for `field` (already carrying its new name) and all its
/// descendants.
///
/// The input table is left untouched; the caller decides whether the
/// returned rows become current. `field` replaces the stored row of the same
/// id in the result. A `field` whose id is not in the table leaves the rows
/// unchanged; `path` is then the one it would have had.
pub fn update_paths_after_rename(
    normalized: &NormalizedFields,
    field: &NormalizedField,
) -> PathUpdate {
    let mut by_id = normalized.by_id.clone();
    let chain = ancestor_names(&normalized.by_id, field.parent_id.as_ref());

    if !by_id.contains_key(&field.id) {
        debug!(field_id = %field.id, "rename target not in table, paths unchanged");
        return PathUpdate {
            path: join_path(&chain, field.name()),
            by_id,
        };
    }

    update_field_path(field, &chain, &normalized.by_id, &mut by_id);

    let path = by_id
        .get(&field.id)
        .map(|updated| updated.path.clone())
        .unwrap_or_default();

    debug!(field_id = %field.id, path = %path, "updated field paths after rename");

    PathUpdate { path, by_id }
}

/// Names from the root down to `parent_id` (inclusive).
pub(crate) fn ancestor_names<'a>(by_id: &'a ById, parent_id: Option<&FieldId>) -> Vec<&'a str> {
    let mut names = Vec::new();
    let mut current = parent_id.and_then(|id| by_id.get(id));

    while let Some(ancestor) = current {
        names.push(ancestor.name());
        current = ancestor.parent_id.as_ref().and_then(|id| by_id.get(id));
    }

    names.reverse();
    names
}

/// Join a chain of names and a final name into a dotted path.
pub(crate) fn join_path(chain: &[&str], name: &str) -> String {
    if chain.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", chain.join("."), name)
    }
}

fn update_field_path(field: &NormalizedField, chain: &[&str], source: &ById, target: &mut ById) {
    let mut updated = field.clone();
    updated.path = join_path(chain, field.name());

    if field.meta.has_children() {
        let mut child_chain = chain.to_vec();
        child_chain.push(field.name());

        for child in field.meta.children().iter().filter_map(|id| source.get(id)) {
            update_field_path(child, &child_chain, source, target);
        }
    }

    target.insert(updated.id.clone(), updated);
}
