//! Structural edits over a normalized table.
//!
//! Every edit takes the current table by reference and returns the next one;
//! the caller decides what becomes current.

use crate::classify::FieldClassifier;
use crate::descendants::all_child_fields;
use crate::error::{MappingsError, ParentRef};
use crate::id::FieldId;
use crate::normalize::{NormalizedField, NormalizedFields};
use crate::paths::update_paths_after_rename;
use tracing::{debug, info};

fn lookup<'a>(
    fields: &'a NormalizedFields,
    id: &FieldId,
) -> Result<&'a NormalizedField, MappingsError> {
    fields
        .get(id)
        .ok_or_else(|| MappingsError::FieldNotFound { id: id.clone() })
}

/// Ids listed next to `field`: its parent's children, or the root level.
fn siblings<'a>(fields: &'a NormalizedFields, field: &NormalizedField) -> &'a [FieldId] {
    match &field.parent_id {
        Some(parent_id) => fields
            .get(parent_id)
            .map(|parent| parent.meta.children())
            .unwrap_or_default(),
        None => &fields.root_level_fields,
    }
}

/// Rename a field and rewrite the paths of the field and its descendants.
///
/// Fails with [`MappingsError::DuplicateFieldName`] when a sibling already
/// uses `new_name`.
pub fn rename_field(
    fields: &NormalizedFields,
    id: &FieldId,
    new_name: impl Into<String>,
) -> Result<NormalizedFields, MappingsError> {
    let current = lookup(fields, id)?;
    let new_name = new_name.into();

    let clash = siblings(fields, current)
        .iter()
        .filter(|sibling| *sibling != id)
        .filter_map(|sibling| fields.get(sibling))
        .any(|sibling| sibling.name() == new_name);
    if clash {
        return Err(MappingsError::DuplicateFieldName {
            name: new_name,
            parent: ParentRef(current.parent_id.clone()),
        });
    }

    let mut field = current.clone();
    let old_path = field.path.clone();
    field.source.name = new_name;

    let update = update_paths_after_rename(fields, &field);
    info!(field_id = %id, from = %old_path, to = %update.path, "renamed field");

    Ok(NormalizedFields {
        by_id: update.by_id,
        root_level_fields: fields.root_level_fields.clone(),
        max_nested_depth: fields.max_nested_depth,
    })
}

/// Remove a field together with all its descendants.
///
/// The parent (if any) loses the child id; when its list becomes empty the
/// parent no longer has children and is collapsed. `max_nested_depth` is
/// recomputed from the remaining rows.
pub fn remove_field(
    fields: &NormalizedFields,
    id: &FieldId,
) -> Result<NormalizedFields, MappingsError> {
    let field = lookup(fields, id)?;

    let mut removed: Vec<FieldId> = all_child_fields(field, &fields.by_id)
        .into_iter()
        .map(|child| child.id.clone())
        .collect();
    removed.push(id.clone());

    let mut next = fields.clone();
    for removed_id in &removed {
        next.by_id.remove(removed_id);
    }

    match &field.parent_id {
        Some(parent_id) => {
            if let Some(parent) = next.by_id.get_mut(parent_id) {
                detach_child(parent, id);
            }
        }
        None => next.root_level_fields.retain(|root| root != id),
    }

    next.max_nested_depth = next.compute_max_nested_depth();
    info!(field_id = %id, path = %field.path, removed = removed.len(), "removed field");

    Ok(next)
}

fn detach_child(parent: &mut NormalizedField, child_id: &FieldId) {
    let remaining: Vec<FieldId> = parent
        .meta
        .children()
        .iter()
        .filter(|id| *id != child_id)
        .cloned()
        .collect();

    let has_children = !remaining.is_empty();
    parent.meta.has_child_fields = parent.meta.can_have_child_fields && has_children;
    parent.meta.has_multi_fields = parent.meta.can_have_multi_fields && has_children;
    parent.meta.is_expanded = parent.meta.is_expanded && has_children;
    parent.meta.child_fields = has_children.then_some(remaining);
}

/// Change a field's declared type.
///
/// When the old and new types use different child containers, the field's
/// descendants are removed first. The row is then re-classified for the new
/// type, keeping its position and any surviving children.
pub fn change_field_type(
    fields: &NormalizedFields,
    classifier: &FieldClassifier,
    id: &FieldId,
    new_type: Option<&str>,
) -> Result<NormalizedFields, MappingsError> {
    let field = lookup(fields, id)?;
    let old_type = field.source.data_type.clone();

    let delete_children = field.meta.has_children()
        && classifier
            .should_delete_child_fields_after_type_change(old_type.as_deref(), new_type);

    let mut next = fields.clone();
    if delete_children {
        for child in all_child_fields(field, &fields.by_id) {
            next.by_id.remove(&child.id);
        }
        next.max_nested_depth = next.compute_max_nested_depth();
    }

    let row = next
        .by_id
        .get_mut(id)
        .ok_or_else(|| MappingsError::FieldNotFound { id: id.clone() })?;

    row.source.data_type = new_type.map(str::to_string);

    let kept_children = if delete_children {
        None
    } else {
        row.meta.child_fields.take()
    };
    let mut meta = classifier.field_meta(&row.source.to_field(), row.is_multi_field);
    let has_children = kept_children.as_ref().is_some_and(|c| !c.is_empty());
    meta.has_child_fields = meta.can_have_child_fields && has_children;
    meta.has_multi_fields = meta.can_have_multi_fields && has_children;
    meta.is_expanded = row.meta.is_expanded && has_children;
    meta.child_fields = kept_children;
    row.meta = meta;

    debug!(
        field_id = %id,
        from = ?old_type,
        to = ?new_type,
        deleted_children = delete_children,
        "changed field type"
    );

    Ok(next)
}
