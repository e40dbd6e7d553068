//! Validation for normalized field tables.
//!
//! Checks the structural invariants every walk relies on:
//! 1. Map keys match row ids
//! 2. All references resolve (root list, `child_fields`, `parent_id`)
//! 3. Parent links agree with `child_fields` membership
//! 4. Each row is listed exactly once and is reachable from the root level
//! 5. Siblings have distinct names
//! 6. No cycles
//! 7. Stored paths and depths match the ones derived from the parent chain

use crate::classify::ChildFieldsName;
use crate::error::{ParentRef, ValidationError};
use crate::id::FieldId;
use crate::normalize::NormalizedFields;
use crate::paths::join_path;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Result of validating a table.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Blocking errors (walks over the table are not safe).
    pub errors: Vec<ValidationError>,
    /// Non-blocking warnings.
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (no blocking errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error or warning based on severity.
    pub fn add(&mut self, error: ValidationError) {
        if error.is_blocking() {
            self.errors.push(error);
        } else {
            self.warnings.push(error);
        }
    }

    /// Total count of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

/// Validate a normalized table.
pub fn validate(fields: &NormalizedFields) -> ValidationResult {
    let mut result = ValidationResult::new();

    validate_ids(fields, &mut result);
    validate_links(fields, &mut result);
    validate_membership(fields, &mut result);
    validate_sibling_names(fields, &mut result);
    validate_no_cycles(fields, &mut result);
    validate_paths_and_depths(fields, &mut result);

    result
}

fn validate_ids(fields: &NormalizedFields, result: &mut ValidationResult) {
    for (key, field) in &fields.by_id {
        if key != &field.id {
            result.add(ValidationError::IdMismatch {
                key: key.clone(),
                field_id: field.id.clone(),
            });
        }
    }
}

fn validate_links(fields: &NormalizedFields, result: &mut ValidationResult) {
    for id in &fields.root_level_fields {
        match fields.by_id.get(id) {
            None => result.add(ValidationError::DanglingRef {
                source_field: ParentRef(None),
                target: id.clone(),
            }),
            Some(field) if field.parent_id.is_some() => {
                result.add(ValidationError::ParentMismatch {
                    child: id.clone(),
                    listed_under: ParentRef(None),
                    parent_id: ParentRef(field.parent_id.clone()),
                })
            }
            Some(_) => {}
        }
    }

    for (parent_id, parent) in &fields.by_id {
        for child_id in parent.meta.children() {
            match fields.by_id.get(child_id) {
                None => result.add(ValidationError::DanglingRef {
                    source_field: ParentRef(Some(parent_id.clone())),
                    target: child_id.clone(),
                }),
                Some(child) if child.parent_id.as_ref() != Some(parent_id) => {
                    result.add(ValidationError::ParentMismatch {
                        child: child_id.clone(),
                        listed_under: ParentRef(Some(parent_id.clone())),
                        parent_id: ParentRef(child.parent_id.clone()),
                    })
                }
                Some(_) => {}
            }
        }

        if let Some(target) = &parent.parent_id {
            if !fields.by_id.contains_key(target) {
                result.add(ValidationError::DanglingRef {
                    source_field: ParentRef(Some(parent_id.clone())),
                    target: target.clone(),
                });
            }
        }
    }
}

fn validate_membership(fields: &NormalizedFields, result: &mut ValidationResult) {
    let mut listed: HashMap<&FieldId, usize> = HashMap::new();
    let all_lists = std::iter::once(fields.root_level_fields.as_slice())
        .chain(fields.by_id.values().map(|field| field.meta.children()));

    for id in all_lists.flatten() {
        *listed.entry(id).or_default() += 1;
    }

    for id in fields.by_id.keys() {
        match listed.get(id).copied().unwrap_or(0) {
            0 => result.add(ValidationError::Unreachable { id: id.clone() }),
            1 => {}
            _ => result.add(ValidationError::DuplicateMembership { id: id.clone() }),
        }
    }
}

fn validate_sibling_names(fields: &NormalizedFields, result: &mut ValidationResult) {
    let lists = std::iter::once((None, fields.root_level_fields.as_slice())).chain(
        fields
            .by_id
            .iter()
            .map(|(id, field)| (Some(id), field.meta.children())),
    );

    for (parent, children) in lists {
        let mut by_name: BTreeMap<&str, Vec<FieldId>> = BTreeMap::new();
        for child in children.iter().filter_map(|id| fields.by_id.get(id)) {
            by_name.entry(child.name()).or_default().push(child.id.clone());
        }

        for (name, ids) in by_name {
            if ids.len() > 1 {
                result.add(ValidationError::DuplicateSiblingName {
                    parent: ParentRef(parent.cloned()),
                    name: name.to_string(),
                    ids,
                });
            }
        }
    }
}

fn validate_no_cycles(fields: &NormalizedFields, result: &mut ValidationResult) {
    let mut global_visited: HashSet<&FieldId> = HashSet::new();
    let mut starts: Vec<&FieldId> = fields.root_level_fields.iter().collect();
    // rows outside the root walk can still form a cycle among themselves
    starts.extend(fields.by_id.keys());

    for id in starts {
        let mut path: Vec<&FieldId> = Vec::new();
        let mut path_set: HashSet<&FieldId> = HashSet::new();
        detect_cycles_dfs(
            id,
            fields,
            &mut global_visited,
            &mut path,
            &mut path_set,
            result,
        );
    }
}

fn detect_cycles_dfs<'a>(
    id: &'a FieldId,
    fields: &'a NormalizedFields,
    global_visited: &mut HashSet<&'a FieldId>,
    path: &mut Vec<&'a FieldId>,
    path_set: &mut HashSet<&'a FieldId>,
    result: &mut ValidationResult,
) {
    if path_set.contains(id) {
        if let Some(pos) = path.iter().position(|p| *p == id) {
            let cycle = path[pos..].iter().map(|p| (*p).clone()).collect();
            result.add(ValidationError::CycleDetected { path: cycle });
        }
        return;
    }

    if global_visited.contains(id) {
        return;
    }

    path.push(id);
    path_set.insert(id);

    if let Some(field) = fields.by_id.get(id) {
        for child in field.meta.children() {
            detect_cycles_dfs(child, fields, global_visited, path, path_set, result);
        }
    }

    path.pop();
    path_set.remove(id);
    global_visited.insert(id);
}

fn validate_paths_and_depths(fields: &NormalizedFields, result: &mut ValidationResult) {
    let mut visited: HashSet<&FieldId> = HashSet::new();
    // (id, ancestor names, expected depth)
    let mut stack: Vec<(&FieldId, Vec<&str>, usize)> = fields
        .root_level_fields
        .iter()
        .rev()
        .map(|id| (id, Vec::new(), 0))
        .collect();

    while let Some((id, chain, depth)) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(field) = fields.by_id.get(id) else {
            continue;
        };

        let expected_path = join_path(&chain, field.name());
        if field.path != expected_path {
            result.add(ValidationError::PathMismatch {
                id: id.clone(),
                expected: expected_path,
                actual: field.path.clone(),
            });
        }
        if field.nested_depth != depth {
            result.add(ValidationError::DepthMismatch {
                id: id.clone(),
                expected: depth,
                actual: field.nested_depth,
            });
        }

        let child_depth = match field.meta.child_fields_name {
            Some(ChildFieldsName::Properties) => depth + 1,
            _ => depth,
        };
        let mut child_chain = chain;
        child_chain.push(field.name());

        for child in field.meta.children().iter().rev() {
            stack.push((child, child_chain.clone(), child_depth));
        }
    }
}
