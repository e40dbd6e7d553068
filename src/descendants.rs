//! Descendant collection.

use crate::normalize::{ById, NormalizedField};

/// All transitive children of `field` (children, grandchildren, ...) in
/// pre-order. Empty when the field has no children or multi-fields.
pub fn all_child_fields<'a>(field: &NormalizedField, by_id: &'a ById) -> Vec<&'a NormalizedField> {
    let mut collected = Vec::new();
    collect(field, by_id, &mut collected);
    collected
}

fn collect<'a>(field: &NormalizedField, by_id: &'a ById, to: &mut Vec<&'a NormalizedField>) {
    if !field.meta.has_children() {
        return;
    }
    for child in field.meta.children().iter().filter_map(|id| by_id.get(id)) {
        to.push(child);
        collect(child, by_id, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FieldClassifier;
    use crate::field::{Field, Fields};
    use crate::id::SequentialIdGenerator;
    use crate::normalize::{NormalizedFields, Normalizer};
    use crate::types::TypeDefinitions;

    fn normalized() -> NormalizedFields {
        let mut fields = Fields::new();
        fields.insert(
            "a".to_string(),
            Field::new("object")
                .with_property(
                    "b",
                    Field::new("object").with_property("c", Field::new("long")),
                )
                .with_property(
                    "d",
                    Field::new("text").with_multi_field("e", Field::new("keyword")),
                ),
        );
        fields.insert("f".to_string(), Field::new("boolean"));

        let classifier = FieldClassifier::new(&TypeDefinitions::default());
        Normalizer::new(&classifier).normalize(&fields, &mut SequentialIdGenerator::new())
    }

    fn paths(fields: Vec<&NormalizedField>) -> Vec<&str> {
        fields.into_iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_pre_order_descendants() {
        let table = normalized();
        let root = table.find_by_path("a").unwrap();
        assert_eq!(
            paths(all_child_fields(root, &table.by_id)),
            vec!["a.b", "a.b.c", "a.d", "a.d.e"]
        );
    }

    #[test]
    fn test_multi_fields_are_descendants() {
        let table = normalized();
        let text = table.find_by_path("a.d").unwrap();
        assert_eq!(paths(all_child_fields(text, &table.by_id)), vec!["a.d.e"]);
    }

    #[test]
    fn test_leaf_has_no_descendants() {
        let table = normalized();
        let leaf = table.find_by_path("f").unwrap();
        assert!(all_child_fields(leaf, &table.by_id).is_empty());
    }
}
