//! Denormalizer - rebuilds the nested `Fields` tree from a flat table.

use crate::classify::ChildFieldsName;
use crate::field::Fields;
use crate::id::FieldId;
use crate::normalize::{ById, NormalizedFields};

/// Rebuild the nested tree, walking `root_level_fields` and then each row's
/// `child_fields` in order.
///
/// Inverse of `Normalizer::normalize` for any table it produced. Ids that do
/// not resolve are skipped; use `validate` to reject such tables up front.
pub fn denormalize(normalized: &NormalizedFields) -> Fields {
    denormalize_level(&normalized.root_level_fields, &normalized.by_id)
}

fn denormalize_level(ids: &[FieldId], by_id: &ById) -> Fields {
    let mut fields = Fields::with_capacity(ids.len());

    for row in ids.iter().filter_map(|id| by_id.get(id)) {
        let mut field = row.source.to_field();

        if let (Some(child_ids), Some(container)) =
            (&row.meta.child_fields, row.meta.child_fields_name)
        {
            let children = denormalize_level(child_ids, by_id);
            match container {
                ChildFieldsName::Properties => field.properties = Some(children),
                ChildFieldsName::Fields => field.fields = Some(children),
            }
        }

        fields.insert(row.source.name.clone(), field);
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FieldClassifier;
    use crate::field::Field;
    use crate::id::{SequentialIdGenerator, UuidIdGenerator};
    use crate::normalize::Normalizer;
    use crate::types::TypeDefinitions;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Fields {
        serde_json::from_value(json!({
            "title": {
                "type": "text",
                "analyzer": "english",
                "fields": {
                    "raw": { "type": "keyword", "ignore_above": 256 },
                    "suggest": { "type": "completion" }
                }
            },
            "author": {
                "type": "object",
                "dynamic": "strict",
                "properties": {
                    "name": { "type": "text", "fields": { "raw": { "type": "keyword" } } },
                    "address": {
                        "properties": {
                            "city": { "type": "keyword" },
                            "geo": { "type": "geo_point" }
                        }
                    }
                }
            },
            "comments": {
                "type": "nested",
                "properties": { "votes": { "type": "long", "index": false } }
            },
            "created": { "type": "date", "format": "strict_date_optional_time" }
        }))
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let classifier = FieldClassifier::new(&TypeDefinitions::default());
        let fields = sample();
        let normalized = Normalizer::new(&classifier).normalize(&fields, &mut UuidIdGenerator);

        let rebuilt = denormalize(&normalized);
        assert_eq!(rebuilt, fields);
        assert_eq!(
            serde_json::to_string(&rebuilt).unwrap(),
            serde_json::to_string(&fields).unwrap()
        );
    }

    #[test]
    fn test_declaration_order_preserved() {
        let classifier = FieldClassifier::new(&TypeDefinitions::default());
        let normalized =
            Normalizer::new(&classifier).normalize(&sample(), &mut SequentialIdGenerator::new());

        let rebuilt = denormalize(&normalized);
        let names: Vec<&str> = rebuilt.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["title", "author", "comments", "created"]);

        let author_children: Vec<&str> = rebuilt["author"]
            .properties
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(author_children, vec!["name", "address"]);
    }

    #[test]
    fn test_empty_table() {
        assert!(denormalize(&NormalizedFields::default()).is_empty());
    }

    #[test]
    fn test_leaf_has_no_containers() {
        let classifier = FieldClassifier::new(&TypeDefinitions::default());
        let mut fields = Fields::new();
        fields.insert("count".to_string(), Field::new("integer"));

        let normalized =
            Normalizer::new(&classifier).normalize(&fields, &mut SequentialIdGenerator::new());
        let rebuilt = denormalize(&normalized);

        assert!(rebuilt["count"].properties.is_none());
        assert!(rebuilt["count"].fields.is_none());
    }
}
