//! End-to-end scenarios over the public API: normalize a mappings
//! definition, edit it the way the editor does, and read it back.

use mappings_core::edit::{change_field_type, remove_field, rename_field};
use mappings_core::{
    all_child_fields, build_field_tree, denormalize, validate, Fields, MappingsConfig,
    NormalizedFields, Normalizer, SequentialIdGenerator, TreeItem,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn normalize(config: &MappingsConfig, fields: &Fields) -> NormalizedFields {
    let classifier = config.classifier();
    Normalizer::new(&classifier).normalize(fields, &mut SequentialIdGenerator::new())
}

fn parse(value: serde_json::Value) -> Fields {
    serde_json::from_value(value).unwrap()
}

#[test]
fn object_with_text_child_normalizes_to_two_rows() {
    let config = MappingsConfig::default();
    let fields = parse(json!({
        "myObject": { "type": "object", "properties": { "name": { "type": "text" } } }
    }));

    let normalized = normalize(&config, &fields);
    assert_eq!(normalized.len(), 2);

    let object = normalized.find_by_path("myObject").unwrap();
    assert_eq!(object.nested_depth, 0);
    assert!(object.meta.can_have_child_fields);
    assert_eq!(object.meta.children().len(), 1);

    let name = normalized.find_by_path("myObject.name").unwrap();
    assert_eq!(name.nested_depth, 1);
    assert_eq!(name.parent_id.as_ref(), Some(&object.id));
}

#[test]
fn renaming_object_updates_child_path() {
    let config = MappingsConfig::default();
    let fields = parse(json!({
        "myObject": { "type": "object", "properties": { "name": { "type": "text" } } }
    }));
    let before = normalize(&config, &fields);
    let object_id = before.find_by_path("myObject").unwrap().id.clone();
    let name_before = before.find_by_path("myObject.name").unwrap().clone();

    let after = rename_field(&before, &object_id, "obj").unwrap();

    let name_after = after.find_by_path("obj.name").unwrap();
    assert_eq!(name_after.id, name_before.id);
    assert_eq!(name_after.parent_id, name_before.parent_id);
    assert_eq!(
        denormalize(&after),
        parse(json!({
            "obj": { "type": "object", "properties": { "name": { "type": "text" } } }
        }))
    );
}

#[test]
fn type_change_delete_policy() {
    let classifier = MappingsConfig::default().classifier();
    assert!(classifier.should_delete_child_fields_after_type_change(Some("text"), Some("object")));
    assert!(!classifier.should_delete_child_fields_after_type_change(Some("text"), Some("keyword")));
}

#[test]
fn editor_depth_ceiling() {
    let config = MappingsConfig::default();
    let ceiling = config.max_depth_default_editor;
    assert!(config.can_use_mappings_editor(ceiling - 1));
    assert!(!config.can_use_mappings_editor(ceiling));
    assert!(!config.can_use_mappings_editor(ceiling + 1));
}

#[test]
fn deep_tree_exceeds_editor_ceiling() {
    let config = MappingsConfig::from_yaml_str("max_depth_default_editor: 2").unwrap();
    let fields = parse(json!({
        "a": { "properties": { "b": { "properties": { "c": { "type": "long" } } } } }
    }));

    let normalized = normalize(&config, &fields);
    assert_eq!(normalized.max_nested_depth, 2);
    assert!(!config.can_use_mappings_editor(normalized.max_nested_depth));
}

#[test]
fn editing_session() {
    let config = MappingsConfig::default();
    let fields = parse(json!({
        "title": {
            "type": "text",
            "fields": { "raw": { "type": "keyword" } }
        },
        "author": {
            "type": "object",
            "properties": {
                "name": { "type": "text", "fields": { "raw": { "type": "keyword" } } },
                "email": { "type": "keyword" }
            }
        }
    }));
    let classifier = config.classifier();
    let table = normalize(&config, &fields);

    // title: text -> keyword keeps the multi-field
    let title_id = table.find_by_path("title").unwrap().id.clone();
    let table = change_field_type(&table, &classifier, &title_id, Some("keyword")).unwrap();
    assert!(table.find_by_path("title.raw").is_some());

    // author.name: text -> object drops the multi-field
    let name_id = table.find_by_path("author.name").unwrap().id.clone();
    let table = change_field_type(&table, &classifier, &name_id, Some("object")).unwrap();
    assert!(table.find_by_path("author.name.raw").is_none());

    // author -> writer
    let author_id = table.find_by_path("author").unwrap().id.clone();
    let table = rename_field(&table, &author_id, "writer").unwrap();

    // drop writer.email
    let email_id = table.find_by_path("writer.email").unwrap().id.clone();
    let table = remove_field(&table, &email_id).unwrap();

    let result = validate(&table);
    assert!(result.is_valid(), "Errors: {:?}", result.errors);

    let writer = table.find_by_path("writer").unwrap();
    let descendants: Vec<&str> = all_child_fields(writer, &table.by_id)
        .iter()
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(descendants, vec!["writer.name"]);

    assert_eq!(
        serde_json::to_value(denormalize(&table)).unwrap(),
        json!({
            "title": { "type": "keyword", "fields": { "raw": { "type": "keyword" } } },
            "writer": { "type": "object", "properties": { "name": { "type": "object" } } }
        })
    );

    let types = &config.types;
    let tree = build_field_tree(&table.root_level_fields, &table.by_id, |field| {
        let data_type = field.source.data_type.as_deref().unwrap_or("object");
        format!("{} [{}]", field.name(), types.label_for(data_type))
    });
    assert_eq!(
        tree,
        vec![
            TreeItem {
                label: "title [Keyword]".to_string(),
                children: Some(vec![TreeItem {
                    label: "raw [Keyword]".to_string(),
                    children: None,
                }]),
            },
            TreeItem {
                label: "writer [Object]".to_string(),
                children: Some(vec![TreeItem {
                    label: "name [Object]".to_string(),
                    children: None,
                }]),
            },
        ]
    );
}

#[test]
fn normalized_table_serializes_and_reads_back() {
    let config = MappingsConfig::default();
    let fields = parse(json!({
        "tags": { "type": "keyword", "fields": { "text": { "type": "text" } } }
    }));
    let normalized = normalize(&config, &fields);

    let json = serde_json::to_string(&normalized).unwrap();
    let parsed: NormalizedFields = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, normalized);
    assert_eq!(denormalize(&parsed), fields);
}

#[test]
fn rename_onto_existing_sibling_keeps_both_fields() {
    let config = MappingsConfig::default();
    let fields = parse(json!({
        "a": { "type": "object", "properties": { "x": { "type": "long" } } },
        "b": { "type": "keyword" }
    }));
    let table = normalize(&config, &fields);
    let b_id = table.find_by_path("b").unwrap().id.clone();

    let err = rename_field(&table, &b_id, "a").unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_FIELD_NAME");
    assert_eq!(denormalize(&table), fields);

    // a table already carrying the clash is rejected by validation
    let mut clashing = table.clone();
    let b = clashing.by_id.get_mut(&b_id).unwrap();
    b.source.name = "a".to_string();
    b.path = "a".to_string();
    let result = validate(&clashing);
    assert!(!result.is_valid());
    assert!(result
        .errors
        .iter()
        .any(|e| e.code() == "DUPLICATE_SIBLING_NAME"));
}
