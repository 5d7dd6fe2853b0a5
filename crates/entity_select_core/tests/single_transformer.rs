use entity_select_core::{
    AccessError, FieldRegistry, MemoryObjectStore, SingleTransformer, Tag, TransformError,
    TransformerConfig, WireEntry,
};

fn seeded_store() -> MemoryObjectStore<Tag> {
    let mut store = MemoryObjectStore::new("tag", "id");
    store.persist("1", Tag::with_id(1, "rust"));
    store.persist("2", Tag::with_id(2, "sqlite"));
    store
}

fn transformer(
    store: &MemoryObjectStore<Tag>,
) -> SingleTransformer<Tag, &MemoryObjectStore<Tag>, FieldRegistry<Tag>> {
    SingleTransformer::new(
        Tag::entity_class(),
        TransformerConfig::with_text_field("name"),
        store,
        Tag::field_registry(),
    )
    .unwrap()
}

#[test]
fn empty_values_map_to_none() {
    let store = seeded_store();
    let transformer = transformer(&store);

    assert_eq!(transformer.to_wire(None).unwrap(), None);
    assert_eq!(transformer.to_wire_entry(None).unwrap(), None);
    assert_eq!(transformer.from_wire(None).unwrap(), None);
    assert_eq!(transformer.from_wire(Some("")).unwrap(), None);
    assert_eq!(transformer.from_wire(Some("   ")).unwrap(), None);
    assert_eq!(store.batch_calls(), 0);
}

#[test]
fn persisted_object_maps_to_primary_key() {
    let store = seeded_store();
    let transformer = transformer(&store);
    let tag = Tag::with_id(2, "sqlite");

    assert_eq!(transformer.to_wire(Some(&tag)).unwrap().as_deref(), Some("2"));
    assert_eq!(
        transformer.to_wire_entry(Some(&tag)).unwrap(),
        Some(WireEntry {
            key: "2".to_string(),
            label: "sqlite".to_string(),
        })
    );
}

#[test]
fn unsaved_object_maps_to_prefixed_label() {
    let store = seeded_store();
    let transformer = transformer(&store);
    let tag = Tag::new("foo");

    assert_eq!(
        transformer.to_wire(Some(&tag)).unwrap().as_deref(),
        Some("__foo")
    );
    let entry = transformer.to_wire_entry(Some(&tag)).unwrap().unwrap();
    assert_eq!(entry.key, "__foo");
    assert_eq!(entry.label, "foo (NEW)");
}

#[test]
fn tag_key_builds_new_object_without_store_lookup() {
    let store = seeded_store();
    let transformer = transformer(&store);

    let tag = transformer.from_wire(Some("__bar")).unwrap();
    assert_eq!(tag, Some(Tag::new("bar")));
    assert_eq!(store.batch_calls(), 0);
}

#[test]
fn resolved_key_uses_one_store_call() {
    let store = seeded_store();
    let transformer = transformer(&store);

    let tag = transformer.from_wire(Some("1")).unwrap();
    assert_eq!(tag, Some(Tag::with_id(1, "rust")));
    assert_eq!(store.batch_calls(), 1);
}

#[test]
fn unknown_key_fails_with_offending_key() {
    let store = seeded_store();
    let transformer = transformer(&store);

    let err = transformer.from_wire(Some("99")).unwrap_err();
    assert!(err.to_string().contains("`99`"), "unexpected error: {err}");
    match err {
        TransformError::TransformationFailed { keys, .. } => {
            assert_eq!(keys, vec!["99".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ambiguous_key_fails() {
    let mut store = seeded_store();
    store.persist("1", Tag::with_id(1, "rustlang"));
    let transformer = transformer(&store);

    let err = transformer.from_wire(Some("1")).unwrap_err();
    assert!(err.to_string().contains("not unique"));
}

#[test]
fn persisted_object_without_primary_key_is_an_accessor_failure() {
    let mut store = seeded_store();
    store.persist("ghost", Tag::new("ghost"));
    let transformer = transformer(&store);

    let err = transformer.to_wire(Some(&Tag::new("ghost"))).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Access(AccessError::EmptyValue(ref field)) if field == "id"
    ));
}

#[test]
fn display_label_is_used_without_text_field() {
    let store = seeded_store();
    let transformer = SingleTransformer::new(
        Tag::entity_class(),
        TransformerConfig::default(),
        &store,
        Tag::field_registry(),
    )
    .unwrap();

    let entry = transformer
        .to_wire_entry(Some(&Tag::new("plain")))
        .unwrap()
        .unwrap();
    assert_eq!(entry.key, "__plain");
    assert_eq!(entry.label, "plain (NEW)");

    let err = transformer.from_wire(Some("__plain")).unwrap_err();
    assert!(matches!(err, TransformError::MissingTextField { .. }));
}
