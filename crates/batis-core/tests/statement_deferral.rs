use batis_core::builder::{MapperBuilderAssistant, ResultMapSpec, StatementSpec};
use batis_core::mapping::{ResultMapping, StatementKind};
use batis_core::{Configuration, Resolution, TypeRef};
use pretty_assertions::assert_eq;

fn assistant(config: &Configuration) -> MapperBuilderAssistant<'_> {
    let mut assistant = MapperBuilderAssistant::new(config, "StudentMapper.xml");
    assistant.set_namespace("ns").unwrap();
    assistant
}

fn select(id: &str) -> StatementSpec {
    StatementSpec {
        id: id.to_string(),
        kind: StatementKind::Select,
        ..Default::default()
    }
}

#[test]
fn missing_result_map_defers() {
    let config = Configuration::default();
    let assistant = assistant(&config);

    let spec = StatementSpec {
        result_map: Some("studentMap".into()),
        ..select("getById")
    };

    let Resolution::Deferred(reason) = assistant.add_mapped_statement(spec.clone()).unwrap() else {
        panic!("statement should be deferred");
    };
    assert!(reason
        .to_string()
        .contains("Could not find result map 'ns.studentMap' referenced from 'ns.getById'"));

    assistant
        .add_result_map(&ResultMapSpec {
            id: "studentMap".into(),
            ty: TypeRef::new("HashMap"),
            extends: None,
            discriminator: None,
            result_mappings: vec![ResultMapping::new(Some("id"), Some("id"), TypeRef::object())],
            auto_mapping: None,
        })
        .unwrap();

    let statement = assistant.add_mapped_statement(spec).unwrap().resolved().unwrap();
    assert_eq!(statement.result_maps.len(), 1);
    assert_eq!(statement.result_maps[0].id(), "ns.studentMap");
    assert!(statement.use_cache);
    assert!(!statement.flush_cache);
}

#[test]
fn result_type_builds_an_inline_map() {
    let config = Configuration::default();
    let assistant = assistant(&config);

    let spec = StatementSpec {
        result_type: Some(TypeRef::new("HashMap")),
        ..select("getByIdWithMap")
    };
    let statement = assistant.add_mapped_statement(spec).unwrap().resolved().unwrap();

    assert_eq!(statement.result_maps[0].id(), "ns.getByIdWithMap-Inline");
    assert!(statement.result_maps[0].result_mappings().is_empty());
    assert!(!config.has_result_map("ns.getByIdWithMap-Inline"));
}

#[test]
fn unresolved_cache_ref_defers_every_statement() {
    let config = Configuration::default();
    let assistant = assistant(&config);
    config.add_cache_ref("ns", "other");

    let spec = StatementSpec {
        kind: StatementKind::Update,
        ..select("updateName")
    };
    let Resolution::Deferred(reason) = assistant.add_mapped_statement(spec).unwrap() else {
        panic!("statement should be deferred");
    };
    assert!(reason.to_string().contains("Cache-ref not yet resolved"));
}

#[test]
fn missing_parameter_map_defers() {
    let config = Configuration::default();
    let assistant = assistant(&config);

    let spec = StatementSpec {
        kind: StatementKind::Insert,
        parameter_map: Some("studentParams".into()),
        ..select("insertStudent")
    };
    let Resolution::Deferred(reason) = assistant.add_mapped_statement(spec).unwrap() else {
        panic!("statement should be deferred");
    };
    assert!(reason
        .to_string()
        .contains("Could not find parameter map ns.studentParams"));
}

#[test]
fn write_statements_flush_and_skip_cache() {
    let config = Configuration::default();
    let assistant = assistant(&config);

    let spec = StatementSpec {
        kind: StatementKind::Delete,
        key_property: Some("id, name".into()),
        ..select("deleteById")
    };
    let statement = assistant.add_mapped_statement(spec).unwrap().resolved().unwrap();

    assert!(statement.flush_cache);
    assert!(!statement.use_cache);
    assert_eq!(statement.key_properties, vec!["id", "name"]);
    assert_eq!(
        config.mapped_statement("deleteById").unwrap().id,
        "ns.deleteById"
    );
}
