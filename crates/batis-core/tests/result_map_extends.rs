use batis_core::builder::{MapperBuilderAssistant, ResultMapSpec};
use batis_core::mapping::{ResultFlag, ResultMapping};
use batis_core::reflect::Constructor;
use batis_core::registry::ResultMapResolver;
use batis_core::{Configuration, Resolution, TypeDescriptor, TypeRef, TypeRegistry};
use pretty_assertions::assert_eq;

fn config() -> Configuration {
    let mut types = TypeRegistry::new();
    types.register(
        TypeDescriptor::bean("Student")
            .property("id", "int")
            .property("name", "String")
            .property("fatherName", "String")
            .constructor(Constructor::new().tagged("id", "int"))
            .constructor(Constructor::new().tagged("name", "String")),
    );
    Configuration::builder().types(types).build()
}

fn mapping(property: &str) -> ResultMapping {
    ResultMapping::new(Some(property), Some(property), TypeRef::new("String"))
}

fn spec(id: &str, extends: Option<&str>, result_mappings: Vec<ResultMapping>) -> ResultMapSpec {
    ResultMapSpec {
        id: id.to_string(),
        ty: TypeRef::new("Student"),
        extends: extends.map(str::to_string),
        discriminator: None,
        result_mappings,
        auto_mapping: None,
    }
}

fn properties(mappings: &[ResultMapping]) -> Vec<&str> {
    mappings
        .iter()
        .map(|mapping| mapping.property.as_deref().unwrap())
        .collect()
}

#[test]
fn forward_parent_resolves_after_retry() {
    let config = config();
    let mut assistant = MapperBuilderAssistant::new(&config, "StudentMapper.xml");
    assistant.set_namespace("ns").unwrap();

    // Child first: the parent is not registered yet.
    let child = spec("childMap", Some("parentMap"), vec![mapping("fatherName")]);
    let Resolution::Deferred(reason) = assistant.add_result_map(&child).unwrap() else {
        panic!("child should be deferred");
    };
    assert!(reason.is_incomplete());
    assert!(reason
        .to_string()
        .contains("Could not find a parent resultmap with id 'ns.parentMap'"));

    config.add_incomplete_result_map(
        ResultMapResolver::new("StudentMapper.xml", "ns", "ns.childMap".into(), child),
        reason,
    );

    let err = config.result_map("ns.childMap").unwrap_err();
    assert!(err.to_string().contains("still pending"));

    // Then the parent.
    let parent = spec("parentMap", None, vec![mapping("id"), mapping("name")]);
    assert!(assistant.add_result_map(&parent).unwrap().is_resolved());

    let resolved = config
        .pending_result_maps()
        .drain_with(|pending| Ok(pending.resolve(&config)?.map(|_| ())))
        .unwrap();
    assert_eq!(resolved, 1);
    assert_eq!(config.pending_count(), 0);

    let child = config.result_map("ns.childMap").unwrap();
    assert_eq!(properties(child.result_mappings()), vec!["id", "name", "fatherName"]);
}

#[test]
fn redefined_properties_replace_inherited_ones() {
    let config = config();
    let mut assistant = MapperBuilderAssistant::new(&config, "StudentMapper.xml");
    assistant.set_namespace("ns").unwrap();

    let parent = spec("parentMap", None, vec![mapping("id"), mapping("name")]);
    assistant.add_result_map(&parent).unwrap();

    let mut renamed = mapping("name");
    renamed.column = Some("student_name".into());
    let child = spec("childMap", Some("parentMap"), vec![renamed]);

    let child = assistant.add_result_map(&child).unwrap().resolved().unwrap();
    assert_eq!(properties(child.result_mappings()), vec!["id", "name"]);
    assert_eq!(
        child.result_mappings()[1].column.as_deref(),
        Some("student_name")
    );
}

#[test]
fn child_constructor_replaces_parent_constructor() {
    let config = config();
    let mut assistant = MapperBuilderAssistant::new(&config, "StudentMapper.xml");
    assistant.set_namespace("ns").unwrap();

    let parent = spec(
        "parentMap",
        None,
        vec![mapping("id").flagged(ResultFlag::Constructor), mapping("fatherName")],
    );
    assistant.add_result_map(&parent).unwrap();

    let child = spec(
        "childMap",
        Some("ns.parentMap"),
        vec![mapping("name").flagged(ResultFlag::Constructor)],
    );
    let child = assistant.add_result_map(&child).unwrap().resolved().unwrap();

    assert_eq!(properties(child.result_mappings()), vec!["fatherName", "name"]);
    assert_eq!(properties(child.constructor_result_mappings()), vec!["name"]);
}

#[test]
fn duplicate_ids_are_fatal() {
    let config = config();
    let mut assistant = MapperBuilderAssistant::new(&config, "StudentMapper.xml");
    assistant.set_namespace("ns").unwrap();

    let map = spec("studentMap", None, vec![mapping("id")]);
    assistant.add_result_map(&map).unwrap();

    let err = assistant.add_result_map(&map).unwrap_err();
    assert!(err.is_duplicate_id());
    assert_eq!(
        err.to_string(),
        "Result Maps collection already contains value for ns.studentMap"
    );
}
