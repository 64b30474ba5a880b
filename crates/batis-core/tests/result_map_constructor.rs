use batis_core::builder::ConstructorResolver;
use batis_core::mapping::{ResultFlag, ResultMap, ResultMapping};
use batis_core::reflect::Constructor;
use batis_core::{TypeDescriptor, TypeRef, TypeRegistry};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

fn student_types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types.register(
        TypeDescriptor::bean("com.kingdon.model.Student")
            .property("id", "int")
            .property("name", "String")
            .property("fatherName", "String")
            .constructor(Constructor::new().tagged("id", "int").tagged("name", "String"))
            .constructor(
                Constructor::new()
                    .tagged("id", "int")
                    .tagged("fatherName", "String")
                    .tagged("name", "String"),
            ),
    );
    types
}

fn student() -> TypeRef {
    TypeRef::new("com.kingdon.model.Student")
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

fn arg(name: &str, column: &str, declared: Option<&str>) -> ResultMapping {
    let mut mapping = ResultMapping::new(Some(name), Some(column), TypeRef::object())
        .flagged(ResultFlag::Constructor);
    mapping.declared_java_type = declared.map(TypeRef::new);
    mapping
}

#[test]
fn picks_two_argument_constructor() {
    let types = student_types();
    let resolver = ConstructorResolver::new(&types, true);

    let resolved = resolver.resolve("ns.studentMap", &student(), &names(&["id", "name"]), &IndexMap::new());
    assert_eq!(resolved, Some(names(&["id", "name"])));
}

#[test]
fn argument_order_does_not_matter() {
    let types = student_types();
    let resolver = ConstructorResolver::new(&types, true);

    let resolved = resolver.resolve("ns.studentMap", &student(), &names(&["name", "id"]), &IndexMap::new());
    assert_eq!(resolved, Some(names(&["id", "name"])));
}

#[test]
fn declared_type_mismatch_rejects_candidate() {
    let types = student_types();
    let resolver = ConstructorResolver::new(&types, true);
    let declared = IndexMap::from([("name".to_string(), TypeRef::new("Integer"))]);

    let resolved = resolver.resolve("ns.studentMap", &student(), &names(&["id", "name"]), &declared);
    assert_eq!(resolved, None);
}

#[test]
fn declared_types_that_agree_match() {
    let types = student_types();
    let resolver = ConstructorResolver::new(&types, true);
    let declared = IndexMap::from([
        ("id".to_string(), TypeRef::new("int")),
        ("name".to_string(), TypeRef::new("String")),
    ]);

    let resolved = resolver.resolve("ns.studentMap", &student(), &names(&["name", "id"]), &declared);
    assert_eq!(resolved, Some(names(&["id", "name"])));
}

#[test]
fn constructor_mappings_follow_parameter_order() {
    let types = student_types();
    let result_map = ResultMap::builder(
        "ns.studentMap",
        student(),
        vec![
            arg("name", "name", None),
            arg("fatherName", "father_name", None),
            arg("id", "id", Some("int")).flagged(ResultFlag::Id),
            ResultMapping::new(Some("headTeacher"), Some("teacher_id"), TypeRef::object()),
        ],
    )
    .build(&ConstructorResolver::new(&types, true))
    .unwrap();

    let order: Vec<_> = result_map
        .constructor_result_mappings()
        .iter()
        .map(|mapping| mapping.property.as_deref().unwrap())
        .collect();
    assert_eq!(order, vec!["id", "fatherName", "name"]);

    // Declaration order is kept everywhere else.
    let all: Vec<_> = result_map
        .result_mappings()
        .iter()
        .map(|mapping| mapping.property.as_deref().unwrap())
        .collect();
    assert_eq!(all, vec!["name", "fatherName", "id", "headTeacher"]);

    assert_eq!(result_map.property_result_mappings().len(), 1);
    assert_eq!(result_map.id_result_mappings().len(), 1);
}

#[test]
fn unmatched_constructor_is_fatal() {
    let types = student_types();
    let err = ResultMap::builder(
        "ns.studentMap",
        student(),
        vec![arg("id", "id", None), arg("nickname", "nickname", None)],
    )
    .build(&ConstructorResolver::new(&types, true))
    .unwrap_err();

    assert!(err.is_constructor_not_found());
    assert_eq!(
        err.to_string(),
        "Error in result map 'ns.studentMap'. Failed to find a constructor in \
         'com.kingdon.model.Student' by arg names [id, nickname]"
    );
}
