use batis_core::builder::MapperBuilderAssistant;
use batis_core::registry::CacheRefResolver;
use batis_core::{Configuration, Resolution, TypeRef};
use pretty_assertions::assert_eq;

#[test]
fn reference_to_a_later_cache_resolves_on_retry() {
    let config = Configuration::default();

    let mut student = MapperBuilderAssistant::new(&config, "StudentMapper.xml");
    student.set_namespace("ns.student").unwrap();
    config.add_cache_ref("ns.student", "ns.teacher");

    let Resolution::Deferred(reason) = student.use_cache_ref("ns.teacher").unwrap() else {
        panic!("cache ref should be deferred");
    };
    assert!(reason
        .to_string()
        .contains("No cache for namespace 'ns.teacher' could be found."));
    assert!(config.has_unresolved_cache_ref("ns.student"));
    config.add_incomplete_cache_ref(
        CacheRefResolver::new("StudentMapper.xml", "ns.student", "ns.teacher"),
        reason,
    );

    // A later document declares the cache.
    let mut teacher = MapperBuilderAssistant::new(&config, "TeacherMapper.xml");
    teacher.set_namespace("ns.teacher").unwrap();
    let cache = teacher
        .use_new_cache(|builder| {
            builder.size(Some(512)).read_write(false);
        })
        .unwrap();

    assert_eq!(cache.implementation, TypeRef::new("PerpetualCache"));
    assert_eq!(cache.decorators, vec![TypeRef::new("LruCache")]);

    let resolved = config
        .pending_cache_refs()
        .drain_with(|pending| Ok(pending.resolve(&config)?.map(|_| ())))
        .unwrap();
    assert_eq!(resolved, 1);

    assert!(!config.has_unresolved_cache_ref("ns.student"));
    let shared = config.namespace_cache("ns.student").unwrap();
    assert_eq!(shared.id, "ns.teacher");
    assert_eq!(shared.size, Some(512));
    assert_eq!(config.cache_ref("ns.student").as_deref(), Some("ns.teacher"));
}

#[test]
fn own_cache_is_kept() {
    let config = Configuration::default();

    let mut teacher = MapperBuilderAssistant::new(&config, "TeacherMapper.xml");
    teacher.set_namespace("ns.teacher").unwrap();
    teacher.use_new_cache(|_| {}).unwrap();

    let mut student = MapperBuilderAssistant::new(&config, "StudentMapper.xml");
    student.set_namespace("ns.student").unwrap();
    student.use_new_cache(|_| {}).unwrap();
    config.add_cache_ref("ns.student", "ns.teacher");
    assert!(student.use_cache_ref("ns.teacher").unwrap().is_resolved());

    assert_eq!(config.namespace_cache("ns.student").unwrap().id, "ns.student");
}

#[test]
fn second_cache_for_a_namespace_is_fatal() {
    let config = Configuration::default();
    let mut assistant = MapperBuilderAssistant::new(&config, "StudentMapper.xml");
    assistant.set_namespace("ns.student").unwrap();

    assistant.use_new_cache(|_| {}).unwrap();
    let err = assistant.use_new_cache(|_| {}).unwrap_err();
    assert!(err.is_duplicate_id());
}

#[test]
fn cache_types_must_be_caches() {
    let config = Configuration::default();
    let mut assistant = MapperBuilderAssistant::new(&config, "StudentMapper.xml");
    assistant.set_namespace("ns.student").unwrap();

    let err = assistant
        .use_new_cache(|builder| {
            builder.implementation(TypeRef::new("String"));
        })
        .unwrap_err();
    assert!(err.is_invalid_mapping());
}
