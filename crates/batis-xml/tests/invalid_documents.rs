mod fixtures;

use batis_core::{Configuration, Error};
use batis_xml::XmlMapperBuilder;

fn load(config: &Configuration, resource: &str, source: &str) -> Result<(), Error> {
    XmlMapperBuilder::new(config, resource, source)?.parse()?;
    Ok(())
}

#[test]
fn namespace_is_required() {
    let config = fixtures::config();
    let err = load(&config, "NoNamespace.xml", "<mapper><sql id=\"a\">a</sql></mapper>").unwrap_err();

    assert_eq!(
        err.to_string(),
        "error parsing mapper document 'NoNamespace.xml': invalid mapping: Mapper's namespace cannot be empty"
    );
    assert!(!config.is_resource_loaded("NoNamespace.xml"));
}

#[test]
fn root_must_be_a_mapper() {
    let config = fixtures::config();
    let err = load(&config, "Config.xml", "<configuration namespace=\"ns\"/>").unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("found <configuration>"));
}

#[test]
fn malformed_xml_names_the_resource() {
    let config = fixtures::config();
    let err = load(&config, "Broken.xml", "<mapper namespace=\"ns\"><resultMap></mapper>").unwrap_err();
    assert!(err.is_xml());
    assert!(err.to_string().starts_with("error parsing mapper document 'Broken.xml': malformed XML"));
}

#[test]
fn ambiguous_collection() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"
  <resultMap id="studentMap" type="student">
    <collection property="courses">
      <id property="id" column="course_id"/>
    </collection>
  </resultMap>
"#,
    );

    let err = load(&config, "Courses.xml", &source).unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().ends_with(
        "Ambiguous collection type for property 'courses'. You must specify 'javaType' or 'resultMap'."
    ));
}

#[test]
fn unknown_type() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"<resultMap id="courseMap" type="com.kingdon.model.Course"><id column="id"/></resultMap>"#,
    );

    let err = load(&config, "Courses.xml", &source).unwrap_err();
    assert!(err.is_unresolved_type());
    assert!(err
        .to_string()
        .ends_with("could not resolve type alias 'com.kingdon.model.Course'"));
}

#[test]
fn result_map_without_type() {
    let config = fixtures::config();
    let source = fixtures::mapper("ns", r#"<resultMap id="bare"><id column="id"/></resultMap>"#);

    let err = load(&config, "Bare.xml", &source).unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("could not determine the type of <resultMap>"));
}

#[test]
fn no_matching_constructor() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"
  <resultMap id="studentMap" type="student">
    <constructor>
      <idArg name="id" column="id"/>
      <arg name="nickname" column="nickname"/>
    </constructor>
  </resultMap>
"#,
    );

    let err = load(&config, "Students.xml", &source).unwrap_err();
    assert!(err.is_constructor_not_found());
    assert!(err.to_string().ends_with(
        "Error in result map 'ns.studentMap'. Failed to find a constructor in \
         'com.kingdon.model.Student' by arg names [id, nickname]"
    ));
}

#[test]
fn duplicate_result_map_across_documents() {
    let config = fixtures::config();
    let source = |id: &str| {
        fixtures::mapper(
            "ns",
            &format!(r#"<resultMap id="{id}" type="student"><id property="id" column="id"/></resultMap>"#),
        )
    };

    load(&config, "First.xml", &source("studentMap")).unwrap();
    let err = load(&config, "Second.xml", &source("studentMap")).unwrap_err();

    assert!(err.is_duplicate_id());
    assert_eq!(
        err.to_string(),
        "error parsing mapper document 'Second.xml': Result Maps collection already contains value for ns.studentMap"
    );
}

#[test]
fn dotted_ids_from_other_namespaces() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"<resultMap id="other.studentMap" type="student"><id property="id" column="id"/></resultMap>"#,
    );

    let err = load(&config, "Dotted.xml", &source).unwrap_err();
    assert!(err
        .to_string()
        .contains("Dots are not allowed in element names, please remove it from other.studentMap"));
}

#[test]
fn cache_ref_requires_a_namespace() {
    let config = fixtures::config();
    let source = fixtures::mapper("ns", "<cache-ref/>");

    let err = load(&config, "CacheRef.xml", &source).unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn nested_select_and_result_map_conflict() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"
  <resultMap id="studentMap" type="student">
    <association property="headTeacher" column="teacher_id" select="getTeacher" resultMap="teacherMap"/>
  </resultMap>
"#,
    );

    let err = load(&config, "Conflict.xml", &source).unwrap_err();
    assert!(err.to_string().ends_with(
        "Cannot define both nestedQueryId and nestedResultMapId in property headTeacher"
    ));
}

#[test]
fn unknown_jdbc_type() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"<resultMap id="studentMap" type="student"><id property="id" column="id" jdbcType="SERIAL"/></resultMap>"#,
    );

    let err = load(&config, "Jdbc.xml", &source).unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("unknown JDBC type 'SERIAL'"));
}
