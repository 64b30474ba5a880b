mod fixtures;

use batis_xml::XmlMapperBuilder;
use pretty_assertions::assert_eq;

#[test]
fn include_properties_are_substituted() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"
  <sql id="columns">${alias}.id, ${alias}.name</sql>
  <sql id="from">from <include refid="${table}"/></sql>
  <sql id="students">student ${alias}</sql>

  <select id="getAll" resultType="student">
    select <include refid="columns"><property name="alias" value="s"/></include>
    <include refid="from">
      <property name="table" value="students"/>
      <property name="alias" value="s"/>
    </include>
  </select>
"#,
    );

    XmlMapperBuilder::new(&config, "Includes.xml", &source)
        .unwrap()
        .parse()
        .unwrap();

    let statement = config.mapped_statement("ns.getAll").unwrap();
    assert_eq!(statement.sql.text, "select s.id, s.name from student s");
    assert!(!statement.sql.dynamic);
}

#[test]
fn unsubstituted_placeholders_are_dynamic() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"<select id="sorted" resultType="student">select * from student order by ${column}</select>"#,
    );

    XmlMapperBuilder::new(&config, "Sorted.xml", &source)
        .unwrap()
        .parse()
        .unwrap();

    let statement = config.mapped_statement("ns.sorted").unwrap();
    assert!(statement.sql.dynamic);
    assert_eq!(statement.sql.text, "select * from student order by ${column}");
}

#[test]
fn select_key_is_not_part_of_the_body() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"
  <insert id="insertStudent" parameterType="student" keyProperty="id">
    <selectKey keyProperty="id" resultType="int" order="AFTER">select last_insert_id()</selectKey>
    insert into student (name) values (#{name})
  </insert>
"#,
    );

    XmlMapperBuilder::new(&config, "Insert.xml", &source)
        .unwrap()
        .parse()
        .unwrap();

    let statement = config.mapped_statement("ns.insertStudent").unwrap();
    assert_eq!(statement.sql.text, "insert into student (name) values (#{name})");
    assert!(!statement.sql.dynamic);
    assert_eq!(statement.key_properties, vec!["id"]);
}

#[test]
fn fragment_from_a_later_document() {
    let config = fixtures::config();

    let students = fixtures::mapper(
        "students",
        r#"<select id="getAll" resultType="student">select <include refid="shared.columns"/> from student</select>"#,
    );
    let progress = XmlMapperBuilder::new(&config, "Students.xml", &students)
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(progress.remaining, 1);

    let unresolved = config.unresolved();
    assert_eq!(
        unresolved[0].reason,
        "incomplete: Could not find SQL statement to include with refid 'shared.columns'"
    );

    let shared = fixtures::mapper("shared", r#"<sql id="columns">id, name</sql>"#);
    let progress = XmlMapperBuilder::new(&config, "Shared.xml", &shared)
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(progress.resolved, 1);

    let statement = config.mapped_statement("students.getAll").unwrap();
    assert_eq!(statement.sql.text, "select id, name from student");
}

#[test]
fn circular_includes_are_fatal() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"
  <sql id="a">a <include refid="b"/></sql>
  <sql id="b">b <include refid="a"/></sql>
  <select id="loop" resultType="student">select <include refid="a"/></select>
"#,
    );

    let err = XmlMapperBuilder::new(&config, "Loop.xml", &source)
        .unwrap()
        .parse()
        .unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("circular include of SQL fragment 'ns.a'"));
}

#[test]
fn duplicate_include_property() {
    let config = fixtures::config();
    let source = fixtures::mapper(
        "ns",
        r#"
  <sql id="columns">${alias}.id</sql>
  <select id="getAll" resultType="student">
    select <include refid="columns">
      <property name="alias" value="s"/>
      <property name="alias" value="t"/>
    </include> from student s
  </select>
"#,
    );

    let err = XmlMapperBuilder::new(&config, "Dup.xml", &source)
        .unwrap()
        .parse()
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("Variable alias defined twice in the same include definition"));
}
