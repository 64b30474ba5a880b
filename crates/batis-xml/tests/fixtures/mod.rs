#![allow(dead_code)]

use batis_core::reflect::Constructor;
use batis_core::{Configuration, Settings, TypeDescriptor, TypeRegistry};

pub const STUDENT: &str = "com.kingdon.model.Student";
pub const TEACHER: &str = "com.kingdon.model.Teacher";
pub const NAME_HANDLER: &str = "com.kingdon.typehandler.NameTypeHandler";
pub const STUDENT_DAO: &str = "com.kingdon.dao.StudentDao";

/// The student/teacher domain used by the mapper documents under test.
pub fn types() -> TypeRegistry {
    let mut types = TypeRegistry::new();

    types
        .register(
            TypeDescriptor::bean(STUDENT)
                .property("id", "int")
                .property("name", "String")
                .property("fatherName", "String")
                .property("headTeacher", TEACHER)
                .property("teachers", "List")
                .constructor(Constructor::new().tagged("id", "int").tagged("name", "String"))
                .constructor(
                    Constructor::new()
                        .tagged("id", "int")
                        .tagged("fatherName", "String")
                        .tagged("name", "String"),
                ),
        )
        .register(
            TypeDescriptor::bean(TEACHER)
                .property("id", "int")
                .property("name", "String")
                .property("age", "int")
                .property("subject", "String")
                .property("headTeacher", "boolean"),
        )
        .register(TypeDescriptor::type_handler(NAME_HANDLER))
        .register(TypeDescriptor::mapper(STUDENT_DAO))
        .alias("student", STUDENT)
        .alias("teacher", TEACHER);

    types
}

pub fn config() -> Configuration {
    Configuration::builder().types(types()).build()
}

pub fn config_for_database(database_id: &str) -> Configuration {
    Configuration::builder()
        .types(types())
        .settings(Settings {
            database_id: Some(database_id.to_string()),
            ..Settings::default()
        })
        .build()
}

/// Wraps mapper elements in a document for `namespace`.
pub fn mapper(namespace: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd">
<mapper namespace="{namespace}">
{body}
</mapper>"#
    )
}
