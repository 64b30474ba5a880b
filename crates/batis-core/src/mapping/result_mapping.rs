use super::JdbcType;
use crate::{Error, Result, TypeRef};
use indexmap::IndexSet;

/// Marks a result mapping as part of the row identity or as a constructor
/// argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultFlag {
    Id,
    Constructor,
}

/// One column to property binding inside a result map.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMapping {
    /// Target property, or constructor argument name for constructor entries
    pub property: Option<String>,

    /// Source column. `None` for composite mappings.
    pub column: Option<String>,

    /// Effective target type
    pub java_type: TypeRef,

    /// Type given explicitly by the document, if any
    pub declared_java_type: Option<TypeRef>,

    pub jdbc_type: Option<JdbcType>,

    pub type_handler: Option<TypeRef>,

    /// Statement run to populate this property
    pub nested_select_id: Option<String>,

    /// Result map used to populate this property from the same row
    pub nested_result_map_id: Option<String>,

    pub not_null_columns: IndexSet<String>,

    pub column_prefix: Option<String>,

    pub flags: Vec<ResultFlag>,

    /// Sub-mappings of a composite column such as `{id=teacher_id,name=teacher_name}`
    pub composites: Vec<ResultMapping>,

    pub result_set: Option<String>,

    pub foreign_column: Option<String>,

    pub lazy: bool,
}

impl ResultMapping {
    pub fn new(property: Option<&str>, column: Option<&str>, java_type: TypeRef) -> ResultMapping {
        ResultMapping {
            property: property.map(str::to_string),
            column: column.map(str::to_string),
            java_type,
            declared_java_type: None,
            jdbc_type: None,
            type_handler: None,
            nested_select_id: None,
            nested_result_map_id: None,
            not_null_columns: IndexSet::new(),
            column_prefix: None,
            flags: vec![],
            composites: vec![],
            result_set: None,
            foreign_column: None,
            lazy: false,
        }
    }

    pub fn flagged(mut self, flag: ResultFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn nested_result_map(mut self, id: impl Into<String>) -> Self {
        self.nested_result_map_id = Some(id.into());
        self
    }

    pub fn nested_select(mut self, id: impl Into<String>) -> Self {
        self.nested_select_id = Some(id.into());
        self
    }

    pub fn has_flag(&self, flag: ResultFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_composite(&self) -> bool {
        !self.composites.is_empty()
    }

    /// Whether both mappings write the same property. Unnamed mappings never
    /// match.
    pub fn same_property(&self, other: &ResultMapping) -> bool {
        matches!((&self.property, &other.property), (Some(a), Some(b)) if a == b)
    }

    /// Checks the mapping is usable.
    pub fn validate(&self) -> Result<()> {
        let property = self.property.as_deref().unwrap_or("null");

        if self.nested_select_id.is_some() && self.nested_result_map_id.is_some() {
            return Err(Error::invalid_mapping(format!(
                "Cannot define both nestedQueryId and nestedResultMapId in property {property}"
            )));
        }

        if self.nested_result_map_id.is_none() && self.column.is_none() && self.composites.is_empty() {
            return Err(Error::invalid_mapping(format!(
                "Mapping is missing column attribute for property {property}"
            )));
        }

        if self.result_set.is_some() {
            let columns = match &self.column {
                Some(column) => count_columns(column),
                None => self.composites.len(),
            };
            let foreign_columns = self.foreign_column.as_deref().map_or(0, count_columns);

            if columns != foreign_columns {
                return Err(Error::invalid_mapping(format!(
                    "There should be the same number of columns and foreignColumns in property {property}"
                )));
            }
        }

        Ok(())
    }
}

fn count_columns(list: &str) -> usize {
    list.split(',').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_and_result_map_conflict() {
        let mapping = ResultMapping::new(Some("teacher"), Some("teacher_id"), TypeRef::object())
            .nested_select("ns.selectTeacher")
            .nested_result_map("ns.teacherMap");
        let err = mapping.validate().unwrap_err();
        assert!(err.to_string().contains("Cannot define both"));
    }

    #[test]
    fn column_required_without_nested_map() {
        let mapping = ResultMapping::new(Some("name"), None, TypeRef::object());
        assert!(mapping.validate().is_err());

        let nested = ResultMapping::new(Some("teacher"), None, TypeRef::object())
            .nested_result_map("ns.teacherMap");
        assert!(nested.validate().is_ok());
    }

    #[test]
    fn result_set_column_counts() {
        let mut mapping = ResultMapping::new(Some("teachers"), Some("id,name"), TypeRef::object());
        mapping.result_set = Some("teachers".into());
        mapping.foreign_column = Some("student_id".into());
        assert!(mapping.validate().is_err());

        mapping.foreign_column = Some("student_id,student_name".into());
        assert!(mapping.validate().is_ok());
    }

    #[test]
    fn unnamed_mappings_are_distinct() {
        let a = ResultMapping::new(None, Some("a"), TypeRef::object());
        let b = ResultMapping::new(None, Some("b"), TypeRef::object());
        assert!(!a.same_property(&b));
    }
}
