use super::{Cache, ResultMap};
use crate::{Error, Result, TypeRef};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatementKind {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
}

/// A statement with its mapping references resolved.
///
/// SQL is carried as text; turning it into an executable statement happens
/// elsewhere.
#[derive(Debug, Clone)]
pub struct MappedStatement {
    pub id: String,
    pub resource: String,
    pub kind: StatementKind,
    pub database_id: Option<String>,
    pub parameter_type: Option<TypeRef>,
    pub parameter_map_id: Option<String>,
    pub result_maps: Vec<Arc<ResultMap>>,
    pub result_sets: Vec<String>,
    pub key_properties: Vec<String>,
    pub key_columns: Vec<String>,
    pub timeout: Option<u32>,
    pub fetch_size: Option<u32>,
    pub flush_cache: bool,
    pub use_cache: bool,
    pub result_ordered: bool,
    pub cache: Option<Arc<Cache>>,
    pub sql: SqlText,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlText {
    /// Statement body with includes expanded
    pub text: String,

    /// Whether the body needs per-call evaluation (dynamic tags or `${}`)
    pub dynamic: bool,
}

impl StatementKind {
    pub fn from_element(name: &str) -> Result<StatementKind> {
        match name {
            "select" => Ok(StatementKind::Select),
            "insert" => Ok(StatementKind::Insert),
            "update" => Ok(StatementKind::Update),
            "delete" => Ok(StatementKind::Delete),
            other => Err(Error::invalid_mapping(format!(
                "unknown statement element <{other}>"
            ))),
        }
    }

    pub fn is_select(self) -> bool {
        self == StatementKind::Select
    }
}
