use super::JdbcType;
use crate::{Error, Result, TypeRef};

/// Legacy parameter map declared with `<parameterMap>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMap {
    pub id: String,
    pub ty: TypeRef,
    pub parameter_mappings: Vec<ParameterMapping>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMapping {
    pub property: String,
    pub mode: ParameterMode,
    pub java_type: TypeRef,
    pub jdbc_type: Option<JdbcType>,
    pub numeric_scale: Option<i32>,
    pub type_handler: Option<TypeRef>,
    pub result_map_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterMode {
    #[default]
    In,
    Out,
    InOut,
}

impl ParameterMode {
    /// Parses an optional `mode` attribute, defaulting to `IN`.
    pub fn resolve(name: Option<&str>) -> Result<ParameterMode> {
        match name {
            None => Ok(ParameterMode::In),
            Some("IN") => Ok(ParameterMode::In),
            Some("OUT") => Ok(ParameterMode::Out),
            Some("INOUT") => Ok(ParameterMode::InOut),
            Some(other) => Err(Error::invalid_mapping(format!(
                "Error resolving ParameterMode. Cause: unknown mode '{other}'"
            ))),
        }
    }
}
