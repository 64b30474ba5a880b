use crate::{Result, TypeRef, TypeRegistry};

/// Element a result map is being built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    ResultMap,
    Association,
    Collection,
    Case,
    Other,
}

/// Type-related attributes of the element.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeAttributes<'a> {
    pub ty: Option<&'a str>,
    pub of_type: Option<&'a str>,
    pub result_type: Option<&'a str>,
    pub java_type: Option<&'a str>,
    pub result_map: Option<&'a str>,
    pub property: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferredType {
    Resolved(TypeRef),
    Unresolved,
}

impl ElementKind {
    pub fn from_name(name: &str) -> ElementKind {
        match name {
            "resultMap" => ElementKind::ResultMap,
            "association" => ElementKind::Association,
            "collection" => ElementKind::Collection,
            "case" => ElementKind::Case,
            _ => ElementKind::Other,
        }
    }

    /// Elements that build an anonymous result map when they name neither a
    /// result map nor a nested select.
    pub fn is_nested(self) -> bool {
        matches!(
            self,
            ElementKind::Association | ElementKind::Collection | ElementKind::Case
        )
    }
}

/// Picks the target type of a result map element.
///
/// The first of `type`, `ofType`, `resultType`, `javaType` wins. Without
/// any, an association takes the setter type of its property on the
/// enclosing type, and a case takes the enclosing type unchanged. An explicit
/// name that does not resolve is an error.
pub fn infer_type(
    kind: ElementKind,
    attrs: &TypeAttributes<'_>,
    enclosing: Option<&TypeRef>,
    types: &TypeRegistry,
) -> Result<InferredType> {
    let explicit = attrs
        .ty
        .or(attrs.of_type)
        .or(attrs.result_type)
        .or(attrs.java_type);

    if let Some(name) = explicit {
        return types.resolve(name).map(InferredType::Resolved);
    }

    let inherited = match kind {
        ElementKind::Association if attrs.result_map.is_none() => attrs
            .property
            .zip(enclosing)
            .and_then(|(property, enclosing)| types.setter_type(enclosing, property)),
        ElementKind::Case if attrs.result_map.is_none() => enclosing.cloned(),
        _ => None,
    };

    Ok(inherited.map_or(InferredType::Unresolved, InferredType::Resolved))
}
