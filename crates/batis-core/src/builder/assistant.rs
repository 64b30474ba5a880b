use super::{ConstructorResolver, DiscriminatorSpec, ResultMapBuilder};
use crate::mapping::{
    Cache, CacheBuilder, Discriminator, JdbcType, MappedStatement, ParameterMap, ParameterMapping,
    ParameterMode, ResultFlag, ResultMap, ResultMapping, SqlText, StatementKind,
};
use crate::reflect::TypeKind;
use crate::{Configuration, Error, Resolution, Result, TypeRef};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Namespace-aware helper shared by the element builders of one document.
///
/// Qualifies ids with the current namespace, builds mappings with their
/// effective types, and registers finished elements in the
/// [`Configuration`]. Registration that depends on an element that is not
/// loaded yet returns [`Resolution::Deferred`].
#[derive(Debug)]
pub struct MapperBuilderAssistant<'a> {
    config: &'a Configuration,
    resource: String,
    namespace: Option<String>,
}

/// Attributes of one `id`/`result`/`arg`/`association`/`collection` element,
/// with type names already resolved.
#[derive(Debug, Clone, Default)]
pub struct ResultMappingSpec {
    pub property: Option<String>,
    pub column: Option<String>,
    pub java_type: Option<TypeRef>,
    pub jdbc_type: Option<JdbcType>,
    pub nested_select: Option<String>,
    pub nested_result_map: Option<String>,
    pub not_null_column: Option<String>,
    pub column_prefix: Option<String>,
    pub type_handler: Option<TypeRef>,
    pub flags: Vec<ResultFlag>,
    pub result_set: Option<String>,
    pub foreign_column: Option<String>,

    /// `None` falls back to the session's lazy loading setting
    pub lazy: Option<bool>,
}

/// Everything needed to register a result map. Kept by the retry token when
/// registration is deferred.
#[derive(Debug, Clone)]
pub struct ResultMapSpec {
    /// Declared or synthesized id, not yet namespace-qualified
    pub id: String,
    pub ty: TypeRef,
    pub extends: Option<String>,
    pub discriminator: Option<Discriminator>,
    pub result_mappings: Vec<ResultMapping>,
    pub auto_mapping: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ParameterMappingSpec {
    pub property: String,
    pub java_type: Option<TypeRef>,
    pub jdbc_type: Option<JdbcType>,
    pub result_map: Option<String>,
    pub mode: ParameterMode,
    pub type_handler: Option<TypeRef>,
    pub numeric_scale: Option<i32>,
}

/// Attributes of a `select`/`insert`/`update`/`delete` element.
#[derive(Debug, Clone, Default)]
pub struct StatementSpec {
    /// Declared id, not yet namespace-qualified
    pub id: String,
    pub kind: StatementKind,
    pub database_id: Option<String>,
    pub parameter_type: Option<TypeRef>,
    pub parameter_map: Option<String>,

    /// Comma separated result map ids
    pub result_map: Option<String>,
    pub result_type: Option<TypeRef>,
    pub result_sets: Option<String>,
    pub key_property: Option<String>,
    pub key_column: Option<String>,
    pub timeout: Option<u32>,
    pub fetch_size: Option<u32>,
    pub flush_cache: Option<bool>,
    pub use_cache: Option<bool>,
    pub result_ordered: bool,
    pub sql: SqlText,
}

impl<'a> MapperBuilderAssistant<'a> {
    pub fn new(config: &'a Configuration, resource: &str) -> Self {
        MapperBuilderAssistant {
            config,
            resource: resource.to_string(),
            namespace: None,
        }
    }

    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn current_namespace(&self) -> Result<&str> {
        self.namespace
            .as_deref()
            .ok_or_else(|| Error::invalid_mapping("The mapper element requires a namespace attribute to be specified."))
    }

    pub fn set_namespace(&mut self, namespace: &str) -> Result<()> {
        if namespace.is_empty() {
            return Err(Error::invalid_mapping(
                "The mapper element requires a namespace attribute to be specified.",
            ));
        }

        match &self.namespace {
            Some(current) if current != namespace => Err(Error::invalid_mapping(format!(
                "Wrong namespace. Expected '{current}' but found '{namespace}'."
            ))),
            _ => {
                self.namespace = Some(namespace.to_string());
                Ok(())
            }
        }
    }

    /// Qualifies an id with the current namespace.
    ///
    /// References that already contain a dot are taken as fully qualified.
    /// Declared ids may carry the current namespace, but no other dots.
    pub fn apply_current_namespace(&self, base: &str, is_reference: bool) -> Result<String> {
        let namespace = self.current_namespace()?;

        if is_reference {
            if base.contains('.') {
                return Ok(base.to_string());
            }
        } else {
            if base
                .strip_prefix(namespace)
                .is_some_and(|rest| rest.starts_with('.'))
            {
                return Ok(base.to_string());
            }
            if base.contains('.') {
                return Err(Error::invalid_mapping(format!(
                    "Dots are not allowed in element names, please remove it from {base}"
                )));
            }
        }

        Ok(format!("{namespace}.{base}"))
    }

    pub fn apply_namespace_opt(&self, base: Option<&str>, is_reference: bool) -> Result<Option<String>> {
        base.map(|base| self.apply_current_namespace(base, is_reference))
            .transpose()
    }

    // ===== Caches =====

    /// Shares the cache of `referenced` with the current namespace.
    pub fn use_cache_ref(&self, referenced: &str) -> Result<Resolution<Arc<Cache>>> {
        let namespace = self.current_namespace()?;

        match self.config.cache(referenced) {
            Some(cache) => {
                self.config.resolve_cache_ref(namespace, cache.clone());
                Ok(Resolution::Resolved(cache))
            }
            None => Ok(Resolution::deferred(format!(
                "No cache for namespace '{referenced}' could be found."
            ))),
        }
    }

    /// Declares the current namespace's own cache.
    pub fn use_new_cache(&self, configure: impl FnOnce(&mut CacheBuilder)) -> Result<Arc<Cache>> {
        let mut builder = Cache::builder(self.current_namespace()?);
        configure(&mut builder);
        let cache = builder.build();

        for ty in std::iter::once(&cache.implementation).chain(&cache.decorators) {
            if self.config.types().kind(ty) != Some(TypeKind::Cache) {
                return Err(Error::invalid_mapping(format!(
                    "'{ty}' is not a cache implementation"
                )));
            }
        }

        self.config.add_cache(cache)
    }

    // ===== Parameter maps =====

    pub fn add_parameter_map(
        &self,
        id: &str,
        ty: TypeRef,
        parameter_mappings: Vec<ParameterMapping>,
    ) -> Result<Arc<ParameterMap>> {
        let id = self.apply_current_namespace(id, false)?;
        self.config.add_parameter_map(ParameterMap {
            id,
            ty,
            parameter_mappings,
        })
    }

    pub fn build_parameter_mapping(
        &self,
        parameter_type: &TypeRef,
        spec: ParameterMappingSpec,
    ) -> Result<ParameterMapping> {
        let result_map_id = self.apply_namespace_opt(spec.result_map.as_deref(), true)?;

        let java_type = match spec.java_type {
            Some(java_type) => java_type,
            None if spec.jdbc_type == Some(JdbcType::Cursor) => TypeRef::new("ResultSet"),
            None => self
                .config
                .types()
                .get(parameter_type)
                .and_then(|descriptor| descriptor.getter_type(&spec.property))
                .unwrap_or_else(TypeRef::object),
        };

        if let Some(type_handler) = &spec.type_handler {
            self.check_type_handler(type_handler)?;
        }

        Ok(ParameterMapping {
            property: spec.property,
            mode: spec.mode,
            java_type,
            jdbc_type: spec.jdbc_type,
            numeric_scale: spec.numeric_scale,
            type_handler: spec.type_handler,
            result_map_id,
        })
    }

    // ===== Result maps =====

    /// Builds one mapping of a result map whose target type is `result_type`.
    pub fn build_result_mapping(
        &self,
        result_type: &TypeRef,
        spec: ResultMappingSpec,
    ) -> Result<ResultMapping> {
        let java_type = spec
            .java_type
            .clone()
            .or_else(|| {
                spec.property
                    .as_deref()
                    .and_then(|property| self.config.types().setter_type(result_type, property))
            })
            .unwrap_or_else(TypeRef::object);

        if let Some(type_handler) = &spec.type_handler {
            self.check_type_handler(type_handler)?;
        }

        let has_nested_select = spec.nested_select.as_deref().is_some_and(|s| !s.is_empty());
        let has_foreign_column = spec.foreign_column.as_deref().is_some_and(|s| !s.is_empty());

        // A result set join lists key columns matched by position against the
        // foreign columns, not property=column pairs.
        let joins_result_set = spec.result_set.as_deref().is_some_and(|s| !s.is_empty());

        let composites = if has_nested_select || (has_foreign_column && !joins_result_set) {
            parse_composite_column_name(spec.column.as_deref())?
        } else {
            vec![]
        };

        let mut mapping = ResultMapping::new(
            spec.property.as_deref(),
            if composites.is_empty() {
                spec.column.as_deref()
            } else {
                None
            },
            java_type,
        );

        mapping.declared_java_type = spec.java_type;
        mapping.jdbc_type = spec.jdbc_type;
        mapping.type_handler = spec.type_handler;
        mapping.nested_select_id = self.apply_namespace_opt(spec.nested_select.as_deref(), true)?;
        mapping.nested_result_map_id =
            self.apply_namespace_opt(spec.nested_result_map.as_deref(), true)?;
        mapping.not_null_columns = parse_multiple_column_names(spec.not_null_column.as_deref());
        mapping.column_prefix = spec.column_prefix;
        mapping.flags = spec.flags;
        mapping.composites = composites;
        mapping.result_set = spec.result_set;
        mapping.foreign_column = spec.foreign_column;
        mapping.lazy = spec
            .lazy
            .unwrap_or(self.config.settings().lazy_loading_enabled);

        mapping.validate()?;
        Ok(mapping)
    }

    /// Registers a result map, merging in the mappings of its parent.
    ///
    /// Deferred while the parent is not registered.
    pub fn add_result_map(&self, spec: &ResultMapSpec) -> Result<Resolution<Arc<ResultMap>>> {
        let id = self.apply_current_namespace(&spec.id, false)?;
        let extends = self.apply_namespace_opt(spec.extends.as_deref(), true)?;

        let mut result_mappings = vec![];

        if let Some(extends) = &extends {
            let parent = match self.config.result_map(extends) {
                Ok(parent) => parent,
                Err(err) if err.is_unknown_id() && !err.is_ambiguous_id() => {
                    return Ok(Resolution::deferred(format!(
                        "Could not find a parent resultmap with id '{extends}'"
                    )));
                }
                Err(err) => return Err(err),
            };

            let declares_constructor = spec
                .result_mappings
                .iter()
                .any(|mapping| mapping.has_flag(ResultFlag::Constructor));

            result_mappings.extend(
                parent
                    .result_mappings()
                    .iter()
                    .filter(|inherited| {
                        !spec
                            .result_mappings
                            .iter()
                            .any(|own| own.same_property(inherited))
                    })
                    .filter(|inherited| {
                        !(declares_constructor && inherited.has_flag(ResultFlag::Constructor))
                    })
                    .cloned(),
            );
        }

        result_mappings.extend(spec.result_mappings.iter().cloned());

        let result_map = ResultMapBuilder::new(id, spec.ty.clone(), result_mappings)
            .discriminator(spec.discriminator.clone())
            .auto_mapping(spec.auto_mapping)
            .build(&ConstructorResolver::for_config(self.config))?;

        let result_map = Arc::new(result_map);
        self.config.add_result_map(result_map.clone())?;

        tracing::trace!(id = %result_map.id(), resource = %self.resource, "result map registered");
        Ok(Resolution::Resolved(result_map))
    }

    pub fn build_discriminator(
        &self,
        result_type: &TypeRef,
        spec: DiscriminatorSpec,
        discriminator_map: IndexMap<String, String>,
    ) -> Result<Discriminator> {
        let result_mapping = self.build_result_mapping(
            result_type,
            ResultMappingSpec {
                column: spec.column,
                java_type: spec.java_type,
                jdbc_type: spec.jdbc_type,
                type_handler: spec.type_handler,
                lazy: Some(false),
                ..Default::default()
            },
        )?;

        let discriminator_map: IndexMap<String, String> = discriminator_map
            .into_iter()
            .map(|(value, id)| Ok((value, self.apply_current_namespace(&id, true)?)))
            .collect::<Result<_>>()?;

        Ok(Discriminator {
            result_mapping,
            discriminator_map,
        })
    }

    // ===== Statements =====

    /// Registers a statement once its cache ref, result maps, and parameter
    /// map are available.
    pub fn add_mapped_statement(&self, spec: StatementSpec) -> Result<Resolution<Arc<MappedStatement>>> {
        let namespace = self.current_namespace()?;

        if self.config.has_unresolved_cache_ref(namespace) {
            return Ok(Resolution::deferred("Cache-ref not yet resolved"));
        }

        let id = self.apply_current_namespace(&spec.id, false)?;

        let result_maps = match self.statement_result_maps(&id, &spec)? {
            Resolution::Resolved(result_maps) => result_maps,
            Resolution::Deferred(reason) => return Ok(Resolution::Deferred(reason)),
        };

        let parameter_map_id = match self.apply_namespace_opt(spec.parameter_map.as_deref(), true)? {
            Some(name) if !self.config.has_parameter_map(&name) => {
                return Ok(Resolution::deferred(format!(
                    "Could not find parameter map {name}"
                )));
            }
            other => other,
        };

        let is_select = spec.kind.is_select();

        let statement = MappedStatement {
            id,
            resource: self.resource.clone(),
            kind: spec.kind,
            database_id: spec.database_id,
            parameter_type: spec.parameter_type,
            parameter_map_id,
            result_maps,
            result_sets: split_list(spec.result_sets.as_deref()),
            key_properties: split_list(spec.key_property.as_deref()),
            key_columns: split_list(spec.key_column.as_deref()),
            timeout: spec.timeout,
            fetch_size: spec.fetch_size,
            flush_cache: spec.flush_cache.unwrap_or(!is_select),
            use_cache: spec.use_cache.unwrap_or(is_select),
            result_ordered: spec.result_ordered,
            cache: self.config.namespace_cache(namespace),
            sql: spec.sql,
        };

        let statement = self.config.add_mapped_statement(statement)?;
        tracing::trace!(id = %statement.id, resource = %self.resource, "statement registered");
        Ok(Resolution::Resolved(statement))
    }

    fn statement_result_maps(
        &self,
        statement_id: &str,
        spec: &StatementSpec,
    ) -> Result<Resolution<Vec<Arc<ResultMap>>>> {
        if let Some(names) = &spec.result_map {
            let mut result_maps = vec![];

            for name in names.split(',').map(str::trim).filter(|name| !name.is_empty()) {
                let name = self.apply_current_namespace(name, true)?;
                match self.config.result_map(&name) {
                    Ok(result_map) => result_maps.push(result_map),
                    Err(_) => {
                        return Ok(Resolution::deferred(format!(
                            "Could not find result map '{name}' referenced from '{statement_id}'"
                        )))
                    }
                }
            }

            return Ok(Resolution::Resolved(result_maps));
        }

        if let Some(result_type) = &spec.result_type {
            let inline = ResultMapBuilder::new(format!("{statement_id}-Inline"), result_type.clone(), vec![])
                .build(&ConstructorResolver::for_config(self.config))?;
            return Ok(Resolution::Resolved(vec![Arc::new(inline)]));
        }

        Ok(Resolution::Resolved(vec![]))
    }

    fn check_type_handler(&self, ty: &TypeRef) -> Result<()> {
        match self.config.types().kind(ty) {
            Some(TypeKind::TypeHandler) => Ok(()),
            _ => Err(Error::invalid_mapping(format!(
                "Type {ty} is not a valid TypeHandler because it is not registered as one"
            ))),
        }
    }
}

/// Splits `{prop=col, prop2=col2}` into property/column pairs. Returns
/// nothing for a plain column name.
fn parse_composite_column_name(column: Option<&str>) -> Result<Vec<ResultMapping>> {
    let Some(column) = column.filter(|column| column.contains('=') || column.contains(',')) else {
        return Ok(vec![]);
    };

    let tokens: Vec<&str> = column
        .split(|c| matches!(c, '{' | '}' | '=' | ',' | ' '))
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() % 2 != 0 {
        return Err(Error::invalid_mapping(format!(
            "composite column '{column}' must list property=column pairs"
        )));
    }

    Ok(tokens
        .chunks(2)
        .map(|pair| ResultMapping::new(Some(pair[0]), Some(pair[1]), TypeRef::object()))
        .collect())
}

/// Parses `notNullColumn`, which is a single column or a comma list,
/// optionally braced.
fn parse_multiple_column_names(column: Option<&str>) -> IndexSet<String> {
    match column {
        None => IndexSet::new(),
        Some(column) if column.contains(',') => column
            .split(|c| matches!(c, '{' | '}' | ',' | ' '))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        Some(column) => IndexSet::from([column.to_string()]),
    }
}

fn split_list(list: Option<&str>) -> Vec<String> {
    list.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
