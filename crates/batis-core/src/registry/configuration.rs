use super::{CacheRefResolver, PendingQueue, PendingStatement, ResultMapResolver, Settings, StrictMap};
use crate::mapping::{Cache, MappedStatement, ParameterMap, ResultMap, SqlFragment};
use crate::{Error, Result, TypeRef, TypeRegistry, UnresolvedItem};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::sync::Arc;

/// Mapping registry for one load session.
///
/// Created once, shared by reference with every document parsed in the
/// session, and read by the runtime afterwards.
#[derive(Debug)]
pub struct Configuration {
    settings: Settings,
    types: TypeRegistry,

    /// Resource keys already parsed, including `namespace:<ns>` binding keys
    loaded_resources: RwLock<IndexSet<String>>,

    /// Mapper types bound to a namespace
    mappers: RwLock<IndexSet<TypeRef>>,

    /// Caches declared by namespaces, keyed by namespace
    caches: RwLock<StrictMap<Arc<Cache>>>,

    /// Namespace to the namespace whose cache it references
    cache_refs: RwLock<IndexMap<String, String>>,

    /// Namespaces whose cache ref has not resolved yet
    unresolved_cache_refs: RwLock<IndexSet<String>>,

    /// Cache in effect for each namespace, own or referenced
    namespace_caches: RwLock<IndexMap<String, Arc<Cache>>>,

    result_maps: RwLock<StrictMap<Arc<ResultMap>>>,
    parameter_maps: RwLock<StrictMap<Arc<ParameterMap>>>,
    sql_fragments: RwLock<StrictMap<SqlFragment>>,
    mapped_statements: RwLock<StrictMap<Arc<MappedStatement>>>,

    pending_result_maps: PendingQueue<ResultMapResolver>,
    pending_cache_refs: PendingQueue<CacheRefResolver>,
    pending_statements: PendingQueue<Arc<dyn PendingStatement>>,
}

#[derive(Debug, Default)]
pub struct Builder {
    settings: Settings,
    types: Option<TypeRegistry>,
}

impl Builder {
    pub fn settings(&mut self, settings: Settings) -> &mut Self {
        self.settings = settings;
        self
    }

    pub fn types(&mut self, types: TypeRegistry) -> &mut Self {
        self.types = Some(types);
        self
    }

    pub fn build(&self) -> Configuration {
        Configuration::new(
            self.settings.clone(),
            self.types.clone().unwrap_or_default(),
        )
    }
}

impl Configuration {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn new(settings: Settings, types: TypeRegistry) -> Configuration {
        Configuration {
            settings,
            types,
            loaded_resources: RwLock::new(IndexSet::new()),
            mappers: RwLock::new(IndexSet::new()),
            caches: RwLock::new(StrictMap::new("Caches collection")),
            cache_refs: RwLock::new(IndexMap::new()),
            unresolved_cache_refs: RwLock::new(IndexSet::new()),
            namespace_caches: RwLock::new(IndexMap::new()),
            result_maps: RwLock::new(StrictMap::new("Result Maps collection")),
            parameter_maps: RwLock::new(StrictMap::new("Parameter Maps collection")),
            sql_fragments: RwLock::new(StrictMap::new("XML fragments parsed from previous mappers")),
            mapped_statements: RwLock::new(StrictMap::new("Mapped Statements collection")),
            pending_result_maps: PendingQueue::new(),
            pending_cache_refs: PendingQueue::new(),
            pending_statements: PendingQueue::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn database_id(&self) -> Option<&str> {
        self.settings.database_id.as_deref()
    }

    // ===== Loaded resources =====

    pub fn is_resource_loaded(&self, resource: &str) -> bool {
        self.loaded_resources.read().contains(resource)
    }

    pub fn add_loaded_resource(&self, resource: impl Into<String>) {
        self.loaded_resources.write().insert(resource.into());
    }

    // ===== Mapper bindings =====

    /// Binds a mapper type. Returns `false` if it was already bound.
    pub fn add_mapper(&self, ty: TypeRef) -> bool {
        self.mappers.write().insert(ty)
    }

    pub fn has_mapper(&self, ty: &TypeRef) -> bool {
        self.mappers.read().contains(ty)
    }

    // ===== Caches =====

    /// Registers a namespace's own cache and makes it the namespace's cache.
    pub fn add_cache(&self, cache: Cache) -> Result<Arc<Cache>> {
        let cache = Arc::new(cache);
        self.caches.write().insert(cache.id.clone(), cache.clone())?;
        self.namespace_caches
            .write()
            .insert(cache.id.clone(), cache.clone());
        Ok(cache)
    }

    /// Cache declared by the given namespace.
    pub fn cache(&self, id: &str) -> Option<Arc<Cache>> {
        self.caches.read().find(id).cloned()
    }

    pub fn caches(&self) -> Vec<Arc<Cache>> {
        self.caches.read().values().cloned().collect()
    }

    /// Records that `namespace` shares the cache of `referenced`. The share
    /// stays unresolved until [`Configuration::resolve_cache_ref`].
    pub fn add_cache_ref(&self, namespace: &str, referenced: &str) {
        self.cache_refs
            .write()
            .insert(namespace.to_string(), referenced.to_string());
        self.unresolved_cache_refs
            .write()
            .insert(namespace.to_string());
    }

    pub fn cache_ref(&self, namespace: &str) -> Option<String> {
        self.cache_refs.read().get(namespace).cloned()
    }

    /// Marks the cache ref of `namespace` resolved. A namespace that declares
    /// its own cache keeps it.
    pub fn resolve_cache_ref(&self, namespace: &str, cache: Arc<Cache>) {
        self.unresolved_cache_refs.write().shift_remove(namespace);

        if !self.caches.read().contains_key(namespace) {
            self.namespace_caches
                .write()
                .insert(namespace.to_string(), cache);
        }
    }

    pub fn has_unresolved_cache_ref(&self, namespace: &str) -> bool {
        self.unresolved_cache_refs.read().contains(namespace)
    }

    /// Cache used by statements of a namespace.
    pub fn namespace_cache(&self, namespace: &str) -> Option<Arc<Cache>> {
        self.namespace_caches.read().get(namespace).cloned()
    }

    // ===== Result maps =====

    /// Registers a result map and propagates nested result map flags through
    /// discriminators in both directions.
    pub fn add_result_map(&self, result_map: Arc<ResultMap>) -> Result<()> {
        let mut result_maps = self.result_maps.write();
        result_maps.insert(result_map.id.clone(), result_map.clone())?;

        // A discriminated map is nested if any of its registered cases is.
        if !result_map.has_nested_result_maps() {
            if let Some(discriminator) = &result_map.discriminator {
                let nested_case = discriminator
                    .result_map_ids()
                    .filter_map(|id| result_maps.find(id))
                    .any(|case| case.has_nested_result_maps());

                if nested_case {
                    result_map.force_nested_result_maps();
                }
            }
        }

        // A nested map makes every discriminated map that names it nested.
        if result_map.has_nested_result_maps() {
            for existing in result_maps.values() {
                if existing.has_nested_result_maps() {
                    continue;
                }
                if let Some(discriminator) = &existing.discriminator {
                    if discriminator.result_map_ids().any(|id| id == result_map.id) {
                        existing.force_nested_result_maps();
                    }
                }
            }
        }

        Ok(())
    }

    /// Looks up a result map by full or short id.
    ///
    /// When the map is missing because it is still queued, the error says so.
    pub fn result_map(&self, id: &str) -> Result<Arc<ResultMap>> {
        match self.result_maps.read().get(id) {
            Ok(result_map) => Ok(result_map.clone()),
            Err(err) if err.is_unknown_id() && self.is_result_map_pending(id) => {
                Err(Error::pending_id("Result Maps collection", id))
            }
            Err(err) => Err(err),
        }
    }

    pub fn has_result_map(&self, id: &str) -> bool {
        self.result_maps.read().contains_key(id)
    }

    pub fn result_maps(&self) -> Vec<Arc<ResultMap>> {
        self.result_maps.read().values().cloned().collect()
    }

    pub fn result_map_ids(&self) -> Vec<String> {
        self.result_maps.read().ids().map(str::to_string).collect()
    }

    fn is_result_map_pending(&self, id: &str) -> bool {
        self.pending_result_maps
            .any(|pending| pending.id == id || pending.id.rsplit('.').next() == Some(id))
    }

    // ===== Parameter maps =====

    pub fn add_parameter_map(&self, parameter_map: ParameterMap) -> Result<Arc<ParameterMap>> {
        let parameter_map = Arc::new(parameter_map);
        self.parameter_maps
            .write()
            .insert(parameter_map.id.clone(), parameter_map.clone())?;
        Ok(parameter_map)
    }

    pub fn parameter_map(&self, id: &str) -> Result<Arc<ParameterMap>> {
        self.parameter_maps.read().get(id).cloned()
    }

    pub fn has_parameter_map(&self, id: &str) -> bool {
        self.parameter_maps.read().contains_key(id)
    }

    // ===== SQL fragments =====

    pub fn add_sql_fragment(&self, fragment: SqlFragment) -> Result<()> {
        self.sql_fragments
            .write()
            .insert(fragment.id.clone(), fragment)
    }

    pub fn sql_fragment(&self, id: &str) -> Option<SqlFragment> {
        self.sql_fragments.read().find(id).cloned()
    }

    // ===== Mapped statements =====

    pub fn add_mapped_statement(&self, statement: MappedStatement) -> Result<Arc<MappedStatement>> {
        let statement = Arc::new(statement);
        self.mapped_statements
            .write()
            .insert(statement.id.clone(), statement.clone())?;
        Ok(statement)
    }

    pub fn mapped_statement(&self, id: &str) -> Result<Arc<MappedStatement>> {
        match self.mapped_statements.read().get(id) {
            Ok(statement) => Ok(statement.clone()),
            Err(err) if err.is_unknown_id() && self.is_statement_pending(id) => {
                Err(Error::pending_id("Mapped Statements collection", id))
            }
            Err(err) => Err(err),
        }
    }

    pub fn has_statement(&self, id: &str) -> bool {
        self.mapped_statements.read().contains_key(id)
    }

    pub fn mapped_statements(&self) -> Vec<Arc<MappedStatement>> {
        self.mapped_statements.read().values().cloned().collect()
    }

    fn is_statement_pending(&self, id: &str) -> bool {
        self.pending_statements.any(|pending| pending.id() == id)
    }

    // ===== Deferred work =====

    pub fn add_incomplete_result_map(&self, resolver: ResultMapResolver, reason: Error) {
        tracing::debug!(id = %resolver.id, resource = %resolver.resource, %reason, "result map deferred");
        self.pending_result_maps.push(resolver, reason);
    }

    pub fn add_incomplete_cache_ref(&self, resolver: CacheRefResolver, reason: Error) {
        tracing::debug!(
            namespace = %resolver.namespace,
            referenced = %resolver.referenced,
            %reason,
            "cache ref deferred"
        );
        self.pending_cache_refs.push(resolver, reason);
    }

    pub fn add_incomplete_statement(&self, statement: Arc<dyn PendingStatement>, reason: Error) {
        tracing::debug!(id = %statement.id(), resource = %statement.resource(), %reason, "statement deferred");
        self.pending_statements.push(statement, reason);
    }

    pub fn pending_result_maps(&self) -> &PendingQueue<ResultMapResolver> {
        &self.pending_result_maps
    }

    pub fn pending_cache_refs(&self) -> &PendingQueue<CacheRefResolver> {
        &self.pending_cache_refs
    }

    pub fn pending_statements(&self) -> &PendingQueue<Arc<dyn PendingStatement>> {
        &self.pending_statements
    }

    /// Number of queued elements across all three queues.
    pub fn pending_count(&self) -> usize {
        self.pending_result_maps.len() + self.pending_cache_refs.len() + self.pending_statements.len()
    }

    /// Lists every queued element with the deepest cause of its last
    /// deferral.
    pub fn unresolved(&self) -> Vec<UnresolvedItem> {
        let mut items = vec![];

        self.pending_result_maps.for_each(|pending, reason| {
            items.push(UnresolvedItem {
                kind: "result map",
                id: pending.id.clone(),
                resource: pending.resource.clone(),
                reason: reason.root().to_string(),
            });
        });

        self.pending_cache_refs.for_each(|pending, reason| {
            items.push(UnresolvedItem {
                kind: "cache-ref",
                id: pending.namespace.clone(),
                resource: pending.resource.clone(),
                reason: reason.root().to_string(),
            });
        });

        self.pending_statements.for_each(|pending, reason| {
            items.push(UnresolvedItem {
                kind: "statement",
                id: pending.id().to_string(),
                resource: pending.resource().to_string(),
                reason: reason.root().to_string(),
            });
        });

        items
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(Settings::default(), TypeRegistry::new())
    }
}
