use crate::TypeRef;
use indexmap::IndexMap;
use std::time::Duration;

/// Second-level cache declared by a namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Cache {
    /// Namespace the cache was declared in
    pub id: String,

    pub implementation: TypeRef,

    /// Eviction decorators, outermost last
    pub decorators: Vec<TypeRef>,

    pub flush_interval: Option<Duration>,

    pub size: Option<u32>,

    pub read_write: bool,

    pub blocking: bool,

    pub properties: IndexMap<String, String>,
}

#[derive(Debug)]
pub struct CacheBuilder {
    id: String,
    implementation: Option<TypeRef>,
    decorators: Vec<TypeRef>,
    flush_interval: Option<Duration>,
    size: Option<u32>,
    read_write: bool,
    blocking: bool,
    properties: IndexMap<String, String>,
}

impl Cache {
    pub const DEFAULT_IMPLEMENTATION: &'static str = "PerpetualCache";
    pub const DEFAULT_EVICTION: &'static str = "LruCache";

    pub fn builder(id: impl Into<String>) -> CacheBuilder {
        CacheBuilder {
            id: id.into(),
            implementation: None,
            decorators: vec![],
            flush_interval: None,
            size: None,
            read_write: true,
            blocking: false,
            properties: IndexMap::new(),
        }
    }
}

impl CacheBuilder {
    pub fn implementation(&mut self, ty: TypeRef) -> &mut Self {
        self.implementation = Some(ty);
        self
    }

    pub fn add_decorator(&mut self, ty: TypeRef) -> &mut Self {
        self.decorators.push(ty);
        self
    }

    pub fn flush_interval(&mut self, millis: Option<u64>) -> &mut Self {
        self.flush_interval = millis.map(Duration::from_millis);
        self
    }

    pub fn size(&mut self, size: Option<u32>) -> &mut Self {
        self.size = size;
        self
    }

    pub fn read_write(&mut self, read_write: bool) -> &mut Self {
        self.read_write = read_write;
        self
    }

    pub fn blocking(&mut self, blocking: bool) -> &mut Self {
        self.blocking = blocking;
        self
    }

    pub fn properties(&mut self, properties: IndexMap<String, String>) -> &mut Self {
        self.properties = properties;
        self
    }

    pub fn build(&self) -> Cache {
        let (implementation, decorators) = match &self.implementation {
            Some(implementation) => (implementation.clone(), self.decorators.clone()),
            // No implementation given: perpetual storage, with LRU eviction
            // unless another policy was given.
            None if self.decorators.is_empty() => (
                TypeRef::new(Cache::DEFAULT_IMPLEMENTATION),
                vec![TypeRef::new(Cache::DEFAULT_EVICTION)],
            ),
            None => (
                TypeRef::new(Cache::DEFAULT_IMPLEMENTATION),
                self.decorators.clone(),
            ),
        };

        Cache {
            id: self.id.clone(),
            implementation,
            decorators,
            flush_interval: self.flush_interval,
            size: self.size,
            read_write: self.read_write,
            blocking: self.blocking,
            properties: self.properties.clone(),
        }
    }
}
