use crate::builder::{MapperBuilderAssistant, ResultMapSpec};
use crate::mapping::{Cache, ResultMap};
use crate::{Configuration, Error, Resolution, Result};
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::Arc;

/// A queue of elements waiting on references that were not loaded yet.
///
/// Draining holds a per-queue lock for the whole pass but iterates a snapshot
/// taken out of the queue, so elements pushed while draining (by a nested
/// build on the same thread, or by another thread) are kept for the next
/// pass.
#[derive(Debug)]
pub struct PendingQueue<T> {
    items: Mutex<Vec<Pending<T>>>,
    drain: ReentrantMutex<()>,
}

/// A queued element and the reason its last attempt was deferred.
#[derive(Debug, Clone)]
pub struct Pending<T> {
    pub item: T,
    pub reason: Error,
}

impl<T> PendingQueue<T> {
    pub fn new() -> PendingQueue<T> {
        PendingQueue {
            items: Mutex::new(vec![]),
            drain: ReentrantMutex::new(()),
        }
    }

    pub fn push(&self, item: T, reason: Error) {
        self.items.lock().push(Pending { item, reason });
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Returns `true` if any queued element matches `f`.
    pub fn any(&self, f: impl Fn(&T) -> bool) -> bool {
        self.items.lock().iter().any(|pending| f(&pending.item))
    }

    /// Visits every queued element with its last deferral reason.
    pub fn for_each(&self, mut f: impl FnMut(&T, &Error)) {
        for pending in self.items.lock().iter() {
            f(&pending.item, &pending.reason);
        }
    }

    /// Retries every queued element once, removing those that resolve.
    ///
    /// Returns how many elements resolved. A fatal error stops the pass: the
    /// failing element is dropped, the rest are put back, and the error is
    /// returned.
    pub fn drain_with(&self, mut f: impl FnMut(&T) -> Result<Resolution<()>>) -> Result<usize> {
        let _drain = self.drain.lock();

        let snapshot = std::mem::take(&mut *self.items.lock());
        let mut kept = Vec::with_capacity(snapshot.len());
        let mut resolved = 0;

        let mut iter = snapshot.into_iter();
        while let Some(pending) = iter.next() {
            match f(&pending.item) {
                Ok(Resolution::Resolved(())) => resolved += 1,
                Ok(Resolution::Deferred(reason)) => kept.push(Pending {
                    item: pending.item,
                    reason,
                }),
                Err(err) => {
                    kept.extend(iter);
                    self.restore(kept);
                    return Err(err);
                }
            }
        }

        self.restore(kept);
        Ok(resolved)
    }

    /// Puts unresolved elements back ahead of anything pushed meanwhile.
    fn restore(&self, kept: Vec<Pending<T>>) {
        let mut items = self.items.lock();
        let pushed = std::mem::replace(&mut *items, kept);
        items.extend(pushed);
    }
}

impl<T> Default for PendingQueue<T> {
    fn default() -> Self {
        PendingQueue::new()
    }
}

/// Retries registering a result map whose parent was missing.
#[derive(Debug, Clone)]
pub struct ResultMapResolver {
    pub resource: String,
    pub namespace: String,

    /// Namespace-qualified id the map will be registered under
    pub id: String,

    pub spec: ResultMapSpec,
}

impl ResultMapResolver {
    pub fn new(resource: &str, namespace: &str, id: String, spec: ResultMapSpec) -> Self {
        ResultMapResolver {
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            id,
            spec,
        }
    }

    pub fn resolve(&self, config: &Configuration) -> Result<Resolution<Arc<ResultMap>>> {
        let mut assistant = MapperBuilderAssistant::new(config, &self.resource);
        assistant.set_namespace(&self.namespace)?;
        assistant.add_result_map(&self.spec)
    }
}

/// Retries binding a namespace to the cache of another namespace.
#[derive(Debug, Clone)]
pub struct CacheRefResolver {
    pub resource: String,
    pub namespace: String,
    pub referenced: String,
}

impl CacheRefResolver {
    pub fn new(resource: &str, namespace: &str, referenced: &str) -> Self {
        CacheRefResolver {
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            referenced: referenced.to_string(),
        }
    }

    pub fn resolve(&self, config: &Configuration) -> Result<Resolution<Arc<Cache>>> {
        let mut assistant = MapperBuilderAssistant::new(config, &self.resource);
        assistant.set_namespace(&self.namespace)?;
        assistant.use_cache_ref(&self.referenced)
    }
}

/// A statement waiting on a result map, parameter map, SQL fragment, or cache
/// ref.
///
/// Statements are built by the document layer, so the queue holds them behind
/// this trait.
pub trait PendingStatement: Send + Sync + core::fmt::Debug {
    /// Namespace-qualified statement id
    fn id(&self) -> &str;

    fn resource(&self) -> &str;

    fn resolve(&self, config: &Configuration) -> Result<Resolution<()>>;
}
