use crate::{Error, Result};
use indexmap::IndexMap;

/// An id-keyed table that also answers to short names.
///
/// Every entry registered under a dotted id (`ns.studentMap`) can also be
/// found by the part after the last dot (`studentMap`), unless two entries
/// claim the same short name, in which case the short name is ambiguous.
#[derive(Debug, Clone)]
pub struct StrictMap<V> {
    /// Used in error messages
    name: &'static str,

    entries: IndexMap<String, Slot<V>>,

    /// Full ids, in registration order
    ids: Vec<String>,
}

#[derive(Debug, Clone)]
enum Slot<V> {
    Value(V),
    Ambiguous(String),
}

impl<V: Clone> StrictMap<V> {
    pub fn new(name: &'static str) -> StrictMap<V> {
        StrictMap {
            name,
            entries: IndexMap::new(),
            ids: vec![],
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn insert(&mut self, id: impl Into<String>, value: V) -> Result<()> {
        let id = id.into();

        if self.entries.contains_key(&id) {
            return Err(Error::duplicate_id(self.name, id));
        }

        if let Some(short) = short_name(&id) {
            let slot = match self.entries.get(short) {
                None => Slot::Value(value.clone()),
                Some(_) => Slot::Ambiguous(short.to_string()),
            };
            self.entries.insert(short.to_string(), slot);
        }

        self.entries.insert(id.clone(), Slot::Value(value));
        self.ids.push(id);
        Ok(())
    }

    /// Looks up a full or short id.
    pub fn get(&self, id: &str) -> Result<&V> {
        match self.entries.get(id) {
            Some(Slot::Value(value)) => Ok(value),
            Some(Slot::Ambiguous(subject)) => Err(Error::ambiguous_id(self.name, id, subject.as_str())),
            None => Err(Error::unknown_id(self.name, id)),
        }
    }

    /// Like [`StrictMap::get`], but `None` when the id is missing or ambiguous.
    pub fn find(&self, id: &str) -> Option<&V> {
        self.get(id).ok()
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Full ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Values registered under full ids, in registration order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.ids.iter().filter_map(|id| match self.entries.get(id) {
            Some(Slot::Value(value)) => Some(value),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn short_name(id: &str) -> Option<&str> {
    id.rsplit_once('.').map(|(_, short)| short)
}
