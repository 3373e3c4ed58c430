//! Bounded, insertion-ordered store of structures keyed by id.
//!
//! A store holds one structure kind and never grows past its limit. When a
//! new key arrives at capacity the oldest surviving key is evicted first
//! (FIFO: reads do not refresh position). A limit of zero disables caching
//! for the store entirely.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::error::StructureError;
use crate::structure::{Factory, Origin, Resolvable, Structure, raw_id};

/// Result of [`DataStore::add`].
#[derive(Debug)]
pub enum Added<'a, S> {
    /// An existing entry was patched in place.
    Patched(&'a S),
    /// A new structure was constructed and cached.
    Stored(&'a S),
    /// A new structure was constructed but not cached.
    Detached(S),
}

impl<S> Added<'_, S> {
    /// Whether the structure lives in the store.
    pub fn is_cached(&self) -> bool {
        !matches!(self, Added::Detached(_))
    }

    /// Whether an existing entry was patched.
    pub fn is_patch(&self) -> bool {
        matches!(self, Added::Patched(_))
    }
}

impl<S: Clone> Added<'_, S> {
    /// Take an owned copy of the structure.
    pub fn into_owned(self) -> S {
        match self {
            Added::Patched(s) | Added::Stored(s) => s.clone(),
            Added::Detached(s) => s,
        }
    }
}

impl<S> Deref for Added<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        match self {
            Added::Patched(s) | Added::Stored(s) => s,
            Added::Detached(s) => s,
        }
    }
}

/// Capacity-limited store of structures.
pub struct DataStore<S> {
    /// Entries by id.
    entries: HashMap<String, S>,
    /// Keys in first-insertion order (front is oldest).
    order: VecDeque<String>,
    /// Maximum number of entries; zero disables caching.
    limit: usize,
    /// Session-wide cache switch, consulted by `add`.
    cache_enabled: bool,
    /// Constructor for new structures.
    factory: Factory<S>,
}

impl<S: Structure> DataStore<S> {
    /// Create an empty store.
    pub fn new(factory: Factory<S>, limit: usize, cache_enabled: bool) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            limit,
            cache_enabled,
            factory,
        }
    }

    /// Create an enabled store with no practical limit.
    pub fn unbounded(factory: Factory<S>) -> Self {
        Self::new(factory, usize::MAX, true)
    }

    /// Create a store seeded from raw records through [`add`](Self::add).
    pub fn from_raw<'v, I>(
        factory: Factory<S>,
        limit: usize,
        cache_enabled: bool,
        records: I,
    ) -> Result<Self, StructureError>
    where
        I: IntoIterator<Item = &'v Value>,
    {
        let mut store = Self::new(factory, limit, cache_enabled);
        store.extend_raw(records)?;
        Ok(store)
    }

    /// The configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether `add` caches newly constructed structures.
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry with `key` is cached.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get an entry by id.
    pub fn get(&self, key: &str) -> Option<&S> {
        self.entries.get(key)
    }

    /// Get a mutable entry by id. Does not change its position.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut S> {
        self.entries.get_mut(key)
    }

    /// The oldest surviving key.
    pub fn first_key(&self) -> Option<&str> {
        self.order.front().map(String::as_str)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &S> {
        self.iter().map(|(_, v)| v)
    }

    /// `(id, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &S)> {
        self.order
            .iter()
            .filter_map(|k| self.entries.get(k).map(|v| (k.as_str(), v)))
    }

    /// Resolve an id or a structure into a cached structure.
    ///
    /// An id resolves to the cached entry, if any. A structure resolves to
    /// itself.
    pub fn resolve<'a>(&'a self, input: impl Into<Resolvable<'a, S>>) -> Option<&'a S> {
        match input.into() {
            Resolvable::Id(id) => self.entries.get(id),
            Resolvable::Structure(s) => Some(s),
        }
    }

    /// Resolve an id or a structure into an id.
    ///
    /// Ids are echoed back without checking the store.
    pub fn resolve_id<'a>(&self, input: impl Into<Resolvable<'a, S>>) -> Option<&'a str>
    where
        S: 'a,
    {
        match input.into() {
            Resolvable::Id(id) => Some(id),
            Resolvable::Structure(s) => Some(s.id()),
        }
    }

    /// Insert an entry, evicting the oldest one if a new key arrives at
    /// capacity.
    ///
    /// Re-setting an existing key replaces its value in place and keeps its
    /// position. A zero-limit store ignores the call.
    pub fn set(&mut self, key: impl Into<String>, value: S) -> &mut Self {
        let key = key.into();
        if self.limit == 0 {
            trace!(kind = %S::KIND, key = %key, "store: caching disabled, dropping entry");
            return self;
        }

        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            trace!(kind = %S::KIND, key = %key, "store: entry replaced");
            return self;
        }

        if self.entries.len() >= self.limit {
            self.evict_oldest();
        }

        self.order.push_back(key.clone());
        trace!(kind = %S::KIND, key = %key, size = self.entries.len() + 1, "store: entry inserted");
        self.entries.insert(key, value);
        self
    }

    /// Add a raw record through the write path.
    ///
    /// An existing entry with the same id is patched in place and returned.
    /// Otherwise a new structure is constructed and, when caching is
    /// enabled, inserted with [`set`](Self::set).
    pub fn add(&mut self, data: &Value) -> Result<Added<'_, S>, StructureError> {
        self.add_from(data, &Origin::default())
    }

    /// [`add`](Self::add) with an explicit origin for new structures.
    pub fn add_from(&mut self, data: &Value, origin: &Origin) -> Result<Added<'_, S>, StructureError> {
        let patched = match raw_id(data) {
            Some(id) => match self.entries.get_mut(id) {
                Some(existing) => {
                    existing.patch(data);
                    Some(id)
                }
                None => None,
            },
            None => None,
        };
        if let Some(id) = patched {
            trace!(kind = %S::KIND, key = %id, "store: entry patched");
            return Ok(Added::Patched(&self.entries[id]));
        }

        let entry = (self.factory)(data, origin)?;
        if !self.cache_enabled || self.limit == 0 {
            return Ok(Added::Detached(entry));
        }

        let id = entry.id().to_string();
        self.set(id.clone(), entry);
        Ok(Added::Stored(&self.entries[&id]))
    }

    /// Add every record in `records`, returning how many were processed.
    pub fn extend_raw<'v, I>(&mut self, records: I) -> Result<usize, StructureError>
    where
        I: IntoIterator<Item = &'v Value>,
    {
        let mut count = 0;
        for data in records {
            self.add(data)?;
            count += 1;
        }
        Ok(count)
    }

    /// Remove an entry.
    pub fn delete(&mut self, key: &str) -> Option<S> {
        let removed = self.entries.remove(key)?;
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        trace!(kind = %S::KIND, key = %key, "store: entry deleted");
        Some(removed)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn evict_oldest(&mut self) -> Option<(String, S)> {
        let key = self.order.pop_front()?;
        let value = self.entries.remove(&key)?;
        trace!(kind = %S::KIND, key = %key, limit = self.limit, "store: evicted oldest entry");
        Some((key, value))
    }
}

impl<S> fmt::Debug for DataStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("keys", &self.order)
            .field("limit", &self.limit)
            .field("cache_enabled", &self.cache_enabled)
            .finish()
    }
}

/// A store serializes as its keys in insertion order.
impl<S> Serialize for DataStore<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serializer.collect_seq(self.order.iter())
    }
}
