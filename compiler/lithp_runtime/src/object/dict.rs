//! Dict container.

use lithp_ir::TypeTag;
use rustc_hash::FxHashMap;

use super::{Object, Structural};
use crate::errors::{key_not_found, RuntimeResult};
use crate::heap::SharedCell;
use crate::teardown::release;

/// String-keyed mapping of objects. Iteration order is unspecified; the
/// rendering and `keys` sort by key.
#[derive(Clone)]
pub struct Dict(SharedCell<FxHashMap<String, Object>>);

impl Dict {
    pub fn new() -> Self {
        Dict(SharedCell::new(FxHashMap::default()))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Shared handle to the entry for `key`.
    pub fn get(&self, key: &str) -> Option<Object> {
        self.0.borrow().get(key).cloned()
    }

    /// Insert or overwrite, returning the previous entry.
    pub fn insert(&self, key: impl Into<String>, value: Object) -> Option<Object> {
        self.0.borrow_mut().insert(key.into(), value)
    }

    pub fn remove(&self, key: &str) -> Option<Object> {
        self.0.borrow_mut().remove(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.borrow().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Entries in key order.
    pub(crate) fn sorted_entries(&self) -> Vec<(String, Object)> {
        let mut entries: Vec<(String, Object)> = self
            .0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn ptr_eq(&self, other: &Dict) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        self.0.addr()
    }
}

impl Default for Dict {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Dict {
    fn drop(&mut self) {
        if let Some(entries) = self.0.take_unique().filter(|entries| !entries.is_empty()) {
            release(entries.into_values());
        }
    }
}

impl Structural for Dict {
    fn tag(&self) -> TypeTag {
        TypeTag::Dict
    }

    fn len(&self) -> usize {
        Dict::len(self)
    }

    fn get_key(&self, key: &str) -> RuntimeResult {
        self.get(key).ok_or_else(|| key_not_found(key))
    }
}
