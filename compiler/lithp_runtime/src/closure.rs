//! Lexical scopes.
//!
//! A `Closure` is a string-keyed binding table linked to its parent scope.
//! Scopes form a rooted tree. Lookups and delegated writes walk from the
//! innermost scope outwards; `define_local` never leaves the current scope.
//!
//! Links:
//! - `parent` is strong, so a child keeps its ancestors alive.
//! - `topmost` is a strong handle to the tree's root, computed once at
//!   construction. The root stores nothing and answers with itself.
//! - `owner` is a weak back-reference to the op-chain that created the
//!   scope. Standalone scopes have no owner.
//!
//! No link points from an ancestor to a descendant, so the tree never forms
//! a reference cycle.

use std::cell::RefCell;
use std::fmt;

use lithp_ir::TypeTag;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::errors::{undefined_name, RuntimeResult};
use crate::heap::{Heap, WeakHeap};
use crate::object::{Object, Structural};
use crate::op_chain::{ChainData, OpChain};
use crate::teardown::release;

/// Handle to a shared scope. Clones alias the same bindings.
#[derive(Clone)]
pub struct Closure(Heap<Scope>);

pub(crate) struct Scope {
    bindings: RefCell<FxHashMap<String, Object>>,
    parent: Option<Closure>,
    /// `None` for the root.
    topmost: Option<Closure>,
    owner: WeakHeap<ChainData>,
    depth: usize,
}

impl Closure {
    /// Standalone root scope.
    pub fn root() -> Self {
        Closure::owned_by(WeakHeap::dangling(), None)
    }

    /// Standalone scope one level below `parent`.
    pub fn with_parent(parent: &Closure) -> Self {
        Closure::owned_by(WeakHeap::dangling(), Some(parent))
    }

    pub(crate) fn owned_by(owner: WeakHeap<ChainData>, parent: Option<&Closure>) -> Self {
        let (topmost, depth) = match parent {
            Some(p) => (Some(p.topmost()), p.depth() + 1),
            None => (None, 0),
        };
        Closure(Heap::new(Scope {
            bindings: RefCell::new(FxHashMap::default()),
            parent: parent.cloned(),
            topmost,
            owner,
            depth,
        }))
    }

    /// This scope followed by each ancestor, innermost first.
    fn scopes(&self) -> impl Iterator<Item = &Closure> {
        std::iter::successors(Some(self), |scope| scope.0.parent.as_ref())
    }

    pub fn has_local(&self, key: &str) -> bool {
        self.0.bindings.borrow().contains_key(key)
    }

    /// Resolve `key`, searching outwards from this scope.
    pub fn get(&self, key: &str) -> RuntimeResult {
        self.scopes()
            .find_map(|scope| scope.0.bindings.borrow().get(key).cloned())
            .ok_or_else(|| undefined_name(key))
    }

    /// Write `key`.
    ///
    /// The nearest scope that already binds `key` is overwritten. If no
    /// scope on the chain binds it, the binding is created here.
    pub fn assign(&self, key: &str, value: Object) {
        let target = self
            .scopes()
            .find(|scope| scope.has_local(key))
            .unwrap_or(self);
        trace!(
            key,
            defined_at = target.depth(),
            from_depth = self.depth(),
            "assign"
        );

        let mut bindings = target.0.bindings.borrow_mut();
        let previous = match bindings.get_mut(key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => bindings.insert(key.to_owned(), value),
        };
        drop(bindings);
        drop(previous);
    }

    /// Bind `key` in this scope only, shadowing any outer binding.
    pub fn define_local(&self, key: impl Into<String>, value: Object) {
        let previous = self.0.bindings.borrow_mut().insert(key.into(), value);
        drop(previous);
    }

    pub fn parent(&self) -> Option<&Closure> {
        self.0.parent.as_ref()
    }

    /// Root of this scope's tree.
    pub fn topmost(&self) -> Closure {
        self.0.topmost.clone().unwrap_or_else(|| self.clone())
    }

    /// The op-chain that created this scope, if it is still alive.
    pub fn owner(&self) -> Option<OpChain> {
        self.0.owner.upgrade().map(OpChain::from_heap)
    }

    /// Owner of the root scope. Constant time.
    pub fn root_owner(&self) -> Option<OpChain> {
        match &self.0.topmost {
            Some(root) => root.owner(),
            None => self.owner(),
        }
    }

    /// Distance from the root; the root is at depth 0.
    pub fn depth(&self) -> usize {
        self.0.depth
    }

    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    /// Locally bound keys, sorted.
    pub fn local_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.bindings.borrow().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    pub fn local_len(&self) -> usize {
        self.0.bindings.borrow().len()
    }

    /// Depth of the nearest scope that binds `key`.
    pub fn resolve_depth(&self, key: &str) -> Option<usize> {
        self.scopes()
            .find(|scope| scope.has_local(key))
            .map(Closure::depth)
    }

    pub fn ptr_eq(&self, other: &Closure) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        self.0.addr()
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let bindings = std::mem::take(self.bindings.get_mut());
        let parent = self.parent.take().map(Object::from);
        let topmost = self.topmost.take().map(Object::from);
        release(bindings.into_values().chain(parent).chain(topmost));
    }
}

impl Structural for Closure {
    fn tag(&self) -> TypeTag {
        TypeTag::Closure
    }

    fn len(&self) -> usize {
        self.local_len()
    }

    fn get_key(&self, key: &str) -> RuntimeResult {
        self.get(key)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("depth", &self.depth())
            .field("locals", &self.local_keys())
            .field("owned", &self.owner().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
