//! Op-chains: an ordered run of operations with a cursor and its own scope.
//!
//! An evaluator appends parsed objects to a chain, then drives it with
//! `rewind`, `next` and `current`, resolving names through `closure()`.
//! A nested block gets a child chain, whose scope sits one level below the
//! parent chain's scope.
//!
//! # Cursor
//!
//! The cursor ranges over `-1..=len`. `-1` is before the first op and `len`
//! means exhausted. `next` moves it exactly one step:
//!
//! | cursor before | `next` returns          | cursor after |
//! |---------------|-------------------------|--------------|
//! | below `len-1` | `Ok(Some(op))`          | `+1`         |
//! | `len-1`       | `Ok(None)`              | `len`        |
//! | `len`         | `Err(EmptyAccess)`      | `len`        |
//!
//! Appending to an exhausted chain steps the cursor back onto the last old
//! op, so the following `next` yields the new one.

use std::cell::{Cell, RefCell};
use std::fmt;

use lithp_ir::TypeTag;
use tracing::trace;

use crate::closure::Closure;
use crate::errors::{chain_exhausted, index_out_of_bounds, RuntimeResult};
use crate::heap::Heap;
use crate::object::{Object, Structural};
use crate::teardown::release;

/// Handle to a shared op-chain. Clones alias the same ops and cursor.
#[derive(Clone)]
pub struct OpChain(Heap<ChainData>);

pub(crate) struct ChainData {
    ops: RefCell<Vec<Object>>,
    cursor: Cell<isize>,
    current: RefCell<Option<Object>>,
    parent: Option<OpChain>,
    closure: Closure,
}

/// Cursor value for a sequence position. `Vec` lengths never exceed `isize::MAX`.
fn position(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}

impl OpChain {
    /// Empty root chain with a root scope.
    pub fn new() -> Self {
        OpChain::from_ops(None, Vec::new())
    }

    /// Empty chain nested under `parent`.
    pub fn with_parent(parent: &OpChain) -> Self {
        OpChain::from_ops(Some(parent), Vec::new())
    }

    /// Chain holding `ops`, cursor before the first one.
    pub fn from_ops(parent: Option<&OpChain>, ops: Vec<Object>) -> Self {
        let chain = OpChain(Heap::new_cyclic(|me| ChainData {
            ops: RefCell::new(ops),
            cursor: Cell::new(-1),
            current: RefCell::new(None),
            parent: parent.cloned(),
            closure: Closure::owned_by(me.clone(), parent.map(OpChain::closure)),
        }));
        trace!(depth = chain.depth(), ops = chain.len(), "op-chain created");
        chain
    }

    pub(crate) fn from_heap(data: Heap<ChainData>) -> Self {
        OpChain(data)
    }

    // Cursor

    /// Move the cursor before the first op and clear `current`.
    pub fn rewind(&self) {
        self.0.cursor.set(-1);
        *self.0.current.borrow_mut() = None;
    }

    /// Advance one position.
    ///
    /// Returns the op at the new position, or `Ok(None)` when the cursor
    /// steps past the last op. Advancing an already exhausted chain fails.
    #[allow(
        clippy::should_implement_trait,
        reason = "fallible, and exhaustion is an error after the first None"
    )]
    pub fn next(&self) -> RuntimeResult<Option<Object>> {
        let cursor = self.0.cursor.get();
        if cursor >= position(self.len()) {
            return Err(chain_exhausted());
        }

        let cursor = cursor + 1;
        self.0.cursor.set(cursor);
        let op = usize::try_from(cursor)
            .ok()
            .and_then(|i| self.0.ops.borrow().get(i).cloned());
        if let Some(op) = &op {
            *self.0.current.borrow_mut() = Some(op.clone());
        }
        Ok(op)
    }

    /// The op most recently returned by `next`.
    pub fn current(&self) -> Option<Object> {
        self.0.current.borrow().clone()
    }

    pub fn cursor(&self) -> isize {
        self.0.cursor.get()
    }

    pub fn is_exhausted(&self) -> bool {
        self.0.cursor.get() == position(self.len())
    }

    // Ops

    /// Append `op`, taking ownership of it.
    pub fn append(&self, op: Object) {
        let mut ops = self.0.ops.borrow_mut();
        let cursor = self.0.cursor.get();
        if cursor == position(ops.len()) {
            self.0.cursor.set(cursor - 1);
        }
        ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.0.ops.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.ops.borrow().is_empty()
    }

    /// Op at `index`, independent of the cursor.
    pub fn get(&self, index: usize) -> RuntimeResult {
        let ops = self.0.ops.borrow();
        ops.get(index)
            .cloned()
            .ok_or_else(|| index_out_of_bounds(index, ops.len()))
    }

    /// Snapshot of the op handles.
    pub fn ops(&self) -> Vec<Object> {
        self.0.ops.borrow().clone()
    }

    // Scope

    /// Scope for names bound while this chain runs.
    pub fn closure(&self) -> &Closure {
        &self.0.closure
    }

    pub fn parent(&self) -> Option<&OpChain> {
        self.0.parent.as_ref()
    }

    /// Nesting depth; root chains are at depth 0.
    pub fn depth(&self) -> usize {
        self.0.closure.depth()
    }

    pub fn ptr_eq(&self, other: &OpChain) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        self.0.addr()
    }
}

impl Drop for ChainData {
    fn drop(&mut self) {
        let ops = std::mem::take(self.ops.get_mut());
        let current = self.current.get_mut().take();
        let parent = self.parent.take().map(Object::from);
        release(ops.into_iter().chain(current).chain(parent));
    }
}

impl Default for OpChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Structural for OpChain {
    fn tag(&self) -> TypeTag {
        TypeTag::OpChain
    }

    fn len(&self) -> usize {
        OpChain::len(self)
    }

    fn get_index(&self, index: usize) -> RuntimeResult {
        self.get(index)
    }

    fn push(&self, value: Object) -> RuntimeResult<()> {
        self.append(value);
        Ok(())
    }
}

impl fmt::Debug for OpChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpChain")
            .field("depth", &self.depth())
            .field("len", &self.len())
            .field("cursor", &self.cursor())
            .finish()
    }
}

#[cfg(test)]
mod tests;
