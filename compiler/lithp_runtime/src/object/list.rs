//! List container.

use lithp_ir::TypeTag;

use super::{Object, Structural};
use crate::errors::{index_out_of_bounds, pop_from_empty, RuntimeResult};
use crate::heap::SharedCell;
use crate::teardown::release;

/// Ordered, mutable sequence of objects.
///
/// A `List` is a handle: clones alias the same elements.
#[derive(Clone)]
pub struct List(SharedCell<Vec<Object>>);

impl List {
    pub fn new() -> Self {
        List::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<Object>) -> Self {
        List(SharedCell::new(items))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Append `value`, taking ownership of it.
    pub fn push(&self, value: Object) {
        self.0.borrow_mut().push(value);
    }

    /// Remove and return the last element.
    pub fn pop(&self) -> RuntimeResult {
        self.0.borrow_mut().pop().ok_or_else(pop_from_empty)
    }

    /// Shared handle to the element at `index`.
    pub fn get(&self, index: usize) -> RuntimeResult {
        let items = self.0.borrow();
        items
            .get(index)
            .cloned()
            .ok_or_else(|| index_out_of_bounds(index, items.len()))
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&self, index: usize, value: Object) -> RuntimeResult {
        let mut items = self.0.borrow_mut();
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or_else(|| index_out_of_bounds(index, len))?;
        Ok(std::mem::replace(slot, value))
    }

    /// Snapshot of the element handles.
    pub fn to_vec(&self) -> Vec<Object> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &List) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        self.0.addr()
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for List {
    fn drop(&mut self) {
        if let Some(items) = self.0.take_unique().filter(|items| !items.is_empty()) {
            release(items);
        }
    }
}

impl Structural for List {
    fn tag(&self) -> TypeTag {
        TypeTag::List
    }

    fn len(&self) -> usize {
        List::len(self)
    }

    fn get_index(&self, index: usize) -> RuntimeResult {
        self.get(index)
    }

    fn push(&self, value: Object) -> RuntimeResult<()> {
        List::push(self, value);
        Ok(())
    }

    fn pop(&self) -> RuntimeResult {
        List::pop(self)
    }
}
