//! Shared ownership wrappers for object payloads.
//!
//! All reference counting in the kernel goes through these two types:
//! - `Heap<T>`: a shared payload whose structure is fixed after construction
//!   (integers, strings, scopes, op-chains). Interior cells inside `T`
//!   carry whatever mutation is allowed.
//! - `SharedCell<T>`: a shared, mutable payload (list elements, dict entries).
//!
//! Both are single-threaded (`Rc`, not `Arc`). Constructors are
//! `pub(crate)`, so payloads are only ever created through `Object`
//! factory methods and the scope/op-chain constructors.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

/// Shared, structurally immutable payload.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    /// Build a payload that holds a weak handle to itself.
    pub(crate) fn new_cyclic(data_fn: impl FnOnce(&WeakHeap<T>) -> T) -> Self {
        Heap(Rc::new_cyclic(|weak| data_fn(&WeakHeap(weak.clone()))))
    }
}

impl<T: ?Sized> Heap<T> {
    #[inline]
    pub(crate) fn from_rc(rc: Rc<T>) -> Self {
        Heap(rc)
    }

    /// Returns `true` if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Non-owning handle to a `Heap<T>` payload.
pub(crate) struct WeakHeap<T>(Weak<T>);

impl<T> WeakHeap<T> {
    /// A handle that never upgrades.
    pub(crate) fn dangling() -> Self {
        WeakHeap(Weak::new())
    }

    pub(crate) fn upgrade(&self) -> Option<Heap<T>> {
        self.0.upgrade().map(Heap)
    }
}

impl<T> Clone for WeakHeap<T> {
    fn clone(&self) -> Self {
        WeakHeap(Weak::clone(&self.0))
    }
}

/// Shared, mutable payload.
///
/// Borrows are short-lived and never held across calls back into the
/// kernel, so the `RefCell` never observes a conflicting borrow.
#[repr(transparent)]
pub struct SharedCell<T>(Rc<RefCell<T>>);

impl<T> SharedCell<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        SharedCell(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub(crate) fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub(crate) fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }

    /// Move the payload out if this is the last handle, leaving the default.
    pub(crate) fn take_unique(&self) -> Option<T>
    where
        T: Default,
    {
        if Rc::strong_count(&self.0) != 1 {
            return None;
        }
        self.0
            .try_borrow_mut()
            .ok()
            .map(|mut payload| std::mem::take(&mut *payload))
    }
}

impl<T> Clone for SharedCell<T> {
    #[inline]
    fn clone(&self) -> Self {
        SharedCell(Rc::clone(&self.0))
    }
}
