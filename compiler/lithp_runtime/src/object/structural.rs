//! The structural capability shared by container variants.

use lithp_ir::TypeTag;

use super::{Container, Object};
use crate::errors::{unsupported, RuntimeResult};

/// Structural access: length, indexed access, key lookup, push and pop.
///
/// Only containers implement this. Each container overrides the operations
/// it offers; the rest fail with a capability error naming the container.
pub trait Structural {
    /// Tag of the implementing container, for error reporting.
    fn tag(&self) -> TypeTag;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_index(&self, _index: usize) -> RuntimeResult {
        Err(unsupported(self.tag(), "indexed access"))
    }

    fn get_key(&self, _key: &str) -> RuntimeResult {
        Err(unsupported(self.tag(), "key lookup"))
    }

    fn push(&self, _value: Object) -> RuntimeResult<()> {
        Err(unsupported(self.tag(), "push"))
    }

    fn pop(&self) -> RuntimeResult {
        Err(unsupported(self.tag(), "pop"))
    }
}

impl Structural for Container {
    fn tag(&self) -> TypeTag {
        self.type_tag()
    }

    fn len(&self) -> usize {
        match self {
            Container::List(l) => Structural::len(l),
            Container::Dict(d) => Structural::len(d),
            Container::Closure(c) => Structural::len(c),
            Container::OpChain(c) => Structural::len(c),
        }
    }

    fn get_index(&self, index: usize) -> RuntimeResult {
        match self {
            Container::List(l) => l.get_index(index),
            Container::Dict(d) => d.get_index(index),
            Container::Closure(c) => c.get_index(index),
            Container::OpChain(c) => c.get_index(index),
        }
    }

    fn get_key(&self, key: &str) -> RuntimeResult {
        match self {
            Container::List(l) => l.get_key(key),
            Container::Dict(d) => d.get_key(key),
            Container::Closure(c) => c.get_key(key),
            Container::OpChain(c) => c.get_key(key),
        }
    }

    fn push(&self, value: Object) -> RuntimeResult<()> {
        match self {
            Container::List(l) => Structural::push(l, value),
            Container::Dict(d) => Structural::push(d, value),
            Container::Closure(c) => Structural::push(c, value),
            Container::OpChain(c) => Structural::push(c, value),
        }
    }

    fn pop(&self) -> RuntimeResult {
        match self {
            Container::List(l) => Structural::pop(l),
            Container::Dict(d) => Structural::pop(d),
            Container::Closure(c) => Structural::pop(c),
            Container::OpChain(c) => Structural::pop(c),
        }
    }
}
