//! Runtime objects.
//!
//! An `Object` is either a `Value` (arithmetic-capable: Integer, Float,
//! String, Atom) or a `Container` (structural-capable: List, Dict, Closure,
//! `OpChain`). The split is the type system's version of the two capability
//! groups. Arithmetic lives on `Value` through the `Arithmetic` trait,
//! structural access on the container handles through `Structural`, and
//! `Object` dispatches to one or the other by matching.
//!
//! # Sharing
//!
//! Cloning an `Object` never deep-copies. Value payloads are immutable and
//! shared; container payloads are shared and mutable, so a list popped out
//! of one list and pushed into another is the same list in both places.

mod dict;
mod list;
mod render;
mod structural;

use std::fmt;

use lithp_ir::{ArithOp, Atom, TypeTag};
use num_bigint::BigInt;

pub use dict::Dict;
pub use list::List;
pub use structural::Structural;

use crate::arith::Arithmetic;
use crate::closure::Closure;
use crate::errors::{cannot_coerce, type_mismatch, unsupported, RuntimeResult};
use crate::heap::Heap;
use crate::op_chain::OpChain;

/// Arithmetic-capable object payload.
#[derive(Clone)]
pub enum Value {
    /// Arbitrary-precision signed integer.
    Integer(Heap<BigInt>),
    /// 64-bit float.
    Float(f64),
    /// Immutable text.
    String(Heap<str>),
    /// Interned symbol.
    Atom(Atom),
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Integer(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::String(_) => TypeTag::String,
            Value::Atom(_) => TypeTag::Atom,
        }
    }

    pub(crate) fn integer(n: BigInt) -> Self {
        Value::Integer(Heap::new(n))
    }

    pub(crate) fn string(s: &str) -> Self {
        Value::String(Heap::from_rc(s.into()))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => **a == **b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => **a == **b,
            (Value::Atom(a), Value::Atom(b)) => a == b,
            _ => false,
        }
    }
}

/// Structural-capable object payload.
#[derive(Clone)]
pub enum Container {
    List(List),
    Dict(Dict),
    Closure(Closure),
    OpChain(OpChain),
}

impl Container {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Container::List(_) => TypeTag::List,
            Container::Dict(_) => TypeTag::Dict,
            Container::Closure(_) => TypeTag::Closure,
            Container::OpChain(_) => TypeTag::OpChain,
        }
    }

    /// Address of the shared payload, used for identity and cycle checks.
    pub(crate) fn addr(&self) -> *const () {
        match self {
            Container::List(l) => l.addr(),
            Container::Dict(d) => d.addr(),
            Container::Closure(c) => c.addr(),
            Container::OpChain(c) => c.addr(),
        }
    }
}

impl PartialEq for Container {
    /// Containers compare by identity.
    fn eq(&self, other: &Self) -> bool {
        self.type_tag() == other.type_tag() && self.addr() == other.addr()
    }
}

/// A runtime object.
#[derive(Clone, PartialEq)]
pub enum Object {
    Value(Value),
    Container(Container),
}

// Factory Methods

impl Object {
    /// Integer from a native integer.
    pub fn int(n: impl Into<BigInt>) -> Self {
        Object::Value(Value::integer(n.into()))
    }

    pub fn float(f: f64) -> Self {
        Object::Value(Value::Float(f))
    }

    pub fn string(s: impl AsRef<str>) -> Self {
        Object::Value(Value::string(s.as_ref()))
    }

    pub fn atom(atom: Atom) -> Self {
        Object::Value(Value::Atom(atom))
    }

    /// List holding `items`, taking ownership of them.
    pub fn list(items: Vec<Object>) -> Self {
        Object::Container(Container::List(List::from_vec(items)))
    }

    pub fn empty_list() -> Self {
        Object::list(Vec::new())
    }

    /// Empty dict.
    pub fn dict() -> Self {
        Object::Container(Container::Dict(Dict::new()))
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Object::int(n)
    }
}

impl From<BigInt> for Object {
    fn from(n: BigInt) -> Self {
        Object::Value(Value::integer(n))
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::float(f)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::string(s)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::string(s)
    }
}

impl From<Atom> for Object {
    fn from(atom: Atom) -> Self {
        Object::atom(atom)
    }
}

impl From<Value> for Object {
    fn from(value: Value) -> Self {
        Object::Value(value)
    }
}

impl From<List> for Object {
    fn from(list: List) -> Self {
        Object::Container(Container::List(list))
    }
}

impl From<Dict> for Object {
    fn from(dict: Dict) -> Self {
        Object::Container(Container::Dict(dict))
    }
}

impl From<Closure> for Object {
    fn from(closure: Closure) -> Self {
        Object::Container(Container::Closure(closure))
    }
}

impl From<OpChain> for Object {
    fn from(chain: OpChain) -> Self {
        Object::Container(Container::OpChain(chain))
    }
}

// Introspection and Accessors

impl Object {
    /// The object's type tag. Fixed for the object's lifetime.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Object::Value(v) => v.type_tag(),
            Object::Container(c) => c.type_tag(),
        }
    }

    /// Returns `true` if both objects share one payload.
    ///
    /// Floats have no payload to share and are never the same object.
    pub fn same_object(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Value(Value::Integer(a)), Object::Value(Value::Integer(b))) => a.ptr_eq(b),
            (Object::Value(Value::String(a)), Object::Value(Value::String(b))) => a.ptr_eq(b),
            (Object::Value(Value::Atom(a)), Object::Value(Value::Atom(b))) => a == b,
            (Object::Container(a), Object::Container(b)) => a == b,
            _ => false,
        }
    }

    pub fn as_value(&self) -> RuntimeResult<&Value> {
        match self {
            Object::Value(v) => Ok(v),
            Object::Container(c) => Err(unsupported(c.type_tag(), "arithmetic")),
        }
    }

    pub fn as_container(&self) -> RuntimeResult<&Container> {
        match self {
            Object::Container(c) => Ok(c),
            Object::Value(v) => Err(unsupported(v.type_tag(), "structural access")),
        }
    }

    pub fn as_int(&self) -> RuntimeResult<&BigInt> {
        match self.as_value()? {
            Value::Integer(n) => Ok(&**n),
            other => Err(type_mismatch(TypeTag::Integer, other.type_tag())),
        }
    }

    pub fn as_float(&self) -> RuntimeResult<f64> {
        match self.as_value()? {
            Value::Float(f) => Ok(*f),
            other => Err(type_mismatch(TypeTag::Float, other.type_tag())),
        }
    }

    pub fn as_str(&self) -> RuntimeResult<&str> {
        match self.as_value()? {
            Value::String(s) => Ok(&**s),
            other => Err(type_mismatch(TypeTag::String, other.type_tag())),
        }
    }

    pub fn as_atom(&self) -> RuntimeResult<&Atom> {
        match self.as_value()? {
            Value::Atom(a) => Ok(a),
            other => Err(type_mismatch(TypeTag::Atom, other.type_tag())),
        }
    }

    pub fn as_list(&self) -> RuntimeResult<&List> {
        match self.as_container()? {
            Container::List(l) => Ok(l),
            other => Err(type_mismatch(TypeTag::List, other.type_tag())),
        }
    }

    pub fn as_dict(&self) -> RuntimeResult<&Dict> {
        match self.as_container()? {
            Container::Dict(d) => Ok(d),
            other => Err(type_mismatch(TypeTag::Dict, other.type_tag())),
        }
    }

    pub fn as_closure(&self) -> RuntimeResult<&Closure> {
        match self.as_container()? {
            Container::Closure(c) => Ok(c),
            other => Err(type_mismatch(TypeTag::Closure, other.type_tag())),
        }
    }

    pub fn as_op_chain(&self) -> RuntimeResult<&OpChain> {
        match self.as_container()? {
            Container::OpChain(c) => Ok(c),
            other => Err(type_mismatch(TypeTag::OpChain, other.type_tag())),
        }
    }
}

// Coercion and Arithmetic

impl Object {
    /// Returns `true` if a conversion to `target` is defined.
    pub fn can_coerce(&self, target: TypeTag) -> bool {
        match self {
            Object::Value(v) => v.can_coerce(target),
            Object::Container(c) => c.type_tag() == target,
        }
    }

    /// Convert to an object of type `target`.
    ///
    /// Coercing to the object's own type returns a handle to the same payload.
    pub fn coerce(&self, target: TypeTag) -> RuntimeResult {
        match self {
            Object::Value(v) => v.coerce(target).map(Object::Value),
            Object::Container(c) if c.type_tag() == target => Ok(self.clone()),
            Object::Container(c) => Err(cannot_coerce(c.type_tag(), target)),
        }
    }

    /// Apply `op` under the shared promotion rule.
    pub fn arith(&self, op: ArithOp, rhs: &Object) -> RuntimeResult {
        let left = self.as_value()?;
        let right = rhs.as_value()?;
        left.apply(op, right).map(Object::Value)
    }

    pub fn add(&self, rhs: &Object) -> RuntimeResult {
        self.arith(ArithOp::Add, rhs)
    }

    pub fn sub(&self, rhs: &Object) -> RuntimeResult {
        self.arith(ArithOp::Sub, rhs)
    }

    pub fn mul(&self, rhs: &Object) -> RuntimeResult {
        self.arith(ArithOp::Mul, rhs)
    }

    pub fn div(&self, rhs: &Object) -> RuntimeResult {
        self.arith(ArithOp::Div, rhs)
    }
}

// Structural Access

impl Object {
    pub fn len(&self) -> RuntimeResult<usize> {
        Ok(self.as_container()?.len())
    }

    pub fn is_empty(&self) -> RuntimeResult<bool> {
        Ok(self.as_container()?.is_empty())
    }

    /// Element at `index` of a List or `OpChain`.
    pub fn index(&self, index: usize) -> RuntimeResult {
        self.as_container()?.get_index(index)
    }

    /// Binding for `key` in a Dict or Closure.
    pub fn key(&self, key: &str) -> RuntimeResult {
        self.as_container()?.get_key(key)
    }

    pub fn push(&self, value: Object) -> RuntimeResult<()> {
        self.as_container()?.push(value)
    }

    pub fn pop(&self) -> RuntimeResult {
        self.as_container()?.pop()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self})", self.type_tag())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Object::Value(self.clone()), f)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Object::Container(self.clone()), f)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Object::Container(Container::List(self.clone())), f)
    }
}
