//! Lithp IR - shared vocabulary for the Lithp runtime.
//!
//! This crate holds the pieces that do not depend on the object model:
//! - `TypeTag`: the closed set of object type tags
//! - `ArithOp`: the generic arithmetic operators
//! - `AtomId` / `Atom` / `AtomTable`: interned symbolic identifiers
//!
//! The atom table is an ordinary value. A runtime owns exactly one and passes
//! it to whatever needs interning; there is no process-wide table.

mod atom;
mod op;
mod type_tag;

pub use atom::{Atom, AtomError, AtomId, AtomTable};
pub use op::ArithOp;
pub use type_tag::TypeTag;
