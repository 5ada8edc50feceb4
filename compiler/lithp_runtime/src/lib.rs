//! Lithp Runtime - the object model and execution kernel.
//!
//! This crate provides:
//! - Runtime objects (`Object`, split into `Value` and `Container`)
//! - The coercion table and the promotion rule for `+ - * /`
//! - Lexical scopes (`Closure`) with delegated lookup and assignment
//! - Op-chains (`OpChain`): op sequences with a cursor and an owned scope
//! - `Runtime`, which owns the atom table and the configuration
//!
//! # Capabilities
//!
//! Values carry the arithmetic capability (`Arithmetic`), containers the
//! structural one (`Structural`). Asking an object for the capability it
//! lacks fails with a capability error rather than a type error.
//!
//! # Ownership
//!
//! Everything is single-threaded and reference counted. Handing an object
//! out of a container shares it; nothing is deep-copied implicitly.

mod arith;
mod closure;
mod coerce;
pub mod errors;
mod heap;
mod object;
mod op_chain;
mod runtime;
mod stack;
mod teardown;

use std::sync::Once;

pub use arith::{promote, Arithmetic};
pub use closure::Closure;
pub use coerce::format_float;
pub use errors::{ErrorKind, RuntimeError, RuntimeResult};
pub use heap::{Heap, SharedCell};
pub use object::{Container, Dict, List, Object, Structural, Value};
pub use op_chain::OpChain;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, DEFAULT_MAX_NESTING_DEPTH};
pub use stack::ensure_sufficient_stack;

pub use lithp_ir::{ArithOp, Atom, AtomError, AtomId, AtomTable, TypeTag};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for kernel events.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call has any
/// effect. Enable with `RUST_LOG=lithp_runtime=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
