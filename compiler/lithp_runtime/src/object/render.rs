//! Diagnostic rendering (`Display`) for objects.
//!
//! Integers and floats render their decimal value, strings render quoted,
//! atoms render their name. Lists and dicts render their elements; a
//! container that is already being rendered further up renders as `[...]`
//! or `{...}`, so self-referential data terminates. Closures and op-chains
//! render a one-line summary.

use std::fmt;

use rustc_hash::FxHashSet;

use super::{Container, Object, Value};
use crate::coerce::format_float;
use crate::stack::ensure_sufficient_stack;

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut active = FxHashSet::default();
        render(self, f, &mut active)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_value(self, f)
    }
}

fn render_value(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Integer(n) => write!(f, "{}", **n),
        Value::Float(x) => f.write_str(&format_float(*x)),
        Value::String(s) => write!(f, "\"{}\"", s.escape_debug()),
        Value::Atom(a) => f.write_str(a.name()),
    }
}

/// `active` holds the addresses of the containers currently being rendered.
fn render(obj: &Object, f: &mut fmt::Formatter<'_>, active: &mut FxHashSet<*const ()>) -> fmt::Result {
    let container = match obj {
        Object::Value(v) => return render_value(v, f),
        Object::Container(c) => c,
    };

    match container {
        Container::Closure(c) => {
            write!(f, "<closure depth={} locals={}>", c.depth(), c.local_len())
        }
        Container::OpChain(c) => write!(f, "<op-chain len={} cursor={}>", c.len(), c.cursor()),
        Container::List(list) => {
            if !active.insert(list.addr()) {
                return f.write_str("[...]");
            }
            f.write_str("[")?;
            for (i, item) in list.to_vec().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                ensure_sufficient_stack(|| render(item, f, active))?;
            }
            active.remove(&list.addr());
            f.write_str("]")
        }
        Container::Dict(dict) => {
            if !active.insert(dict.addr()) {
                return f.write_str("{...}");
            }
            f.write_str("{")?;
            for (i, (key, item)) in dict.sorted_entries().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                ensure_sufficient_stack(|| render(item, f, active))?;
            }
            active.remove(&dict.addr());
            f.write_str("}")
        }
    }
}
