//! The per-runtime owner of the atom table and configuration.
//!
//! A `Runtime` is built once with `RuntimeBuilder`. It interns atoms, hands
//! out root op-chains, and creates nested chains subject to the configured
//! depth limit.

use lithp_ir::{Atom, AtomId, AtomTable};
use tracing::debug;

use crate::errors::{nesting_limit, RuntimeResult};
use crate::object::Object;
use crate::op_chain::OpChain;

/// Default limit on op-chain nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 1024;

/// Runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuntimeConfig {
    /// Deepest nesting `nested_chain` will create. Root chains are depth 0.
    pub max_nesting_depth: usize,
    /// Names interned at construction, receiving ids `0..` in order.
    pub preintern: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            preintern: Vec::new(),
        }
    }
}

/// Builder for `Runtime`.
#[derive(Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    /// Names to intern up front, in id order.
    #[must_use]
    pub fn preintern<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.preintern = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Runtime {
        let mut atoms = AtomTable::with_capacity(self.config.preintern.len());
        for name in &self.config.preintern {
            atoms.intern(name);
        }
        debug!(
            max_nesting_depth = self.config.max_nesting_depth,
            preinterned = atoms.len(),
            "runtime built"
        );
        Runtime {
            atoms,
            config: self.config,
        }
    }
}

/// Owner of the atom table for one evaluation.
#[derive(Debug)]
pub struct Runtime {
    atoms: AtomTable,
    config: RuntimeConfig,
}

impl Runtime {
    /// Runtime with the default configuration.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    /// Intern `name`, allocating the next id on first sight.
    pub fn intern(&mut self, name: &str) -> Atom {
        self.atoms.intern(name)
    }

    /// Atom object for `name`.
    pub fn atom_object(&mut self, name: &str) -> Object {
        Object::atom(self.intern(name))
    }

    /// Atom previously allocated under `id`.
    pub fn atom(&self, id: AtomId) -> RuntimeResult<Atom> {
        Ok(self.atoms.lookup(id)?)
    }

    /// Fresh root chain.
    pub fn root_chain(&self) -> OpChain {
        OpChain::new()
    }

    /// Fresh root chain holding `ops`.
    pub fn chain_with_ops(&self, ops: Vec<Object>) -> OpChain {
        OpChain::from_ops(None, ops)
    }

    /// Child of `parent`, refused past `max_nesting_depth`.
    pub fn nested_chain(&self, parent: &OpChain) -> RuntimeResult<OpChain> {
        let limit = self.config.max_nesting_depth;
        let depth = parent.depth() + 1;
        if depth > limit {
            debug!(depth, limit, "nested op-chain refused");
            return Err(nesting_limit(limit));
        }
        Ok(OpChain::with_parent(parent))
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
