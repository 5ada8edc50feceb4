//! Atom interning.
//!
//! An atom is a symbolic identifier with a stable integer identity. The
//! `AtomTable` hands out ids sequentially from zero, never reuses them, and
//! never forgets an atom once interned.

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Integer identity of an atom.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct AtomId(usize);

impl AtomId {
    /// Create from a raw index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        AtomId(index)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtomId({})", self.0)
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An interned symbol: an id plus the name it was interned under.
///
/// Equality and hashing look at the id only. The name is carried along
/// for rendering.
#[derive(Clone)]
pub struct Atom {
    id: AtomId,
    name: Rc<str>,
}

impl Atom {
    #[inline]
    pub fn id(&self) -> AtomId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Atom {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({}, {:?})", self.id.0, &*self.name)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Error from an atom table lookup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AtomError {
    /// The id was never allocated by this table.
    #[error("no atom with id {0}")]
    NotFound(AtomId),
}

/// Registry mapping names to atoms and ids back to atoms.
#[derive(Default)]
pub struct AtomTable {
    /// Map from name to id.
    ids: FxHashMap<Rc<str>, AtomId>,
    /// Atoms indexed by id.
    atoms: Vec<Atom>,
}

impl AtomTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with room for `capacity` atoms.
    pub fn with_capacity(capacity: usize) -> Self {
        AtomTable {
            ids: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            atoms: Vec::with_capacity(capacity),
        }
    }

    /// Intern `name`, allocating the next id on first sight.
    pub fn intern(&mut self, name: &str) -> Atom {
        if let Some(&id) = self.ids.get(name) {
            return self.atoms[id.0].clone();
        }

        let id = AtomId(self.atoms.len());
        let name: Rc<str> = Rc::from(name);
        let atom = Atom {
            id,
            name: Rc::clone(&name),
        };
        self.ids.insert(name, id);
        self.atoms.push(atom.clone());
        tracing::trace!(id = id.0, name = atom.name(), "interned atom");
        atom
    }

    /// Look up an atom by id.
    pub fn lookup(&self, id: AtomId) -> Result<Atom, AtomError> {
        self.atoms
            .get(id.0)
            .cloned()
            .ok_or(AtomError::NotFound(id))
    }

    /// Look up an atom by name without interning it.
    pub fn get(&self, name: &str) -> Option<Atom> {
        self.ids.get(name).map(|id| self.atoms[id.0].clone())
    }

    /// Number of interned atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Atoms in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.atoms.iter()
    }
}

impl fmt::Debug for AtomTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.atoms.iter()).finish()
    }
}
