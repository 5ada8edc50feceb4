//! Object type tags.

use std::fmt;

/// Type tag of a runtime object.
///
/// The tag is fixed when an object is constructed and never changes.
/// Tags split into two capability groups: values (`Integer`, `Float`,
/// `String`, `Atom`) support arithmetic and coercion, containers (`List`,
/// `Dict`, `OpChain`, `Closure`) support structural access.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    Integer,
    Float,
    String,
    List,
    Dict,
    OpChain,
    Closure,
    Atom,
}

impl TypeTag {
    /// Every tag, in declaration order.
    pub const ALL: [TypeTag; 8] = [
        TypeTag::Integer,
        TypeTag::Float,
        TypeTag::String,
        TypeTag::List,
        TypeTag::Dict,
        TypeTag::OpChain,
        TypeTag::Closure,
        TypeTag::Atom,
    ];

    /// Diagnostic name of the tag.
    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::Integer => "Integer",
            TypeTag::Float => "Float",
            TypeTag::String => "String",
            TypeTag::List => "List",
            TypeTag::Dict => "Dict",
            TypeTag::OpChain => "OpChain",
            TypeTag::Closure => "Closure",
            TypeTag::Atom => "Atom",
        }
    }

    /// Returns `true` for the arithmetic-capable group.
    #[inline]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            TypeTag::Integer | TypeTag::Float | TypeTag::String | TypeTag::Atom
        )
    }

    /// Returns `true` for the structural-capable group.
    #[inline]
    pub const fn is_container(self) -> bool {
        !self.is_value()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        let mut names: Vec<_> = TypeTag::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TypeTag::ALL.len());
    }

    #[test]
    fn capability_groups_partition_tags() {
        let values: Vec<_> = TypeTag::ALL.into_iter().filter(|t| t.is_value()).collect();
        assert_eq!(
            values,
            vec![
                TypeTag::Integer,
                TypeTag::Float,
                TypeTag::String,
                TypeTag::Atom
            ]
        );
        assert!(TypeTag::ALL
            .into_iter()
            .all(|t| t.is_value() != t.is_container()));
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(TypeTag::OpChain.to_string(), "OpChain");
    }
}
