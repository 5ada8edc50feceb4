//! Error types for the runtime kernel.
//!
//! Every kernel operation fails synchronously with a `RuntimeError` and has
//! no effect when it fails. The kernel never logs or swallows errors; the
//! evaluator decides what a failure means.
//!
//! Errors are built through the factory functions below rather than by
//! naming variants at the call site.

use lithp_ir::{ArithOp, AtomError, AtomId, TypeTag};

use crate::object::Object;

/// Result of a kernel operation.
pub type RuntimeResult<T = Object> = Result<T, RuntimeError>;

/// Error category, for matching without destructuring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid arithmetic operand combination or disallowed string arithmetic.
    Type,
    /// Arithmetic on a container, or structural access on a value.
    Capability,
    /// Unsupported type conversion.
    Coercion,
    /// Malformed numeric text during coercion.
    Parse,
    /// Division by zero.
    Arithmetic,
    /// Identifier not found after exhausting the closure chain.
    Name,
    /// Unknown atom id or missing dict key.
    NotFound,
    /// Pop from an empty list, or advancing an exhausted op-chain.
    EmptyAccess,
    /// Indexed access past the end of a sequence.
    IndexOutOfBounds,
    /// Op-chain nesting deeper than the runtime allows.
    NestingLimit,
}

/// Error raised by a kernel operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: ArithOp,
        left: TypeTag,
        right: TypeTag,
    },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: TypeTag, got: TypeTag },

    #[error("{operation} is not supported by {tag}")]
    Capability {
        tag: TypeTag,
        operation: &'static str,
    },

    #[error("cannot coerce {from} to {to}")]
    Coercion { from: TypeTag, to: TypeTag },

    #[error("cannot parse {text:?} as {target}")]
    Parse { text: String, target: TypeTag },

    #[error("division by zero")]
    DivisionByZero,

    #[error("undefined name: {name}")]
    UndefinedName { name: String },

    #[error("unknown atom id {0}")]
    UnknownAtom(AtomId),

    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    #[error("{0}")]
    EmptyAccess(&'static str),

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("op-chain nesting exceeds the limit of {limit}")]
    NestingLimit { limit: usize },
}

impl RuntimeError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOperands { .. } | Self::TypeMismatch { .. } => ErrorKind::Type,
            Self::Capability { .. } => ErrorKind::Capability,
            Self::Coercion { .. } => ErrorKind::Coercion,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::DivisionByZero => ErrorKind::Arithmetic,
            Self::UndefinedName { .. } => ErrorKind::Name,
            Self::UnknownAtom(_) | Self::KeyNotFound { .. } => ErrorKind::NotFound,
            Self::EmptyAccess(_) => ErrorKind::EmptyAccess,
            Self::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Self::NestingLimit { .. } => ErrorKind::NestingLimit,
        }
    }
}

impl From<AtomError> for RuntimeError {
    fn from(err: AtomError) -> Self {
        match err {
            AtomError::NotFound(id) => unknown_atom(id),
        }
    }
}

// Arithmetic Errors

/// Operand combination not defined for `op`.
#[cold]
pub fn invalid_operands(op: ArithOp, left: TypeTag, right: TypeTag) -> RuntimeError {
    RuntimeError::InvalidOperands { op, left, right }
}

/// Division by zero error.
#[cold]
pub fn division_by_zero() -> RuntimeError {
    RuntimeError::DivisionByZero
}

// Typing and Capability Errors

/// A payload accessor found a different variant of the right group.
#[cold]
pub fn type_mismatch(expected: TypeTag, got: TypeTag) -> RuntimeError {
    RuntimeError::TypeMismatch { expected, got }
}

/// `operation` is not offered by objects tagged `tag`.
#[cold]
pub fn unsupported(tag: TypeTag, operation: &'static str) -> RuntimeError {
    RuntimeError::Capability { tag, operation }
}

// Coercion Errors

#[cold]
pub fn cannot_coerce(from: TypeTag, to: TypeTag) -> RuntimeError {
    RuntimeError::Coercion { from, to }
}

#[cold]
pub fn parse_failure(text: &str, target: TypeTag) -> RuntimeError {
    RuntimeError::Parse {
        text: text.to_string(),
        target,
    }
}

// Lookup Errors

/// Identifier not bound anywhere on the closure chain.
#[cold]
pub fn undefined_name(name: &str) -> RuntimeError {
    RuntimeError::UndefinedName {
        name: name.to_string(),
    }
}

#[cold]
pub fn unknown_atom(id: AtomId) -> RuntimeError {
    RuntimeError::UnknownAtom(id)
}

#[cold]
pub fn key_not_found(key: &str) -> RuntimeError {
    RuntimeError::KeyNotFound {
        key: key.to_string(),
    }
}

#[cold]
pub fn index_out_of_bounds(index: usize, len: usize) -> RuntimeError {
    RuntimeError::IndexOutOfBounds { index, len }
}

// Sequence Errors

#[cold]
pub fn pop_from_empty() -> RuntimeError {
    RuntimeError::EmptyAccess("pop from empty List")
}

/// `next` called on an op-chain whose cursor already sits past the end.
#[cold]
pub fn chain_exhausted() -> RuntimeError {
    RuntimeError::EmptyAccess("op-chain advanced past end of sequence")
}

#[cold]
pub fn nesting_limit(limit: usize) -> RuntimeError {
    RuntimeError::NestingLimit { limit }
}
