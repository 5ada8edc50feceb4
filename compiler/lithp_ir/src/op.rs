//! Generic arithmetic operators.

use std::fmt;

/// Binary arithmetic operators.
///
/// All four share one promotion rule; only `Add` is defined when the
/// promoted type is `String`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    /// Returns the symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Returns the verb used in diagnostics (`"addition"`, ...).
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Sub => "subtraction",
            Self::Mul => "multiplication",
            Self::Div => "division",
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_symbol() {
        assert_eq!(ArithOp::Add.to_string(), "+");
        assert_eq!(ArithOp::Div.to_string(), "/");
    }

    #[test]
    fn test_verb() {
        assert_eq!(ArithOp::Sub.verb(), "subtraction");
        assert_eq!(ArithOp::Mul.verb(), "multiplication");
    }
}
