//! Generic arithmetic under a single promotion rule.
//!
//! The result type of `left op right` is chosen by `promote`:
//! 1. both operands share a type: that type
//! 2. either is String: String (only `+`, as concatenation of the text forms)
//! 3. either is Float: Float
//! 4. otherwise the left operand's type
//!
//! Both operands are then coerced to the result type and the native
//! operator applied. Containers never get this far: `Object::arith`
//! rejects them with a capability error before promotion.

use lithp_ir::{ArithOp, TypeTag};
use num_traits::Zero;
use tracing::trace;

use crate::coerce;
use crate::errors::{division_by_zero, invalid_operands, RuntimeResult};
use crate::object::Value;

/// The arithmetic capability. Implemented by `Value` only.
pub trait Arithmetic: Sized {
    /// Returns `true` if a conversion to `target` is defined.
    fn can_coerce(&self, target: TypeTag) -> bool;

    /// Convert to `target`.
    fn coerce(&self, target: TypeTag) -> RuntimeResult<Self>;

    /// Apply `op` with `self` on the left.
    fn apply(&self, op: ArithOp, rhs: &Self) -> RuntimeResult<Self>;
}

/// Result type of a binary arithmetic operation.
pub fn promote(left: TypeTag, right: TypeTag) -> TypeTag {
    if left == right {
        left
    } else if left == TypeTag::String || right == TypeTag::String {
        TypeTag::String
    } else if left == TypeTag::Float || right == TypeTag::Float {
        TypeTag::Float
    } else {
        left
    }
}

impl Arithmetic for Value {
    fn can_coerce(&self, target: TypeTag) -> bool {
        coerce::can_coerce(self, target)
    }

    fn coerce(&self, target: TypeTag) -> RuntimeResult<Self> {
        coerce::coerce(self, target)
    }

    fn apply(&self, op: ArithOp, rhs: &Self) -> RuntimeResult<Self> {
        let (left_tag, right_tag) = (self.type_tag(), rhs.type_tag());
        let target = promote(left_tag, right_tag);
        trace!(%op, left = %left_tag, right = %right_tag, result = %target, "promoted operands");

        if target == TypeTag::String && op != ArithOp::Add {
            return Err(invalid_operands(op, left_tag, right_tag));
        }
        if !self.can_coerce(target) || !rhs.can_coerce(target) {
            return Err(invalid_operands(op, left_tag, right_tag));
        }

        let left = self.coerce(target)?;
        let right = rhs.coerce(target)?;
        native(op, &left, &right)
            .ok_or_else(|| invalid_operands(op, left_tag, right_tag))?
    }
}

/// Native operator on two operands of the same type.
///
/// `None` means the type has no native operator for `op`.
fn native(op: ArithOp, left: &Value, right: &Value) -> Option<RuntimeResult<Value>> {
    let result = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            let (a, b) = (&**a, &**b);
            match op {
                ArithOp::Add => Ok(Value::integer(a + b)),
                ArithOp::Sub => Ok(Value::integer(a - b)),
                ArithOp::Mul => Ok(Value::integer(a * b)),
                // BigInt division truncates toward zero.
                ArithOp::Div if b.is_zero() => Err(division_by_zero()),
                ArithOp::Div => Ok(Value::integer(a / b)),
            }
        }
        (Value::Float(a), Value::Float(b)) => match op {
            ArithOp::Add => Ok(Value::Float(a + b)),
            ArithOp::Sub => Ok(Value::Float(a - b)),
            ArithOp::Mul => Ok(Value::Float(a * b)),
            ArithOp::Div if *b == 0.0 => Err(division_by_zero()),
            ArithOp::Div => Ok(Value::Float(a / b)),
        },
        (Value::String(a), Value::String(b)) if op == ArithOp::Add => {
            let mut text = String::with_capacity(a.len() + b.len());
            text.push_str(a);
            text.push_str(b);
            Ok(Value::string(&text))
        }
        _ => return None,
    };
    Some(result)
}
