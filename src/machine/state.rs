//! Calculator state types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operator applied between the pending operand and the display value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    /// Apply the operator to two operands.
    ///
    /// Division by zero yields NaN rather than an error; the NaN value
    /// propagates through subsequent calculations and renders as "NaN".
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Subtract => lhs - rhs,
            BinaryOp::Multiply => lhs * rhs,
            BinaryOp::Divide => {
                if rhs == 0.0 {
                    f64::NAN
                } else {
                    lhs / rhs
                }
            }
            BinaryOp::Modulo => lhs % rhs,
        }
    }

    /// The symbol used on the input surface and in expression strings.
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
            BinaryOp::Modulo => '%',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Subtract),
            '*' => Some(BinaryOp::Multiply),
            '/' => Some(BinaryOp::Divide),
            '%' => Some(BinaryOp::Modulo),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The left-hand operand captured when an operator key was pressed,
/// together with that operator, awaiting the right-hand side.
///
/// Operand and operator always travel together: arming one arms both and
/// clearing one clears both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pending {
    pub operand: String,
    pub op: BinaryOp,
}

/// Calculator state.
///
/// `display` always holds a decimal literal (sentinel "0") and is never
/// empty. `pending` is `None` while the machine is idle and `Some` while
/// an operator is armed and the machine awaits the second operand.
/// `fresh_entry` marks that the next digit starts a new number rather
/// than extending the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcState {
    pub display: String,
    pub pending: Option<Pending>,
    pub fresh_entry: bool,
}

impl Default for CalcState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            pending: None,
            fresh_entry: false,
        }
    }
}

impl CalcState {
    /// Check if no operator is armed.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}

/// One completed arithmetic step, emitted by a transition.
///
/// The session layer stamps this with a timestamp before it reaches the
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    pub expression: String,
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_by_zero_is_nan() {
        assert!(BinaryOp::Divide.apply(10.0, 0.0).is_nan());
        assert!(BinaryOp::Divide.apply(0.0, 0.0).is_nan());
        assert!(BinaryOp::Divide.apply(10.0, -0.0).is_nan());
    }

    #[test]
    fn modulo_keeps_dividend_sign() {
        assert_eq!(BinaryOp::Modulo.apply(7.0, 3.0), 1.0);
        assert_eq!(BinaryOp::Modulo.apply(-7.0, 3.0), -1.0);
        assert!(BinaryOp::Modulo.apply(5.0, 0.0).is_nan());
    }

    #[test]
    fn symbol_round_trips() {
        for op in [
            BinaryOp::Add,
            BinaryOp::Subtract,
            BinaryOp::Multiply,
            BinaryOp::Divide,
            BinaryOp::Modulo,
        ] {
            assert_eq!(BinaryOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(BinaryOp::from_symbol('^'), None);
    }

    #[test]
    fn default_state_is_idle_zero() {
        let state = CalcState::default();
        assert_eq!(state.display, "0");
        assert!(state.is_idle());
        assert!(!state.fresh_entry);
    }
}
