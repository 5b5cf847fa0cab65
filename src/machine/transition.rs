//! Pure state transition function

use super::event::Event;
use super::numeric::{parse_display, render_number, round8};
use super::state::{BinaryOp, CalcState, Calculation, Pending};

/// Result of a state transition: the next state plus zero-or-one
/// completed calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub state: CalcState,
    pub calculation: Option<Calculation>,
}

impl TransitionResult {
    pub fn new(state: CalcState) -> Self {
        Self {
            state,
            calculation: None,
        }
    }

    pub fn with_calculation(mut self, calculation: Calculation) -> Self {
        self.calculation = Some(calculation);
        self
    }
}

/// Pure transition function.
///
/// Given the same state and event this always produces the same result,
/// with no I/O side effects. Every event is accepted in every state;
/// there are no transition errors.
pub fn transition(state: &CalcState, event: Event) -> TransitionResult {
    match event {
        Event::Digit(digit) => TransitionResult::new(enter_digit(state, digit)),
        Event::Operator(op) => apply_operator(state, op),
        Event::Equals => equals(state),
        Event::Backspace => TransitionResult::new(backspace(state)),
        Event::Clear => TransitionResult::new(CalcState::default()),
    }
}

fn enter_digit(state: &CalcState, digit: char) -> CalcState {
    if !digit.is_ascii_digit() && digit != '.' {
        return state.clone();
    }

    let display = if state.fresh_entry {
        // Starting a fresh number; a bare dot becomes "0.".
        if digit == '.' {
            "0.".to_string()
        } else {
            digit.to_string()
        }
    } else if digit == '.' {
        // A second decimal point would break the display's
        // numeric-literal invariant; ignore it.
        if state.display.contains('.') {
            return state.clone();
        }
        format!("{}.", state.display)
    } else if state.display == "0" {
        digit.to_string()
    } else {
        format!("{}{}", state.display, digit)
    };

    CalcState {
        display,
        pending: state.pending.clone(),
        fresh_entry: false,
    }
}

fn apply_operator(state: &CalcState, op: BinaryOp) -> TransitionResult {
    match &state.pending {
        // First operator press captures the display as the left operand.
        None => TransitionResult::new(CalcState {
            display: state.display.clone(),
            pending: Some(Pending {
                operand: state.display.clone(),
                op,
            }),
            fresh_entry: true,
        }),
        // An operator is already armed: compute eagerly, then re-arm
        // with the new operator and the result as the left operand.
        Some(pending) => {
            let (calculation, result) = compute(pending, &state.display);
            TransitionResult::new(CalcState {
                display: result.clone(),
                pending: Some(Pending {
                    operand: result,
                    op,
                }),
                fresh_entry: true,
            })
            .with_calculation(calculation)
        }
    }
}

fn equals(state: &CalcState) -> TransitionResult {
    match &state.pending {
        None => TransitionResult::new(state.clone()),
        Some(pending) => {
            let (calculation, result) = compute(pending, &state.display);
            TransitionResult::new(CalcState {
                display: result,
                pending: None,
                fresh_entry: true,
            })
            .with_calculation(calculation)
        }
    }
}

/// Compute `operand op display`, producing the calculation and the
/// rendered result string.
fn compute(pending: &Pending, display: &str) -> (Calculation, String) {
    let lhs = parse_display(&pending.operand);
    let rhs = parse_display(display);
    let result = render_number(round8(pending.op.apply(lhs, rhs)));
    let calculation = Calculation {
        // The left side is the stored operand string verbatim; the right
        // side re-renders the parsed display value, so "3." shows as "3".
        expression: format!("{} {} {}", pending.operand, pending.op, render_number(rhs)),
        result: result.clone(),
    };
    (calculation, result)
}

fn backspace(state: &CalcState) -> CalcState {
    let mut display = state.display.clone();
    display.pop();
    if display.is_empty() {
        display.push('0');
    }
    CalcState {
        display,
        pending: state.pending.clone(),
        fresh_entry: state.fresh_entry,
    }
}
