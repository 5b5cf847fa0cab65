//! Property-based tests for the calculator state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::numeric::{parse_display, render_number, round8};
use super::state::*;
use super::transition::*;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Subtract),
        Just(BinaryOp::Multiply),
        Just(BinaryOp::Divide),
        Just(BinaryOp::Modulo),
    ]
}

/// Valid decimal literals, as the display invariant guarantees.
fn arb_display() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..=999_999).prop_map(|n| n.to_string()),
        (0u32..=9_999, 1u32..=9_999).prop_map(|(int, frac)| format!("{int}.{frac}")),
    ]
}

fn arb_pending() -> impl Strategy<Value = Pending> {
    (arb_display(), arb_op()).prop_map(|(operand, op)| Pending { operand, op })
}

fn arb_state() -> impl Strategy<Value = CalcState> {
    (
        arb_display(),
        proptest::option::of(arb_pending()),
        any::<bool>(),
    )
        .prop_map(|(display, pending, fresh_entry)| CalcState {
            display,
            pending,
            fresh_entry,
        })
}

fn arb_digit() -> impl Strategy<Value = char> {
    prop_oneof![proptest::char::range('0', '9'), Just('.')]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_digit().prop_map(Event::Digit),
        arb_op().prop_map(Event::Operator),
        Just(Event::Equals),
        Just(Event::Backspace),
        Just(Event::Clear),
    ]
}

fn type_digits(state: CalcState, digits: &str) -> CalcState {
    digits.chars().fold(state, |state, digit| {
        transition(&state, Event::Digit(digit)).state
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    // Clear returns the machine to the default state from anywhere.
    #[test]
    fn clear_resets_everything(state in arb_state()) {
        let outcome = transition(&state, Event::Clear);
        prop_assert_eq!(outcome.state, CalcState::default());
        prop_assert!(outcome.calculation.is_none());
    }

    // The display never becomes empty.
    #[test]
    fn display_never_empty(state in arb_state(), event in arb_event()) {
        let outcome = transition(&state, event);
        prop_assert!(!outcome.state.display.is_empty());
    }

    // Pending operand and operator are set and cleared together; a
    // transition never produces one without the other.
    #[test]
    fn pending_pair_stays_consistent(state in arb_state(), events in proptest::collection::vec(arb_event(), 1..10)) {
        let mut state = state;
        for event in events {
            state = transition(&state, event).state;
            match event {
                Event::Equals | Event::Clear => prop_assert!(state.is_idle()),
                Event::Operator(_) => prop_assert!(state.pending.is_some()),
                _ => {}
            }
        }
    }

    // Backspace removes exactly one trailing character, resetting an
    // emptied display to "0".
    #[test]
    fn backspace_removes_one_char(state in arb_state()) {
        let outcome = transition(&state, Event::Backspace);
        let mut expected = state.display.clone();
        expected.pop();
        if expected.is_empty() {
            expected.push('0');
        }
        prop_assert_eq!(outcome.state.display, expected);
        prop_assert!(outcome.calculation.is_none());
    }

    // Typing an operand then an operator then an operand then equals
    // matches computing the rounded result directly.
    #[test]
    fn apply_then_equals_matches_direct(
        a in arb_display(),
        b in arb_display(),
        op in arb_op(),
    ) {
        let state = type_digits(CalcState::default(), &a);
        let state = transition(&state, Event::Operator(op)).state;
        let state = type_digits(state, &b);
        let outcome = transition(&state, Event::Equals);

        let expected = render_number(round8(op.apply(parse_display(&a), parse_display(&b))));
        prop_assert_eq!(&outcome.state.display, &expected);
        prop_assert!(outcome.state.is_idle());

        let calculation = outcome.calculation.expect("equals emits a calculation");
        prop_assert_eq!(calculation.result, expected);
        prop_assert_eq!(
            calculation.expression,
            format!("{} {} {}", a, op, render_number(parse_display(&b)))
        );
    }

    // NaN absorbs every subsequent operation.
    #[test]
    fn nan_absorbs_everything(op in arb_op(), b in arb_display()) {
        let state = CalcState {
            display: "NaN".to_string(),
            pending: None,
            fresh_entry: true,
        };
        let state = transition(&state, Event::Operator(op)).state;
        let state = type_digits(state, &b);
        let outcome = transition(&state, Event::Equals);
        prop_assert_eq!(outcome.state.display, "NaN");
    }

    // Equals without an armed operator changes nothing and emits nothing.
    #[test]
    fn equals_without_pending_is_noop(display in arb_display(), fresh_entry in any::<bool>()) {
        let state = CalcState {
            display,
            pending: None,
            fresh_entry,
        };
        let outcome = transition(&state, Event::Equals);
        prop_assert_eq!(&outcome.state, &state);
        prop_assert!(outcome.calculation.is_none());
    }

    // Digit entry starting from a valid literal keeps the display parseable.
    #[test]
    fn digit_entry_keeps_display_numeric(
        start in arb_display(),
        fresh_entry in any::<bool>(),
        digits in proptest::collection::vec(arb_digit(), 1..8),
    ) {
        let mut state = CalcState {
            display: start,
            pending: None,
            fresh_entry,
        };
        for digit in digits {
            state = transition(&state, Event::Digit(digit)).state;
        }
        prop_assert!(!parse_display(&state.display).is_nan());
    }

    // Rendering a rounded value round-trips through parsing.
    #[test]
    fn render_round_trips(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let rounded = round8(value);
        let rendered = render_number(rounded);
        prop_assert_eq!(parse_display(&rendered), rounded);
        prop_assert!(!rendered.contains('e') && !rendered.contains('E'));
    }
}
