//! mathdesk - calculator core with an AI math tutor
//!
//! A pure arithmetic state machine (state + event -> new state plus
//! zero-or-one completed calculation), a bounded most-recent-first
//! calculation history, and an async tutor service backed by a hosted
//! generative-language API.
//!
//! The machine is deterministic and side-effect free, so it can be
//! exercised without any UI harness:
//!
//! ```
//! use mathdesk::machine::{transition, BinaryOp, CalcState, Event};
//!
//! let state = CalcState::default();
//! let state = transition(&state, Event::Digit('5')).state;
//! let state = transition(&state, Event::Operator(BinaryOp::Add)).state;
//! let state = transition(&state, Event::Digit('3')).state;
//! let outcome = transition(&state, Event::Equals);
//!
//! assert_eq!(outcome.state.display, "8");
//! assert_eq!(outcome.calculation.unwrap().expression, "5 + 3");
//! ```

pub mod history;
pub mod machine;
pub mod session;
pub mod tutor;

pub use history::{CalculationResult, History, HISTORY_CAPACITY};
pub use machine::{transition, BinaryOp, CalcState, Calculation, Event, TransitionResult};
pub use session::{AskError, Session};
pub use tutor::{
    GeminiTutor, LoggingTutor, TutorConfig, TutorError, TutorErrorKind, TutorService,
};
