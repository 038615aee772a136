//! The state machine engine.
//!
//! [`Fsm`] tracks the current state, routes events through its rule table
//! and runs the enter, leave and cycle callbacks of the states involved.
//!
//! Two kinds of "nothing happened" are kept apart:
//! - [`Outcome::NoTransition`] and [`Outcome::Declined`] are normal results
//!   of dispatching an event the current state does not act on.
//! - [`FsmError::UndeclaredState`] means the rule table points at a state
//!   the machine never declared, which is a configuration bug.

mod error;
mod fsm;
mod outcome;

pub use error::FsmError;
pub use fsm::Fsm;
pub use outcome::Outcome;
