//! Switchyard: a generic finite state machine engine
//!
//! Switchyard tracks the current state of a machine over caller-supplied
//! state and event types, routes events through a table of transition rules
//! and runs per-state lifecycle callbacks as the state changes.
//!
//! # Core Concepts
//!
//! - **States and events**: any `Clone + PartialEq + Debug` type
//! - **Definitions**: one per state, with optional `on_enter`, `on_leave`
//!   and `on_cycle` callbacks
//! - **Rules**: `(event, source)` pairs with a deferred target resolver that
//!   may decline to name a target
//! - **Outcomes**: every dispatch reports whether the machine moved, cycled,
//!   had no rule, or was declined by a guard
//!
//! # Example
//!
//! ```rust
//! use switchyard::builder::goto_when;
//! use switchyard::machine::{Fsm, Outcome};
//! use switchyard::state_enum;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! state_enum! {
//!     enum Task {
//!         Idle,
//!         Running,
//!         Failed,
//!     }
//! }
//!
//! let failures = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&failures);
//!
//! let fsm = Fsm::with_states(Task::ALL.iter().copied())?.configure(|fsm| {
//!     fsm.add_transition("start", Task::Idle, Task::Running)?;
//!     fsm.add_transition_with("error", Task::Running, goto_when(Task::Failed, move || seen.get() > 3))
//! })?;
//!
//! fsm.dispatch("start")?;
//! assert_eq!(fsm.dispatch("error")?, Outcome::Declined);
//!
//! failures.set(4);
//! fsm.dispatch("error")?;
//! assert_eq!(fsm.state(), &Task::Failed);
//! assert_eq!(fsm.previous_state(), Some(Task::Running));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, FsmBuilder, TransitionBuilder};
pub use crate::core::{Event, Guard, State, StateDefinition, StateHistory, TransitionRule};
pub use machine::{Fsm, FsmError, Outcome};
