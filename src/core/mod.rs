//! Core state machine types.
//!
//! This module contains the value-level building blocks the engine is
//! assembled from:
//! - State and event marker traits
//! - Per-state definitions with lifecycle callbacks
//! - Transition rules with deferred targets
//! - Guard conditions
//! - Transition history

mod definition;
mod guard;
mod history;
mod rule;
mod state;

pub use definition::{Callback, StateDefinition};
pub use guard::Guard;
pub use history::{StateHistory, TransitionKind, TransitionRecord};
pub use rule::{label, Resolver, TransitionRule};
pub use state::{Event, State};
