//! Configuration errors raised while assembling a machine.

use thiserror::Error;

/// Errors that can occur when declaring states and registering transitions.
///
/// All of these point at an inconsistent machine definition and are
/// reported before any event is dispatched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states declared. A machine needs at least one state")]
    EmptyStates,

    #[error("State {state} is declared more than once")]
    DuplicateState { state: String },

    #[error("Transition {transition} is already registered")]
    DuplicateTransition { transition: String },

    #[error("State {state} is not declared on this machine")]
    UnknownState { state: String },

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition source state not specified. Call .from(state) or .from_any(states)")]
    MissingSource,

    #[error("Transition target not specified. Call .to(state) or .to_with(resolver)")]
    MissingTarget,
}
