//! Runtime errors raised by the engine.

use thiserror::Error;

/// Errors that can occur while changing state.
///
/// Expected non-transitions (no matching rule, a resolver that declines)
/// are reported through [`Outcome`](super::Outcome), never through this
/// type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    /// The requested or resolved target has no declared definition.
    #[error("State {state} is not declared on machine '{machine}'")]
    UndeclaredState { machine: String, state: String },
}
