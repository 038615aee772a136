//! Marker traits for state and event values.
//!
//! The engine imposes no structure on states or events. Anything that can
//! be cloned, compared for equality and formatted for diagnostics qualifies.

use std::fmt::Debug;

/// Trait for state machine states.
///
/// Blanket-implemented for every `Clone + PartialEq + Debug + 'static` type,
/// so plain enums, integers and strings all work without an `impl`.
///
/// # Required Traits
///
/// - `Clone`: the engine hands out copies for `previous_state` and outcomes
/// - `PartialEq`: definitions and rules are looked up by equality
/// - `Debug`: used for transition labels and log fields
///
/// # Example
///
/// ```rust
/// use switchyard::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
/// assert_state(&Door::Open);
/// assert_state(&"closed");
/// ```
pub trait State: Clone + PartialEq + Debug + 'static {}

impl<T> State for T where T: Clone + PartialEq + Debug + 'static {}

/// Trait for the stimuli fed to [`Fsm::dispatch`](crate::machine::Fsm::dispatch).
///
/// Same bounds as [`State`]; kept as a separate name so signatures read
/// `Fsm<S: State, E: Event>`.
pub trait Event: Clone + PartialEq + Debug + 'static {}

impl<T> Event for T where T: Clone + PartialEq + Debug + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing,
    }

    fn is_state<S: State>(_: &S) -> bool {
        true
    }

    fn is_event<E: Event>(_: &E) -> bool {
        true
    }

    #[test]
    fn enums_are_states() {
        assert!(is_state(&TestState::Initial));
        assert!(is_state(&TestState::Processing));
    }

    #[test]
    fn primitives_are_states_and_events() {
        assert!(is_state(&42u8));
        assert!(is_state(&String::from("idle")));
        assert!(is_event(&"start"));
        assert!(is_event(&'x'));
    }
}
