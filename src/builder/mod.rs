//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders, resolver helpers and a macro for
//! declaring state and event enums with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::FsmBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, Guard, State, TransitionRule};
use std::rc::Rc;

/// Resolver that always names `target`.
///
/// ```
/// use switchyard::builder::goto;
///
/// let resolve = goto("done");
/// assert_eq!(resolve(), Some("done"));
/// ```
pub fn goto<S: State>(target: S) -> impl Fn() -> Option<S> {
    move || Some(target.clone())
}

/// Resolver that names `target` only while `condition` holds.
///
/// ```
/// use switchyard::builder::goto_when;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let attempts = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&attempts);
/// let resolve = goto_when("failed", move || seen.get() > 3);
///
/// assert_eq!(resolve(), None);
/// attempts.set(4);
/// assert_eq!(resolve(), Some("failed"));
/// ```
pub fn goto_when<S, F>(target: S, condition: F) -> impl Fn() -> Option<S>
where
    S: State,
    F: Fn() -> bool + 'static,
{
    Guard::new(condition).then(target)
}

/// Create an unconditional rule from `from` to `to` on `event`.
///
/// # Example
///
/// ```
/// use switchyard::builder::simple_transition;
/// use switchyard::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// let rule = simple_transition("tick", Light::Red, Light::Green);
/// assert!(rule.matches(&"tick", &Light::Red));
/// ```
pub fn simple_transition<S, E>(event: E, from: S, to: S) -> TransitionRule<S, E>
where
    S: State,
    E: Event,
{
    TransitionRule::new(event, from, Rc::new(goto(to)))
}

/// Create a rule that only fires while `condition` holds.
///
/// # Example
///
/// ```
/// use switchyard::builder::guarded_transition;
///
/// let rule = guarded_transition("retry", "failed", "running", || false);
/// assert_eq!(rule.resolve(), None);
/// ```
pub fn guarded_transition<S, E, F>(event: E, from: S, to: S, condition: F) -> TransitionRule<S, E>
where
    S: State,
    E: Event,
    F: Fn() -> bool + 'static,
{
    TransitionRule::new(event, from, Rc::new(goto_when(to, condition)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Start,
        Middle,
    }

    #[test]
    fn simple_transition_builds() {
        let rule = simple_transition('a', TestState::Start, TestState::Middle);

        assert_eq!(rule.event(), &'a');
        assert_eq!(rule.source(), &TestState::Start);
        assert_eq!(rule.resolve(), Some(TestState::Middle));
    }

    #[test]
    fn guarded_transition_respects_guard() {
        let open = Rc::new(Cell::new(false));
        let seen = Rc::clone(&open);
        let rule = guarded_transition('a', TestState::Start, TestState::Middle, move || {
            seen.get()
        });

        assert_eq!(rule.resolve(), None);
        open.set(true);
        assert_eq!(rule.resolve(), Some(TestState::Middle));
    }
}
