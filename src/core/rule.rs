//! Transition rules keyed by `(event, source state)`.

use super::state::{Event, State};
use std::fmt;
use std::rc::Rc;

/// Deferred target of a transition.
///
/// Evaluated each time the rule fires. Returning `None` declines the
/// transition and leaves the machine where it is.
pub type Resolver<S> = Rc<dyn Fn() -> Option<S>>;

/// A registered mapping from `(event, source)` to a target resolver.
///
/// Rules registered for a set of source states share one resolver.
///
/// # Example
///
/// ```rust
/// use switchyard::core::TransitionRule;
/// use std::rc::Rc;
///
/// let rule = TransitionRule::new("start", "idle", Rc::new(|| Some("running")));
///
/// assert!(rule.matches(&"start", &"idle"));
/// assert!(!rule.matches(&"start", &"done"));
/// assert_eq!(rule.resolve(), Some("running"));
/// assert_eq!(rule.label(), "\"start\"@\"idle\"");
/// ```
pub struct TransitionRule<S: State, E: Event> {
    event: E,
    source: S,
    resolver: Resolver<S>,
}

impl<S: State, E: Event> TransitionRule<S, E> {
    pub fn new(event: E, source: S, resolver: Resolver<S>) -> Self {
        Self {
            event,
            source,
            resolver,
        }
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Check if this rule handles `event` while the machine is in `state`.
    pub fn matches(&self, event: &E, state: &S) -> bool {
        self.event == *event && self.source == *state
    }

    /// Evaluate the deferred target.
    pub fn resolve(&self) -> Option<S> {
        (self.resolver)()
    }

    /// Human-readable `event@state` label for diagnostics.
    pub fn label(&self) -> String {
        label(&self.event, &self.source)
    }
}

/// Render the `event@state` label used in logs and errors.
pub fn label<S: State, E: Event>(event: &E, state: &S) -> String {
    format!("{:?}@{:?}", event, state)
}

impl<S: State, E: Event> Clone for TransitionRule<S, E> {
    fn clone(&self) -> Self {
        Self {
            event: self.event.clone(),
            source: self.source.clone(),
            resolver: Rc::clone(&self.resolver),
        }
    }
}

impl<S: State, E: Event> fmt::Display for TransitionRule<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.event, self.source)
    }
}

impl<S: State, E: Event> fmt::Debug for TransitionRule<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRule")
            .field("event", &self.event)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Idle,
        Running,
    }

    #[derive(Clone, PartialEq, Debug)]
    enum TestEvent {
        Start,
        Stop,
    }

    #[test]
    fn matches_requires_event_and_source() {
        let rule = TransitionRule::new(
            TestEvent::Start,
            TestState::Idle,
            Rc::new(|| Some(TestState::Running)),
        );

        assert!(rule.matches(&TestEvent::Start, &TestState::Idle));
        assert!(!rule.matches(&TestEvent::Stop, &TestState::Idle));
        assert!(!rule.matches(&TestEvent::Start, &TestState::Running));
    }

    #[test]
    fn resolver_is_evaluated_on_every_call() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let rule = TransitionRule::new(
            TestEvent::Start,
            TestState::Idle,
            Rc::new(move || {
                counter.set(counter.get() + 1);
                Some(TestState::Running)
            }),
        );

        assert_eq!(calls.get(), 0);
        rule.resolve();
        rule.resolve();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn resolver_can_decline() {
        let rule: TransitionRule<TestState, TestEvent> =
            TransitionRule::new(TestEvent::Stop, TestState::Running, Rc::new(|| None));

        assert_eq!(rule.resolve(), None);
    }

    #[test]
    fn label_uses_event_at_state_form() {
        let rule = TransitionRule::new(
            TestEvent::Stop,
            TestState::Running,
            Rc::new(|| Some(TestState::Idle)),
        );

        assert_eq!(rule.label(), "Stop@Running");
        assert_eq!(rule.to_string(), "Stop@Running");
        assert_eq!(label(&TestEvent::Start, &TestState::Idle), "Start@Idle");
    }

    #[test]
    fn clones_share_resolver() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let rule = TransitionRule::new(
            TestEvent::Start,
            TestState::Idle,
            Rc::new(move || {
                counter.set(counter.get() + 1);
                None::<TestState>
            }),
        );
        let copy = rule.clone();

        rule.resolve();
        copy.resolve();

        assert_eq!(calls.get(), 2);
        assert_eq!(copy.event(), &TestEvent::Start);
        assert_eq!(copy.source(), &TestState::Idle);
    }
}
