//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, Resolver, State, TransitionRule};
use std::rc::Rc;

/// Builder for constructing transition rules with a fluent API.
///
/// One builder can cover several source states; [`build`](Self::build)
/// expands it into one rule per source, all sharing the same target.
///
/// # Example
///
/// ```
/// use switchyard::builder::TransitionBuilder;
///
/// let rules = TransitionBuilder::new()
///     .on("cancel")
///     .from_any(["queued", "running"])
///     .to("cancelled")
///     .build()?;
///
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[1].label(), "\"cancel\"@\"running\"");
/// # Ok::<(), switchyard::builder::BuildError>(())
/// ```
pub struct TransitionBuilder<S: State, E: Event> {
    event: Option<E>,
    sources: Vec<S>,
    target: Option<Resolver<S>>,
    guard: Option<Guard>,
}

impl<S: State, E: Event> TransitionBuilder<S, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            event: None,
            sources: Vec::new(),
            target: None,
            guard: None,
        }
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Add a source state (at least one required).
    pub fn from(mut self, state: S) -> Self {
        self.sources.push(state);
        self
    }

    /// Add several source states.
    pub fn from_any<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.sources.extend(states);
        self
    }

    /// Set a fixed target state.
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(Rc::new(move || Some(state.clone())));
        self
    }

    /// Set a target computed each time the rule fires.
    pub fn to_with<F>(mut self, resolver: F) -> Self
    where
        F: Fn() -> Option<S> + 'static,
    {
        self.target = Some(Rc::new(resolver));
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.guard = Some(Guard::new(condition));
        self
    }

    /// Build one rule per source state.
    pub fn build(self) -> Result<Vec<TransitionRule<S, E>>, BuildError> {
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        if self.sources.is_empty() {
            return Err(BuildError::MissingSource);
        }
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        let resolver: Resolver<S> = match self.guard {
            Some(guard) => Rc::new(move || if guard.check() { target() } else { None }),
            None => target,
        };

        Ok(self
            .sources
            .into_iter()
            .map(|source| TransitionRule::new(event.clone(), source, Rc::clone(&resolver)))
            .collect())
    }
}

impl<S: State, E: Event> Default for TransitionBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    #[derive(Clone, PartialEq, Debug)]
    enum TestEvent {
        Begin,
        Abort,
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<TestState, TestEvent>::new()
            .from(TestState::Initial)
            .build();
        assert!(matches!(result, Err(BuildError::MissingEvent)));

        let result = TransitionBuilder::<TestState, TestEvent>::new()
            .on(TestEvent::Begin)
            .to(TestState::Processing)
            .build();
        assert!(matches!(result, Err(BuildError::MissingSource)));

        let result = TransitionBuilder::<TestState, TestEvent>::new()
            .on(TestEvent::Begin)
            .from(TestState::Initial)
            .build();
        assert!(matches!(result, Err(BuildError::MissingTarget)));
    }

    #[test]
    fn fluent_api_builds_rule() {
        let rules = TransitionBuilder::new()
            .on(TestEvent::Begin)
            .from(TestState::Initial)
            .to(TestState::Processing)
            .build()
            .unwrap();

        assert_eq!(rules.len(), 1);
        assert!(rules[0].matches(&TestEvent::Begin, &TestState::Initial));
        assert_eq!(rules[0].resolve(), Some(TestState::Processing));
    }

    #[test]
    fn from_any_expands_sources() {
        let rules = TransitionBuilder::new()
            .on(TestEvent::Abort)
            .from_any([TestState::Initial, TestState::Processing])
            .to(TestState::Complete)
            .build()
            .unwrap();

        let labels: Vec<_> = rules.iter().map(|rule| rule.label()).collect();
        assert_eq!(labels, vec!["Abort@Initial", "Abort@Processing"]);
    }

    #[test]
    fn transition_builder_with_guard() {
        let open = Rc::new(Cell::new(false));
        let seen = Rc::clone(&open);
        let rules = TransitionBuilder::new()
            .on(TestEvent::Begin)
            .from(TestState::Initial)
            .to(TestState::Processing)
            .when(move || seen.get())
            .build()
            .unwrap();

        assert_eq!(rules[0].resolve(), None);
        open.set(true);
        assert_eq!(rules[0].resolve(), Some(TestState::Processing));
    }

    #[test]
    fn guard_short_circuits_resolver() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let rules = TransitionBuilder::<TestState, TestEvent>::new()
            .on(TestEvent::Begin)
            .from(TestState::Initial)
            .to_with(move || {
                counter.set(counter.get() + 1);
                Some(TestState::Complete)
            })
            .guard(Guard::new(|| false))
            .build()
            .unwrap();

        assert_eq!(rules[0].resolve(), None);
        assert_eq!(calls.get(), 0);
    }
}
