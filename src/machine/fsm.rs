//! The finite state machine engine.

use crate::builder::BuildError;
use crate::core::{
    label, Event, Resolver, State, StateDefinition, StateHistory, TransitionKind,
    TransitionRecord, TransitionRule,
};
use crate::machine::{FsmError, Outcome};
use chrono::Utc;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Finite state machine over caller-supplied state and event types.
///
/// The machine owns one [`StateDefinition`] per declared state and a table
/// of [`TransitionRule`]s keyed by `(event, source)`. The first declared
/// state is the initial one.
///
/// Registration (`add_*`, `on_*`) needs `&mut self`. Handling (`dispatch`,
/// `set_state`) only needs `&self` and never holds a borrow while a callback
/// or resolver runs, so callbacks that keep a `Weak` handle to a shared
/// machine may dispatch again before the outer call returns.
///
/// The machine is single-threaded (`!Send`, `!Sync`). Callers that need
/// cross-thread access should funnel events through one owning thread.
///
/// # Example
///
/// ```rust
/// use switchyard::machine::{Fsm, Outcome};
///
/// let fsm = Fsm::with_states(["idle", "running", "done"])?.configure(|fsm| {
///     fsm.add_transition("start", "idle", "running")?;
///     fsm.add_transition("finish", "running", "done")
/// })?;
///
/// assert_eq!(fsm.state(), &"idle");
/// assert!(fsm.dispatch("start")?.is_accepted());
/// assert_eq!(fsm.dispatch("start")?, Outcome::NoTransition);
/// assert_eq!(fsm.state(), &"running");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Fsm<S: State, E: Event> {
    name: String,
    definitions: Vec<StateDefinition<S>>,
    rules: Vec<TransitionRule<S, E>>,
    current: Cell<usize>,
    previous_state: RefCell<Option<S>>,
    last_event: RefCell<Option<E>>,
    history: RefCell<Option<StateHistory<S, E>>>,
    debug: Cell<bool>,
}

impl<S: State, E: Event> Fsm<S, E> {
    /// Create a machine from full state definitions.
    ///
    /// The first definition becomes the current state. Fails on an empty
    /// sequence or when the same state is declared twice.
    pub fn new<I>(definitions: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = StateDefinition<S>>,
    {
        let definitions: Vec<_> = definitions.into_iter().collect();
        if definitions.is_empty() {
            return Err(BuildError::EmptyStates);
        }
        for (index, definition) in definitions.iter().enumerate() {
            if definitions[..index]
                .iter()
                .any(|earlier| earlier.state() == definition.state())
            {
                return Err(BuildError::DuplicateState {
                    state: format!("{:?}", definition.state()),
                });
            }
        }

        Ok(Self {
            name: String::new(),
            definitions,
            rules: Vec::new(),
            current: Cell::new(0),
            previous_state: RefCell::new(None),
            last_event: RefCell::new(None),
            history: RefCell::new(None),
            debug: Cell::new(false),
        })
    }

    /// Create a machine from bare states with no callbacks.
    pub fn with_states<I>(states: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
    {
        Self::new(states.into_iter().map(StateDefinition::new))
    }

    /// Run a configuration hook against the freshly built machine.
    ///
    /// ```rust
    /// use switchyard::machine::Fsm;
    ///
    /// let fsm = Fsm::with_states([0u8, 1])?.configure(|fsm| {
    ///     fsm.add_transition('+', 0, 1)?;
    ///     fsm.on_enter(&1, || println!("one"))
    /// })?;
    /// assert!(fsm.has_transition(&'+'));
    /// # Ok::<(), switchyard::builder::BuildError>(())
    /// ```
    pub fn configure<F>(mut self, hook: F) -> Result<Self, BuildError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuildError>,
    {
        hook(&mut self)?;
        Ok(self)
    }

    /// Set the name used in log fields and errors.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a transition with a fixed target.
    pub fn add_transition(&mut self, event: E, from: S, to: S) -> Result<(), BuildError> {
        self.add_rules(event, vec![from], Rc::new(move || Some(to.clone())))
    }

    /// Register a transition whose target is computed when it fires.
    ///
    /// Returning `None` from `resolver` declines the transition.
    pub fn add_transition_with<F>(&mut self, event: E, from: S, resolver: F) -> Result<(), BuildError>
    where
        F: Fn() -> Option<S> + 'static,
    {
        self.add_rules(event, vec![from], Rc::new(resolver))
    }

    /// Register one rule per source state, all sharing `resolver`.
    ///
    /// Nothing is registered if any of the pairs is already taken.
    pub fn add_transitions<I, F>(&mut self, event: E, sources: I, resolver: F) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = S>,
        F: Fn() -> Option<S> + 'static,
    {
        self.add_rules(event, sources.into_iter().collect(), Rc::new(resolver))
    }

    /// Register a pre-built rule.
    pub fn add_rule(&mut self, rule: TransitionRule<S, E>) -> Result<(), BuildError> {
        self.ensure_unregistered(rule.event(), rule.source())?;
        self.rules.push(rule);
        Ok(())
    }

    pub(crate) fn add_rules(
        &mut self,
        event: E,
        sources: Vec<S>,
        resolver: Resolver<S>,
    ) -> Result<(), BuildError> {
        for (index, source) in sources.iter().enumerate() {
            self.ensure_unregistered(&event, source)?;
            if sources[..index].contains(source) {
                return Err(BuildError::DuplicateTransition {
                    transition: label(&event, source),
                });
            }
        }
        for source in sources {
            self.rules.push(TransitionRule::new(
                event.clone(),
                source,
                Rc::clone(&resolver),
            ));
        }
        Ok(())
    }

    fn ensure_unregistered(&self, event: &E, source: &S) -> Result<(), BuildError> {
        if self.rule_for(event, source).is_some() {
            return Err(BuildError::DuplicateTransition {
                transition: label(event, source),
            });
        }
        Ok(())
    }

    pub fn on_enter<F>(&mut self, state: &S, callback: F) -> Result<(), BuildError>
    where
        F: Fn() + 'static,
    {
        self.definition_mut(state)?.set_on_enter(Box::new(callback));
        Ok(())
    }

    pub fn on_leave<F>(&mut self, state: &S, callback: F) -> Result<(), BuildError>
    where
        F: Fn() + 'static,
    {
        self.definition_mut(state)?.set_on_leave(Box::new(callback));
        Ok(())
    }

    pub fn on_cycle<F>(&mut self, state: &S, callback: F) -> Result<(), BuildError>
    where
        F: Fn() + 'static,
    {
        self.definition_mut(state)?.set_on_cycle(Box::new(callback));
        Ok(())
    }

    fn definition_mut(&mut self, state: &S) -> Result<&mut StateDefinition<S>, BuildError> {
        self.definitions
            .iter_mut()
            .find(|definition| definition.state() == state)
            .ok_or_else(|| BuildError::UnknownState {
                state: format!("{:?}", state),
            })
    }

    /// Start recording accepted transitions, keeping at most `limit` of them.
    ///
    /// Replaces any history already recorded.
    pub fn enable_history(&mut self, limit: Option<usize>) {
        let history = match limit {
            Some(limit) => StateHistory::bounded(limit),
            None => StateHistory::new(),
        };
        *self.history.get_mut() = Some(history);
    }

    /// Turn debug logging on or off.
    pub fn set_debug(&self, enabled: bool) {
        self.debug.set(enabled);
    }

    pub fn is_debug(&self) -> bool {
        self.debug.get()
    }

    /// The current state.
    pub fn state(&self) -> &S {
        self.current_definition().state()
    }

    pub fn current_definition(&self) -> &StateDefinition<S> {
        &self.definitions[self.current.get()]
    }

    /// State held immediately before the last accepted transition.
    pub fn previous_state(&self) -> Option<S> {
        self.previous_state.borrow().clone()
    }

    /// Most recent event passed to [`dispatch`](Self::dispatch), matched or not.
    pub fn last_event(&self) -> Option<E> {
        self.last_event.borrow().clone()
    }

    /// Snapshot of the transition history, if enabled.
    pub fn history(&self) -> Option<StateHistory<S, E>> {
        self.history.borrow().clone()
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.definitions.iter().map(StateDefinition::state)
    }

    /// Registered rules in registration order.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRule<S, E>> {
        self.rules.iter()
    }

    /// Check if `event` has a rule in the current state.
    ///
    /// The rule may still decline when it fires.
    pub fn has_transition(&self, event: &E) -> bool {
        self.rule_for(event, self.state()).is_some()
    }

    /// Look up the definition declared for `state`.
    pub fn definition_for(&self, state: &S) -> Option<&StateDefinition<S>> {
        self.definitions
            .iter()
            .find(|definition| definition.state() == state)
    }

    fn position_of(&self, state: &S) -> Option<usize> {
        self.definitions
            .iter()
            .position(|definition| definition.state() == state)
    }

    fn rule_for(&self, event: &E, state: &S) -> Option<&TransitionRule<S, E>> {
        self.rules.iter().find(|rule| rule.matches(event, state))
    }

    /// Move to `state` directly, bypassing the rule table.
    ///
    /// Moving to the current state fires only `on_cycle`. Otherwise the old
    /// state's `on_leave` runs, the machine switches, then the new state's
    /// `on_enter` runs and observes the new state as current.
    ///
    /// An undeclared `state` is a configuration error and leaves the machine
    /// untouched.
    pub fn set_state(&self, state: S) -> Result<Outcome<S>, FsmError> {
        self.move_to(state, None)
    }

    /// Handle an event.
    ///
    /// The event is recorded as [`last_event`](Self::last_event) whether or
    /// not a rule matches. A matching rule's resolver is evaluated and, if it
    /// names a target, the machine moves there with the semantics of
    /// [`set_state`](Self::set_state).
    pub fn dispatch(&self, event: E) -> Result<Outcome<S>, FsmError> {
        *self.last_event.borrow_mut() = Some(event.clone());

        let current = self.state();
        if self.debug.get() {
            tracing::debug!(
                machine = %self.name,
                transition = %label(&event, current),
                "event received"
            );
        }

        let Some(rule) = self.rule_for(&event, current) else {
            if self.debug.get() {
                tracing::debug!(
                    machine = %self.name,
                    transition = %label(&event, current),
                    registered = self.rules.len(),
                    "no transition"
                );
            }
            return Ok(Outcome::NoTransition);
        };

        let Some(target) = rule.resolve() else {
            if self.debug.get() {
                tracing::debug!(
                    machine = %self.name,
                    transition = %rule,
                    "transition declined"
                );
            }
            return Ok(Outcome::Declined);
        };

        self.move_to(target, Some(&event))
    }

    fn move_to(&self, target: S, event: Option<&E>) -> Result<Outcome<S>, FsmError> {
        let Some(index) = self.position_of(&target) else {
            if self.debug.get() {
                tracing::warn!(
                    machine = %self.name,
                    state = ?target,
                    "target state is not declared"
                );
            }
            return Err(FsmError::UndeclaredState {
                machine: self.name.clone(),
                state: format!("{:?}", target),
            });
        };

        if index == self.current.get() {
            let state = self.swap(index, TransitionKind::Cycled, event);
            if self.debug.get() {
                tracing::debug!(machine = %self.name, state = ?state, "state cycled");
            }
            self.definitions[index].cycle();
            return Ok(Outcome::Cycled(state));
        }

        self.current_definition().leave();
        let from = self.swap(index, TransitionKind::Changed, event);
        let to = self.definitions[index].state().clone();
        if self.debug.get() {
            tracing::debug!(machine = %self.name, from = ?from, to = ?to, "state changed");
        }
        self.definitions[index].enter();

        Ok(Outcome::Transitioned { from, to })
    }

    /// Point the machine at `index`, returning the state it held before.
    fn swap(&self, index: usize, kind: TransitionKind, event: Option<&E>) -> S {
        let old = self.definitions[self.current.replace(index)].state().clone();
        *self.previous_state.borrow_mut() = Some(old.clone());

        if let Some(history) = self.history.borrow_mut().as_mut() {
            history.record(TransitionRecord {
                from: old.clone(),
                to: self.definitions[index].state().clone(),
                event: event.cloned(),
                kind,
                timestamp: Utc::now(),
            });
        }

        old
    }
}

impl<S: State, E: Event> fmt::Debug for Fsm<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("name", &self.name)
            .field("state", self.state())
            .field("previous_state", &self.previous_state.borrow())
            .field("last_event", &self.last_event.borrow())
            .field("states", &self.definitions.len())
            .field("transitions", &self.rules.len())
            .field("debug", &self.debug.get())
            .finish()
    }
}
