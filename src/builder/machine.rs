//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, State, StateDefinition, TransitionRule};
use crate::machine::Fsm;

/// Builder for constructing state machines with a fluent API.
///
/// Validation happens in [`build`](Self::build): the first declared state
/// becomes the initial one, duplicate states and duplicate
/// `(event, source)` pairs are rejected.
///
/// # Example
///
/// ```
/// use switchyard::builder::{FsmBuilder, TransitionBuilder};
///
/// let fsm = FsmBuilder::new()
///     .name("door")
///     .states(["closed", "open"])
///     .transition(TransitionBuilder::new().on("push").from("closed").to("open"))?
///     .transition(TransitionBuilder::new().on("pull").from("open").to("closed"))?
///     .build()?;
///
/// fsm.dispatch("push")?;
/// assert_eq!(fsm.state(), &"open");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct FsmBuilder<S: State, E: Event> {
    name: String,
    definitions: Vec<StateDefinition<S>>,
    rules: Vec<TransitionRule<S, E>>,
    debug: bool,
    history: Option<Option<usize>>,
}

impl<S: State, E: Event> FsmBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            definitions: Vec::new(),
            rules: Vec::new(),
            debug: false,
            history: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declare a state without callbacks.
    pub fn state(mut self, state: S) -> Self {
        self.definitions.push(StateDefinition::new(state));
        self
    }

    /// Declare several states without callbacks.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.definitions
            .extend(states.into_iter().map(StateDefinition::new));
        self
    }

    /// Declare a state with its callbacks.
    pub fn define(mut self, definition: StateDefinition<S>) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Add transitions using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E>) -> Result<Self, BuildError> {
        self.rules.extend(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: TransitionRule<S, E>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add multiple rules at once.
    pub fn rules(mut self, rules: Vec<TransitionRule<S, E>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Enable debug logging on the built machine.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Record transition history, keeping at most `limit` records.
    pub fn history(mut self, limit: Option<usize>) -> Self {
        self.history = Some(limit);
        self
    }

    /// Build the state machine.
    pub fn build(self) -> Result<Fsm<S, E>, BuildError> {
        let mut fsm = Fsm::new(self.definitions)?.named(self.name);

        for rule in self.rules {
            fsm.add_rule(rule)?;
        }
        if let Some(limit) = self.history {
            fsm.enable_history(limit);
        }
        fsm.set_debug(self.debug);

        Ok(fsm)
    }
}

impl<S: State, E: Event> Default for FsmBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
