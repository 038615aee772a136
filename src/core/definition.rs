//! Per-state definitions and their lifecycle callbacks.

use super::state::State;
use std::fmt;

/// Zero-argument lifecycle callback.
pub type Callback = Box<dyn Fn()>;

/// A declared state together with its optional lifecycle callbacks.
///
/// - `on_enter` runs after the machine has switched *to* this state.
/// - `on_leave` runs before the machine switches *away from* this state.
/// - `on_cycle` runs when a transition resolves back to this same state.
///
/// # Example
///
/// ```rust
/// use switchyard::core::StateDefinition;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let entered = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&entered);
///
/// let running = StateDefinition::new("running").on_enter(move || {
///     counter.set(counter.get() + 1);
/// });
///
/// assert_eq!(running.state(), &"running");
/// assert!(running.has_on_enter());
/// assert!(!running.has_on_leave());
/// ```
pub struct StateDefinition<S: State> {
    state: S,
    on_enter: Option<Callback>,
    on_leave: Option<Callback>,
    on_cycle: Option<Callback>,
}

impl<S: State> StateDefinition<S> {
    /// Create a definition with no callbacks.
    pub fn new(state: S) -> Self {
        Self {
            state,
            on_enter: None,
            on_leave: None,
            on_cycle: None,
        }
    }

    /// Set the enter callback, replacing any previous one.
    pub fn on_enter<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_enter = Some(Box::new(callback));
        self
    }

    /// Set the leave callback, replacing any previous one.
    pub fn on_leave<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_leave = Some(Box::new(callback));
        self
    }

    /// Set the cycle callback, replacing any previous one.
    pub fn on_cycle<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_cycle = Some(Box::new(callback));
        self
    }

    /// The state value this definition describes.
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn has_on_enter(&self) -> bool {
        self.on_enter.is_some()
    }

    pub fn has_on_leave(&self) -> bool {
        self.on_leave.is_some()
    }

    pub fn has_on_cycle(&self) -> bool {
        self.on_cycle.is_some()
    }

    pub(crate) fn set_on_enter(&mut self, callback: Callback) {
        self.on_enter = Some(callback);
    }

    pub(crate) fn set_on_leave(&mut self, callback: Callback) {
        self.on_leave = Some(callback);
    }

    pub(crate) fn set_on_cycle(&mut self, callback: Callback) {
        self.on_cycle = Some(callback);
    }

    pub(crate) fn enter(&self) {
        if let Some(callback) = &self.on_enter {
            callback();
        }
    }

    pub(crate) fn leave(&self) {
        if let Some(callback) = &self.on_leave {
            callback();
        }
    }

    pub(crate) fn cycle(&self) {
        if let Some(callback) = &self.on_cycle {
            callback();
        }
    }
}

impl<S: State> From<S> for StateDefinition<S> {
    fn from(state: S) -> Self {
        Self::new(state)
    }
}

impl<S: State> fmt::Debug for StateDefinition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("state", &self.state)
            .field("on_enter", &self.has_on_enter())
            .field("on_leave", &self.has_on_leave())
            .field("on_cycle", &self.has_on_cycle())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Idle,
        Running,
    }

    #[test]
    fn new_definition_has_no_callbacks() {
        let def = StateDefinition::new(TestState::Idle);

        assert_eq!(def.state(), &TestState::Idle);
        assert!(!def.has_on_enter());
        assert!(!def.has_on_leave());
        assert!(!def.has_on_cycle());
    }

    #[test]
    fn absent_callbacks_are_no_ops() {
        let def = StateDefinition::new(TestState::Idle);

        def.enter();
        def.leave();
        def.cycle();
    }

    #[test]
    fn callbacks_run_when_invoked() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (Rc::clone(&calls), Rc::clone(&calls), Rc::clone(&calls));

        let def = StateDefinition::new(TestState::Running)
            .on_enter(move || a.borrow_mut().push("enter"))
            .on_leave(move || b.borrow_mut().push("leave"))
            .on_cycle(move || c.borrow_mut().push("cycle"));

        def.leave();
        def.enter();
        def.cycle();

        assert_eq!(*calls.borrow(), vec!["leave", "enter", "cycle"]);
    }

    #[test]
    fn later_callback_replaces_earlier_one() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&calls), Rc::clone(&calls));

        let def = StateDefinition::new(TestState::Idle)
            .on_enter(move || a.borrow_mut().push("first"))
            .on_enter(move || b.borrow_mut().push("second"));

        def.enter();

        assert_eq!(*calls.borrow(), vec!["second"]);
    }

    #[test]
    fn debug_output_shows_callback_presence() {
        let def = StateDefinition::new(TestState::Idle).on_cycle(|| {});
        let rendered = format!("{:?}", def);

        assert!(rendered.contains("Idle"));
        assert!(rendered.contains("on_cycle: true"));
        assert!(rendered.contains("on_enter: false"));
    }
}
