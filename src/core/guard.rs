//! Guard conditions for deferred transition targets.
//!
//! A guard is a zero-argument condition consulted when a rule fires. It
//! typically reads state owned by the caller (a counter, a flag) and turns
//! a fixed target into a conditional one.

use super::state::State;
use std::rc::Rc;

/// Condition that decides whether a transition may proceed.
///
/// # Example
///
/// ```rust
/// use switchyard::core::Guard;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let retries = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&retries);
/// let exhausted = Guard::new(move || seen.get() > 3);
///
/// assert!(!exhausted.check());
/// retries.set(4);
/// assert!(exhausted.check());
/// ```
pub struct Guard {
    predicate: Rc<dyn Fn() -> bool>,
}

impl Guard {
    /// Create a guard from a condition.
    ///
    /// The condition is evaluated lazily, every time the guarded rule fires.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Rc::new(predicate),
        }
    }

    /// Evaluate the condition now.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }

    /// Guard that passes only when this one fails.
    pub fn negate(self) -> Self {
        let predicate = self.predicate;
        Guard::new(move || !predicate())
    }

    /// Turn the guard into a resolver that yields `target` while the
    /// condition holds and declines otherwise.
    ///
    /// ```rust
    /// use switchyard::core::Guard;
    ///
    /// let open = Guard::new(|| true).then("open");
    /// let shut = Guard::new(|| false).then("open");
    ///
    /// assert_eq!(open(), Some("open"));
    /// assert_eq!(shut(), None);
    /// ```
    pub fn then<S: State>(self, target: S) -> impl Fn() -> Option<S> {
        let predicate = self.predicate;
        move || predicate().then(|| target.clone())
    }
}

impl Clone for Guard {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
        }
    }
}
