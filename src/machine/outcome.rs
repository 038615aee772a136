//! Result of dispatching an event or setting a state.

/// What happened when the machine handled an event or a direct state change.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<S> {
    /// Left `from` and entered `to`.
    Transitioned { from: S, to: S },

    /// Resolved back to the current state; only `on_cycle` ran.
    Cycled(S),

    /// No rule is registered for the event in the current state.
    NoTransition,

    /// A rule matched but its resolver declined to name a target.
    Declined,
}

impl<S> Outcome<S> {
    /// True for `Transitioned` and `Cycled`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Transitioned { .. } | Self::Cycled(_))
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycled(_))
    }

    /// State the machine ended up in, if the outcome moved it.
    pub fn target(&self) -> Option<&S> {
        match self {
            Self::Transitioned { to, .. } => Some(to),
            Self::Cycled(state) => Some(state),
            Self::NoTransition | Self::Declined => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_outcomes_have_targets() {
        let moved = Outcome::Transitioned { from: 1, to: 2 };
        let cycled = Outcome::Cycled(2);

        assert!(moved.is_accepted());
        assert!(cycled.is_accepted());
        assert!(cycled.is_cycle());
        assert!(!moved.is_cycle());
        assert_eq!(moved.target(), Some(&2));
        assert_eq!(cycled.target(), Some(&2));
    }

    #[test]
    fn non_transitions_have_no_target() {
        let none: Outcome<u8> = Outcome::NoTransition;
        let declined: Outcome<u8> = Outcome::Declined;

        assert!(!none.is_accepted());
        assert!(!declined.is_accepted());
        assert_eq!(none.target(), None);
        assert_eq!(declined.target(), None);
    }
}
