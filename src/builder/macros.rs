//! Macros for ergonomic state machine construction.

/// Declare a fieldless enum usable as a state or event type.
///
/// The enum derives `Clone, Copy, PartialEq, Eq, Hash, Debug` and gains:
/// - `ALL`: every variant in declaration order
/// - `name()`: the variant name as a static string
///
/// Extra attributes (`#[derive(serde::Serialize)]` and so on) pass through.
///
/// # Example
///
/// ```
/// use switchyard::machine::Fsm;
/// use switchyard::state_enum;
///
/// state_enum! {
///     pub enum Job {
///         Queued,
///         Running,
///         Done,
///     }
/// }
///
/// state_enum! {
///     pub enum JobEvent {
///         Start,
///         Finish,
///     }
/// }
///
/// let fsm: Fsm<Job, JobEvent> = Fsm::with_states(Job::ALL.iter().copied())?;
/// assert_eq!(fsm.state(), &Job::Queued);
/// assert_eq!(Job::Done.name(), "Done");
/// # Ok::<(), switchyard::builder::BuildError>(())
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
