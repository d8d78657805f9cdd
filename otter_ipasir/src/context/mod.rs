/*!
The context: an instance of the solver, to which clauses are added and within which solves take place.

Strictly, a [GenericContext] and a [Context].
The generic context is generic over the source of randomness, and [Context] fixes this to [MinimalPCG32](crate::generic::random::MinimalPCG32).

A context is always in one of the [states](ContextState) of IPASIR-2, and each operation on the protocol surface is legal only in some states (see [legality]).
An operation called in a state where it is not legal returns [InvalidState](crate::types::err::ErrorKind::InvalidState) and leaves the context as it was.

# Example
```rust
# use otter_ipasir::context::{Context, ContextState};
# use otter_ipasir::reports::Report;
# use otter_ipasir::structures::Redundancy;
let mut the_context = Context::default();
assert_eq!(the_context.state(), ContextState::Configuration);

assert!(the_context.add(&[1, 2], Redundancy::None).is_ok());
assert!(the_context.add(&[-1], Redundancy::None).is_ok());
assert_eq!(the_context.state(), ContextState::Input);

assert_eq!(the_context.solve(&[]), Ok(Report::Satisfiable));
assert_eq!(the_context.val(1), Ok(-1));
assert_eq!(the_context.val(2), Ok(2));
```
*/

pub mod callbacks;
mod counters;
pub use counters::Counters;
mod generic;
pub use generic::GenericContext;
pub mod legality;
mod options;
mod specific;
pub use specific::Context;

/// The state of a context.
/// These states correspond to the states defined in IPASIR-2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextState {
    /// The context allows for configuration.
    Configuration,

    /// The context allows input.
    Input,

    /// The formula of the context, under the assumptions of the last solve, is known to be satisfiable.
    Satisfiable,

    /// The formula of the context, under the assumptions of the last solve, is known to be unsatisfiable.
    Unsatisfiable,

    /// A solve is in progress.
    Solving,
}

impl ContextState {
    /// The position of the state in the state order.
    ///
    /// Input, Satisfiable, and Unsatisfiable share an ordinal.
    pub const fn ordinal(&self) -> u8 {
        match self {
            Self::Configuration => 0,
            Self::Input | Self::Satisfiable | Self::Unsatisfiable => 1,
            Self::Solving => 2,
        }
    }
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Solving => write!(f, "Solving"),
        }
    }
}
