/*!
The table of which operations are legal in which states.

Every entry point consults [Operation::legality] through [check](crate::context::GenericContext::check), rather than deciding legality at the call site.

| Operation | Legal in |
|---|---|
| options, option value, add, register callback | up to SOLVING |
| assume, solve, release | up to INPUT/SAT/UNSAT |
| val | SAT |
| failed | UNSAT |
| assignment size, assignment | INPUT or SAT |

Setting an option is legal up to the max state of its descriptor, see [Legality::UpTo].

Note, a Rust [Context](crate::context::Context) cannot be reached while solving except through a callback, so the SOLVING column matters for the C bindings more than anywhere else.
*/

use super::ContextState;

/// Operations on the protocol surface whose legality depends on the state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Query the option table.
    Options,

    /// Query the value of an option.
    OptionValue,

    /// Add a clause.
    Add,

    /// Stage an assumption.
    Assume,

    /// Solve.
    Solve,

    /// Read the value of a literal in a model.
    Val,

    /// Check whether an assumption is part of the failure core.
    Failed,

    /// Read the assignment stack.
    Assignment,

    /// Register (or clear) a callback.
    RegisterCallback,

    /// Release the context.
    Release,
}

/// A set of states, described relative to the state order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Legality {
    /// Every state whose ordinal is at most that of the given state.
    UpTo(ContextState),

    /// Exactly the given states.
    Only(&'static [ContextState]),
}

impl Legality {
    /// True if `state` is in the set.
    pub fn permits(&self, state: ContextState) -> bool {
        match self {
            Self::UpTo(max_state) => state.ordinal() <= max_state.ordinal(),
            Self::Only(states) => states.contains(&state),
        }
    }
}

impl Operation {
    /// The states in which the operation is legal.
    pub const fn legality(&self) -> Legality {
        use ContextState::*;
        match self {
            Self::Options | Self::OptionValue | Self::Add | Self::RegisterCallback => {
                Legality::UpTo(Solving)
            }
            Self::Assume | Self::Solve | Self::Release => Legality::UpTo(Input),
            Self::Val => Legality::Only(&[Satisfiable]),
            Self::Failed => Legality::Only(&[Unsatisfiable]),
            Self::Assignment => Legality::Only(&[Input, Satisfiable]),
        }
    }

    /// True if the operation is legal in `state`.
    pub fn permitted_in(&self, state: ContextState) -> bool {
        self.legality().permits(state)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Options => write!(f, "options"),
            Self::OptionValue => write!(f, "option_value"),
            Self::Add => write!(f, "add"),
            Self::Assume => write!(f, "assume"),
            Self::Solve => write!(f, "solve"),
            Self::Val => write!(f, "val"),
            Self::Failed => write!(f, "failed"),
            Self::Assignment => write!(f, "assignment"),
            Self::RegisterCallback => write!(f, "register_callback"),
            Self::Release => write!(f, "release"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [ContextState; 5] = [
        ContextState::Configuration,
        ContextState::Input,
        ContextState::Satisfiable,
        ContextState::Unsatisfiable,
        ContextState::Solving,
    ];

    #[test]
    fn nothing_but_queries_while_solving() {
        for operation in [
            Operation::Assume,
            Operation::Solve,
            Operation::Val,
            Operation::Failed,
            Operation::Assignment,
            Operation::Release,
        ] {
            assert!(!operation.permitted_in(ContextState::Solving), "{operation}");
        }
    }

    #[test]
    fn middle_states_are_interchangeable_for_ordinal_rules() {
        let legality = Legality::UpTo(ContextState::Input);
        assert!(legality.permits(ContextState::Configuration));
        assert!(legality.permits(ContextState::Satisfiable));
        assert!(legality.permits(ContextState::Unsatisfiable));
        assert!(!legality.permits(ContextState::Solving));

        let legality = Legality::UpTo(ContextState::Unsatisfiable);
        assert!(legality.permits(ContextState::Input));
    }

    #[test]
    fn results_only_in_their_state() {
        for state in STATES {
            assert_eq!(
                Operation::Val.permitted_in(state),
                state == ContextState::Satisfiable
            );
            assert_eq!(
                Operation::Failed.permitted_in(state),
                state == ContextState::Unsatisfiable
            );
        }
    }
}
