use std::collections::HashSet;

use crate::{
    config::{registry::OptionDescriptor, Config},
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail, watches::Watches, ClauseKey, LevelIndex},
    misc::log::targets::{self},
    reports::Report,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
    types::err::{AtomDBError, ErrorKind},
};

use super::{
    callbacks::{Callbacks, NotifyBuffer},
    legality::Operation,
    ContextState, Counters,
};

/// A generic context, parameratised to a source of randomness.
///
/// Requires a source of [rng](rand::Rng) which (also) implements [SeedableRng](rand::SeedableRng), as the seed of a context is an option.
///
/// # Example
///
/// ```rust
/// # use otter_ipasir::context::GenericContext;
/// # use otter_ipasir::generic::random::MinimalPCG32;
/// # use otter_ipasir::config::Config;
/// let context = GenericContext::<MinimalPCG32>::from_config(Config::default());
/// ```
pub struct GenericContext<R: rand::Rng + rand::SeedableRng> {
    /// The configuration of a context.
    pub config: Config,

    /// The option registry, fixed when the context is created.
    pub(crate) options: Box<[OptionDescriptor]>,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The atom database.
    /// See [db::atom](crate::db::atom) for details.
    pub atom_db: AtomDB,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// Watch lists, indexed by literals.
    pub watches: Watches,

    /// The trail of assignments.
    pub trail: Trail,

    /// The state of the context.
    pub(crate) state: ContextState,

    /// The source of rng.
    pub rng: R,

    /// Registered callbacks.
    pub(crate) callbacks: Callbacks,

    /// Assignment changes not yet reported to the notify callback.
    pub(crate) notify_buffer: NotifyBuffer,

    /// Assumptions staged for the next solve.
    pub(crate) staged_assumptions: Vec<CLiteral>,

    /// The atoms assumed during the most recent solve.
    pub(crate) assumed_atoms: HashSet<Atom>,

    /// The atoms of assumptions in the failure core of the most recent solve.
    pub(crate) failed_atoms: HashSet<Atom>,

    /// The value of each atom in the most recent model, indexed by atoms.
    pub(crate) model: Vec<Option<bool>>,

    /// The literals of the most recent model, in the order assigned.
    pub(crate) model_stack: Vec<CLiteral>,

    /// Set once the formula is known to be unsatisfiable without assumptions.
    pub(crate) fundamental_conflict: bool,
}

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// The state of the context.
    pub fn state(&self) -> ContextState {
        self.state
    }

    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        Report::from(self.state)
    }

    /// Ok if `operation` is legal in the current state, otherwise [InvalidState](ErrorKind::InvalidState).
    pub fn check(&self, operation: Operation) -> Result<(), ErrorKind> {
        match operation.permitted_in(self.state) {
            true => Ok(()),
            false => {
                log::debug!(target: targets::STATE, "{operation} rejected in state {}", self.state);
                Err(ErrorKind::InvalidState)
            }
        }
    }

    /// Moves the context to `state`.
    pub(crate) fn transition(&mut self, state: ContextState) {
        if self.state != state {
            log::trace!(target: targets::STATE, "{} -> {state}", self.state);
            self.state = state;
        }
    }

    /// Moves the context to INPUT, discarding any model or failure core.
    pub(crate) fn to_input(&mut self) {
        self.model.clear();
        self.model_stack.clear();
        self.failed_atoms.clear();
        self.transition(ContextState::Input);
    }

    /// Ensures every atom up to and including `atom` is present in the context.
    pub(crate) fn ensure_atom(&mut self, atom: Atom) -> Result<(), AtomDBError> {
        while self.atom_db.atom_max() < atom {
            let fresh = self.atom_db.atom_max() + 1;
            let phase = self.initial_phase(fresh);
            self.atom_db.fresh_atom(fresh, phase)?;
            self.watches.ensure_atom(fresh);
        }
        Ok(())
    }

    /// The initial phase of `atom`, from the phase options.
    pub(crate) fn initial_phase(&mut self, atom: Atom) -> bool {
        match self.config.phase_of(atom) {
            1 => true,
            -1 => false,
            _ => self.rng.random_bool(self.config.polarity_lean.value),
        }
    }

    /// The current decision level.
    pub fn level(&self) -> LevelIndex {
        self.trail.level()
    }

    /// Values the atom of `literal` to make `literal` true, at the current level.
    ///
    /// The assignment is queued for propagation, and noted for the notify callback.
    pub(crate) fn assign(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        let level = self.trail.level();
        self.atom_db.set_value(literal, level, reason);
        self.trail.store(literal);
        self.note_change(literal.atom());
    }
}
