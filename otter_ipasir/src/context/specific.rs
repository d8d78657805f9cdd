use std::collections::HashSet;

use crate::{
    config::Config,
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail, watches::Watches},
    generic::random::MinimalPCG32,
};

use super::{
    callbacks::{Callbacks, NotifyBuffer},
    ContextState, Counters, GenericContext,
};

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Creates a context from some given configuration.
    ///
    /// The option registry of the context is derived from the configuration, and the source of rng is seeded with the configured seed.
    pub fn from_config(config: Config) -> Self {
        Self {
            atom_db: AtomDB::new(&config),
            clause_db: ClauseDB::new(config.activity_decay.value),
            options: config.descriptors().into_boxed_slice(),
            rng: R::seed_from_u64(config.seed.value),

            config,

            counters: Counters::default(),
            watches: Watches::default(),
            trail: Trail::default(),
            state: ContextState::Configuration,

            callbacks: Callbacks::default(),
            notify_buffer: NotifyBuffer::default(),

            staged_assumptions: Vec::default(),
            assumed_atoms: HashSet::default(),
            failed_atoms: HashSet::default(),
            model: Vec::default(),
            model_stack: Vec::default(),

            fundamental_conflict: false,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}
