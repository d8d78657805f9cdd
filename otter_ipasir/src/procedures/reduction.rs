//! Reduction of the addition database.
//!
//! At a restart, if the count of addition clauses exceeds [reduction_base](crate::config::Config::reduction_base) plus [reduction_growth](crate::config::Config::reduction_growth) for each previous reduction, the less active half of the addition clauses are removed.
//!
//! The following clauses are always kept:
//! - Clauses of two literals.
//! - Clauses which are the reason for some assignment.
//!
//! Watches for a removed clause are removed together with the clause, as the key of the clause will be reused.

use crate::{
    config::Activity,
    context::GenericContext,
    db::ClauseKey,
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::ClauseDBError,
};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// True if the addition database is due for a reduction.
    pub fn reduction_due(&self) -> bool {
        let limit = self.config.reduction_base
            + self.config.reduction_growth * self.counters.reductions;
        self.config.reduction.value && self.clause_db.addition_count() > limit
    }

    /// Removes the less active half of the (removable) addition clauses.
    ///
    /// Returns the number of clauses removed.
    pub fn reduce(&mut self) -> Result<usize, ClauseDBError> {
        let mut candidates: Vec<(ClauseKey, Activity)> = Vec::default();
        for key in self.clause_db.addition_keys() {
            let clause = self.clause_db.get(key)?;
            let literals = clause.literals();
            if literals.len() <= 2 {
                continue;
            }
            let locked = self.atom_db.value_of_literal(literals[0]) == Some(true)
                && self.atom_db.reason_of(literals[0].atom()) == Some(key);
            if !locked {
                candidates.push((key, clause.activity()));
            }
        }

        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        let removals = candidates.len() / 2;

        for (key, _) in candidates.into_iter().take(removals) {
            let clause = self.clause_db.remove_addition(key)?;
            log::trace!(target: targets::REDUCTION, "Removed {key} from {:?}", clause.source());
            self.watches.unwatch(clause.literals()[0], key);
            self.watches.unwatch(clause.literals()[1], key);
        }

        self.counters.reductions += 1;
        log::debug!(target: targets::REDUCTION, "Removed {removals} clauses, {} remain", self.clause_db.addition_count());
        Ok(removals)
    }
}
