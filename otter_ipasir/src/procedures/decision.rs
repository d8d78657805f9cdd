/*!
Methods for choosing the value of an atom.

# Overview

The core decision procedure is straightforward:
- Search through all atoms in the context for an atom which is not assigned a value, and assign either true or false.

# Decisions as literals

Strictly a decision is to value some atom *a* with value *v*.
Still, it is convenient to represent such a decision as a literal with atom *a* and polarity *v*.
For example, a decision to value *p* with value *false* can be represented with the literal *-p*.

# Heuristics

## Activity

Atoms are selected by activity, and the [atom database](crate::db::atom) stores atoms without a value on a max value activity heap in order to support quick access to the most active atom without a value.
Though, as storing *only* atoms without a value takes considerably more effort than *at least* those atoms without a value, it may take some work to find the relevant atom.

## Phase saving

If phase saving is enabled and a chosen atom was previously valued *v* the atom is again valued *v*.
Otherwise, the value follows the [phase](crate::config::Config::phase) of the atom.

Note: For efficiency an atom always has a 'previous' value, initialised from its phase.

## Randomness

With probability [random_decision_bias](crate::config::Config::random_decision_bias) an atom without a value is chosen at random, rather than by activity.
*/

use rand::seq::IteratorRandom;

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// Methods related to making decisions.
impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Chooses a value for some atom without a value, returned as a literal.
    ///
    /// Returns `None` if every atom has a value.
    pub fn make_decision(&mut self) -> Option<CLiteral> {
        let chosen_atom = self.atom_without_value()?;
        self.counters.total_decisions += 1;
        self.counters.solve_decisions += 1;

        let decision_literal = match self.config.phase_saving.value {
            true => CLiteral::new(chosen_atom, self.atom_db.previous_value_of(chosen_atom)),
            false => CLiteral::new(chosen_atom, self.initial_phase(chosen_atom)),
        };
        log::trace!(target: targets::PROPAGATION, "Decision {decision_literal}");

        Some(decision_literal)
    }

    /// Returns an atom which has no value on the current valuation, either by random decision or by most activity.
    pub fn atom_without_value(&mut self) -> Option<Atom> {
        match self.rng.random_bool(self.config.random_decision_bias.value) {
            true => self.atom_db.unvalued_atoms().choose(&mut self.rng),
            false => {
                while let Some(atom) = self.atom_db.heap_pop_most_active() {
                    if self.atom_db.value_of(atom).is_none() {
                        return Some(atom);
                    }
                }
                self.atom_db.unvalued_atoms().next()
            }
        }
    }
}
