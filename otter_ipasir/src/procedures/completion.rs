//! A propagating completion of the current valuation, tried when no more decisions are permitted.
//!
//! Each atom without a value is given its previous value, and the consequences of the value are propagated.
//! If propagation conflicts the opposite value is tried instead, and if both values conflict the completion fails.
//! There is no backtracking past the atom, so a failed completion says nothing about the satisfiability of the formula.
//!
//! Propagation is over occurrence lists built for the completion, rather than the watches of the context.
//! Completions are not assignments of the context, and so are not noted on the trail, counted as decisions, nor reported to the notify callback.
//! Though, a completion which is a model is noted as the model of the solve.

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// A completed valuation, and the literals which complete the current valuation.
pub struct Completion {
    pub valuation: Vec<Option<bool>>,
    pub extension: Vec<CLiteral>,
}

/// A partial valuation under extension, with the clauses each literal occurs in.
struct Extension<'c> {
    clauses: Vec<&'c [CLiteral]>,
    occurrences: Vec<Vec<usize>>,
    valuation: Vec<Option<bool>>,
    literals: Vec<CLiteral>,
}

impl Extension<'_> {
    fn value_of(&self, literal: CLiteral) -> Option<bool> {
        self.valuation[literal.atom() as usize].map(|value| value == literal.polarity())
    }

    /// Makes `literal` true and propagates, returning false on a conflict.
    fn extend(&mut self, literal: CLiteral) -> bool {
        let mut head = self.literals.len();
        self.valuation[literal.atom() as usize] = Some(literal.polarity());
        self.literals.push(literal);

        while let Some(&made_true) = self.literals.get(head) {
            head += 1;
            let falsified = made_true.negate();

            for &index in &self.occurrences[falsified.index()] {
                let mut unit = None;
                let mut open = 0;
                for &other in self.clauses[index] {
                    match self.valuation[other.atom() as usize] {
                        Some(value) if value == other.polarity() => {
                            open = usize::MAX;
                            break;
                        }
                        Some(_) => {}
                        None => {
                            open += 1;
                            unit = Some(other);
                        }
                    }
                }

                match (open, unit) {
                    (0, _) => return false,
                    (1, Some(unit)) => {
                        self.valuation[unit.atom() as usize] = Some(unit.polarity());
                        self.literals.push(unit);
                    }
                    _ => {}
                }
            }
        }
        true
    }

    /// Clears every value made since the extension had `length` literals.
    fn retract(&mut self, length: usize) {
        for literal in self.literals.drain(length..) {
            self.valuation[literal.atom() as usize] = None;
        }
    }
}

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// A completion of the current valuation which satisfies every clause, if one is found.
    ///
    /// The current valuation must be a fixpoint of propagation.
    pub fn try_completion(&self) -> Option<Completion> {
        let valuation = self.atom_db.valuation().to_vec();
        let clauses: Vec<&[CLiteral]> = self
            .clause_db
            .all_clauses()
            .map(|clause| clause.literals())
            .collect();

        let mut occurrences = vec![Vec::default(); 2 * valuation.len()];
        for (index, clause) in clauses.iter().enumerate() {
            for literal in clause.iter() {
                occurrences[literal.index()].push(index);
            }
        }

        let mut extension = Extension {
            clauses,
            occurrences,
            valuation,
            literals: Vec::default(),
        };

        for atom in 1..extension.valuation.len() {
            if extension.valuation[atom].is_some() {
                continue;
            }
            let phase = self.atom_db.previous_value_of(atom as Atom);
            let length = extension.literals.len();

            if !extension.extend(CLiteral::new(atom as Atom, phase)) {
                extension.retract(length);
                if !extension.extend(CLiteral::new(atom as Atom, !phase)) {
                    log::trace!(target: targets::PROPAGATION, "Completion failed on {atom}");
                    return None;
                }
            }
        }

        let satisfied = extension.clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|&literal| extension.value_of(literal) == Some(true))
        });
        if !satisfied {
            log::error!(target: targets::PROPAGATION, "Completion left some clause unsatisfied");
            return None;
        }

        log::trace!(target: targets::PROPAGATION, "Completion with {} literals", extension.literals.len());
        Some(Completion {
            valuation: extension.valuation,
            extension: extension.literals,
        })
    }
}
