/*!
Assumptions, and the failure core of an unsatisfiable solve.

Assumptions are literals which hold for a single solve.
Before any other decision is made each assumption is decided in turn, one per decision level and in the order given:

- If the assumption is already true, an empty level is opened so that levels and assumptions stay aligned.
- If the assumption has no value, it is decided and propagated.
- If the assumption is false, the formula is unsatisfiable under the assumptions, and [analyze_final](GenericContext::analyze_final) derives the assumptions responsible.

Once the solve resolves, the assumptions are cleared.

The failure core is a set of atoms, as assumptions are matched by atom when queried with [failed](GenericContext::failed).

```rust
# use otter_ipasir::context::Context;
# use otter_ipasir::reports::Report;
# use otter_ipasir::structures::Redundancy;
let mut the_context = Context::default();
assert!(the_context.add(&[-1, 2], Redundancy::None).is_ok());
assert!(the_context.add(&[-2, 3], Redundancy::None).is_ok());

assert_eq!(the_context.solve(&[1, -3, 4]), Ok(Report::Unsatisfiable));
assert_eq!(the_context.failed(1), Ok(true));
assert_eq!(the_context.failed(-3), Ok(true));
assert_eq!(the_context.failed(4), Ok(false));
```
*/

use crate::{
    context::{legality::Operation, GenericContext},
    misc::log::targets::{self},
    structures::literal::{checked_literal, CLiteral, Literal},
    types::err::ErrorKind,
};

/// Possible results from deciding the next assumption.
pub enum AssumptionOk {
    /// An assumption was decided, and requires propagation.
    Decided,

    /// Every assumption holds.
    Exhausted,

    /// Some assumption is false.
    Failed(CLiteral),
}

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Stages `literal` as an assumption for the next solve.
    ///
    /// A staged assumption invalidates any model or failure core, and so the context moves to INPUT.
    pub fn assume(&mut self, literal: i32) -> Result<(), ErrorKind> {
        self.check(Operation::Assume)?;
        let literal = checked_literal(literal)?;

        self.staged_assumptions.push(literal);
        self.to_input();
        Ok(())
    }

    /// Decides assumptions until some assumption requires propagation, or every assumption holds, or some assumption fails.
    pub(crate) fn decide_assumptions(&mut self, assumptions: &[CLiteral]) -> AssumptionOk {
        while let Some(&assumption) = assumptions.get(self.trail.level() as usize) {
            match self.atom_db.value_of_literal(assumption) {
                Some(true) => self.trail.new_level(),

                Some(false) => return AssumptionOk::Failed(assumption),

                None => {
                    self.trail.new_level();
                    log::trace!(target: targets::PROPAGATION, "Assumption {assumption}");
                    self.assign(assumption, None);
                    return AssumptionOk::Decided;
                }
            }
        }
        AssumptionOk::Exhausted
    }

    /// Notes the atoms of assumptions responsible for `assumption` being false as the failure core.
    ///
    /// The core contains the atom of `assumption`, together with the atom of each assumption from which the negation of `assumption` follows.
    /// As assumptions are the only decisions made before every assumption holds, these are the assignments without a reason found by walking back through the reasons for `-assumption`.
    pub(crate) fn analyze_final(&mut self, assumption: CLiteral) {
        self.failed_atoms.clear();
        self.failed_atoms.insert(assumption.atom());

        let atom = assumption.atom();
        if self.atom_db.level_of(atom) == 0 {
            log::trace!(target: targets::ANALYSIS, "Assumption {assumption} failed at level zero");
            return;
        }

        let mut marked = vec![atom];
        self.atom_db.seen[atom as usize] = true;

        let level_zero = self.trail.level_zero().len();
        for index in (level_zero..self.trail.literals.len()).rev() {
            let literal = self.trail.literals[index];
            let atom = literal.atom();
            if !self.atom_db.seen[atom as usize] {
                continue;
            }

            match self.atom_db.reason_of(atom) {
                None => {
                    self.failed_atoms.insert(atom);
                }

                Some(key) => {
                    if let Ok(clause) = self.clause_db.get(key) {
                        for other in clause.literals().iter().skip(1) {
                            let other_atom = other.atom();
                            if self.atom_db.level_of(other_atom) > 0
                                && !self.atom_db.seen[other_atom as usize]
                            {
                                self.atom_db.seen[other_atom as usize] = true;
                                marked.push(other_atom);
                            }
                        }
                    }
                }
            }
        }

        for atom in marked {
            self.atom_db.seen[atom as usize] = false;
        }

        log::trace!(target: targets::ANALYSIS, "Failure core of {} atoms", self.failed_atoms.len());
    }

    /// Whether the assumption on the atom of `literal` is part of the failure core of the most recent solve.
    ///
    /// # Errors
    /// - [InvalidState](ErrorKind::InvalidState) unless the context is unsatisfiable.
    /// - [InvalidArgument](ErrorKind::InvalidArgument) if `literal` is not a literal, or no assumption was made on its atom.
    pub fn failed(&self, literal: i32) -> Result<bool, ErrorKind> {
        self.check(Operation::Failed)?;
        let atom = checked_literal(literal)?.atom();

        match self.assumed_atoms.contains(&atom) {
            true => Ok(self.failed_atoms.contains(&atom)),
            false => {
                log::debug!(target: targets::STATE, "No assumption was made on {atom}");
                Err(ErrorKind::InvalidArgument)
            }
        }
    }
}
