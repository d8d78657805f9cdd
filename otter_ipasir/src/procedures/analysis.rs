/*!
Analysis of an unsatisfiable clause.

Takes a key to a clause which is unsatisfiable on the current valuation and returns an asserting clause, together with the level to backjump to before the clause asserts its literal.

In other words, conflict analysis takes a key to a clause which is unsatisfiable on the current valuation and applies resolution using the reasons for assignments made at the current level, stopping at the first unique implication point.

For the method, see: [conflict_analysis](GenericContext::conflict_analysis).

# Details

- Literals valued at level zero are dropped from the resolvent, as these hold on every valuation considered.
- Literals valued at levels below the current level are kept in the resolvent.
- Literals valued at the current level are resolved away, in reverse trail order, until only one remains.
  Its negation is the asserted literal of the clause, and is placed at index 0.
- The literal with the greatest level among the remaining literals is placed at index 1, so that on backjumping to its level both watched literals of the clause are the last to be unassigned.

Every atom and clause used during analysis has its activity bumped.

# Example

```rust, ignore
let (clause, level) = self.conflict_analysis(key)?;
self.backjump(level);
self.learn(clause)?;
```

# Soundness

Analysis requires a conflict at some level above zero, and that the reason for each assignment has the assigned literal at index 0.
*/

use crate::{
    context::GenericContext,
    db::{ClauseKey, LevelIndex},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
    types::err::AnalysisError,
};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// For documentation, see [procedures::analysis](crate::procedures::analysis).
    pub fn conflict_analysis(
        &mut self,
        key: ClauseKey,
    ) -> Result<(CClause, LevelIndex), AnalysisError> {
        let current_level = self.trail.level();
        let mut resolvent: CClause = vec![0];
        let mut seen_atoms: Vec<Atom> = Vec::default();

        let mut unresolved = 0_usize;
        let mut trail_index = self.trail.literals.len();
        let mut reason = Some(key);
        let mut pivot: Option<CLiteral> = None;

        let outcome = loop {
            let Some(reason_key) = reason else {
                break Err(AnalysisError::MissingReason);
            };
            self.clause_db.bump_activity(reason_key);
            let Ok(clause) = self.clause_db.get(reason_key) else {
                break Err(AnalysisError::MissingReason);
            };

            let skip = match pivot {
                Some(_) => 1,
                None => 0,
            };

            for &literal in clause.literals().iter().skip(skip) {
                let atom = literal.atom();
                let level = self.atom_db.level_of(atom);
                if self.atom_db.seen[atom as usize] || level == 0 {
                    continue;
                }

                self.atom_db.seen[atom as usize] = true;
                seen_atoms.push(atom);
                self.atom_db.bump_activity(atom);

                match level >= current_level {
                    true => unresolved += 1,
                    false => resolvent.push(literal),
                }
            }

            let next = loop {
                let Some(index) = trail_index.checked_sub(1) else {
                    break None;
                };
                trail_index = index;
                let literal = self.trail.literals[index];
                if self.atom_db.seen[literal.atom() as usize] {
                    break Some(literal);
                }
            };
            let Some(next) = next else {
                break Err(AnalysisError::NoAssertion);
            };

            self.atom_db.seen[next.atom() as usize] = false;
            pivot = Some(next);

            match unresolved.checked_sub(1) {
                None => break Err(AnalysisError::EmptyResolution),
                Some(0) => break Ok(next),
                Some(remaining) => unresolved = remaining,
            }

            reason = self.atom_db.reason_of(next.atom());
        };

        for atom in seen_atoms {
            self.atom_db.seen[atom as usize] = false;
        }

        let uip = outcome?;
        resolvent[0] = uip.negate();

        let mut backjump_level = 0;
        let mut second = 1;
        for (index, literal) in resolvent.iter().enumerate().skip(1) {
            let level = self.atom_db.level_of(literal.atom());
            if level > backjump_level {
                backjump_level = level;
                second = index;
            }
        }
        if resolvent.len() > 1 {
            resolvent.swap(1, second);
        }

        log::trace!(target: targets::ANALYSIS, "Learnt {} asserting at {backjump_level}", resolvent.as_dimacs(false));
        Ok((resolvent, backjump_level))
    }
}
