/*!
A context method to aid boolean constraint propagation

See [GenericContext::bcp] for the relevant context method, and [GenericContext::propagate] to propagate every queued assignment.

# Overview
Propagates an atom being assigned some value, given as a literal.

This is done by examining clauses watching the literal with the opposite polarity and updating the watches of the clause, if possible, assigning the consequence of the asserting clause, or identifying the clause conflicts with the current valuation.

# Watches

Each clause of two or more literals watches the literals at index 0 and 1, and is present on the watch list of each.
When some literal becomes false its watch list is taken, and each clause on the list is visited:

- If the blocker of the watch is true, the clause is satisfied and the watch is kept as is.
- Otherwise, the false literal is moved to index 1, and some literal from index 2 onwards which is not false replaces it, with the clause moving to the watch list of the replacement.
- If there is no replacement, the clause is unit on the literal at index 0 (which is assigned, with the clause as its reason) or conflicts with the current valuation.

So, the literal at index 0 of the reason for an assignment is always the literal assigned.

# Complications

The watch list of the false literal is taken from the watch database for the duration of the visit, to avoid a mutable borrow of the list conflicting with updates to other watch lists.
This is safe, as the false literal is not a candidate for a replacement watch.
If a conflict is found the visit stops early and the remaining watches are restored untouched.

# Example

bcp is a mutating method, and a typical application will match against the result of the mutation.

```rust,ignore
match self.propagate() {
    Err(BCPError::Conflict(key)) => {
        let (clause, level) = self.conflict_analysis(key)?;
        ...
    }
    ...
    Ok(()) => {
        match self.make_decision() {
            ...
        }
    }
}
```
*/

use crate::{
    context::GenericContext,
    db::watches::Watch,
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::BCPError,
};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Propagates every queued assignment, until a fixpoint or a conflict.
    pub fn propagate(&mut self) -> Result<(), BCPError> {
        while let Some(literal) = self.trail.next_to_propagate() {
            self.bcp(literal)?;
        }
        Ok(())
    }

    /// For documentation see [procedures::bcp](crate::procedures::bcp).
    pub fn bcp(&mut self, literal: CLiteral) -> Result<(), BCPError> {
        let false_literal = literal.negate();
        let mut list = self.watches.take(false_literal);

        let mut outcome = Ok(());
        let mut read = 0;
        let mut write = 0;

        'watch_loop: while read < list.len() {
            let watch = list[read];
            read += 1;

            if self.atom_db.value_of_literal(watch.blocker) == Some(true) {
                list[write] = watch;
                write += 1;
                continue;
            }

            let Ok(clause) = self.clause_db.get_mut(watch.key) else {
                log::trace!(target: targets::PROPAGATION, "Dropped watch for missing {}", watch.key);
                continue;
            };
            let literals = clause.literals_mut();

            if literals[0] == false_literal {
                literals.swap(0, 1);
            }
            if literals[1] != false_literal {
                log::error!(target: targets::PROPAGATION, "{} does not watch {false_literal}", watch.key);
                list[write] = watch;
                write += 1;
                outcome = Err(BCPError::CorruptWatch);
                break 'watch_loop;
            }

            let first = literals[0];
            let kept = Watch {
                key: watch.key,
                blocker: first,
            };

            if first != watch.blocker && self.atom_db.value_of_literal(first) == Some(true) {
                list[write] = kept;
                write += 1;
                continue;
            }

            for index in 2..literals.len() {
                if self.atom_db.value_of_literal(literals[index]) != Some(false) {
                    literals.swap(1, index);
                    self.watches.watch(literals[1], kept);
                    continue 'watch_loop;
                }
            }

            list[write] = kept;
            write += 1;

            match self.atom_db.value_of_literal(first) {
                Some(false) => {
                    log::trace!(target: targets::PROPAGATION, "Consequence of {} and {literal} is contradiction.", watch.key);
                    outcome = Err(BCPError::Conflict(watch.key));
                    break 'watch_loop;
                }
                _ => self.assign(first, Some(watch.key)),
            }
        }

        while read < list.len() {
            list[write] = list[read];
            read += 1;
            write += 1;
        }
        list.truncate(write);
        self.watches.restore(false_literal, list);

        outcome
    }
}
