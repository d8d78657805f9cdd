/*!
Adding clauses to a context.

Clauses arrive through [add](GenericContext::add) outside of a solve, through the [import callback](crate::context::callbacks) during a solve, and through [conflict analysis](crate::procedures::analysis).

Clauses from the first two sources are stored by [store_clause](GenericContext::store_clause), at level zero:

- Each atom of the clause becomes known to the context, even if the clause is dropped.
- Duplicate literals are removed, and tautologies are dropped (as these hold on every valuation).
- The empty clause marks the formula as unsatisfiable.
- A unit clause is not stored, and instead its literal is assigned at level zero (or, if the literal is false, the formula is unsatisfiable).
- Otherwise, the clause is stored with literals which are not false first, and the first two literals are watched.
  If only the first literal is not false, it is assigned with the clause as its reason.
  If every literal is false, the formula is unsatisfiable.

Learnt clauses are stored by [learn](GenericContext::learn), after a backjump to the level at which the clause asserts its first literal.
*/

use crate::{
    context::{legality::Operation, ContextState, GenericContext},
    db::{watches::Watch, ClauseKey},
    misc::log::targets::{self},
    structures::{
        clause::{CClause, Clause, ClauseSource},
        literal::{checked_literal, CLiteral, Literal},
        Redundancy,
    },
    types::err::ErrorKind,
};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Adds `clause` to the formula of the context, with the given redundancy.
    ///
    /// Clauses added as [Forgettable](Redundancy::Forgettable) may later be removed, while clauses with any other redundancy are kept for the lifetime of the context.
    ///
    /// # Errors
    /// - [InvalidState](ErrorKind::InvalidState) during a solve, as clauses are then added through the [Importer](crate::context::callbacks::Importer).
    /// - [InvalidArgument](ErrorKind::InvalidArgument) if some literal is `0` or `i32::MIN`, in which case nothing is added.
    pub fn add(&mut self, clause: &[i32], redundancy: Redundancy) -> Result<(), ErrorKind> {
        self.check(Operation::Add)?;
        if self.state == ContextState::Solving {
            log::debug!(target: targets::STATE, "Direct add rejected while solving");
            return Err(ErrorKind::InvalidState);
        }

        let clause = clause
            .iter()
            .map(|&literal| checked_literal(literal))
            .collect::<Result<CClause, _>>()?;

        self.backjump(0);
        self.to_input();

        log::trace!(target: targets::CLAUSE_DB, "Add {} as {redundancy}", clause.as_dimacs(false));
        self.store_clause(clause, redundancy, ClauseSource::Original)
    }

    /// Stores a clause of original or imported literals.
    ///
    /// For documentation, see [procedures::addition](crate::procedures::addition).
    ///
    /// # Soundness
    /// Requires the context to be at level zero.
    pub(crate) fn store_clause(
        &mut self,
        mut clause: CClause,
        redundancy: Redundancy,
        source: ClauseSource,
    ) -> Result<(), ErrorKind> {
        if let Some(atom) = clause.atom_max() {
            self.ensure_atom(atom)?;
        }

        clause.sort_unstable_by_key(|literal| (literal.atom(), literal.polarity()));
        clause.dedup();
        if clause.windows(2).any(|pair| pair[0] == pair[1].negate()) {
            log::trace!(target: targets::CLAUSE_DB, "Dropped tautology {}", clause.as_dimacs(false));
            return Ok(());
        }

        match clause.as_slice() {
            [] => {
                log::info!(target: targets::CLAUSE_DB, "Empty clause added");
                self.fundamental_conflict = true;
            }

            [literal] => match self.atom_db.value_of_literal(*literal) {
                Some(true) => {}
                Some(false) => self.fundamental_conflict = true,
                None => self.assign(*literal, None),
            },

            _ => {
                clause.sort_by_key(|literal| {
                    self.atom_db.value_of_literal(*literal) == Some(false)
                });
                let first = clause[0];
                let second = clause[1];

                let key = self.clause_db.store(clause, redundancy, source)?;
                self.watch_clause(key, first, second);

                match (
                    self.atom_db.value_of_literal(first),
                    self.atom_db.value_of_literal(second),
                ) {
                    (Some(false), _) => self.fundamental_conflict = true,
                    (None, Some(false)) => self.assign(first, Some(key)),
                    _ => {}
                }
            }
        }

        if self.fundamental_conflict {
            log::info!(target: targets::CLAUSE_DB, "The formula is unsatisfiable");
        }
        Ok(())
    }

    /// Stores a learnt clause, and assigns the literal it asserts.
    ///
    /// The clause is passed to the export callback, if registered.
    ///
    /// # Soundness
    /// Requires the first literal of the clause to be asserted at the current level, and the second literal (if any) to be of the greatest level among the remaining literals.
    pub(crate) fn learn(&mut self, clause: CClause) -> Result<(), ErrorKind> {
        self.make_callback_export(&clause);

        match clause.as_slice() {
            [] => {
                self.fundamental_conflict = true;
            }

            [literal] => self.assign(*literal, None),

            _ => {
                let first = clause[0];
                let second = clause[1];
                let key = self
                    .clause_db
                    .store(clause, Redundancy::Equivalent, ClauseSource::Resolution)?;
                self.watch_clause(key, first, second);
                self.clause_db.bump_activity(key);
                self.assign(first, Some(key));
            }
        }
        Ok(())
    }

    /// Watches the first two literals of the clause indexed by `key`.
    fn watch_clause(&mut self, key: ClauseKey, first: CLiteral, second: CLiteral) {
        self.watches.watch(
            first,
            Watch {
                key,
                blocker: second,
            },
        );
        self.watches.watch(
            second,
            Watch {
                key,
                blocker: first,
            },
        );
    }
}
