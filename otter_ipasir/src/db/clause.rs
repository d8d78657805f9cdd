/*!
A database of clauses, indexed by [ClauseKey]s.

Clauses are stored in one of two collections, decided by the source and redundancy of the clause:

- *Original* clauses are kept for the lifetime of the context.
  These are the clauses added outside of a solve with any redundancy other than [Forgettable](Redundancy::Forgettable).
  Keys to original clauses are never reused.
- *Addition* clauses (learnt clauses, imported clauses, and original clauses added as forgettable) may be removed.
  The index of a removed clause is reused for some later clause, and so a removed clause must be unwatched before its key is given out again.

Each clause notes its source, redundancy and activity.
The first two literals of a clause of two or more literals are those watched, and so the order of literals may change during a solve.
*/

use crate::{
    config::Activity,
    db::{ClauseKey, FormulaIndex},
    misc::log::targets::{self},
    structures::{
        clause::{CClause, Clause, ClauseSource},
        literal::CLiteral,
        Redundancy,
    },
    types::err::ClauseDBError,
};

/// Activity is rescaled when a bump exceeds this value.
const ACTIVITY_CEILING: Activity = 1e20;

/// A clause, as stored in the database.
#[derive(Clone, Debug)]
pub struct DBClause {
    literals: CClause,
    redundancy: Redundancy,
    activity: Activity,
    source: ClauseSource,
}

impl DBClause {
    /// The literals of the clause.
    pub fn literals(&self) -> &[CLiteral] {
        &self.literals
    }

    /// The literals of the clause, mutably, for the maintenance of watches.
    pub(crate) fn literals_mut(&mut self) -> &mut [CLiteral] {
        &mut self.literals
    }

    /// The redundancy the clause was stored with.
    pub fn redundancy(&self) -> Redundancy {
        self.redundancy
    }

    /// Where the clause came from.
    pub fn source(&self) -> ClauseSource {
        self.source
    }

    /// The activity of the clause.
    pub fn activity(&self) -> Activity {
        self.activity
    }
}

/// The clause database.
pub struct ClauseDB {
    original: Vec<DBClause>,
    addition: Vec<Option<DBClause>>,
    free_addition_indicies: Vec<FormulaIndex>,
    addition_count: usize,
    bump: Activity,
    decay: Activity,
}

impl ClauseDB {
    pub fn new(decay: Activity) -> Self {
        ClauseDB {
            original: Vec::default(),
            addition: Vec::default(),
            free_addition_indicies: Vec::default(),
            addition_count: 0,
            bump: 1.0,
            decay,
        }
    }

    /// Stores `clause`, in the database decided by `source` and `redundancy`, and returns its key.
    ///
    /// # Errors
    /// - [EmptyClause](ClauseDBError::EmptyClause) if the clause is empty, as there is nothing to watch.
    /// - [StorageExhausted](ClauseDBError::StorageExhausted) if there are no more keys.
    pub fn store(
        &mut self,
        clause: CClause,
        redundancy: Redundancy,
        source: ClauseSource,
    ) -> Result<ClauseKey, ClauseDBError> {
        if clause.is_empty() {
            return Err(ClauseDBError::EmptyClause);
        }

        let db_clause = DBClause {
            literals: clause,
            redundancy,
            activity: 0.0,
            source,
        };

        let permanent = source == ClauseSource::Original && redundancy != Redundancy::Forgettable;

        let key = match permanent {
            true => {
                let index = FormulaIndex::try_from(self.original.len())
                    .map_err(|_| ClauseDBError::StorageExhausted)?;
                self.original.push(db_clause);
                ClauseKey::Original(index)
            }

            false => {
                let index = match self.free_addition_indicies.pop() {
                    Some(index) => {
                        self.addition[index as usize] = Some(db_clause);
                        index
                    }
                    None => {
                        let index = FormulaIndex::try_from(self.addition.len())
                            .map_err(|_| ClauseDBError::StorageExhausted)?;
                        self.addition.push(Some(db_clause));
                        index
                    }
                };
                self.addition_count += 1;
                ClauseKey::Addition(index)
            }
        };

        log::trace!(target: targets::CLAUSE_DB, "Stored {key}");
        Ok(key)
    }

    /// The clause indexed by `key`.
    pub fn get(&self, key: ClauseKey) -> Result<&DBClause, ClauseDBError> {
        let clause = match key {
            ClauseKey::Original(index) => self.original.get(index as usize),
            ClauseKey::Addition(index) => {
                self.addition.get(index as usize).and_then(Option::as_ref)
            }
        };
        clause.ok_or(ClauseDBError::Missing)
    }

    /// The clause indexed by `key`, mutably.
    pub fn get_mut(&mut self, key: ClauseKey) -> Result<&mut DBClause, ClauseDBError> {
        let clause = match key {
            ClauseKey::Original(index) => self.original.get_mut(index as usize),
            ClauseKey::Addition(index) => self
                .addition
                .get_mut(index as usize)
                .and_then(Option::as_mut),
        };
        clause.ok_or(ClauseDBError::Missing)
    }

    /// Removes the addition clause indexed by `key`, returning the clause.
    ///
    /// # Soundness
    /// The clause must be unwatched before the index is reused.
    pub fn remove_addition(&mut self, key: ClauseKey) -> Result<DBClause, ClauseDBError> {
        let ClauseKey::Addition(index) = key else {
            return Err(ClauseDBError::Missing);
        };
        let clause = self
            .addition
            .get_mut(index as usize)
            .and_then(Option::take)
            .ok_or(ClauseDBError::Missing)?;
        self.free_addition_indicies.push(index);
        self.addition_count -= 1;
        log::trace!(target: targets::CLAUSE_DB, "Removed {key}: {}", clause.literals.as_dimacs(false));
        Ok(clause)
    }

    /// Bumps the activity of the clause indexed by `key`, if an addition clause.
    pub fn bump_activity(&mut self, key: ClauseKey) {
        let bump = self.bump;
        if let ClauseKey::Addition(_) = key {
            if let Ok(clause) = self.get_mut(key) {
                clause.activity += bump;
                if clause.activity > ACTIVITY_CEILING {
                    self.rescale_activity();
                }
            }
        }
    }

    /// Decays the activity of all clauses, by increasing future bumps.
    pub fn decay_activity(&mut self) {
        self.bump /= self.decay;
        if self.bump > ACTIVITY_CEILING {
            self.rescale_activity();
        }
    }

    /// Sets the decay of activity.
    pub fn set_decay(&mut self, decay: Activity) {
        self.decay = decay;
    }

    fn rescale_activity(&mut self) {
        let factor = 1.0 / ACTIVITY_CEILING;
        for clause in self.addition.iter_mut().flatten() {
            clause.activity *= factor;
        }
        self.bump *= factor;
    }

    /// Keys to all addition clauses.
    pub fn addition_keys(&self) -> impl Iterator<Item = ClauseKey> + '_ {
        self.addition
            .iter()
            .enumerate()
            .filter(|(_, clause)| clause.is_some())
            .map(|(index, _)| ClauseKey::Addition(index as FormulaIndex))
    }

    /// All clauses, original and addition.
    pub fn all_clauses(&self) -> impl Iterator<Item = &DBClause> + '_ {
        self.original.iter().chain(self.addition.iter().flatten())
    }

    /// A count of original clauses.
    pub fn original_count(&self) -> usize {
        self.original.len()
    }

    /// A count of addition clauses.
    pub fn addition_count(&self) -> usize {
        self.addition_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redundancy_decides_the_database() {
        let mut clause_db = ClauseDB::new(0.95);

        let none = clause_db.store(vec![1, 2], Redundancy::None, ClauseSource::Original);
        let equivalent =
            clause_db.store(vec![1, 3], Redundancy::Equivalent, ClauseSource::Original);
        let forgettable =
            clause_db.store(vec![2, 3], Redundancy::Forgettable, ClauseSource::Original);
        let learnt = clause_db.store(vec![-2, 3], Redundancy::Equivalent, ClauseSource::Resolution);
        let imported = clause_db.store(vec![-2, -3], Redundancy::Equivalent, ClauseSource::Import);

        assert_eq!(none, Ok(ClauseKey::Original(0)));
        assert_eq!(equivalent, Ok(ClauseKey::Original(1)));
        assert_eq!(forgettable, Ok(ClauseKey::Addition(0)));
        assert_eq!(learnt, Ok(ClauseKey::Addition(1)));
        assert_eq!(imported, Ok(ClauseKey::Addition(2)));
        assert_eq!(clause_db.addition_count(), 3);
    }

    #[test]
    fn addition_indicies_are_reused() {
        let mut clause_db = ClauseDB::new(0.95);
        let stored = clause_db.store(vec![1, 2], Redundancy::Forgettable, ClauseSource::Original);
        let Ok(key) = stored else {
            panic!("failed to store");
        };

        assert!(clause_db.remove_addition(key).is_ok());
        assert_eq!(clause_db.get(key).err(), Some(ClauseDBError::Missing));
        assert_eq!(clause_db.addition_count(), 0);

        let reused = clause_db.store(vec![3, 4], Redundancy::Equivalent, ClauseSource::Import);
        assert_eq!(reused, Ok(key));
        let Ok(clause) = clause_db.get(key) else {
            panic!("missing reused clause");
        };
        assert_eq!(clause.source(), ClauseSource::Import);
        assert_eq!(clause.redundancy(), Redundancy::Equivalent);
        assert_eq!(clause.literals(), &[3, 4]);
        assert!(clause_db.remove_addition(ClauseKey::Original(0)).is_err());
    }

    #[test]
    fn empty_clauses_are_not_stored() {
        let mut clause_db = ClauseDB::new(0.95);
        assert_eq!(
            clause_db.store(vec![], Redundancy::None, ClauseSource::Original),
            Err(ClauseDBError::EmptyClause)
        );
    }
}
