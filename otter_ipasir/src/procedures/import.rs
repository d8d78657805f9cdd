//! Polling the import callback for clauses.
//!
//! The import callback is polled at the start of a solve and after each restart, when the context is at level zero.
//! Polling continues until the callback offers no clause, the formula is found to be unsatisfiable, or [import_batch](crate::config::Config::import_batch) clauses have been received.
//!
//! Imported clauses are stored as any other clause added at level zero, though always in the addition database.
//! As the import callback was registered with some pledge of at least [Forgettable](crate::structures::Redundancy::Forgettable), each imported clause may be forgotten.
//! Imported clauses are not passed to the export callback.

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::clause::{Clause, ClauseSource},
    types::err::ErrorKind,
};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Polls the import callback, storing each clause offered.
    ///
    /// Returns the number of clauses received.
    pub(crate) fn poll_import(&mut self) -> Result<usize, ErrorKind> {
        if self.callbacks.import.is_none() {
            return Ok(0);
        }
        self.backjump(0);

        let mut received = 0;
        while received < self.config.import_batch && !self.fundamental_conflict {
            let Some((clause, redundancy)) = self.make_callback_import() else {
                break;
            };
            received += 1;
            self.counters.imports += 1;

            log::trace!(target: targets::IMPORT, "Import {} as {redundancy}", clause.as_dimacs(false));
            self.store_clause(clause, redundancy, ClauseSource::Import)?;
        }

        if received > 0 {
            log::debug!(target: targets::IMPORT, "Received {received} clauses");
        }
        Ok(received)
    }
}
