use std::time::Duration;

use crate::generic::luby::Luby;

/// Counts for various things which count, roughly.
pub struct Counters {
    /// A count of every conflict seen, across all solves.
    pub total_conflicts: usize,

    /// A count of conflicts seen since the last restart.
    ///
    /// As u32 rather than a usize for easier interaction with the luby sequence.
    pub fresh_conflicts: u32,

    /// A count of all decisions made, across all solves.
    pub total_decisions: usize,

    /// A count of conflicts during the current (or most recent) solve.
    pub solve_conflicts: usize,

    /// A count of decisions during the current (or most recent) solve.
    pub solve_decisions: usize,

    /// The total number of iterations through a solve.
    pub total_iterations: usize,

    /// The number of restarts, across all solves.
    pub restarts: usize,

    /// The number of reductions of the addition database.
    pub reductions: usize,

    /// The number of solves.
    pub solves: usize,

    /// The number of clauses received through the import callback.
    pub imports: usize,

    /// The number of clauses passed to the export callback.
    pub exports: usize,

    /// The time taken during the most recent solve.
    pub time: Duration,

    /// The current element in the luby sequence.
    pub luby: Luby,
}

impl Default for Counters {
    fn default() -> Self {
        Counters {
            total_conflicts: 0,
            fresh_conflicts: 0,
            total_decisions: 0,

            solve_conflicts: 0,
            solve_decisions: 0,

            total_iterations: 0,
            restarts: 0,
            reductions: 0,
            solves: 0,

            imports: 0,
            exports: 0,

            time: Duration::from_secs(0),

            luby: Luby::default(),
        }
    }
}

impl Counters {
    /// Resets the counts scoped to a single solve.
    pub fn fresh_solve(&mut self) {
        self.solve_conflicts = 0;
        self.solve_decisions = 0;
        self.fresh_conflicts = 0;
        self.solves += 1;
    }
}
