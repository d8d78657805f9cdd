//! Determines the satisfiability of the formula in a context, under some assumptions.
//!
//! # Overview
//!
//! [solve](GenericContext::solve) manages the protocol around a solve, and [search](GenericContext::search) the conflict-driven clause-learning loop.
//!
//! Roughly, the loop is as diagrammed:
//!
//! ```none
//!                         +--------------------------+
//!   +-------------------->| propagate                |------> unsatisfiable, on a conflict at level zero
//!   |                     +--------------------------+
//!   |                       |                    |
//!   |            on conflict|                    |at a fixpoint
//!   |                       ⌄                    ⌄
//!   |   +----------------------------+   +---------------------------+
//!   |   | analysis, backjump, learn  |   | decide the next assumption |--> unsatisfiable, if some assumption fails
//!   |   +----------------------------+   +---------------------------+
//!   |          |                                 |
//!   |          | (restart, reduce, import)       | every assumption holds
//!   |          |                                 ⌄
//!   |          |                         +---------------+
//!   +----------+-------------------------| make_decision |------> satisfiable, if every atom has a value
//!                                        +---------------+
//! ```
//!
//! The loop may be interrupted:
//! - By the terminate callback, polled at each fixpoint and after each conflict.
//! - By the conflict limit.
//! - By the decision limit, in which case a [completion](crate::procedures::completion) of the current valuation is tried before giving up.
//!
//! An interrupted solve resolves as [Unknown](Report::Unknown), and the context returns to INPUT.
//!
//! # Example
//!
//! ```rust
//! # use otter_ipasir::context::{Context, ContextState};
//! # use otter_ipasir::reports::Report;
//! # use otter_ipasir::structures::Redundancy;
//! let mut the_context = Context::default();
//!
//! assert!(the_context.add(&[-1, 2], Redundancy::None).is_ok());
//! assert!(the_context.add(&[1, -2], Redundancy::None).is_ok());
//!
//! assert_eq!(the_context.solve(&[]), Ok(Report::Satisfiable));
//! assert_eq!(the_context.val(1).map(i32::signum), the_context.val(2).map(i32::signum));
//!
//! assert_eq!(the_context.solve(&[1, -2]), Ok(Report::Unsatisfiable));
//! assert_eq!(the_context.state(), ContextState::Unsatisfiable);
//!
//! assert!(the_context.add(&[1], Redundancy::None).is_ok());
//! assert_eq!(the_context.solve(&[]), Ok(Report::Satisfiable));
//! assert_eq!(the_context.val(2), Ok(2));
//! ```
//!
//! # Literature
//!
//! The core solve procedure follows the presentation in [Decision Procedures](https://doi.org/10.1007/978-3-662-50497-0)
//! and the [Handbook of satisfiability](https://www.iospress.com/catalog/books/handbook-of-satisfiability-2).

use crate::{
    context::{legality::Operation, ContextState, GenericContext},
    misc::log::targets::{self},
    procedures::assumptions::AssumptionOk,
    reports::Report,
    structures::literal::{checked_literal, CLiteral, Literal},
    types::err::{BCPError, ErrorKind},
};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Solves the formula of the context under the staged assumptions, followed by `assumptions`.
    ///
    /// Every assumption is cleared once the solve resolves, whatever the result.
    ///
    /// # Errors
    /// - [InvalidState](ErrorKind::InvalidState) if a solve is not legal in the current state.
    /// - [InvalidArgument](ErrorKind::InvalidArgument) if some assumption is not a literal, in which case the context is unchanged.
    /// - [Unknown](ErrorKind::Unknown) if some internal error occurs, in which case the context returns to INPUT.
    pub fn solve(&mut self, assumptions: &[i32]) -> Result<Report, ErrorKind> {
        self.check(Operation::Solve)?;
        let assumptions = assumptions
            .iter()
            .map(|&literal| checked_literal(literal))
            .collect::<Result<Vec<CLiteral>, _>>()?;

        let mut all_assumptions = std::mem::take(&mut self.staged_assumptions);
        all_assumptions.extend(assumptions);

        let total_time = std::time::Instant::now();
        self.backjump(0);
        self.to_input();
        self.assumed_atoms = all_assumptions.iter().map(|literal| literal.atom()).collect();
        self.counters.fresh_solve();
        if self.counters.luby.current() == 0 {
            self.counters.luby.next();
        }
        self.transition(ContextState::Solving);

        let outcome = self.search(&all_assumptions);
        if outcome.is_err() {
            self.backjump(0);
        }
        self.flush_notify();
        self.counters.time = total_time.elapsed();

        match outcome {
            Ok(report) => {
                match report {
                    Report::Satisfiable => self.transition(ContextState::Satisfiable),
                    Report::Unsatisfiable => self.transition(ContextState::Unsatisfiable),
                    Report::Unknown => self.transition(ContextState::Input),
                }
                log::info!(target: targets::STATE, "Solve {} resolved {report} in {:.2?}", self.counters.solves, self.counters.time);
                Ok(report)
            }

            Err(e) => {
                log::error!(target: targets::STATE, "Solve {} failed: {e}", self.counters.solves);
                self.to_input();
                Err(ErrorKind::Unknown)
            }
        }
    }

    /// The conflict-driven clause-learning loop.
    ///
    /// For documentation, see [procedures::solve](crate::procedures::solve).
    fn search(&mut self, assumptions: &[CLiteral]) -> Result<Report, ErrorKind> {
        for assumption in assumptions {
            self.ensure_atom(assumption.atom())?;
        }

        if self.fundamental_conflict {
            return Ok(Report::Unsatisfiable);
        }
        self.poll_import()?;

        'search_loop: loop {
            if self.fundamental_conflict {
                return Ok(Report::Unsatisfiable);
            }
            self.counters.total_iterations += 1;

            match self.propagate() {
                Err(BCPError::Conflict(key)) => {
                    self.counters.total_conflicts += 1;
                    self.counters.solve_conflicts += 1;
                    self.counters.fresh_conflicts += 1;

                    if self.trail.level() == 0 {
                        self.fundamental_conflict = true;
                        continue 'search_loop;
                    }

                    if self
                        .config
                        .conflict_limit()
                        .is_some_and(|limit| self.counters.solve_conflicts > limit)
                    {
                        log::debug!(target: targets::STATE, "Conflict limit reached");
                        return Ok(Report::Unknown);
                    }
                    if self.check_callback_terminate() {
                        log::debug!(target: targets::STATE, "Terminated after a conflict");
                        return Ok(Report::Unknown);
                    }

                    let (clause, level) = self.conflict_analysis(key)?;
                    self.backjump(level);
                    self.learn(clause)?;

                    self.atom_db.decay_activity();
                    self.clause_db.decay_activity();

                    if self.restart_due() {
                        self.restart()?;
                    }
                }

                Err(e) => return Err(e.into()),

                Ok(()) => {
                    self.flush_notify();
                    if self.check_callback_terminate() {
                        log::debug!(target: targets::STATE, "Terminated at a fixpoint");
                        return Ok(Report::Unknown);
                    }

                    match self.decide_assumptions(assumptions) {
                        AssumptionOk::Decided => continue 'search_loop,
                        AssumptionOk::Failed(assumption) => {
                            self.analyze_final(assumption);
                            return Ok(Report::Unsatisfiable);
                        }
                        AssumptionOk::Exhausted => {}
                    }

                    if self.trail.literals.len() == self.atom_db.count() {
                        self.record_model(None);
                        return Ok(Report::Satisfiable);
                    }

                    if self
                        .config
                        .decision_limit()
                        .is_some_and(|limit| self.counters.solve_decisions >= limit)
                    {
                        log::debug!(target: targets::STATE, "Decision limit reached");
                        return match self.try_completion() {
                            Some(completion) => {
                                self.record_model(Some(completion));
                                Ok(Report::Satisfiable)
                            }
                            None => Ok(Report::Unknown),
                        };
                    }

                    match self.make_decision() {
                        Some(decision) => {
                            self.trail.new_level();
                            self.assign(decision, None);
                        }
                        None => {
                            self.record_model(None);
                            return Ok(Report::Satisfiable);
                        }
                    }
                }
            }
        }
    }

    /// True if a restart is due, following the luby sequence scaled by [luby_u](crate::config::Config::luby_u).
    fn restart_due(&self) -> bool {
        self.config.restart.value
            && self.counters.fresh_conflicts
                >= self.counters.luby.current().saturating_mul(self.config.luby_u.value)
    }

    /// Restarts the solve, reducing the addition database and polling for imports if due.
    fn restart(&mut self) -> Result<(), ErrorKind> {
        self.backjump(0);
        self.counters.restarts += 1;
        self.counters.fresh_conflicts = 0;
        self.counters.luby.next();
        log::trace!(target: targets::BACKJUMP, "Restart {}", self.counters.restarts);

        if self.reduction_due() {
            self.reduce()?;
        }
        self.poll_import()?;
        Ok(())
    }
}
