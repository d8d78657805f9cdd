//! A re-entrant incremental satisfiability solver, speaking the IPASIR-2 protocol.
//!
//! otter_ipasir determines the satisfiability of boolean formulas written in conjunctive normal form, across a sequence of solves to which clauses and assumptions may be added between (and, through callbacks, during) solves.
//!
//! The protocol is offered both as a [Rust trait](crate::ipasir::Ipasir2) and as [C bindings](crate::ipasir::ipasir_two).
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context].
//!
//! A context is always in one of five [states](crate::context::ContextState), and each operation of the protocol is legal in only some of these, as tabulated in [legality](crate::context::legality).
//! Rejected operations return [InvalidState](crate::types::err::ErrorKind::InvalidState), and leave the context untouched.
//!
//! Within a context:
//! - The formula is stored in a [clause database](crate::db::clause), split between permanent clauses and clauses which may be forgotten.
//! - The valuation is stored in an [atom database](crate::db::atom), together with the activity of each atom.
//! - The [trail](crate::db::trail) records the order in which atoms were valued.
//!
//! Useful starting points, then, may be:
//! - The high-level [solve procedure](crate::procedures::solve).
//! - The [callbacks](crate::context::callbacks) supported during a solve, and the [redundancy](crate::structures::redundancy) levels which make clause exchange safe.
//! - The [options](crate::config::registry) a context supports.
//!
//! # Examples
//!
//! + Enumerate the models of a formula by blocking each model found.
//!
//! ```rust
//! # use otter_ipasir::context::Context;
//! # use otter_ipasir::reports::Report;
//! # use otter_ipasir::structures::Redundancy;
//! let mut the_context = Context::default();
//! assert!(the_context.add(&[1, 2, 3], Redundancy::None).is_ok());
//!
//! let mut count = 0;
//! while the_context.solve(&[]) == Ok(Report::Satisfiable) {
//!     count += 1;
//!     let block = (1..=3)
//!         .filter_map(|atom| the_context.val(atom).ok())
//!         .map(|literal| -literal)
//!         .collect::<Vec<_>>();
//!     assert!(the_context.add(&block, Redundancy::None).is_ok());
//! }
//!
//! assert_eq!(count, 7);
//! ```
//!
//! + Ask why a collection of assumptions fails.
//!
//! ```rust
//! # use otter_ipasir::context::Context;
//! # use otter_ipasir::reports::Report;
//! # use otter_ipasir::structures::Redundancy;
//! let mut the_context = Context::default();
//! assert!(the_context.add(&[-1, -2], Redundancy::None).is_ok());
//!
//! assert_eq!(the_context.solve(&[1, 2, 3]), Ok(Report::Unsatisfiable));
//! assert_eq!(the_context.failed(3), Ok(false));
//! assert!(the_context.failed(1) == Ok(true) || the_context.failed(2) == Ok(true));
//! ```
//!
//! # Logs
//!
//! To help diagnose issues (somewhat) detailed calls to [log!](log) are made, and a variety of targets are defined in order to help narrow output to relevant parts of the library.
//!
//! The targets are listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! - Rejected calls can be found with `RUST_LOG=state=debug …`
//! - Clauses arriving through the import callback with `RUST_LOG=import=trace …`

#![allow(clippy::single_match)]
#![allow(clippy::derivable_impls)]

pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;

pub mod misc;
pub mod reports;

pub mod ipasir;
