//! Databases for holding information relevant to a solve.
//!
//! - [The clause database](crate::db::clause)
//!   + A collection of clauses, each indexed by a [ClauseKey]. \
//!     There are two kinds of clause:
//!     * Original clauses \
//!       Clauses added with redundancy [None](crate::structures::Redundancy::None), [Equisatisfiable](crate::structures::Redundancy::Equisatisfiable), or [Equivalent](crate::structures::Redundancy::Equivalent).
//!       These are kept for the lifetime of the context.
//!     * Addition clauses \
//!       Clauses learnt during a solve, and clauses added (or imported) as [Forgettable](crate::structures::Redundancy::Forgettable).
//!       These may be forgotten when the database is [reduced](crate::procedures::reduction).
//!
//! - [The atom database](crate::db::atom)
//!   + Properties of atoms: the current valuation, decision levels and reasons, saved phases, and activity.
//!
//! - [Watches](crate::db::watches)
//!   + For each literal, the clauses watching the literal.
//!
//! - [The trail](crate::db::trail)
//!   + The assignments of the current valuation, in order, split into decision levels.

pub mod atom;
pub mod clause;
pub mod trail;
pub mod watches;

/// The index of a decision level.
pub type LevelIndex = u32;

/// The index of a clause within its database.
pub type FormulaIndex = u32;

/// A key to a clause in the clause database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClauseKey {
    /// A clause kept permanently.
    Original(FormulaIndex),

    /// A clause which may be forgotten.
    Addition(FormulaIndex),
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original(index) => write!(f, "Original({index})"),
            Self::Addition(index) => write!(f, "Addition({index})"),
        }
    }
}
