//! Clauses, as sequences of literals.
//!
//! The order of literals carries no meaning at the protocol level.
//! Within the clause database the first two literals of a clause are those watched during propagation.

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
};

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// Something which has methods for reading the literals of a clause.
pub trait Clause {
    /// The literals of the clause, in order.
    fn literals(&self) -> impl Iterator<Item = &CLiteral>;

    /// The number of literals in the clause.
    fn size(&self) -> usize;

    /// The clause in DIMACS form, with or without a terminating zero.
    fn as_dimacs(&self, zero: bool) -> String {
        let mut dimacs = String::default();
        for literal in self.literals() {
            dimacs.push_str(&format!("{literal} "));
        }
        if zero {
            dimacs.push('0');
        } else {
            dimacs.pop();
        }
        dimacs
    }

    /// The largest atom of the clause, if the clause is non-empty.
    fn atom_max(&self) -> Option<Atom> {
        self.literals().map(|literal| literal.atom()).max()
    }
}

impl Clause for [CLiteral] {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl Clause for CClause {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// The source of a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClauseSource {
    /// Added through the protocol surface.
    Original,

    /// Learnt through resolution during a solve.
    Resolution,

    /// Received from the import callback during a solve.
    Import,
}
