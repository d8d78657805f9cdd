//! Abstract elements of the protocol and a solve, and their representation.
//!
//! - [Atoms](atom) are variables.
//! - [Literals](literal) pair an atom with a polarity, represented as signed integers.
//! - [Clauses](clause) are sequences of literals.
//! - [Redundancy] levels annotate clauses with how strongly they preserve the formula they join.

pub mod atom;
pub mod clause;
pub mod literal;

mod redundancy;
pub use redundancy::Redundancy;
