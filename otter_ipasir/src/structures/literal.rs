//! Literals are atoms paired with a (boolean) polarity.
//!
//! Literals crossing the protocol boundary are signed 32-bit integers, with the sign indicating polarity.
//! The library uses the same representation internally, and so [CLiteral] is an alias of [IntLiteral].
//!
//! ```rust
//! # use otter_ipasir::structures::literal::{CLiteral, Literal};
//! let literal = CLiteral::new(79, true);
//!
//! assert!(literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert_eq!(literal.negate(), -79);
//! ```
//!
//! Two integers are not literals: `0`, which terminates clauses in the C bindings, and `i32::MIN`, whose negation overflows.
//! [checked_literal] filters these out at the boundary.

use crate::{
    structures::atom::Atom,
    types::err::ErrorKind,
};

/// The representation of a literal as an integer, with sign indicating polarity.
pub type IntLiteral = i32;

/// The canonical representation of a literal within the library.
pub type CLiteral = IntLiteral;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal: Copy + std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// A dense index for the literal, distinct for each polarity of each atom.
    fn index(&self) -> usize;
}

impl Literal for IntLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        match polarity {
            true => atom as IntLiteral,
            false => -(atom as IntLiteral),
        }
    }

    fn negate(&self) -> Self {
        -self
    }

    fn atom(&self) -> Atom {
        self.unsigned_abs()
    }

    fn polarity(&self) -> bool {
        self.is_positive()
    }

    fn index(&self) -> usize {
        2 * (self.atom() as usize) + (self.polarity() as usize)
    }
}

/// The literal given by `value`, if `value` is a literal.
///
/// # Errors
/// [ErrorKind::InvalidArgument] for `0` and `i32::MIN`.
pub fn checked_literal(value: i32) -> Result<CLiteral, ErrorKind> {
    match value {
        0 | IntLiteral::MIN => Err(ErrorKind::InvalidArgument),
        _ => Ok(value),
    }
}
