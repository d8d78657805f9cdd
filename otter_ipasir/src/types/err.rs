//! Error types used in the library.
//!
//! - [ErrorKind] is the closed set of outcomes, other than success, of an operation on the protocol surface.
//! - The remaining enums note errors internal to the engine.
//!   Most of these are very unlikely to occur during use, and all of them surface as [ErrorKind::Unknown].
//!   The exception is [BCPError::Conflict], which is used to control the flow of a solve and never leaves the engine.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::db::ClauseKey;

/// Errors returned by protocol operations.
///
/// Success is `Ok(_)`, and so there is no counterpart to `IPASIR2_E_OK`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Some failure with no more specific code.
    Unknown,

    /// The operation is not supported.
    Unsupported,

    /// The operation is supported, though not with the given argument.
    UnsupportedArgument,

    /// The operation is not legal in the current state.
    InvalidState,

    /// Some argument is malformed, or outside the set the operation applies to.
    InvalidArgument,

    /// No option with the given name.
    OptionUnknown,

    /// The value is outside the bounds of the option, or of the wrong kind.
    OptionInvalidValue,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Unsupported => write!(f, "Unsupported"),
            Self::UnsupportedArgument => write!(f, "UnsupportedArgument"),
            Self::InvalidState => write!(f, "InvalidState"),
            Self::InvalidArgument => write!(f, "InvalidArgument"),
            Self::OptionUnknown => write!(f, "OptionUnknown"),
            Self::OptionInvalidValue => write!(f, "OptionInvalidValue"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseKey),

    /// Some corruption in the watched literals of a clause.
    /// This is unexpected.
    CorruptWatch,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        log::error!("BCP error escaped a solve: {e:?}");
        ErrorKind::Unknown
    }
}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Somehow resolution resolved to an empty clause.
    EmptyResolution,

    /// Resolution failed to terminate with an asserting clause.
    NoAssertion,

    /// A literal of the current level was reached without a reason.
    MissingReason,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        log::error!("Analysis error: {e:?}");
        ErrorKind::Unknown
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// A clause is missing, most likely as it was removed during a reduction.
    Missing,

    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// All possible keys have been used.
    StorageExhausted,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        log::error!("Clause database error: {e:?}");
        ErrorKind::Unknown
    }
}

/// Errors in the atom database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        log::error!("Atom database error: {e:?}");
        ErrorKind::Unknown
    }
}
