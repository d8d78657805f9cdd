/*!
Redundancy levels of clauses, ordered by logical strength.

From weakest to strongest:

- [None](Redundancy::None): the clause may alter satisfiability, and must be retained permanently.
- [Forgettable](Redundancy::Forgettable): the clause may be forgotten without altering satisfiability.
- [Equisatisfiable](Redundancy::Equisatisfiable): the clause preserves satisfiability, though it may remove models.
- [Equivalent](Redundancy::Equivalent): the clause preserves the set of models and introduces no new atoms.

A *pledge* of level L authorises only clauses whose declared level is at least L.

```rust
# use otter_ipasir::structures::Redundancy;
assert!(Redundancy::satisfies(Redundancy::Forgettable, Redundancy::Equivalent));
assert!(!Redundancy::satisfies(Redundancy::Forgettable, Redundancy::None));
```

Note, the lattice relates declarations, not truth.
Whether a clause actually is as strong as declared is the responsibility of whoever declares it.
*/

/// A redundancy level.
///
/// The derived order is the order of logical strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Redundancy {
    /// No redundancy.
    #[default]
    None = 0,

    /// The clause may be forgotten.
    Forgettable = 1,

    /// The clause preserves satisfiability.
    Equisatisfiable = 2,

    /// The clause preserves models.
    Equivalent = 3,
}

impl Redundancy {
    /// All levels, weakest first.
    pub const ALL: [Redundancy; 4] = [
        Redundancy::None,
        Redundancy::Forgettable,
        Redundancy::Equisatisfiable,
        Redundancy::Equivalent,
    ];

    /// True if a clause declared at `declared` is authorised by a pledge of `pledge`.
    pub fn satisfies(pledge: Redundancy, declared: Redundancy) -> bool {
        declared >= pledge
    }

    /// The level with the given discriminant, if any.
    pub fn from_int(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Forgettable),
            2 => Some(Self::Equisatisfiable),
            3 => Some(Self::Equivalent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Redundancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Forgettable => write!(f, "Forgettable"),
            Self::Equisatisfiable => write!(f, "Equisatisfiable"),
            Self::Equivalent => write!(f, "Equivalent"),
        }
    }
}
