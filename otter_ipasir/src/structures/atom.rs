/*!
(The internal representation of) an atom (aka. a 'variable').

Each atom is a u32 *u* such that the external literals `u` and `-u` refer to it.
The atom `0` is never the atom of a literal, and is used internally only as padding so that atoms may directly index structures.

```rust
# use otter_ipasir::structures::atom::{Atom, ATOM_MAX};
let atom: Atom = 97;
assert!(atom <= ATOM_MAX);
```

# Notes
- In the SAT literature these are often called 'variables' while in the logic literature these are often called 'atoms'.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The maximum instance of an atom.
///
/// Bounded so that the negation of any literal is representable.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();
