/*!
An iterator to generate the luby sequence, used to schedule restarts.

See <https://oeis.org/A182105> for details on the luby sequence.

The current implementation follows [chaotic-evil](https://gitlab.com/chaotic-evil)'s general [implementation](https://gitlab.com/chaotic-evil/luby), restricted to [LubyRepresentation].

```rust
# use otter_ipasir::generic::luby::Luby;
let start = Luby::default().take(7).collect::<Vec<_>>();
assert_eq!(start, vec![1, 1, 2, 1, 1, 2, 4]);
```
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// Foundation of the iterator.
pub struct Luby {
    curr: LubyRepresentation,
    next: LubyRepresentation,
}

impl Default for Luby {
    fn default() -> Self {
        Luby { curr: 0, next: 0 }
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr & self.curr.wrapping_neg() == self.next {
            self.curr = self.curr.checked_add(1)?;
            self.next = 1;
        } else {
            self.next = self.next.checked_add(self.next)?;
        }

        Some(self.next)
    }
}

impl Luby {
    /// The most recent element of the sequence, or zero if no element has been generated.
    pub fn current(&self) -> LubyRepresentation {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32,
    ];

    #[test]
    fn luby() {
        let mut l = Luby::default();
        for known_value in LUBY_SLICE {
            assert_eq!(l.next(), Some(*known_value));
            assert_eq!(l.current(), *known_value);
        }
    }
}
