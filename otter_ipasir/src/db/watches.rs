//! Watch lists, indexed by literals.
//!
//! A clause of two or more literals watches its first two literals, and is present on the watch list of each.
//! When a literal becomes false the clauses on its watch list are visited to find a replacement watch, or to propagate or conflict.
//!
//! Each watch also notes a *blocker*, some other literal of the clause.
//! If the blocker is true the clause is satisfied, and the visit ends without reading the clause.

use crate::{
    db::ClauseKey,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// A watch on a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Watch {
    /// The watching clause.
    pub key: ClauseKey,

    /// Some literal of the clause, other than the watched literal.
    pub blocker: CLiteral,
}

/// Watch lists for each literal.
#[derive(Default)]
pub struct Watches {
    lists: Vec<Vec<Watch>>,
}

impl Watches {
    /// Grows the lists to cover both literals of `atom`.
    pub fn ensure_atom(&mut self, atom: Atom) {
        let required = 2 * (atom as usize) + 2;
        if self.lists.len() < required {
            self.lists.resize_with(required, Vec::default);
        }
    }

    /// Adds `watch` to the list of `literal`.
    pub fn watch(&mut self, literal: CLiteral, watch: Watch) {
        self.ensure_atom(literal.atom());
        self.lists[literal.index()].push(watch);
    }

    /// Removes any watch for `key` from the list of `literal`.
    pub fn unwatch(&mut self, literal: CLiteral, key: ClauseKey) {
        if let Some(list) = self.lists.get_mut(literal.index()) {
            list.retain(|watch| watch.key != key);
        }
    }

    /// Takes the list of `literal`, leaving an empty list until the list is [restored](Watches::restore).
    pub fn take(&mut self, literal: CLiteral) -> Vec<Watch> {
        match self.lists.get_mut(literal.index()) {
            Some(list) => std::mem::take(list),
            None => Vec::default(),
        }
    }

    /// Restores a list taken with [take](Watches::take), keeping any watches added in the meantime.
    pub fn restore(&mut self, literal: CLiteral, mut list: Vec<Watch>) {
        self.ensure_atom(literal.atom());
        let current = &mut self.lists[literal.index()];
        list.append(current);
        *current = list;
    }

    /// The list of `literal`.
    pub fn list(&self, literal: CLiteral) -> &[Watch] {
        match self.lists.get(literal.index()) {
            Some(list) => list,
            None => &[],
        }
    }
}
