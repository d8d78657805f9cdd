/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- A current (often partial) valuation, and the previous value of each atom (its saved phase).
- For each valued atom, the level of the assignment and the clause which forced it, if any.
- An [IndexHeap] recording the activity of atoms, where any atom without a value is 'active' on the heap.

Atoms are used as indicies directly, so index `0` of each structure is padding.
*/

use crate::{
    config::{Activity, Config},
    db::{ClauseKey, LevelIndex},
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, ATOM_MAX},
        literal::{CLiteral, Literal},
    },
    types::err::AtomDBError,
};

/// Activity is rescaled when a bump exceeds this value.
const ACTIVITY_CEILING: Activity = 1e100;

/// The atom database.
pub struct AtomDB {
    /// A current (often partial) valuation.
    valuation: Vec<Option<bool>>,

    /// The previous value of each atom (or its initial phase).
    previous_value: Vec<bool>,

    /// The level each valued atom was valued on.
    levels: Vec<LevelIndex>,

    /// The clause which forced the value of each valued atom, if any.
    reasons: Vec<Option<ClauseKey>>,

    /// Activity of atoms, with unvalued atoms active on the heap.
    activity_heap: IndexHeap<Activity>,

    /// The current bump to activity.
    bump: Activity,

    /// The decay to activity after each conflict.
    decay: Activity,

    /// Scratch marks for analysis.
    pub(crate) seen: Vec<bool>,
}

impl AtomDB {
    pub fn new(config: &Config) -> Self {
        AtomDB {
            valuation: vec![None],
            previous_value: vec![false],
            levels: vec![0],
            reasons: vec![None],
            activity_heap: IndexHeap::default(),
            bump: 1.0,
            decay: config.activity_decay.value,
            seen: vec![false],
        }
    }

    /// The greatest atom of the database, or zero if there are no atoms.
    pub fn atom_max(&self) -> Atom {
        (self.valuation.len() - 1) as Atom
    }

    /// A count of atoms.
    pub fn count(&self) -> usize {
        self.valuation.len() - 1
    }

    /// Adds `atom` to the database, with `phase` as its initial previous value.
    ///
    /// Atoms are added in order, and so every atom below `atom` must already be present.
    pub fn fresh_atom(&mut self, atom: Atom, phase: bool) -> Result<(), AtomDBError> {
        if atom > ATOM_MAX || atom as usize != self.valuation.len() {
            return Err(AtomDBError::AtomsExhausted);
        }
        self.valuation.push(None);
        self.previous_value.push(phase);
        self.levels.push(0);
        self.reasons.push(None);
        self.seen.push(false);
        self.activity_heap.add(atom as usize, 0.0);
        self.activity_heap.activate(atom as usize);
        Ok(())
    }

    /// The current valuation, indexed by atoms.
    pub fn valuation(&self) -> &[Option<bool>] {
        &self.valuation
    }

    /// The value of `atom`, if valued.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.get(atom as usize).copied().flatten()
    }

    /// The value of `literal` on the current valuation, if its atom is valued.
    pub fn value_of_literal(&self, literal: CLiteral) -> Option<bool> {
        self.value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    /// The level `atom` was valued on.
    ///
    /// Only meaningful while `atom` is valued.
    pub fn level_of(&self, atom: Atom) -> LevelIndex {
        self.levels.get(atom as usize).copied().unwrap_or_default()
    }

    /// The clause which forced the value of `atom`, if any.
    pub fn reason_of(&self, atom: Atom) -> Option<ClauseKey> {
        self.reasons.get(atom as usize).copied().flatten()
    }

    /// The previous value of `atom`.
    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_value
            .get(atom as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Sets the previous value of `atom`, e.g. when the initial phase of the atom changes.
    pub fn set_previous_value(&mut self, atom: Atom, value: bool) {
        if let Some(previous) = self.previous_value.get_mut(atom as usize) {
            *previous = value;
        }
    }

    /// Values the atom of `literal` to make `literal` true.
    pub fn set_value(&mut self, literal: CLiteral, level: LevelIndex, reason: Option<ClauseKey>) {
        let atom = literal.atom() as usize;
        log::trace!(target: targets::PROPAGATION, "Set {literal} at level {level}");
        self.valuation[atom] = Some(literal.polarity());
        self.previous_value[atom] = literal.polarity();
        self.levels[atom] = level;
        self.reasons[atom] = reason;
    }

    /// Clears the value of `atom`, and returns the atom to the activity heap.
    pub fn drop_value(&mut self, atom: Atom) {
        if let Some(value) = self.valuation.get_mut(atom as usize) {
            *value = None;
            self.reasons[atom as usize] = None;
            self.activity_heap.activate(atom as usize);
        }
    }

    /// Bumps the activity of `atom`.
    pub fn bump_activity(&mut self, atom: Atom) {
        let bump = self.bump;
        self.activity_heap
            .apply_to_index(atom as usize, |activity| activity + bump);
        if self.activity_heap.value_at(atom as usize) > ACTIVITY_CEILING {
            self.rescale_activity();
        }
    }

    /// Decays the activity of all atoms, by increasing future bumps.
    pub fn decay_activity(&mut self) {
        self.bump /= self.decay;
        if self.bump > ACTIVITY_CEILING {
            self.rescale_activity();
        }
    }

    /// Sets the decay of activity.
    pub fn set_decay(&mut self, decay: Activity) {
        self.decay = decay;
    }

    /// The activity of `atom`.
    pub fn activity_of(&self, atom: Atom) -> Activity {
        self.activity_heap.value_at(atom as usize)
    }

    fn rescale_activity(&mut self) {
        let factor = 1.0 / ACTIVITY_CEILING;
        self.activity_heap.apply_to_all(|activity| activity * factor);
        self.bump *= factor;
    }

    /// Pops the most active atom off the heap, whether or not the atom has a value.
    pub fn heap_pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }

    /// The atoms without a value.
    pub fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.valuation
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, value)| value.is_none())
            .map(|(atom, _)| atom as Atom)
    }
}
