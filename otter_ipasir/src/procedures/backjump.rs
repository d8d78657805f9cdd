//! Recovery from a conflict.
//!
//! # Overview
//!
//! A backjump is a 'jump' from some (higher) decision level to some previous (lower) decision level.
//!
//! Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
//! In this case, all decisions and all consequences of those decisions from level *l* down to level *l - i* are undone, and any queued consequences are dropped from the trail.
//!
//! Backjumps to level zero are also made to restart a solve, before a clause is added, and before a solve begins.
//!
//! Passing a target level greater than or equal to the current level is safe --- nothing will happen.
//!
//! # Literature
//!
//! See [Chronological Backtracking](https://doi.org/10.1007/978-3-319-94144-8_7) for a discussion of chronological and non-chronological backjumping --- and a follow-up: [Backing Backtracking](https://www.doi.org/10.1007/978-3-030-24258-9_18).

use crate::{
    context::GenericContext,
    db::LevelIndex,
    misc::log::targets::{self},
    structures::literal::Literal,
};

impl<R: rand::Rng + rand::SeedableRng> GenericContext<R> {
    /// Backjumps to the given target level.
    ///
    /// For documentation, see [procedures::backjump](crate::procedures::backjump).
    pub fn backjump(&mut self, target: LevelIndex) {
        if target >= self.trail.level() {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.trail.level());

        for literal in self.trail.forget_above(target).into_iter().rev() {
            self.atom_db.drop_value(literal.atom());
            self.note_change(literal.atom());
        }
    }
}
