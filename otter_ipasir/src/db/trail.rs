//! The trail of assignments made during a solve.
//!
//! Assignments are stored in the order made, and split into decision levels by the index of the first assignment of each level.
//! Level zero is the (possibly empty) prefix before the first level index.
//!
//! Assignments from `q_head` onwards are queued for propagation.

use crate::structures::literal::CLiteral;

use super::LevelIndex;

#[derive(Default)]
pub struct Trail {
    /// Assignments, in order.
    pub literals: Vec<CLiteral>,

    /// The index of the first assignment of each level above zero.
    pub level_indicies: Vec<usize>,

    /// The index of the next assignment to propagate.
    pub q_head: usize,
}

impl Trail {
    /// Stores an assignment at the current level.
    pub fn store(&mut self, literal: CLiteral) {
        self.literals.push(literal);
    }

    /// Opens a fresh level.
    pub fn new_level(&mut self) {
        self.level_indicies.push(self.literals.len());
    }

    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level_indicies.len() as LevelIndex
    }

    /// The next assignment queued for propagation, if any, advancing the queue.
    pub fn next_to_propagate(&mut self) -> Option<CLiteral> {
        let literal = self.literals.get(self.q_head).copied()?;
        self.q_head += 1;
        Some(literal)
    }

    /// True if every assignment has been propagated.
    pub fn is_propagated(&self) -> bool {
        self.q_head >= self.literals.len()
    }

    /// The assignments made at level zero.
    pub fn level_zero(&self) -> &[CLiteral] {
        match self.level_indicies.first() {
            Some(&start) => &self.literals[..start],
            None => &self.literals,
        }
    }

    /// Removes all levels above `level`, returning the removed assignments in order.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of the removed assignments.
    pub fn forget_above(&mut self, level: LevelIndex) -> Vec<CLiteral> {
        match self.level_indicies.get(level as usize).copied() {
            Some(start) => {
                self.level_indicies.truncate(level as usize);
                let removed = self.literals.split_off(start);
                self.q_head = self.q_head.min(self.literals.len());
                removed
            }
            None => Vec::default(),
        }
    }
}
