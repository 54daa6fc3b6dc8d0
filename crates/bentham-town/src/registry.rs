//! Unordered position sets with constant-time random selection.

use bentham_core::Position;
use rand::Rng;
use std::collections::HashMap;

/// A set of positions backed by a vector, so a uniformly random member can be
/// picked and removed in O(1).
///
/// Removal swaps the last element into the vacated slot; the `slots` map
/// tracks where every position currently lives.
#[derive(Debug, Clone, Default)]
pub struct PositionRegistry {
    positions: Vec<Position>,
    slots: HashMap<Position, usize>,
}

impl PositionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.slots.contains_key(&pos)
    }

    pub fn get(&self, index: usize) -> Option<Position> {
        self.positions.get(index).copied()
    }

    /// Add a position. Returns false if it was already present.
    pub fn insert(&mut self, pos: Position) -> bool {
        if self.slots.contains_key(&pos) {
            return false;
        }
        self.slots.insert(pos, self.positions.len());
        self.positions.push(pos);
        true
    }

    /// Remove the position stored at `index`
    pub fn swap_remove(&mut self, index: usize) -> Option<Position> {
        if index >= self.positions.len() {
            return None;
        }

        let removed = self.positions.swap_remove(index);
        self.slots.remove(&removed);
        if let Some(moved) = self.positions.get(index) {
            self.slots.insert(*moved, index);
        }
        Some(removed)
    }

    /// Remove a specific position. Returns false if it was not present.
    pub fn remove(&mut self, pos: Position) -> bool {
        match self.slots.get(&pos).copied() {
            Some(index) => self.swap_remove(index).is_some(),
            None => false,
        }
    }

    /// Pick a uniformly random index, or `None` when empty
    pub fn choose_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.positions.is_empty() {
            None
        } else {
            Some(rng.gen_range(0..self.positions.len()))
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.slots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }
}

impl Extend<Position> for PositionRegistry {
    fn extend<I: IntoIterator<Item = Position>>(&mut self, iter: I) {
        for pos in iter {
            self.insert(pos);
        }
    }
}
