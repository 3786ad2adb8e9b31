//! Fixed-size tile rack.
//!
//! Slots are never added or removed; a slot simply holds a letter or is
//! empty. Placing a tile on the board empties its slot through the drag
//! coordinator, which is the only caller of [`Rack::take`].

use crate::config::{ConfigError, ConfigResult};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A letter sitting in a rack slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackTile {
    pub letter: char,
    pub slot_index: usize,
}

/// The player's tile rack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    slots: Vec<Option<char>>,
}

impl Rack {
    /// Create an empty rack with the given number of slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Create a rack and fill it from the first slot onward.
    pub fn with_letters(capacity: usize, letters: &[char]) -> ConfigResult<Self> {
        let mut rack = Self::new(capacity);
        rack.refill(letters)?;
        Ok(rack)
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Letter in a slot, if any.
    pub fn letter(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Raw slot contents.
    pub fn slots(&self) -> &[Option<char>] {
        &self.slots
    }

    /// Tiles currently in the rack.
    pub fn tiles(&self) -> impl Iterator<Item = RackTile> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot_index, letter)| letter.map(|letter| RackTile { letter, slot_index }))
    }

    /// Letters in slot order, skipping empty slots.
    pub fn letters(&self) -> Vec<char> {
        self.tiles().map(|tile| tile.letter).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Set or clear a single slot. Out-of-range indices are ignored.
    ///
    /// Returns true if the slot exists.
    pub fn set_tile(&mut self, index: usize, letter: Option<char>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = letter;
                true
            }
            None => false,
        }
    }

    /// Replace the rack contents. Remaining slots are emptied.
    pub fn refill(&mut self, letters: &[char]) -> ConfigResult<()> {
        self.check_fits(letters.len())?;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = letters.get(index).copied();
        }
        Ok(())
    }

    /// Replace the rack contents slot by slot, keeping empty slots where
    /// they are. Slots past the end of `slots` are emptied.
    pub fn restore(&mut self, slots: &[Option<char>]) -> ConfigResult<()> {
        self.check_fits(slots.len())?;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = slots.get(index).copied().flatten();
        }
        Ok(())
    }

    fn check_fits(&self, found: usize) -> ConfigResult<()> {
        if found > self.slots.len() {
            return Err(ConfigError::RackOverflow {
                capacity: self.slots.len(),
                found,
            });
        }
        Ok(())
    }

    /// Shuffle the slot contents in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.slots.shuffle(rng);
    }

    /// Remove the letter from a slot.
    pub(crate) fn take(&mut self, index: usize) -> Option<char> {
        self.slots.get_mut(index).and_then(Option::take)
    }
}
