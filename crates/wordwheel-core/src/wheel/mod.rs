//! The letter wheel: slot layout plus the selection machine that tracks a
//! word being traced across it.
//!
//! One wheel type covers every size and letter count; variants differ only
//! in their [`WheelGeometry`].

pub mod path;
pub mod selection;

pub use path::{path_points, to_bez_path};
pub use selection::{SelectionChange, SelectionMachine, SelectionPhase};

use crate::config::{ConfigError, ConfigResult};
use crate::geometry::{Slot, WheelGeometry};
use crate::words::Word;
use kurbo::Point;
use rand::Rng;
use rand::seq::SliceRandom;

/// Placeholder shown while nothing is selected.
pub const EMPTY_WORD_PLACEHOLDER: &str = "_";

/// Result of feeding a pointer move to the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelMove {
    /// What the move did to the selection.
    pub change: SelectionChange,
    /// Whether the live cursor was updated.
    pub cursor_moved: bool,
}

/// Letter wheel with its current slots and selection.
#[derive(Debug, Clone)]
pub struct LetterWheel {
    geometry: WheelGeometry,
    letters: Vec<char>,
    slots: Vec<Slot>,
    selection: SelectionMachine,
    /// Slot under the pointer at the last move, for entry-edge detection.
    hovered: Option<usize>,
}

impl LetterWheel {
    /// Lay out a wheel. An empty letter set is refused.
    pub fn new(geometry: WheelGeometry, letters: Vec<char>) -> ConfigResult<Self> {
        if letters.is_empty() {
            return Err(ConfigError::EmptyLetters);
        }
        let slots = geometry.layout(&letters);
        Ok(Self {
            geometry,
            letters,
            slots,
            selection: SelectionMachine::new(),
            hovered: None,
        })
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Slots for the current letter set.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    /// Whether the slot is part of the current selection.
    pub fn is_selected(&self, slot: usize) -> bool {
        self.selection.contains(slot)
    }

    /// Replace the letter set. Slots are recomputed and any selection is
    /// dropped, since it referred to the old slots.
    pub fn set_letters(&mut self, letters: Vec<char>) -> ConfigResult<()> {
        if letters.is_empty() {
            return Err(ConfigError::EmptyLetters);
        }
        self.letters = letters;
        self.relayout();
        Ok(())
    }

    /// Change the geometry (e.g. on resize) and recompute slots.
    pub fn set_geometry(&mut self, geometry: WheelGeometry) {
        self.geometry = geometry;
        self.relayout();
    }

    /// Shuffle the letters and recompute slots.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.letters.shuffle(rng);
        self.relayout();
    }

    fn relayout(&mut self) {
        self.slots = self.geometry.layout(&self.letters);
        self.selection.clear();
        self.hovered = None;
    }

    /// Slot under a point.
    pub fn slot_at(&self, point: Point) -> Option<usize> {
        self.geometry.hit_test(point, &self.slots)
    }

    /// Start a gesture if the point is over a slot.
    pub fn pointer_down(&mut self, point: Point) -> SelectionChange {
        let Some(slot) = self.slot_at(point) else {
            return SelectionChange::Unchanged;
        };
        let change = self.selection.gesture_start(slot);
        if change.is_mutation() {
            self.hovered = Some(slot);
            self.selection.cursor_moved(point);
        }
        change
    }

    /// Track pointer movement during a gesture.
    ///
    /// The selection only reacts when the pointer crosses into a slot; moves
    /// inside the same slot just update the live cursor.
    pub fn pointer_moved(&mut self, point: Point) -> WheelMove {
        if !self.selection.is_selecting() {
            return WheelMove {
                change: SelectionChange::Unchanged,
                cursor_moved: false,
            };
        }

        let hit = self.slot_at(point);
        let entered = hit.filter(|&slot| self.hovered != Some(slot));
        self.hovered = hit;

        let change = match entered {
            Some(slot) => self.selection.slot_entered(slot),
            None => SelectionChange::Unchanged,
        };
        let cursor_moved = self.selection.cursor_moved(point);
        WheelMove {
            change,
            cursor_moved,
        }
    }

    /// End the gesture, returning the word it spelled.
    pub fn pointer_up(&mut self) -> Option<Word> {
        self.hovered = None;
        let sequence = self.selection.gesture_end()?;
        Word::from_letters(&self.letters_for(&sequence))
    }

    /// Commit what is selected so far while keeping the gesture open.
    pub fn take_word(&mut self) -> Option<Word> {
        let sequence = self.selection.take_selection()?;
        Word::from_letters(&self.letters_for(&sequence))
    }

    /// Drop the selection without committing.
    pub fn clear_selection(&mut self) -> bool {
        self.hovered = None;
        self.selection.clear()
    }

    /// Currently selected letters, in order.
    pub fn selected_letters(&self) -> Vec<char> {
        self.letters_for(self.selection.sequence())
    }

    /// The word being traced, or a placeholder when nothing is selected.
    pub fn current_word(&self) -> String {
        let letters = self.selected_letters();
        if letters.is_empty() {
            EMPTY_WORD_PLACEHOLDER.to_string()
        } else {
            letters.into_iter().collect()
        }
    }

    /// Points of the selection path, including the live cursor.
    pub fn path(&self) -> Vec<Point> {
        path_points(&self.slots, &self.selection)
    }

    fn letters_for(&self, sequence: &[usize]) -> Vec<char> {
        sequence
            .iter()
            .filter_map(|&index| self.slots.get(index))
            .map(|slot| slot.letter)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn cat_wheel() -> LetterWheel {
        let geometry = WheelGeometry::new(Point::new(125.0, 125.0), 90.0, 50.0);
        LetterWheel::new(geometry, vec!['C', 'A', 'T']).unwrap()
    }

    fn center(wheel: &LetterWheel, index: usize) -> Point {
        wheel.slots()[index].center
    }

    #[test]
    fn test_empty_letters_refused() {
        let geometry = WheelGeometry::new(Point::ZERO, 90.0, 50.0);
        assert!(matches!(
            LetterWheel::new(geometry, Vec::new()),
            Err(ConfigError::EmptyLetters)
        ));
    }

    #[test]
    fn test_trace_cat() {
        let mut wheel = cat_wheel();
        let (c, a, t) = (center(&wheel, 0), center(&wheel, 1), center(&wheel, 2));

        assert_eq!(wheel.pointer_down(c), SelectionChange::Advanced(0));
        assert_eq!(wheel.pointer_moved(a).change, SelectionChange::Advanced(1));
        assert_eq!(wheel.pointer_moved(t).change, SelectionChange::Advanced(2));
        assert_eq!(wheel.current_word(), "CAT");

        assert_eq!(wheel.pointer_up(), Word::new("CAT"));
        assert_eq!(wheel.current_word(), EMPTY_WORD_PLACEHOLDER);
    }

    #[test]
    fn test_moves_inside_slot_only_move_cursor() {
        let mut wheel = cat_wheel();
        let (c, a) = (center(&wheel, 0), center(&wheel, 1));
        wheel.pointer_down(c);
        wheel.pointer_moved(a);

        let nudge = wheel.pointer_moved(a + kurbo::Vec2::new(3.0, 3.0));
        assert_eq!(nudge.change, SelectionChange::Unchanged);
        assert!(nudge.cursor_moved);
        assert_eq!(wheel.selected_letters(), vec!['C', 'A']);
    }

    #[test]
    fn test_backtrack_then_advance() {
        let mut wheel = cat_wheel();
        let (c, a, t) = (center(&wheel, 0), center(&wheel, 1), center(&wheel, 2));
        let hub = Point::new(125.0, 125.0);

        wheel.pointer_down(c);
        wheel.pointer_moved(hub);
        wheel.pointer_moved(a);
        wheel.pointer_moved(hub);
        assert_eq!(wheel.pointer_moved(c).change, SelectionChange::Backtracked(1));
        assert_eq!(wheel.selected_letters(), vec!['C']);

        wheel.pointer_moved(hub);
        wheel.pointer_moved(t);
        assert_eq!(wheel.pointer_up(), Word::new("CT"));
    }

    #[test]
    fn test_path_tracks_cursor() {
        let mut wheel = cat_wheel();
        let c = center(&wheel, 0);
        wheel.pointer_down(c);
        wheel.pointer_moved(Point::new(130.0, 130.0));

        assert_eq!(wheel.path(), vec![c, Point::new(130.0, 130.0)]);
        wheel.pointer_up();
        assert!(wheel.path().is_empty());
    }

    #[test]
    fn test_pointer_down_off_slot_does_nothing() {
        let mut wheel = cat_wheel();
        assert_eq!(wheel.pointer_down(Point::new(125.0, 125.0)), SelectionChange::Unchanged);
        assert!(!wheel.pointer_moved(Point::new(1.0, 1.0)).cursor_moved);
        assert_eq!(wheel.pointer_up(), None);
    }

    #[test]
    fn test_set_letters_relayouts_and_clears() {
        let mut wheel = cat_wheel();
        let c = center(&wheel, 0);
        wheel.pointer_down(c);

        wheel.set_letters(vec!['D', 'O', 'G', 'S']).unwrap();
        assert_eq!(wheel.slots().len(), 4);
        assert!(wheel.selected_letters().is_empty());
        assert!(!wheel.selection().is_selecting());
        assert!(wheel.set_letters(Vec::new()).is_err());
    }

    #[test]
    fn test_shuffle_keeps_letters() {
        let mut wheel = cat_wheel();
        let mut rng = SmallRng::seed_from_u64(42);
        wheel.shuffle(&mut rng);

        let mut letters = wheel.letters().to_vec();
        letters.sort_unstable();
        assert_eq!(letters, vec!['A', 'C', 'T']);
        for (index, slot) in wheel.slots().iter().enumerate() {
            assert_eq!(slot.letter, wheel.letters()[index]);
        }
    }

    #[test]
    fn test_take_word_keeps_gesture() {
        let mut wheel = cat_wheel();
        let (c, a, t) = (center(&wheel, 0), center(&wheel, 1), center(&wheel, 2));
        wheel.pointer_down(c);
        wheel.pointer_moved(a);

        assert_eq!(wheel.take_word(), Word::new("CA"));
        wheel.pointer_moved(t);
        assert_eq!(wheel.pointer_up(), Word::new("T"));
    }
}
