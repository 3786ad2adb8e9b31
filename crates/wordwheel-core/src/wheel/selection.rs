//! Word selection state machine for one continuous gesture.

use kurbo::Point;

/// Phase of the selection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    /// No gesture in progress; the sequence is empty.
    #[default]
    Idle,
    /// A gesture is in progress.
    Selecting,
}

/// What a slot event did to the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// The slot was appended.
    Advanced(usize),
    /// The last slot was removed by re-entering its predecessor.
    Backtracked(usize),
    /// Nothing changed.
    Unchanged,
}

impl SelectionChange {
    /// Whether the sequence was mutated.
    pub fn is_mutation(self) -> bool {
        !matches!(self, SelectionChange::Unchanged)
    }
}

/// Ordered selection of wheel slots.
///
/// Slots are tracked by index into the wheel's current slot list, so the
/// sequence never holds the same slot twice within one gesture.
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    phase: SelectionPhase,
    sequence: Vec<usize>,
    live_cursor: Option<Point>,
}

impl SelectionMachine {
    /// Create an idle selection machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Whether a gesture is in progress.
    pub fn is_selecting(&self) -> bool {
        self.phase == SelectionPhase::Selecting
    }

    /// Selected slot indices in selection order.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Whether the slot is part of the current selection.
    pub fn contains(&self, slot: usize) -> bool {
        self.sequence.contains(&slot)
    }

    /// Last known pointer position during the gesture.
    pub fn live_cursor(&self) -> Option<Point> {
        self.live_cursor
    }

    /// Start a gesture on a slot.
    ///
    /// Ignored while a gesture is already in progress.
    pub fn gesture_start(&mut self, slot: usize) -> SelectionChange {
        if self.is_selecting() {
            return SelectionChange::Unchanged;
        }
        self.phase = SelectionPhase::Selecting;
        self.sequence.clear();
        self.live_cursor = None;
        self.sequence.push(slot);
        SelectionChange::Advanced(slot)
    }

    /// The pointer entered a slot during the gesture.
    ///
    /// An unselected slot is appended. The slot just before the last one
    /// pops the last entry, so retracing the path undoes the latest pick.
    /// Any other selected slot is left alone.
    pub fn slot_entered(&mut self, slot: usize) -> SelectionChange {
        if !self.is_selecting() {
            return SelectionChange::Unchanged;
        }

        if !self.contains(slot) {
            self.sequence.push(slot);
            return SelectionChange::Advanced(slot);
        }

        let len = self.sequence.len();
        if len >= 2 && self.sequence[len - 2] == slot {
            if let Some(removed) = self.sequence.pop() {
                return SelectionChange::Backtracked(removed);
            }
        }

        SelectionChange::Unchanged
    }

    /// Track the live pointer. Never touches the sequence.
    ///
    /// Returns true if the cursor was recorded.
    pub fn cursor_moved(&mut self, point: Point) -> bool {
        if !self.is_selecting() {
            return false;
        }
        self.live_cursor = Some(point);
        true
    }

    /// End the gesture.
    ///
    /// Returns the selected slots if there were any; the machine is idle and
    /// empty afterwards either way.
    pub fn gesture_end(&mut self) -> Option<Vec<usize>> {
        let was_selecting = self.is_selecting();
        self.phase = SelectionPhase::Idle;
        self.live_cursor = None;
        let sequence = std::mem::take(&mut self.sequence);
        (was_selecting && !sequence.is_empty()).then_some(sequence)
    }

    /// Hand over the current selection without ending the gesture.
    ///
    /// The gesture stays open with an empty sequence, so further slot entries
    /// start a new word.
    pub fn take_selection(&mut self) -> Option<Vec<usize>> {
        if self.sequence.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.sequence))
    }

    /// Discard the selection and return to idle without committing.
    ///
    /// Returns true if anything was discarded.
    pub fn clear(&mut self) -> bool {
        let had_selection = !self.sequence.is_empty();
        self.sequence.clear();
        self.live_cursor = None;
        self.phase = SelectionPhase::Idle;
        had_selection
    }
}
