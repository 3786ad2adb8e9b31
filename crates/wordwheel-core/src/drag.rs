//! Rack-to-board drag and drop.
//!
//! A drag either ends with the tile on the board and its rack slot emptied,
//! or with the tile back in the rack and nothing changed. There is no third
//! outcome.

use crate::board::{Board, Rejection};
use crate::geometry::{CellCoord, GridGeometry};
use crate::input::PointerId;
use crate::rack::Rack;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Why a dragged tile went back to the rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnReason {
    /// Released outside every board cell.
    NoCell,
    /// The target cell already holds a letter.
    Occupied,
    /// The resolved cell lies outside the board.
    OutOfBounds,
    /// The origin rack slot no longer holds the dragged letter.
    RackChanged,
    /// The platform cancelled the gesture.
    Cancelled,
}

impl From<Rejection> for ReturnReason {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Occupied => ReturnReason::Occupied,
            Rejection::OutOfBounds => ReturnReason::OutOfBounds,
        }
    }
}

/// Terminal result of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// The letter now occupies the cell and its rack slot is empty.
    Placed {
        rack_index: usize,
        cell: CellCoord,
        letter: char,
    },
    /// The tile is back in its rack slot.
    Returned {
        rack_index: usize,
        letter: char,
        reason: ReturnReason,
    },
}

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    /// Pointer that owns the drag.
    pub pointer: PointerId,
    /// Rack slot the tile was lifted from.
    pub rack_index: usize,
    /// Letter being carried.
    pub letter: char,
    /// Current proxy position.
    pub position: Point,
    /// Cell under the proxy, for highlighting only.
    pub hovered_cell: Option<CellCoord>,
}

/// Drag coordinator state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Runs one drag at a time between a rack and a board.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The active drag, if any.
    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Lift the tile in `rack_index`.
    ///
    /// Refused while another drag is active or when the slot is empty.
    pub fn begin(
        &mut self,
        pointer: PointerId,
        rack_index: usize,
        rack: &Rack,
        position: Point,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(letter) = rack.letter(rack_index) else {
            return false;
        };
        log::debug!("Drag of {} started from rack slot {}", letter, rack_index);
        self.state = DragState::Dragging(ActiveDrag {
            pointer,
            rack_index,
            letter,
            position,
            hovered_cell: None,
        });
        true
    }

    /// Move the proxy. Returns true if the drag belongs to `pointer`.
    pub fn update(&mut self, pointer: PointerId, position: Point, grid: &GridGeometry) -> bool {
        match &mut self.state {
            DragState::Dragging(drag) if drag.pointer == pointer => {
                drag.position = position;
                drag.hovered_cell = grid.hit_test_cell(position);
                true
            }
            _ => false,
        }
    }

    /// Drop the tile at `position`.
    ///
    /// Returns `None` if no drag is owned by `pointer`. The rack slot is only
    /// emptied after the board has accepted the letter.
    pub fn release(
        &mut self,
        pointer: PointerId,
        position: Point,
        rack: &mut Rack,
        board: &mut Board,
        grid: &GridGeometry,
    ) -> Option<DropOutcome> {
        let drag = self.finish(pointer)?;
        let returned = |reason| DropOutcome::Returned {
            rack_index: drag.rack_index,
            letter: drag.letter,
            reason,
        };

        let Some(cell) = grid.hit_test_cell(position) else {
            return Some(returned(ReturnReason::NoCell));
        };
        if rack.letter(drag.rack_index) != Some(drag.letter) {
            log::warn!("Rack slot {} changed during drag", drag.rack_index);
            return Some(returned(ReturnReason::RackChanged));
        }
        if let Err(rejection) = board.try_place(cell.row, cell.col, drag.letter) {
            log::debug!(
                "Drop of {} at ({}, {}) rejected: {}",
                drag.letter,
                cell.row,
                cell.col,
                rejection
            );
            return Some(returned(rejection.into()));
        }

        rack.take(drag.rack_index);
        log::debug!("Placed {} at ({}, {})", drag.letter, cell.row, cell.col);
        Some(DropOutcome::Placed {
            rack_index: drag.rack_index,
            cell,
            letter: drag.letter,
        })
    }

    /// Abort the drag owned by `pointer`, returning the tile untouched.
    pub fn cancel(&mut self, pointer: PointerId) -> Option<DropOutcome> {
        let drag = self.finish(pointer)?;
        log::debug!("Drag of {} cancelled", drag.letter);
        Some(DropOutcome::Returned {
            rack_index: drag.rack_index,
            letter: drag.letter,
            reason: ReturnReason::Cancelled,
        })
    }

    fn finish(&mut self, pointer: PointerId) -> Option<ActiveDrag> {
        match self.state {
            DragState::Dragging(drag) if drag.pointer == pointer => {
                self.state = DragState::Idle;
                Some(drag)
            }
            _ => None,
        }
    }
}
