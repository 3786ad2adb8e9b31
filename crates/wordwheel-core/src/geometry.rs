//! Layout and hit-testing for wheel slots, board cells and rack tiles.
//!
//! Everything here is a pure function of the current geometry. A point that
//! falls outside every region resolves to `None`, which is the common case
//! while the pointer travels between targets.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// One letter position on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Index of the slot within the current letter set.
    pub index: usize,
    /// Letter shown in the slot.
    pub letter: char,
    /// Center of the slot in surface coordinates.
    pub center: Point,
}

/// Row/column address of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    /// Create a new cell coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Circular layout of the letter wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    /// Center of the circle the slots sit on.
    pub center: Point,
    /// Distance from the center to each slot center.
    pub radius: f64,
    /// Side length of the square rendered for each slot.
    pub letter_size: f64,
}

impl WheelGeometry {
    /// Create a new wheel geometry.
    pub fn new(center: Point, radius: f64, letter_size: f64) -> Self {
        Self {
            center,
            radius,
            letter_size,
        }
    }

    /// Distribute letters evenly around the circle.
    ///
    /// Slot `i` of `n` sits at angle `2π·i/n`. Angle 0 points right and,
    /// since screen y grows downward, increasing angles turn clockwise.
    pub fn layout(&self, letters: &[char]) -> Vec<Slot> {
        let total = letters.len() as f64;
        letters
            .iter()
            .enumerate()
            .map(|(index, &letter)| {
                let angle = index as f64 / total * TAU;
                let offset = Vec2::new(angle.cos(), angle.sin()) * self.radius;
                Slot {
                    index,
                    letter,
                    center: self.center + offset,
                }
            })
            .collect()
    }

    /// Rendered bounds of a slot.
    pub fn slot_rect(&self, slot: &Slot) -> Rect {
        Rect::from_center_size(slot.center, Size::new(self.letter_size, self.letter_size))
    }

    /// Find the slot whose rendered bounds contain the point.
    ///
    /// If bounds overlap (many letters on a small wheel), the slot with the
    /// nearest center wins.
    pub fn hit_test(&self, point: Point, slots: &[Slot]) -> Option<usize> {
        slots
            .iter()
            .filter(|slot| self.slot_rect(slot).contains(point))
            .min_by(|a, b| {
                let da = (a.center - point).hypot2();
                let db = (b.center - point).hypot2();
                da.total_cmp(&db)
            })
            .map(|slot| slot.index)
    }
}

/// Rectangular layout of the board grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Top-left corner of cell (0, 0).
    pub origin: Point,
    /// Side length of one square cell.
    pub cell_size: f64,
    pub rows: usize,
    pub cols: usize,
}

impl GridGeometry {
    /// Create a new grid geometry.
    pub fn new(origin: Point, cell_size: f64, rows: usize, cols: usize) -> Self {
        Self {
            origin,
            cell_size,
            rows,
            cols,
        }
    }

    /// Rectangle covered by a cell.
    pub fn cell_rect(&self, coord: CellCoord) -> Rect {
        let x0 = self.origin.x + coord.col as f64 * self.cell_size;
        let y0 = self.origin.y + coord.row as f64 * self.cell_size;
        Rect::new(x0, y0, x0 + self.cell_size, y0 + self.cell_size)
    }

    /// Bounds of the whole grid.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            Size::new(
                self.cols as f64 * self.cell_size,
                self.rows as f64 * self.cell_size,
            ),
        )
    }

    /// Resolve a point to the cell whose rectangle contains it.
    pub fn hit_test_cell(&self, point: Point) -> Option<CellCoord> {
        if self.cell_size <= 0.0 || !self.bounds().contains(point) {
            return None;
        }
        let col = ((point.x - self.origin.x) / self.cell_size).floor() as usize;
        let row = ((point.y - self.origin.y) / self.cell_size).floor() as usize;
        // Guard against float rounding right at the far edges.
        (row < self.rows && col < self.cols).then_some(CellCoord { row, col })
    }
}

/// Horizontal layout of the tile rack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackGeometry {
    /// Top-left corner of the first tile.
    pub origin: Point,
    pub tile_size: f64,
    /// Horizontal spacing between neighbouring tiles.
    pub gap: f64,
    /// Number of tile slots in the rack.
    pub capacity: usize,
}

impl RackGeometry {
    /// Create a new rack geometry.
    pub fn new(origin: Point, tile_size: f64, gap: f64, capacity: usize) -> Self {
        Self {
            origin,
            tile_size,
            gap,
            capacity,
        }
    }

    /// Rectangle covered by the tile at `index`.
    pub fn tile_rect(&self, index: usize) -> Rect {
        let x0 = self.origin.x + index as f64 * (self.tile_size + self.gap);
        Rect::new(x0, self.origin.y, x0 + self.tile_size, self.origin.y + self.tile_size)
    }

    /// Resolve a point to the rack slot under it.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        (0..self.capacity).find(|&index| self.tile_rect(index).contains(point))
    }
}
