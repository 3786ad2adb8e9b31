//! Renderer-agnostic description of one frame.
//!
//! The game fills a [`Scene`]; renderers only read it.

use crate::board::Bonus;
use crate::geometry::CellCoord;
use kurbo::{Point, Rect};
use peniko::Color;

/// One wheel letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotView {
    pub index: usize,
    pub letter: char,
    pub center: Point,
    /// Side length of the letter square.
    pub size: f64,
    pub selected: bool,
}

impl SlotView {
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, (self.size, self.size))
    }
}

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub coord: CellCoord,
    pub rect: Rect,
    pub bonus: Bonus,
    /// Background color from the configured palette.
    pub fill: Color,
    pub occupant: Option<char>,
    /// Under the tile currently being dragged.
    pub hovered: bool,
}

/// One rack slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileView {
    pub slot_index: usize,
    pub rect: Rect,
    pub letter: Option<char>,
    /// The tile has been picked up and is following the pointer.
    pub lifted: bool,
}

/// Tile following the pointer during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragProxy {
    pub letter: char,
    pub rect: Rect,
}

/// Everything needed to draw the game.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub wheel_center: Point,
    pub wheel_radius: f64,
    pub slots: Vec<SlotView>,
    /// Selection polyline, including the live cursor.
    pub path: Vec<Point>,
    pub cells: Vec<CellView>,
    pub highlight: Color,
    pub occupied: Color,
    pub rack: Vec<TileView>,
    pub drag: Option<DragProxy>,
    /// Letters selected so far, or a placeholder.
    pub current_word: String,
    /// Committed words for display.
    pub word_list: String,
}

impl Scene {
    /// Smallest rectangle containing every drawn element.
    pub fn bounds(&self) -> Rect {
        let wheel = Rect::from_center_size(
            self.wheel_center,
            (self.wheel_radius * 2.0, self.wheel_radius * 2.0),
        );
        let slots = self.slots.iter().map(SlotView::rect);
        let cells = self.cells.iter().map(|cell| cell.rect);
        let tiles = self.rack.iter().map(|tile| tile.rect);
        let proxy = self.drag.iter().map(|proxy| proxy.rect);

        slots
            .chain(cells)
            .chain(tiles)
            .chain(proxy)
            .fold(wheel, |bounds, rect| bounds.union(rect))
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&CellView> {
        self.cells.iter().find(|cell| cell.coord == coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_scene() -> Scene {
        Scene {
            wheel_center: Point::new(100.0, 100.0),
            wheel_radius: 50.0,
            slots: Vec::new(),
            path: Vec::new(),
            cells: Vec::new(),
            highlight: Color::WHITE,
            occupied: Color::WHITE,
            rack: Vec::new(),
            drag: None,
            current_word: String::new(),
            word_list: String::new(),
        }
    }

    #[test]
    fn test_bounds_cover_everything() {
        let mut scene = empty_scene();
        assert_eq!(scene.bounds(), Rect::new(50.0, 50.0, 150.0, 150.0));

        scene.rack.push(TileView {
            slot_index: 0,
            rect: Rect::new(0.0, 300.0, 36.0, 336.0),
            letter: Some('A'),
            lifted: false,
        });
        assert_eq!(scene.bounds(), Rect::new(0.0, 50.0, 150.0, 336.0));
    }

    #[test]
    fn test_slot_rect_is_centered() {
        let slot = SlotView {
            index: 0,
            letter: 'A',
            center: Point::new(10.0, 10.0),
            size: 4.0,
            selected: false,
        };
        assert_eq!(slot.rect(), Rect::new(8.0, 8.0, 12.0, 12.0));
    }
}
