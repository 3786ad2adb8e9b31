//! Selection path derived from the selection machine.

use super::selection::SelectionMachine;
use crate::geometry::Slot;
use kurbo::{BezPath, Point};

/// Polyline through the selected slot centers, ending at the live cursor.
///
/// Holds no state of its own; rebuild it after every selection mutation and
/// every cursor move.
pub fn path_points(slots: &[Slot], selection: &SelectionMachine) -> Vec<Point> {
    let mut points: Vec<Point> = selection
        .sequence()
        .iter()
        .filter_map(|&index| slots.get(index))
        .map(|slot| slot.center)
        .collect();

    // A cursor with nothing selected has nothing to connect to.
    if !points.is_empty() {
        if let Some(cursor) = selection.live_cursor() {
            points.push(cursor);
        }
    }
    points
}

/// Convert path points into a polyline for drawing.
pub fn to_bez_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(first);
        for &point in iter {
            path.line_to(point);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WheelGeometry;

    #[test]
    fn test_points_follow_selection_order() {
        let geometry = WheelGeometry::new(Point::new(125.0, 125.0), 90.0, 50.0);
        let slots = geometry.layout(&['C', 'A', 'T']);
        let mut selection = SelectionMachine::new();

        assert!(path_points(&slots, &selection).is_empty());

        selection.gesture_start(2);
        selection.slot_entered(0);
        assert_eq!(
            path_points(&slots, &selection),
            vec![slots[2].center, slots[0].center]
        );

        selection.cursor_moved(Point::new(10.0, 10.0));
        let points = path_points(&slots, &selection);
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point::new(10.0, 10.0));

        // Deriving again gives the same result.
        assert_eq!(path_points(&slots, &selection), points);
    }

    #[test]
    fn test_bez_path_segments() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        let path = to_bez_path(&points);
        assert_eq!(path.elements().len(), 3);
        assert!(to_bez_path(&[]).elements().is_empty());
    }
}
