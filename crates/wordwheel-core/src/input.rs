//! Unified pointer input for mouse and touch.
//!
//! Mouse buttons and touch points are both reduced to a [`PointerId`] plus a
//! position, so a single state machine serves every input device.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifies the pointer that owns a gesture.
///
/// Mouse input conventionally uses [`PointerId::MOUSE`]; touch input uses the
/// platform's touch identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub u64);

impl PointerId {
    /// Pointer id used for the primary mouse button.
    pub const MOUSE: PointerId = PointerId(0);
}

impl Default for PointerId {
    fn default() -> Self {
        Self::MOUSE
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Button pressed or finger placed.
    Down {
        #[serde(default)]
        pointer: PointerId,
        position: Point,
    },
    /// Pointer moved, pressed or not.
    Move {
        #[serde(default)]
        pointer: PointerId,
        position: Point,
    },
    /// Button released or finger lifted.
    Up {
        #[serde(default)]
        pointer: PointerId,
        position: Point,
    },
    /// The platform aborted the gesture (focus loss, navigation, ...).
    Cancel {
        #[serde(default)]
        pointer: PointerId,
    },
}

impl PointerEvent {
    /// Pointer that produced the event.
    pub fn pointer(&self) -> PointerId {
        match *self {
            PointerEvent::Down { pointer, .. }
            | PointerEvent::Move { pointer, .. }
            | PointerEvent::Up { pointer, .. }
            | PointerEvent::Cancel { pointer } => pointer,
        }
    }

    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => Some(position),
            PointerEvent::Cancel { .. } => None,
        }
    }

    /// Whether this event terminates a gesture.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PointerEvent::Up { .. } | PointerEvent::Cancel { .. })
    }
}

/// The single gesture currently owned by a component.
///
/// Events from other pointers are rejected until the owner releases, which
/// keeps a second finger from starting a parallel gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureLock {
    owner: Option<PointerId>,
}

impl GestureLock {
    /// Create an unlocked gesture lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the lock for a pointer. Returns false if another gesture holds it.
    pub fn acquire(&mut self, pointer: PointerId) -> bool {
        match self.owner {
            Some(_) => false,
            None => {
                self.owner = Some(pointer);
                true
            }
        }
    }

    /// Whether the given pointer owns the active gesture.
    pub fn is_owned_by(&self, pointer: PointerId) -> bool {
        self.owner == Some(pointer)
    }

    /// Whether any gesture is active.
    pub fn is_held(&self) -> bool {
        self.owner.is_some()
    }

    /// Release the lock if held by the given pointer.
    pub fn release(&mut self, pointer: PointerId) -> bool {
        if self.is_owned_by(pointer) {
            self.owner = None;
            true
        } else {
            false
        }
    }

    /// Owner of the active gesture, if any.
    pub fn owner(&self) -> Option<PointerId> {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let down = PointerEvent::Down {
            pointer: PointerId(3),
            position: Point::new(10.0, 20.0),
        };
        assert_eq!(down.pointer(), PointerId(3));
        assert_eq!(down.position(), Some(Point::new(10.0, 20.0)));
        assert!(!down.is_terminal());

        let cancel = PointerEvent::Cancel { pointer: PointerId(3) };
        assert_eq!(cancel.position(), None);
        assert!(cancel.is_terminal());
    }

    #[test]
    fn test_gesture_lock_rejects_second_pointer() {
        let mut lock = GestureLock::new();

        assert!(lock.acquire(PointerId(1)));
        assert!(!lock.acquire(PointerId(2)));
        assert!(!lock.acquire(PointerId(1)));
        assert!(lock.is_owned_by(PointerId(1)));

        assert!(!lock.release(PointerId(2)));
        assert!(lock.is_held());

        assert!(lock.release(PointerId(1)));
        assert!(!lock.is_held());
        assert!(lock.acquire(PointerId(2)));
    }

    #[test]
    fn test_event_json() {
        let json = r#"{"kind":"down","position":{"x":1.0,"y":2.0}}"#;
        let event: PointerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                pointer: PointerId::MOUSE,
                position: Point::new(1.0, 2.0),
            }
        );
    }
}
