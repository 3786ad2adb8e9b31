//! WordWheel Core Library
//!
//! Platform-agnostic engine for the WordWheel word game: the letter wheel
//! selection machine, the bonus board, the tile rack and the drag placement
//! protocol that moves tiles between them.

pub mod board;
pub mod config;
pub mod dictionary;
pub mod drag;
pub mod game;
pub mod geometry;
pub mod input;
pub mod rack;
pub mod render;
pub mod session;
pub mod storage;
pub mod wheel;
pub mod words;

pub use board::{Board, BoardCell, Bonus, Direction, Rejection, WordRejection};
pub use config::{ConfigError, ConfigResult, GameConfig};
pub use dictionary::{CachedDictionary, Dictionary, WordEntry, WordListDictionary};
pub use drag::{DragCoordinator, DropOutcome, ReturnReason};
pub use game::{Game, GameEvent, Invalidation};
pub use geometry::{CellCoord, GridGeometry, RackGeometry, Slot, WheelGeometry};
pub use input::{GestureLock, PointerEvent, PointerId};
pub use rack::{Rack, RackTile};
pub use render::Scene;
pub use session::SessionStore;
pub use storage::{KeyValueStore, MemoryStorage, StorageError, StorageResult};
pub use wheel::{LetterWheel, SelectionChange, SelectionMachine, SelectionPhase};
pub use words::{Word, WordList};
