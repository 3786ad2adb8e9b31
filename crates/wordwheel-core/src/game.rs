//! The assembled game: wheel, word list, board, rack and drag coordinator
//! behind one pointer event entry point.

use crate::board::Board;
use crate::config::{ConfigResult, GameConfig};
use crate::drag::{DragCoordinator, DropOutcome, ReturnReason};
use crate::geometry::{CellCoord, GridGeometry, RackGeometry};
use crate::input::{GestureLock, PointerEvent, PointerId};
use crate::rack::Rack;
use crate::render::{CellView, DragProxy, Scene, SlotView, TileView};
use crate::wheel::{LetterWheel, SelectionChange};
use crate::words::{Word, WordList};
use kurbo::{Point, Rect};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Notification produced by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The wheel selection grew or shrank; carries the selected letters.
    SelectionChanged { letters: Vec<char> },
    /// A word was appended to the word list.
    WordCommitted { word: Word },
    /// The word list was handed to the submit collaborator.
    WordsSubmitted { words: Vec<Word> },
    /// A rack tile landed on the board.
    TilePlaced {
        rack_index: usize,
        cell: CellCoord,
        letter: char,
    },
    /// A dragged tile went back to the rack.
    TileReturned {
        rack_index: usize,
        letter: char,
        reason: ReturnReason,
    },
}

/// Areas that need redrawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invalidation {
    /// Selected slots, current word or word list.
    pub selection: bool,
    /// Live end of the selection path.
    pub cursor: bool,
    pub board: bool,
    /// Rack tiles or the drag proxy.
    pub rack: bool,
}

impl Invalidation {
    pub fn is_empty(&self) -> bool {
        !(self.selection || self.cursor || self.board || self.rack)
    }
}

/// Which component owns the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureTarget {
    Wheel,
    Drag,
}

/// Word wheel game state.
pub struct Game {
    config: GameConfig,
    wheel: LetterWheel,
    words: WordList,
    board: Board,
    grid: GridGeometry,
    rack: Rack,
    rack_geometry: RackGeometry,
    drag: DragCoordinator,
    gesture: GestureLock,
    target: Option<GestureTarget>,
    invalidation: Invalidation,
}

impl Game {
    /// Build a game from a configuration. Invalid configurations are refused.
    pub fn new(config: GameConfig) -> ConfigResult<Self> {
        config.validate()?;

        let wheel = LetterWheel::new(config.wheel.geometry(), config.letters.clone())?;
        let board = config.board.build_board()?;
        let rack = Rack::with_letters(config.rack.capacity, &config.rack_letters)?;
        log::info!(
            "Game ready: {} letters, {}x{} board, rack of {}",
            config.letters.len(),
            board.rows(),
            board.cols(),
            rack.capacity()
        );

        Ok(Self {
            grid: config.board.geometry(),
            rack_geometry: config.rack.geometry(),
            config,
            wheel,
            words: WordList::new(),
            board,
            rack,
            drag: DragCoordinator::new(),
            gesture: GestureLock::new(),
            target: None,
            invalidation: Invalidation {
                selection: true,
                cursor: true,
                board: true,
                rack: true,
            },
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn wheel(&self) -> &LetterWheel {
        &self.wheel
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn drag(&self) -> &DragCoordinator {
        &self.drag
    }

    /// Pointer that owns the active gesture, if any.
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.gesture.owner()
    }

    /// Areas changed since the last call.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.invalidation)
    }

    /// Feed one pointer event through the game.
    ///
    /// Events from a pointer that does not own the active gesture are
    /// ignored, as is anything that arrives out of order.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match event {
            PointerEvent::Down { pointer, position } => {
                self.pointer_down(pointer, position, &mut events)
            }
            PointerEvent::Move { pointer, position } => {
                self.pointer_moved(pointer, position, &mut events)
            }
            PointerEvent::Up { pointer, position } => {
                self.pointer_up(pointer, Some(position), &mut events)
            }
            PointerEvent::Cancel { pointer } => self.pointer_up(pointer, None, &mut events),
        }
        events
    }

    fn pointer_down(&mut self, pointer: PointerId, position: Point, events: &mut Vec<GameEvent>) {
        if self.gesture.is_held() {
            log::debug!("Ignoring pointer {:?} while {:?} is active", pointer, self.gesture.owner());
            return;
        }

        if self.wheel.slot_at(position).is_some() {
            let change = self.wheel.pointer_down(position);
            if change.is_mutation() {
                self.gesture.acquire(pointer);
                self.target = Some(GestureTarget::Wheel);
                self.invalidation.cursor = true;
                self.selection_changed(events);
            }
        } else if let Some(index) = self.rack_geometry.hit_test(position) {
            if self.drag.begin(pointer, index, &self.rack, position) {
                self.gesture.acquire(pointer);
                self.target = Some(GestureTarget::Drag);
                self.invalidation.rack = true;
            }
        }
    }

    fn pointer_moved(&mut self, pointer: PointerId, position: Point, events: &mut Vec<GameEvent>) {
        if !self.gesture.is_owned_by(pointer) {
            return;
        }
        match self.target {
            Some(GestureTarget::Wheel) => {
                let moved = self.wheel.pointer_moved(position);
                if moved.cursor_moved {
                    self.invalidation.cursor = true;
                }
                if moved.change != SelectionChange::Unchanged {
                    self.selection_changed(events);
                }
            }
            Some(GestureTarget::Drag) => {
                let hovered = self.drag.active().and_then(|drag| drag.hovered_cell);
                if self.drag.update(pointer, position, &self.grid) {
                    self.invalidation.rack = true;
                    if self.drag.active().and_then(|drag| drag.hovered_cell) != hovered {
                        self.invalidation.board = true;
                    }
                }
            }
            None => {}
        }
    }

    /// Ends the active gesture. A `None` position means the platform
    /// cancelled it.
    fn pointer_up(
        &mut self,
        pointer: PointerId,
        position: Option<Point>,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.gesture.release(pointer) {
            return;
        }
        match self.target.take() {
            Some(GestureTarget::Wheel) => {
                self.invalidation.selection = true;
                self.invalidation.cursor = true;
                if let Some(word) = self.wheel.pointer_up() {
                    self.commit(word, events);
                }
            }
            Some(GestureTarget::Drag) => {
                let outcome = match position {
                    Some(position) => self.drag.release(
                        pointer,
                        position,
                        &mut self.rack,
                        &mut self.board,
                        &self.grid,
                    ),
                    None => self.drag.cancel(pointer),
                };
                self.invalidation.rack = true;
                self.invalidation.board = true;
                if let Some(outcome) = outcome {
                    events.push(outcome.into());
                }
            }
            None => {}
        }
    }

    fn selection_changed(&mut self, events: &mut Vec<GameEvent>) {
        self.invalidation.selection = true;
        events.push(GameEvent::SelectionChanged {
            letters: self.wheel.selected_letters(),
        });
    }

    fn commit(&mut self, word: Word, events: &mut Vec<GameEvent>) {
        if self.words.commit(word.clone()) {
            events.push(GameEvent::WordCommitted { word });
        }
    }

    /// Commit the current selection and keep tracing.
    pub fn add_word(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if let Some(word) = self.wheel.take_word() {
            self.invalidation.selection = true;
            self.invalidation.cursor = true;
            self.commit(word, &mut events);
        }
        events
    }

    /// Drop the current selection without committing it.
    pub fn clear_selection(&mut self) {
        if self.wheel.clear_selection() {
            self.invalidation.selection = true;
            self.invalidation.cursor = true;
        }
    }

    /// Empty the word list.
    pub fn clear_words(&mut self) {
        self.words.clear();
        self.invalidation.selection = true;
    }

    /// Hand the current word list to the submit collaborator.
    pub fn submit(&self) -> GameEvent {
        GameEvent::WordsSubmitted {
            words: self.words.submit(),
        }
    }

    /// Shuffle the wheel letters. Any selection is dropped.
    pub fn shuffle_wheel<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.abandon_wheel_gesture();
        self.wheel.shuffle(rng);
        self.invalidation.selection = true;
        self.invalidation.cursor = true;
    }

    /// Replace the wheel letters. Any selection is dropped.
    pub fn set_letters(&mut self, letters: Vec<char>) -> ConfigResult<()> {
        self.wheel.set_letters(letters)?;
        self.abandon_wheel_gesture();
        self.invalidation.selection = true;
        self.invalidation.cursor = true;
        Ok(())
    }

    fn abandon_wheel_gesture(&mut self) {
        if self.target == Some(GestureTarget::Wheel) {
            if let Some(owner) = self.gesture.owner() {
                self.gesture.release(owner);
            }
            self.target = None;
        }
    }

    /// Shuffle the rack slots.
    pub fn shuffle_rack<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rack.shuffle(rng);
        self.invalidation.rack = true;
    }

    /// Replace the rack contents.
    pub fn refill_rack(&mut self, letters: &[char]) -> ConfigResult<()> {
        self.rack.refill(letters)?;
        self.invalidation.rack = true;
        Ok(())
    }

    /// Replace the rack contents, keeping each letter in its slot.
    pub fn restore_rack(&mut self, slots: &[Option<char>]) -> ConfigResult<()> {
        self.rack.restore(slots)?;
        self.invalidation.rack = true;
        Ok(())
    }

    /// Set or clear one rack slot.
    pub fn set_rack_tile(&mut self, index: usize, letter: Option<char>) -> bool {
        let changed = self.rack.set_tile(index, letter);
        self.invalidation.rack |= changed;
        changed
    }

    /// Empty one board cell.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.board.clear(row, col);
        self.invalidation.board = true;
    }

    /// Empty the whole board. Bonus tags stay.
    pub fn reset_board(&mut self) {
        self.board.reset_all();
        self.invalidation.board = true;
    }

    /// Describe the current frame.
    pub fn scene(&self) -> Scene {
        let geometry = self.wheel.geometry();
        let slots = self
            .wheel
            .slots()
            .iter()
            .map(|slot| SlotView {
                index: slot.index,
                letter: slot.letter,
                center: slot.center,
                size: geometry.letter_size,
                selected: self.wheel.is_selected(slot.index),
            })
            .collect();

        let active = self.drag.active();
        let hovered = active.and_then(|drag| drag.hovered_cell);
        let palette = &self.config.palette;
        let cells = self
            .board
            .cells()
            .iter()
            .map(|cell| CellView {
                coord: cell.coord(),
                rect: self.grid.cell_rect(cell.coord()),
                bonus: cell.bonus(),
                fill: palette.color_for(cell.bonus()),
                occupant: cell.occupant(),
                hovered: hovered == Some(cell.coord()),
            })
            .collect();

        let rack = self
            .rack
            .slots()
            .iter()
            .enumerate()
            .map(|(slot_index, &letter)| TileView {
                slot_index,
                rect: self.rack_geometry.tile_rect(slot_index),
                letter,
                lifted: active.is_some_and(|drag| drag.rack_index == slot_index),
            })
            .collect();

        let tile_size = self.rack_geometry.tile_size;
        let drag = active.map(|drag| DragProxy {
            letter: drag.letter,
            rect: Rect::from_center_size(drag.position, (tile_size, tile_size)),
        });

        Scene {
            wheel_center: geometry.center,
            wheel_radius: self.config.wheel.size / 2.0,
            slots,
            path: self.wheel.path(),
            cells,
            highlight: palette.highlight.into(),
            occupied: palette.occupied.into(),
            rack,
            drag,
            current_word: self.wheel.current_word(),
            word_list: self.words.display(),
        }
    }
}

impl From<DropOutcome> for GameEvent {
    fn from(outcome: DropOutcome) -> Self {
        match outcome {
            DropOutcome::Placed {
                rack_index,
                cell,
                letter,
            } => GameEvent::TilePlaced {
                rack_index,
                cell,
                letter,
            },
            DropOutcome::Returned {
                rack_index,
                letter,
                reason,
            } => GameEvent::TileReturned {
                rack_index,
                letter,
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const FINGER: PointerId = PointerId(3);

    fn cat_game() -> Game {
        let config = GameConfig {
            letters: vec!['C', 'A', 'T'],
            rack_letters: vec!['Q', 'I'],
            ..GameConfig::default()
        };
        Game::new(config).unwrap()
    }

    fn slot(game: &Game, index: usize) -> Point {
        game.wheel().slots()[index].center
    }

    fn hub(game: &Game) -> Point {
        game.wheel().geometry().center
    }

    fn cell(game: &Game, row: usize, col: usize) -> Point {
        game.config().board.geometry().cell_rect(CellCoord::new(row, col)).center()
    }

    fn tile(game: &Game, index: usize) -> Point {
        game.config().rack.geometry().tile_rect(index).center()
    }

    fn down(position: Point) -> PointerEvent {
        PointerEvent::Down { pointer: PointerId::MOUSE, position }
    }

    fn moved(position: Point) -> PointerEvent {
        PointerEvent::Move { pointer: PointerId::MOUSE, position }
    }

    fn up(position: Point) -> PointerEvent {
        PointerEvent::Up { pointer: PointerId::MOUSE, position }
    }

    fn selections(events: &[GameEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|event| match event {
                GameEvent::SelectionChanged { letters } => Some(letters.iter().collect()),
                _ => None,
            })
            .collect()
    }

    fn run(game: &mut Game, script: &[PointerEvent]) -> Vec<GameEvent> {
        script
            .iter()
            .flat_map(|&event| game.handle_pointer_event(event))
            .collect()
    }

    #[test]
    fn test_trace_cat_commits_word() {
        let mut game = cat_game();
        let (c, a, t) = (slot(&game, 0), slot(&game, 1), slot(&game, 2));
        let events = run(&mut game, &[down(c), moved(a), moved(t), up(t)]);

        assert_eq!(selections(&events), vec!["C", "CA", "CAT"]);
        assert_eq!(
            events.last(),
            Some(&GameEvent::WordCommitted { word: Word::new("CAT").unwrap() })
        );
        assert_eq!(game.words().display(), "CAT");
        assert_eq!(game.active_pointer(), None);
    }

    #[test]
    fn test_backtrack_scenario() {
        let mut game = cat_game();
        let (c, a, t) = (slot(&game, 0), slot(&game, 1), slot(&game, 2));
        let h = hub(&game);
        let events = run(
            &mut game,
            &[down(c), moved(h), moved(a), moved(h), moved(c), moved(h), moved(t), up(h)],
        );

        assert_eq!(selections(&events), vec!["C", "CA", "C", "CT"]);
        assert_eq!(game.words().words(), &[Word::new("CT").unwrap()]);
    }

    #[test]
    fn test_single_letter_commits() {
        let mut game = cat_game();
        let a = slot(&game, 1);
        run(&mut game, &[down(a), up(a)]);
        assert_eq!(game.words().display(), "A");
    }

    #[test]
    fn test_release_off_wheel_still_ends_gesture() {
        let mut game = cat_game();
        let c = slot(&game, 0);
        run(&mut game, &[down(c), moved(Point::new(900.0, 900.0)), up(Point::new(900.0, 900.0))]);
        assert_eq!(game.words().len(), 1);
        assert_eq!(game.active_pointer(), None);
    }

    #[test]
    fn test_cancel_commits_wheel_selection() {
        let mut game = cat_game();
        let (c, a) = (slot(&game, 0), slot(&game, 1));
        run(&mut game, &[down(c), moved(a)]);
        let events = game.handle_pointer_event(PointerEvent::Cancel { pointer: PointerId::MOUSE });
        assert_eq!(events, vec![GameEvent::WordCommitted { word: Word::new("CA").unwrap() }]);
    }

    #[test]
    fn test_moves_without_gesture_ignored() {
        let mut game = cat_game();
        let a = slot(&game, 1);
        game.take_invalidation();
        assert!(run(&mut game, &[moved(a), up(a)]).is_empty());
        assert!(game.take_invalidation().is_empty());
    }

    #[test]
    fn test_invalidation_separates_cursor_from_selection() {
        let mut game = cat_game();
        let c = slot(&game, 0);
        game.handle_pointer_event(down(c));
        let first = game.take_invalidation();
        assert!(first.selection && first.cursor);

        game.handle_pointer_event(moved(c + kurbo::Vec2::new(2.0, 0.0)));
        let nudge = game.take_invalidation();
        assert!(nudge.cursor);
        assert!(!nudge.selection);
        assert!(!nudge.board && !nudge.rack);
    }

    #[test]
    fn test_drag_tile_onto_board() {
        let mut game = cat_game();
        let (from, to) = (tile(&game, 0), cell(&game, 5, 5));
        let events = run(&mut game, &[down(from), moved(to), up(to)]);

        assert_eq!(
            events,
            vec![GameEvent::TilePlaced {
                rack_index: 0,
                cell: CellCoord::new(5, 5),
                letter: 'Q'
            }]
        );
        assert_eq!(game.board().cell(5, 5).unwrap().occupant(), Some('Q'));
        assert_eq!(game.rack().letter(0), None);
        assert_eq!(game.rack().letter(1), Some('I'));
    }

    #[test]
    fn test_drop_on_occupied_cell_returns_tile() {
        let mut game = cat_game();
        let (q, i, target) = (tile(&game, 0), tile(&game, 1), cell(&game, 5, 5));
        run(&mut game, &[down(i), up(target)]);
        let board_before = game.board().clone();

        let events = run(&mut game, &[down(q), moved(target), up(target)]);
        assert_eq!(
            events,
            vec![GameEvent::TileReturned {
                rack_index: 0,
                letter: 'Q',
                reason: ReturnReason::Occupied
            }]
        );
        assert_eq!(game.rack().letter(0), Some('Q'));
        assert_eq!(game.board(), &board_before);
    }

    #[test]
    fn test_second_pointer_ignored_during_drag() {
        let mut game = cat_game();
        let (q, i, target) = (tile(&game, 0), tile(&game, 1), cell(&game, 2, 2));

        game.handle_pointer_event(down(q));
        let second = PointerEvent::Down { pointer: FINGER, position: i };
        assert!(game.handle_pointer_event(second).is_empty());
        assert!(game
            .handle_pointer_event(PointerEvent::Up { pointer: FINGER, position: target })
            .is_empty());

        assert_eq!(game.drag().active().unwrap().rack_index, 0);
        let events = game.handle_pointer_event(up(target));
        assert!(matches!(events[..], [GameEvent::TilePlaced { letter: 'Q', .. }]));
        assert_eq!(game.rack().letter(1), Some('I'));
    }

    #[test]
    fn test_cancel_returns_dragged_tile() {
        let mut game = cat_game();
        let q = tile(&game, 0);
        game.handle_pointer_event(down(q));
        let events = game.handle_pointer_event(PointerEvent::Cancel { pointer: PointerId::MOUSE });
        assert!(matches!(
            events[..],
            [GameEvent::TileReturned { reason: ReturnReason::Cancelled, .. }]
        ));
        assert_eq!(game.rack().letter(0), Some('Q'));
        assert_eq!(game.board().occupied_count(), 0);
    }

    #[test]
    fn test_down_on_empty_rack_slot_ignored() {
        let mut game = cat_game();
        let empty = tile(&game, 5);
        assert!(game.handle_pointer_event(down(empty)).is_empty());
        assert_eq!(game.active_pointer(), None);
    }

    #[test]
    fn test_add_word_keeps_gesture() {
        let mut game = cat_game();
        let (c, a, t) = (slot(&game, 0), slot(&game, 1), slot(&game, 2));
        run(&mut game, &[down(c), moved(a)]);

        let events = game.add_word();
        assert_eq!(events, vec![GameEvent::WordCommitted { word: Word::new("CA").unwrap() }]);
        run(&mut game, &[moved(t), up(t)]);
        assert_eq!(game.words().display(), "CA, T");
    }

    #[test]
    fn test_clear_selection_then_release_commits_nothing() {
        let mut game = cat_game();
        let (c, a) = (slot(&game, 0), slot(&game, 1));
        run(&mut game, &[down(c), moved(a)]);
        game.clear_selection();
        assert!(run(&mut game, &[up(a)]).is_empty());
        assert!(game.words().is_empty());
    }

    #[test]
    fn test_submit_and_clear_words() {
        let mut game = cat_game();
        let (c, a) = (slot(&game, 0), slot(&game, 1));
        run(&mut game, &[down(c), up(c), down(a), up(a)]);

        assert_eq!(
            game.submit(),
            GameEvent::WordsSubmitted {
                words: vec![Word::new("C").unwrap(), Word::new("A").unwrap()]
            }
        );
        assert_eq!(game.words().len(), 2);

        game.clear_words();
        assert_eq!(game.submit(), GameEvent::WordsSubmitted { words: Vec::new() });
    }

    #[test]
    fn test_shuffle_mid_gesture_releases_lock() {
        let mut game = cat_game();
        let c = slot(&game, 0);
        game.handle_pointer_event(down(c));
        game.shuffle_wheel(&mut SmallRng::seed_from_u64(1));

        assert_eq!(game.active_pointer(), None);
        assert_eq!(game.wheel().current_word(), "_");
    }

    #[test]
    fn test_reset_board_keeps_bonuses() {
        let mut game = cat_game();
        let (q, target) = (tile(&game, 0), cell(&game, 0, 0));
        run(&mut game, &[down(q), up(target)]);
        assert_eq!(game.board().occupied_count(), 1);

        game.reset_board();
        game.reset_board();
        assert_eq!(game.board().occupied_count(), 0);
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn test_scene_reflects_drag() {
        let mut game = cat_game();
        let (q, target) = (tile(&game, 0), cell(&game, 3, 4));
        run(&mut game, &[down(q), moved(target)]);

        let scene = game.scene();
        assert!(scene.rack[0].lifted);
        assert!(!scene.rack[1].lifted);
        assert_eq!(scene.drag.map(|proxy| proxy.letter), Some('Q'));
        assert!(scene.cell(CellCoord::new(3, 4)).unwrap().hovered);
        assert_eq!(scene.cells.iter().filter(|cell| cell.hovered).count(), 1);
        assert_eq!(scene.word_list, "(No words yet)");
    }

    #[test]
    fn test_scene_reflects_selection() {
        let mut game = cat_game();
        let (c, a) = (slot(&game, 0), slot(&game, 1));
        run(&mut game, &[down(c), moved(a)]);

        let scene = game.scene();
        assert_eq!(scene.current_word, "CA");
        assert!(scene.slots[0].selected && scene.slots[1].selected);
        assert!(!scene.slots[2].selected);
        assert_eq!(scene.path, vec![c, a, a]);
    }

    #[test]
    fn test_restore_rack_keeps_holes() {
        let mut game = cat_game();
        game.take_invalidation();
        game.restore_rack(&[None, Some('Z')]).unwrap();

        assert!(game.take_invalidation().rack);
        assert_eq!(game.rack().letter(0), None);
        assert_eq!(game.rack().letter(1), Some('Z'));
        assert!(game.restore_rack(&[None; 8]).is_err());
    }

    #[test]
    fn test_invalid_config_refused() {
        let config = GameConfig {
            letters: Vec::new(),
            ..GameConfig::default()
        };
        assert!(Game::new(config).is_err());
    }
}
