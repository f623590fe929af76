//! Game state module - manages the complete game session
//!
//! This module ties together all core components: board, pieces, bag, scoring
//! and gravity. It owns the active piece state machine
//! (spawn -> falling -> grounded -> locked), hold, line clears and the game
//! lifecycle (start, pause, game over, restart).
//!
//! All mutation happens synchronously inside one call; time only advances
//! through [`GameState::tick`].

use arrayvec::ArrayVec;

use crate::board::{Board, LockError, LockedRows, RowList};
use crate::gravity::{apply_speed_mode, drop_interval_ms, GravityClock};
use crate::pieces::{get_shape, try_rotate, PieceShape};
use crate::rng::{PieceBag, RandomSource, SimpleRng};
use crate::scoring::{ClearScore, ScoreState};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::{
    GameAction, GameEvent, PieceKind, RotateDirection, Rotation, Rules, SpeedMode, SPAWN_X,
    SPAWN_Y,
};

/// Pending events kept for collaborators; the oldest is dropped when full
pub const EVENT_CAPACITY: usize = 32;

/// Queue of events drained with [`GameState::take_events`]
pub type EventQueue = ArrayVec<GameEvent, EVENT_CAPACITY>;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Column of the 4x4 mask origin
    pub x: i8,
    /// Row of the 4x4 mask origin (negative while above the board)
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy shifted by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(self.kind, self.rotation, self.x, self.y)
    }

    /// Check if the piece is resting on the floor or a locked cell
    pub fn is_grounded(&self, board: &Board) -> bool {
        self.shifted(0, 1).collides(board)
    }
}

/// Per-piece phase as seen by collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiecePhase {
    /// The last downward attempt succeeded (or none was made yet)
    Falling,
    /// The last downward attempt failed; the lock delay is running
    Grounded,
}

/// What happened when the active piece was committed to the board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Rows the piece was written into, top to bottom (pre-clear indices)
    pub locked_rows: LockedRows,
    /// Rows removed by this lock, top to bottom (pre-clear indices)
    pub cleared_rows: RowList,
    pub score: ClearScore,
    /// The lock overflowed the board or the next piece could not spawn
    pub game_over: bool,
}

impl LockOutcome {
    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// Result of a hard drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardDrop {
    /// Rows travelled before locking
    pub cells: u32,
    /// Drop points awarded (2 per cell)
    pub points: u32,
    pub lock: LockOutcome,
}

/// Result of one scheduler tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickResult {
    /// Gravity moved the piece down one row
    pub moved: bool,
    /// The piece was locked by the lock delay
    pub lock: Option<LockOutcome>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    hold_used: bool,
    preview: Option<PieceKind>,
    bag: PieceBag<R>,
    score: ScoreState,
    clock: GravityClock,
    grounded: bool,
    rules: Rules,
    best_score: u32,
    events: EventQueue,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed and reference rules
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed), Rules::default())
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a game driven by an injected random source
    pub fn with_source(rng: R, rules: Rules) -> Self {
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            hold_used: false,
            preview: None,
            bag: PieceBag::with_source(rng),
            score: ScoreState::new(),
            clock: GravityClock::new(),
            grounded: false,
            rules,
            best_score: 0,
            events: EventQueue::new(),
            started: false,
            paused: false,
            game_over: false,
        }
    }

    /// Seed the best score carried across games (e.g. loaded from storage)
    pub fn with_best_score(mut self, best_score: u32) -> Self {
        self.best_score = best_score;
        self
    }

    /// Start the game and spawn the first piece. No-op once started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.spawn_piece();
        true
    }

    /// Reinitialize board, pieces, hold, score and bag, then start again.
    ///
    /// The random source keeps its stream and the best score is kept.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.hold_used = false;
        self.preview = None;
        self.bag.reset();
        self.score = ScoreState::new();
        self.clock.reset();
        self.grounded = false;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.start();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True while input and ticks have an effect
    pub fn is_playing(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn lines(&self) -> u32 {
        self.score.lines()
    }

    /// Combo index: -1 when no chain is running, 0 after the first clear
    pub fn combo(&self) -> i32 {
        self.score.combo()
    }

    pub fn back_to_back(&self) -> bool {
        self.score.back_to_back()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn preview(&self) -> Option<PieceKind> {
        self.preview
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for puzzle setups and tests
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn clock(&self) -> &GravityClock {
        &self.clock
    }

    /// Events raised since the last [`take_events`](Self::take_events)
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain pending events in the order they happened
    pub fn take_events(&mut self) -> EventQueue {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Phase of the active piece, `None` when there is none
    pub fn phase(&self) -> Option<PiecePhase> {
        self.active.map(|_| {
            if self.grounded {
                PiecePhase::Grounded
            } else {
                PiecePhase::Falling
            }
        })
    }

    /// Place `kind` at the spawn position, retrying one row lower.
    fn place_at_spawn(&self, kind: PieceKind) -> Option<Tetromino> {
        let piece = Tetromino::new(kind);
        if !piece.collides(&self.board) {
            return Some(piece);
        }
        let lower = piece.shifted(0, 1);
        (!lower.collides(&self.board)).then_some(lower)
    }

    /// Spawn the previewed piece (drawing from the bag if there is none yet)
    /// and draw a new preview.
    fn spawn_piece(&mut self) -> bool {
        let kind = match self.preview.take() {
            Some(kind) => kind,
            None => self.bag.next_piece(),
        };
        self.preview = Some(self.bag.next_piece());

        self.clock.reset_lock();
        self.grounded = false;

        match self.place_at_spawn(kind) {
            Some(piece) => {
                self.active = Some(piece);
                true
            }
            None => {
                self.active = None;
                self.trigger_game_over();
                false
            }
        }
    }

    fn trigger_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.active = None;

        let final_score = self.score.score();
        self.best_score = self.best_score.max(final_score);
        self.push_event(GameEvent::GameOver {
            final_score,
            best_score: self.best_score,
        });
    }

    /// Gravity interval for the current level and speed mode
    pub fn drop_interval_ms(&self, speed: SpeedMode) -> u32 {
        let base = drop_interval_ms(self.score.level(), &self.rules);
        apply_speed_mode(base, speed, &self.rules)
    }

    /// Try to translate the active piece
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.collides(&self.board) {
            if dy > 0 {
                self.grounded = true;
            }
            return false;
        }

        self.active = Some(moved);
        self.clock.reset_lock();
        self.grounded = false;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row, awarding one point on success
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.score.add_drop(1, false);
        }
        moved
    }

    /// Rotate the active piece with SRS wall kicks.
    ///
    /// The O piece reports success without changing anything. A rotation
    /// with no fitting kick leaves the piece untouched and returns false.
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if active.kind == PieceKind::O {
            return true;
        }

        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            direction,
            |x, y| self.board.is_free(x, y),
        );

        let Some((rotation, (dx, dy))) = result else {
            return false;
        };

        self.active = Some(Tetromino {
            rotation,
            x: active.x + dx,
            y: active.y - dy,
            ..active
        });
        self.clock.reset_lock();
        self.grounded = false;
        true
    }

    /// Drop the active piece to the bottom and lock it immediately
    pub fn hard_drop(&mut self) -> Option<HardDrop> {
        if !self.is_playing() {
            return None;
        }
        let active = self.active?;

        let mut piece = active;
        let mut cells = 0;
        while !piece.shifted(0, 1).collides(&self.board) {
            piece = piece.shifted(0, 1);
            cells += 1;
        }
        self.active = Some(piece);

        let points = self.score.add_drop(cells, true);
        let lock = self.lock_piece().unwrap_or_default();
        Some(HardDrop {
            cells,
            points,
            lock,
        })
    }

    /// Swap the active piece with the hold slot (once per piece)
    pub fn hold(&mut self) -> bool {
        if !self.is_playing() || self.hold_used {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.hold_used = true;
        match self.hold.replace(active.kind) {
            None => {
                self.active = None;
                self.spawn_piece();
            }
            Some(held) => {
                self.clock.reset_lock();
                self.grounded = false;
                match self.place_at_spawn(held) {
                    Some(piece) => self.active = Some(piece),
                    None => self.trigger_game_over(),
                }
            }
        }
        true
    }

    /// Commit the active piece to the board, clear rows and spawn the next piece
    pub fn lock_piece(&mut self) -> Option<LockOutcome> {
        let active = self.active.take()?;

        let locked_rows =
            match self
                .board
                .lock_piece(active.kind, active.rotation, active.x, active.y)
            {
                Ok(rows) => rows,
                Err(LockError::Overflow) => {
                    self.trigger_game_over();
                    return Some(LockOutcome {
                        game_over: true,
                        ..LockOutcome::default()
                    });
                }
                // Only reachable through board_mut() edits under the piece.
                Err(LockError::Blocked) => {
                    self.active = Some(active);
                    return None;
                }
            };

        self.hold_used = false;

        let cleared_rows = self.board.clear_full_rows();
        let score = self.score.apply_clear(cleared_rows.len());
        if score.lines > 0 {
            self.push_event(GameEvent::LineCleared {
                count: score.lines,
                difficult: score.difficult,
            });
        }
        if let Some(level) = score.leveled_up {
            self.push_event(GameEvent::LeveledUp { level });
        }

        let spawned = self.spawn_piece();
        Some(LockOutcome {
            locked_rows,
            cleared_rows,
            score,
            game_over: !spawned,
        })
    }

    /// Check if the active piece is on the ground
    pub fn is_grounded(&self) -> bool {
        self.active
            .map(|piece| piece.is_grounded(&self.board))
            .unwrap_or(false)
    }

    /// Row the active piece's mask origin would land on
    pub fn ghost_y(&self) -> Option<i8> {
        let mut piece = self.active?;
        while !piece.shifted(0, 1).collides(&self.board) {
            piece = piece.shifted(0, 1);
        }
        Some(piece.y)
    }

    /// Advance gravity and the lock delay by `elapsed_ms`.
    ///
    /// At most one gravity step happens per tick.
    pub fn tick(&mut self, elapsed_ms: u32, speed: SpeedMode) -> TickResult {
        if !self.is_playing() || self.active.is_none() {
            return TickResult::default();
        }

        let interval = self.drop_interval_ms(speed);
        if !self.clock.advance(elapsed_ms, interval) {
            return TickResult::default();
        }

        let moved = self.try_move(0, 1);
        let lock = if self.clock.settle(moved, self.rules.lock_delay_ms) {
            self.lock_piece()
        } else {
            None
        };

        TickResult { moved, lock }
    }

    pub fn pause(&mut self) -> bool {
        if !self.started || self.game_over || self.paused {
            return false;
        }
        self.paused = true;
        true
    }

    /// Resume play; time spent paused never counts toward gravity
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.clock.rebaseline();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::RotateCw => self.rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.can_hold = self.can_hold();
        out.preview = self.preview;
        out.score = self.score.score();
        out.best_score = self.best_score;
        out.level = self.score.level();
        out.lines = self.score.lines();
        out.combo = self.score.combo();
        out.back_to_back = self.score.back_to_back();
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.timers = TimersSnapshot {
            drop_ms: self.clock.drop_ms(),
            lock_ms: self.clock.lock_ms(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
