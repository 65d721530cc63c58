//! Live game state: board, active piece, hold, preview queue, score and
//! the gravity / lock-delay state machine.
//!
//! All inputs return whether they took effect; a rejected input leaves the
//! state untouched. `update` is polled by the caller with the time elapsed
//! since the previous tick.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::apply::{lock_and_resolve, LockResult};
use crate::bag::SevenBag;
use crate::collision::{drop_distance, hard_drop_y, is_grounded};
use crate::gravity::GravityConfig;
use crate::movement::{try_drop, try_move, try_rotate, try_rotate_180, RotationResult};
use crate::scoring::ScoreTracker;
use stacker_core::{ActivePiece, Board, Piece, RotateDir};

/// Result of locking the active piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockOutcome {
    pub result: LockResult,
    /// Points awarded for the lock itself, drop points excluded.
    pub points: u32,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<ActivePiece>,
    pub ghost: Option<ActivePiece>,
    pub hold: Option<Piece>,
    pub can_hold: bool,
    pub next: Vec<Piece>,
    pub score: ScoreTracker,
    pub game_over: bool,
    pub pieces_placed: u32,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<Piece>,
    can_hold: bool,
    queue: Vec<Piece>,
    bag: SevenBag,
    scoring: ScoreTracker,
    config: GravityConfig,
    game_over: bool,
    pieces_placed: u32,
    gravity_acc_ms: f32,
    /// Remaining lock delay while the piece touches down.
    lock_timer_ms: Option<f32>,
    move_resets: u8,
}

impl Game {
    /// Standard-timing game with a seeded bag.
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GravityConfig::standard())
    }

    pub fn with_config(seed: u64, config: GravityConfig) -> Self {
        Self::with_board(Board::new(), seed, config)
    }

    /// Start from an existing grid, e.g. a puzzle setup.
    pub fn with_board(board: Board, seed: u64, config: GravityConfig) -> Self {
        let mut game = Self {
            board,
            active: None,
            hold: None,
            can_hold: true,
            queue: Vec::with_capacity(config.preview_len + 1),
            bag: SevenBag::seeded(seed),
            scoring: ScoreTracker::new(),
            config,
            game_over: false,
            pieces_placed: 0,
            gravity_acc_ms: 0.0,
            lock_timer_ms: None,
            move_resets: 0,
        };
        game.fill_queue();
        game.spawn_piece();
        game
    }

    /// Independent copy for lookahead; nothing done to it reaches `self`.
    pub fn clone_for_simulation(&self) -> Self {
        self.clone()
    }

    fn fill_queue(&mut self) {
        while self.queue.len() < self.config.preview_len.max(1) {
            self.queue.push(self.bag.next_piece());
        }
    }

    /// Spawn the next queued piece. Returns false and ends the game when the
    /// spawn position is already occupied.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.fill_queue();
        let piece = self.queue.remove(0);
        self.fill_queue();
        self.spawn(piece)
    }

    fn spawn(&mut self, piece: Piece) -> bool {
        self.gravity_acc_ms = 0.0;
        self.lock_timer_ms = None;
        self.move_resets = 0;

        let spawned = ActivePiece::spawn(piece);
        if !self.board.is_valid_placement(&spawned) {
            info!(
                piece = %piece,
                pieces = self.pieces_placed,
                score = self.scoring.score,
                "spawn blocked, game over"
            );
            self.active = None;
            self.game_over = true;
            return false;
        }
        trace!(piece = %piece, "spawned");
        self.active = Some(spawned);
        true
    }

    /// Count a successful input against the lock delay while touching down.
    fn after_input(&mut self) {
        if self.lock_timer_ms.is_none() {
            return;
        }
        if self.move_resets < self.config.max_move_resets {
            self.move_resets += 1;
            self.lock_timer_ms = Some(self.config.lock_delay_ms as f32);
        } else {
            // budget spent: lock on the next grounded tick
            self.lock_timer_ms = Some(0.0);
        }
    }

    fn shift(&mut self, dx: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        match try_move(&self.board, &piece, dx, 0) {
            Some(moved) => {
                self.active = Some(moved);
                self.after_input();
                true
            }
            None => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    /// Move down one row for one point.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        match try_drop(&self.board, &piece) {
            Some(dropped) => {
                self.active = Some(dropped);
                self.gravity_acc_ms = 0.0;
                self.scoring.add_drop_points(1, false);
                true
            }
            None => false,
        }
    }

    fn apply_rotation(&mut self, result: Option<RotationResult>) -> bool {
        match result {
            Some(r) => {
                trace!(rotation = ?r.piece.rotation, kick = r.kick_index, "rotated");
                self.active = Some(r.piece);
                self.after_input();
                true
            }
            None => false,
        }
    }

    pub fn rotate(&mut self, dir: RotateDir) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let result = try_rotate(&self.board, &piece, dir);
        self.apply_rotation(result)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(RotateDir::Cw)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(RotateDir::Ccw)
    }

    pub fn rotate_180(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let result = try_rotate_180(&self.board, &piece);
        self.apply_rotation(result)
    }

    /// Drop to the landing row for two points per cell and lock.
    pub fn hard_drop(&mut self) -> Option<LockOutcome> {
        let piece = self.active?;
        let distance = drop_distance(&self.board, &piece);
        if distance > 0 {
            self.active = Some(piece.shifted(0, distance as i8));
        }
        self.scoring.add_drop_points(distance as u32, true);
        self.lock_piece()
    }

    /// Swap the active piece with the hold slot, once per spawn. With an
    /// empty slot the active piece is stashed and the next queued piece spawns.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || self.game_over {
            return false;
        }
        let Some(current) = self.active else {
            return false;
        };
        match self.hold.replace(current.piece) {
            Some(held) => {
                self.spawn(held);
            }
            None => {
                self.spawn_piece();
            }
        }
        self.can_hold = false;
        true
    }

    /// Lock the active piece where it stands, score it and spawn the next.
    pub fn lock_piece(&mut self) -> Option<LockOutcome> {
        let piece = self.active.take()?;
        let result = lock_and_resolve(&mut self.board, &piece);
        let points = self.scoring.apply_score(result.lines_cleared, result.tspin);
        self.pieces_placed += 1;

        if result.lines_cleared > 0 || result.tspin.is_spin() {
            debug!(
                lines = result.lines_cleared,
                tspin = ?result.tspin,
                perfect_clear = result.perfect_clear,
                combo = self.scoring.combo,
                b2b = self.scoring.back_to_back,
                points,
                "cleared"
            );
        }

        self.can_hold = true;
        self.spawn_piece();
        Some(LockOutcome { result, points })
    }

    /// Advance gravity and the lock timer by `elapsed_ms`. Returns the lock
    /// outcome when the timer ran out during this tick.
    pub fn update(&mut self, elapsed_ms: f32) -> Option<LockOutcome> {
        if self.game_over {
            return None;
        }
        let mut piece = self.active?;

        if self.config.has_gravity() {
            self.gravity_acc_ms += elapsed_ms;
            let interval = self.config.gravity_interval_ms(self.scoring.level);
            while self.gravity_acc_ms >= interval {
                self.gravity_acc_ms -= interval;
                match try_drop(&self.board, &piece) {
                    Some(dropped) => piece = dropped,
                    None => {
                        self.gravity_acc_ms = 0.0;
                        break;
                    }
                }
            }
            self.active = Some(piece);
        }

        if !is_grounded(&self.board, &piece) {
            self.lock_timer_ms = None;
            return None;
        }

        match self.lock_timer_ms {
            None => {
                self.lock_timer_ms = Some(self.config.lock_delay_ms as f32);
                None
            }
            Some(remaining) => {
                let remaining = remaining - elapsed_ms;
                if remaining <= 0.0 {
                    self.lock_piece()
                } else {
                    self.lock_timer_ms = Some(remaining);
                    None
                }
            }
        }
    }

    /// Where the active piece would land on a hard drop.
    pub fn ghost(&self) -> Option<ActivePiece> {
        let piece = self.active?;
        Some(ActivePiece {
            y: hard_drop_y(&self.board, &piece),
            ..piece
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            active: self.active,
            ghost: self.ghost(),
            hold: self.hold,
            can_hold: self.can_hold,
            next: self.queue.clone(),
            score: self.scoring,
            game_over: self.game_over,
            pieces_placed: self.pieces_placed,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn hold_piece(&self) -> Option<Piece> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Upcoming pieces, next first.
    pub fn preview(&self) -> &[Piece] {
        &self.queue
    }

    pub fn scoring(&self) -> &ScoreTracker {
        &self.scoring
    }

    pub fn score(&self) -> u32 {
        self.scoring.score
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines
    }

    pub fn level(&self) -> u32 {
        self.scoring.level
    }

    pub fn combo(&self) -> u32 {
        self.scoring.combo
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn lock_timer_ms(&self) -> Option<f32> {
        self.lock_timer_ms
    }

    pub fn config(&self) -> &GravityConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stacker_core::{Rotation, TSpin};

    fn still_game(seed: u64) -> Game {
        Game::with_config(seed, GravityConfig::gravity_off())
    }

    #[test]
    fn test_new_game_spawns() {
        let game = still_game(1);
        let active = game.active().expect("spawned");
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(game.preview().len(), 5);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_first_seven_pieces_form_a_bag() {
        let mut game = still_game(3);
        let mut seen = Vec::new();
        for _ in 0..7 {
            seen.push(game.active().expect("active").piece);
            game.hard_drop();
        }
        for piece in Piece::ALL {
            assert_eq!(seen.iter().filter(|&&p| p == piece).count(), 1);
        }
    }

    #[test]
    fn test_moves_stop_at_walls() {
        let mut game = still_game(5);
        let mut steps = 0;
        while game.move_left() {
            steps += 1;
        }
        assert!(steps >= 3);
        assert!(!game.move_left());
    }

    #[test]
    fn test_hard_drop_scores_two_per_cell() {
        let mut game = still_game(11);
        let ghost = game.ghost().expect("ghost");
        let start = game.active().expect("active").y;
        let outcome = game.hard_drop().expect("locked");
        assert_eq!(outcome.result.lines_cleared, 0);
        assert_eq!(game.score(), 2 * (ghost.y - start) as u32);
        assert_eq!(game.pieces_placed(), 1);
    }

    #[test]
    fn test_soft_drop_scores_one() {
        let mut game = still_game(2);
        assert!(game.soft_drop());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_hold_once_per_spawn() {
        let mut game = still_game(9);
        let first = game.active().expect("active").piece;
        let next = game.preview()[0];
        assert!(game.hold());
        assert_eq!(game.hold_piece(), Some(first));
        assert_eq!(game.active().expect("active").piece, next);
        assert!(!game.can_hold());
        assert!(!game.hold());

        game.hard_drop();
        assert!(game.can_hold());
        assert!(game.hold());
        assert_eq!(game.active().expect("active").piece, first);
    }

    #[test]
    fn test_clone_is_independent() {
        let game = still_game(4);
        let mut sim = game.clone_for_simulation();
        sim.hard_drop();
        sim.hard_drop();
        assert!(game.board().is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.pieces_placed(), 0);
        assert_eq!(game.active().expect("active").y, 0);
        assert!(!sim.board().is_empty());
    }

    #[test]
    fn test_lock_delay_expires() {
        let mut game = still_game(6);
        while game.soft_drop() {}
        assert_eq!(game.update(16.0), None);
        assert_eq!(game.lock_timer_ms(), Some(500.0));
        assert_eq!(game.update(400.0), None);
        assert!(game.update(100.0).is_some());
        assert_eq!(game.pieces_placed(), 1);
    }

    #[test]
    fn test_move_resets_are_capped() {
        let mut game = still_game(8);
        while game.soft_drop() {}
        game.update(0.0);
        for _ in 0..15 {
            game.update(100.0);
            // shuffle in place to buy time
            if !game.move_left() {
                game.move_right();
            }
        }
        assert_eq!(game.pieces_placed(), 0);
        if !game.move_right() {
            game.move_left();
        }
        assert_eq!(game.lock_timer_ms(), Some(0.0));
        assert!(game.update(0.0).is_some());
    }

    #[test]
    fn test_gravity_pulls_piece_down() {
        let mut game = Game::new(12);
        game.update(799.0);
        assert_eq!(game.active().expect("active").y, 0);
        game.update(1.0);
        assert_eq!(game.active().expect("active").y, 1);
        game.update(1600.0);
        assert_eq!(game.active().expect("active").y, 3);
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let rows = vec!["ZZZZZZZZZ."; Board::HEIGHT];
        let board = Board::from_rows(&rows).expect("valid rows");
        let game = Game::with_board(board, 1, GravityConfig::gravity_off());
        assert!(game.is_game_over());
        assert!(game.active().is_none());
        assert_eq!(game.snapshot().ghost, None);
    }

    #[test]
    fn test_tspin_through_input_path() {
        let board = Board::from_rows(&[
            "...JJJJJJJ",
            "J...JJJJJJ",
            "JJ.JJJJJJJ",
        ])
        .expect("valid rows");
        // find a seed whose first piece is a T
        let mut game = (0..64)
            .map(|seed| Game::with_board(board.clone(), seed, GravityConfig::gravity_off()))
            .find(|g| g.active().map(|p| p.piece) == Some(Piece::T))
            .expect("some seed starts with T");

        assert!(game.rotate_ccw());
        while game.active().expect("active").x > 1 {
            assert!(game.move_left());
        }
        while game.soft_drop() {}
        assert!(game.rotate_ccw());
        let outcome = game.lock_piece().expect("locked");
        assert_eq!(outcome.result.tspin, TSpin::Normal);
        assert_eq!(outcome.result.lines_cleared, 2);
        assert_eq!(game.lines(), 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let game = still_game(21);
        let json = serde_json::to_string(&game.snapshot()).expect("serialize");
        let back: GameSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, game.snapshot());
    }
}
