use crate::core::{Board, GameResult, Marker, Move, MoveError};
use crate::player::PlayerController;
use tracing::{debug, info, warn};

/// 対局の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// `None` は引き分け
    Terminal(Option<Marker>),
}

/// 手番管理
///
/// Owns the board and borrows its two players. Once a win or a draw is on the
/// board the session stops accepting moves until [`GameSession::reset`].
pub struct GameSession<'a> {
    board: Board,
    players: [&'a dyn PlayerController; 2],
    current_index: usize,
    state: SessionState,
    move_count: usize,
}

impl<'a> GameSession<'a> {
    pub fn new(first: &'a dyn PlayerController, second: &'a dyn PlayerController) -> Self {
        debug_assert_ne!(
            first.marker(),
            second.marker(),
            "both players hold the same marker"
        );
        GameSession {
            board: Board::new(),
            players: [first, second],
            current_index: 0,
            state: SessionState::Active,
            move_count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.current_index = 0;
        self.state = SessionState::Active;
        self.move_count = 0;
        debug!("session reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> [&'a dyn PlayerController; 2] {
        self.players
    }

    pub fn current_player(&self) -> &'a dyn PlayerController {
        self.players[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_marker(&self) -> Marker {
        self.current_player().marker()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Terminal(_))
    }

    pub fn winner(&self) -> Option<Marker> {
        match self.state {
            SessionState::Terminal(winner) => winner,
            SessionState::Active => None,
        }
    }

    pub fn result(&self) -> GameResult {
        match self.state {
            SessionState::Active => GameResult::InProgress,
            SessionState::Terminal(Some(m)) => GameResult::Win(m),
            SessionState::Terminal(None) => GameResult::Draw,
        }
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Plays the active player's marker at `(row, col)`.
    ///
    /// This is the entry point for human moves. An occupied or off-board cell
    /// leaves the session untouched.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let mv = Move::new(row, col);
        let marker = self.current_marker();
        if let Err(e) = self.board.try_move(marker, mv) {
            warn!(player = %marker, %mv, error = %e, "move rejected");
            return Err(e);
        }
        self.move_count += 1;
        self.after_move();
        Ok(())
    }

    /// Asks the active player's strategy for a move and plays it.
    ///
    /// Returns the move played, or `None` when the game is already over or
    /// the active player decides through the front end instead.
    pub fn auto_advance(&mut self) -> Option<Move> {
        if self.is_over() {
            return None;
        }
        let player = self.current_player();
        let mv = player.choose_move(&mut self.board)?;
        match self.apply_move(mv.row, mv.col) {
            Ok(()) => {
                debug!(player = player.name(), %mv, "automated move");
                Some(mv)
            }
            Err(_) => None,
        }
    }

    fn after_move(&mut self) {
        if let Some(winner) = self.board.check_win() {
            self.state = SessionState::Terminal(Some(winner));
            info!(%winner, moves = self.move_count, "game won");
        } else if self.board.check_draw() {
            self.state = SessionState::Terminal(None);
            info!(moves = self.move_count, "game drawn");
        } else {
            self.current_index = 1 - self.current_index;
        }
    }
}
