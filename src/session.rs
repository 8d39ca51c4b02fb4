//! # Session Controller - Central Game State Management
//!
//! One [`Session`] owns the authoritative state for a single running
//! round. Every move goes through [`Session::attempt_move`], which runs
//! the full validate → transition → evaluate sequence and either commits
//! a whole post-move snapshot or leaves the session untouched. Rejections
//! are ordinary return values, never errors: a rejected move is a normal
//! part of play (clicking a filled cell, moving after the round ended).
//!
//! The session applies each accepted move to a clone of the state and
//! commits the clone, so a collaborator holding an earlier snapshot never
//! observes a half-applied transition.
//!
//! Timers are coordinated through the `epoch` counter: every reset bumps
//! it, and scheduled callbacks captured against an older epoch do nothing
//! (see [`crate::scheduler`]).

use crate::counters::CounterStore;
use crate::game_wrapper::{GameWrapper, MoveWrapper};
use crate::{GameEngine, Status};

/// Result of attempting a move.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// Move was validated, applied, and evaluated.
    Accepted {
        /// Actor who moved.
        actor: i32,
        /// Status after the move.
        status: Status,
        /// Accepted moves so far, including this one.
        move_count: u32,
    },
    /// Move was rejected; the session is unchanged.
    Rejected(RejectReason),
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The game's validator refused the move.
    IllegalMove,
    /// The move descriptor belongs to a different game.
    MismatchedGame,
    /// The round already ended; reset or play again first.
    GameOver,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::IllegalMove => write!(f, "illegal move"),
            RejectReason::MismatchedGame => write!(f, "move doesn't match game"),
            RejectReason::GameOver => write!(f, "round is already over"),
        }
    }
}

/// The session controller owning the authoritative game state.
pub struct Session {
    state: GameWrapper,
    status: Status,
    move_count: u32,
    /// Bumped on every reset; timers check it before acting.
    epoch: u64,
    /// Injected persisted-counter collaborator, if any.
    counters: Option<Box<dyn CounterStore + Send>>,
}

impl Session {
    pub fn new(state: GameWrapper) -> Self {
        let status = state.status();
        Session {
            state,
            status,
            move_count: 0,
            epoch: 0,
            counters: None,
        }
    }

    /// A session that reports wins to a persisted counter store.
    pub fn with_counters(state: GameWrapper, counters: Box<dyn CounterStore + Send>) -> Self {
        let mut session = Session::new(state);
        session.counters = Some(counters);
        session
    }

    /// Runs one move through validate → transition → evaluate.
    pub fn attempt_move(&mut self, mv: MoveWrapper) -> MoveOutcome {
        if self.status.is_terminal() {
            tracing::debug!(game = self.state.game_name(), %mv, "move after round end");
            return MoveOutcome::Rejected(RejectReason::GameOver);
        }
        if !self.state.matches(&mv) {
            return MoveOutcome::Rejected(RejectReason::MismatchedGame);
        }
        if !self.state.is_legal(&mv) {
            tracing::debug!(game = self.state.game_name(), %mv, "illegal move");
            return MoveOutcome::Rejected(RejectReason::IllegalMove);
        }

        let actor = self.state.current_actor();

        // Apply on a scratch copy and commit the finished snapshot, so no
        // collaborator ever sees a board mid-transition.
        let mut next = self.state.clone();
        next.apply(&mv);
        let status = next.status();
        self.state = next;
        self.status = status;
        self.move_count += 1;

        if let Status::Win(winner) = status {
            self.record_win(winner);
        }
        tracing::debug!(
            game = self.state.game_name(),
            %mv,
            actor,
            ?status,
            "move accepted"
        );

        MoveOutcome::Accepted {
            actor,
            status,
            move_count: self.move_count,
        }
    }

    fn record_win(&mut self, winner: i32) {
        if let Some(key) = self.state.win_counter_key(winner) {
            if let Some(counters) = self.counters.as_mut() {
                let total = counters.increment(key);
                tracing::info!(key, total, "win recorded");
            }
        }
    }

    /// Starts a new round with a freshly generated board. Invalidates any
    /// scheduled callback from the previous round.
    pub fn reset(&mut self) {
        self.replace(self.state.fresh());
    }

    /// Like [`reset`], but keeps running score totals where the game has
    /// them.
    ///
    /// [`reset`]: Session::reset
    pub fn play_again(&mut self) {
        self.replace(self.state.rematch());
    }

    fn replace(&mut self, state: GameWrapper) {
        self.epoch += 1;
        self.status = state.status();
        self.state = state;
        self.move_count = 0;
        tracing::debug!(game = self.state.game_name(), epoch = self.epoch, "new round");
    }

    /// The slider's administrative solve shortcut: jumps to the solved
    /// board without counting a move or recording a win. Returns false
    /// for games without the shortcut.
    pub fn solve(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        if self.state.solve() {
            self.status = self.state.status();
            true
        } else {
            false
        }
    }

    /// Flips the memory game's pending mismatched pair face-down. Called
    /// by the scheduled collaborator, not by a move.
    pub fn flip_back_pending(&mut self) {
        self.state.flip_back_pending();
    }

    pub fn state(&self) -> &GameWrapper {
        &self.state
    }

    /// A snapshot for collaborators to render or search freely.
    pub fn snapshot(&self) -> GameWrapper {
        self.state.clone()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The actor who moves next (1 for the single-player puzzles).
    pub fn current_actor(&self) -> i32 {
        self.state.current_actor()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn winning_line(&self) -> Option<Vec<(usize, usize)>> {
        self.state.winning_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::MemoryCounters;
    use crate::games::connect4::{Connect4Move, Connect4State};
    use crate::games::slider::SliderState;
    use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};

    fn tictactoe_session() -> Session {
        Session::new(GameWrapper::TicTacToe(TicTacToeState::new()))
    }

    fn win_as_x(session: &mut Session) {
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            session.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(r, c)));
        }
    }

    #[test]
    fn test_accepted_move_reports_actor_and_count() {
        let mut session = tictactoe_session();
        match session.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(1, 1))) {
            MoveOutcome::Accepted {
                actor,
                status,
                move_count,
            } => {
                assert_eq!(actor, 1);
                assert_eq!(status, Status::InProgress);
                assert_eq!(move_count, 1);
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_occupied_cell_rejected_without_state_change() {
        let mut session = tictactoe_session();
        session.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(1, 1)));
        let outcome = session.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(1, 1)));
        assert!(matches!(
            outcome,
            MoveOutcome::Rejected(RejectReason::IllegalMove)
        ));
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.state().current_actor(), -1);
    }

    #[test]
    fn test_mismatched_game_rejected() {
        let mut session = tictactoe_session();
        let outcome = session.attempt_move(MoveWrapper::Connect4(Connect4Move(0)));
        assert!(matches!(
            outcome,
            MoveOutcome::Rejected(RejectReason::MismatchedGame)
        ));
    }

    #[test]
    fn test_terminal_session_rejects_everything() {
        let mut session = tictactoe_session();
        win_as_x(&mut session);
        assert_eq!(session.status(), Status::Win(1));

        let count = session.move_count();
        let outcome = session.attempt_move(MoveWrapper::TicTacToe(TicTacToeMove(2, 2)));
        assert!(matches!(
            outcome,
            MoveOutcome::Rejected(RejectReason::GameOver)
        ));
        assert_eq!(session.move_count(), count);
    }

    #[test]
    fn test_win_increments_injected_counter() {
        let mut session = Session::with_counters(
            GameWrapper::TicTacToe(TicTacToeState::new()),
            Box::new(MemoryCounters::new()),
        );
        win_as_x(&mut session);

        let counters = session.counters.as_ref().unwrap();
        assert_eq!(counters.get("tic-x-wins"), 1);
        assert_eq!(counters.get("tic-o-wins"), 0);
    }

    #[test]
    fn test_reset_clears_round_state() {
        let mut session = tictactoe_session();
        win_as_x(&mut session);
        let epoch = session.epoch();

        session.reset();
        assert_eq!(session.status(), Status::InProgress);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.epoch(), epoch + 1);
    }

    #[test]
    fn test_solve_wins_without_scoring() {
        let mut session = Session::with_counters(
            GameWrapper::Slider(SliderState::new()),
            Box::new(MemoryCounters::new()),
        );
        assert!(session.solve());
        assert_eq!(session.status(), Status::Win(1));
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.counters.as_ref().unwrap().get("gamesWon"), 0);
        // Solving twice is a no-op: the round is already over.
        assert!(!session.solve());
    }

    #[test]
    fn test_winning_line_surfaces_through_session() {
        let mut session = tictactoe_session();
        win_as_x(&mut session);
        assert_eq!(
            session.winning_line(),
            Some(vec![(0, 0), (0, 1), (0, 2)])
        );
    }

    #[test]
    fn test_legal_win_records_counter_for_connect4_not() {
        // Connect Four has no persisted counter; winning must not panic
        // or write anything.
        let mut session = Session::with_counters(
            GameWrapper::Connect4(Connect4State::new()),
            Box::new(MemoryCounters::new()),
        );
        for col in [0, 0, 1, 1, 2, 2, 3] {
            session.attempt_move(MoveWrapper::Connect4(Connect4Move(col)));
        }
        assert_eq!(session.status(), Status::Win(1));
        assert_eq!(session.counters.as_ref().unwrap().get("gamesWon"), 0);
    }
}
