//! Scheduled callbacks for the two time-driven behaviors: the memory
//! game's delayed flip-back and tetro's gravity tick.
//!
//! Timers never own game logic. They re-enter the session under its lock
//! and go through the same entry points as any other collaborator. Each
//! handle captures the session epoch at scheduling time and re-checks it
//! before acting, so resetting the session atomically invalidates every
//! callback scheduled against the old round; dropping or cancelling a
//! handle aborts the task outright.

use crate::game_wrapper::MoveWrapper;
use crate::games::tetro::TetroMove;
use crate::session::Session;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// A session shared between the input loop and scheduled callbacks.
/// The single mutex serializes every mutation, preserving the one-move-
/// at-a-time ordering the engines assume.
pub type SharedSession = Arc<Mutex<Session>>;

pub fn shared(session: Session) -> SharedSession {
    Arc::new(Mutex::new(session))
}

/// Handle to a scheduled callback. Cancelling (or dropping) the handle
/// aborts the underlying task.
pub struct TimerHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Schedules the memory game's flip-back: after `delay`, the pending
/// mismatched pair turns face-down again - unless the session has been
/// reset in the meantime.
pub fn schedule_flip_back(session: &SharedSession, delay: Duration) -> TimerHandle {
    let epoch = session.lock().epoch();
    let session = Arc::clone(session);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut guard = session.lock();
        if guard.epoch() == epoch {
            guard.flip_back_pending();
        } else {
            tracing::debug!("flip-back timer outlived its round, ignoring");
        }
    });
    TimerHandle { handle }
}

/// Drives tetro's gravity: submits a `Tick` move every `interval` until
/// the round ends or the session is reset.
pub fn run_gravity(session: &SharedSession, interval: Duration) -> TimerHandle {
    let epoch = session.lock().epoch();
    let session = Arc::clone(session);
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately; skip it
        // so the piece hangs for one full interval before falling.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let mut guard = session.lock();
            if guard.epoch() != epoch || guard.status().is_terminal() {
                break;
            }
            guard.attempt_move(MoveWrapper::Tetro(TetroMove::Tick));
        }
    });
    TimerHandle { handle }
}
