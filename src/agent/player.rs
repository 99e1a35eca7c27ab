//! Player trait for entities that choose Isolation moves.
//!
//! A player is asked for a move through [`Player::get_action`]. Instead of
//! returning a single move, it reports moves through a [`MovePublisher`] as
//! often as it likes; the host uses whichever move was published last when the
//! turn ends. This lets a search player answer "anytime": a cheap move first,
//! then better ones as deeper searches complete.
//!
//! # Examples
//!
//! ```
//! use isolation_engine::agent::{LatestMove, Player, RandomPlayer};
//! use isolation_engine::agent::ai::SearchControl;
//! use isolation_engine::game_repr::{GameState, Isolation, PlayerId};
//!
//! let state = Isolation::new();
//! let mut player = RandomPlayer::with_seed(PlayerId::First, 7);
//! let mut latest = LatestMove::new();
//!
//! player.get_action(&state, &SearchControl::new(), &mut latest);
//! assert!(state.actions().contains(&latest.get().unwrap()));
//! ```

use std::sync::mpsc::Sender;

use crate::agent::ai::SearchControl;
use crate::game_repr::{GameState, PlayerId};

/// Sink for move recommendations.
///
/// May be written any number of times during one turn; only the latest value
/// matters. Publishing never blocks.
pub trait MovePublisher<A> {
    fn publish(&mut self, action: A);
}

/// Append-only channel; the receiver keeps the last entry
impl<A> MovePublisher<A> for Sender<A> {
    fn publish(&mut self, action: A) {
        // A dropped receiver means the host has stopped listening
        let _ = self.send(action);
    }
}

/// Single-slot, last-write-wins register
#[derive(Debug, Clone, Default)]
pub struct LatestMove<A> {
    slot: Option<A>,
    writes: usize,
}

impl<A: Copy> LatestMove<A> {
    pub fn new() -> Self {
        Self { slot: None, writes: 0 }
    }

    /// Most recently published move
    pub fn get(&self) -> Option<A> {
        self.slot
    }

    /// Number of times a move was published
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl<A> MovePublisher<A> for LatestMove<A> {
    fn publish(&mut self, action: A) {
        self.slot = Some(action);
        self.writes += 1;
    }
}

/// Trait for entities that can provide Isolation moves.
///
/// `Send` is required because hosts run each turn on a worker thread so the
/// turn can be cut off at its deadline.
pub trait Player<S: GameState>: Send {
    /// Choose a move for the player to move in `state`.
    ///
    /// Implementations publish at least one legal move unless `state` has no
    /// legal moves, and should return promptly once `control` says to stop.
    fn get_action(
        &mut self,
        state: &S,
        control: &SearchControl,
        publisher: &mut dyn MovePublisher<S::Action>,
    );

    /// The seat this player occupies
    fn player_id(&self) -> PlayerId;

    /// Display name for logging
    fn name(&self) -> &str {
        "Player"
    }
}
