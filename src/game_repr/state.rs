// Capabilities the search consumes from a board model.
//
// The engine only needs the game-rule half (`GameState`); the mobility
// heuristics additionally read the raw bitboard through `BoardView`.

use std::fmt;

use smallvec::SmallVec;

use super::actions::Cell;
use super::player::PlayerId;

/// Search value. Terminal utilities may be infinite.
pub type Score = f64;

/// Immutable two-player, zero-sum game state
pub trait GameState: Clone {
    type Action: Copy + PartialEq + fmt::Debug;

    /// Legal actions for the player to move, in a fixed order.
    /// Empty only in terminal states.
    fn actions(&self) -> SmallVec<[Self::Action; 8]>;

    /// Successor state after the player to move plays `action`
    fn result(&self, action: Self::Action) -> Self;

    fn terminal_test(&self) -> bool;

    /// Final value from `player`'s point of view; positive favors `player`.
    /// Zero for non-terminal states.
    fn utility(&self, player: PlayerId) -> Score;

    /// Player to move
    fn player(&self) -> PlayerId;
}

/// Read-only access to the bit-packed board
pub trait BoardView {
    /// Bit `i` is set iff cell `i` is open
    fn open_cells(&self) -> u128;

    /// Current cell of `player`, `None` before their placement
    fn location(&self, player: PlayerId) -> Option<Cell>;
}
