// AI Agent - Minimax with Alpha-Beta Pruning
//
// This module implements an anytime Isolation AI: iterative deepening over a
// depth-limited alpha-beta minimax, scored at the horizon by a local-mobility
// heuristic.
//
// Key features:
// - Deterministic for a fixed position and depth (only the fallback move is random)
// - Cooperative cancellation: deadline and stop flag checked on every node
// - The last published move always comes from the deepest completed depth

mod alphabeta;
mod alphabeta_player;
mod control;
mod evaluation;
mod search;

#[cfg(test)]
mod tests;

pub use alphabeta::{AlphaBeta, Decision};
pub use alphabeta_player::{AlphaBetaPlayer, Difficulty, SearchConfig};
pub use control::{SearchControl, SearchInterrupted};
pub use evaluation::{evaluate_leaf, Evaluator, KnightMobility, LocalMobility, Neighborhood};
pub use search::{iterative_deepening, SearchResult};
