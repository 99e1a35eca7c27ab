//! Anytime game-playing engine for knight's Isolation.
//!
//! - [`game_repr`]: the 11x9 bitboard, actions and the [`GameState`](game_repr::GameState) contract
//! - [`agent`]: players, including the iterative-deepening alpha-beta searcher
//! - [`orchestrator`]: time-limited games and tournaments between players

pub mod agent;
pub mod game_repr;
pub mod orchestrator;

pub use agent::{AlphaBetaPlayer, Difficulty, Player, SearchConfig};
pub use game_repr::{Action, GameState, Isolation, PlayerId};
pub use orchestrator::{play_game, play_tournament, GameRecord, MatchConfig, Status};
