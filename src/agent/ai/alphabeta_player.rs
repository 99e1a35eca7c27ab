//! AlphaBetaPlayer - anytime Isolation player using iterative-deepening alpha-beta
//!
//! The player publishes a random legal move first, then the result of every
//! completed search depth until its deadline passes or the configured depth
//! bound is reached.
//!
//! # Difficulty Levels
//!
//! - **Easy**: Depth 2, no time limit
//! - **Medium**: Depth 4, no time limit
//! - **Hard**: Depth 6, no time limit
//! - **Expert**: Unbounded depth, 150ms per move
//!
//! # Examples
//!
//! ```
//! use isolation_engine::agent::ai::{AlphaBetaPlayer, Difficulty, SearchControl};
//! use isolation_engine::agent::{LatestMove, Player};
//! use isolation_engine::game_repr::{Action, GameState, Isolation, PlayerId};
//!
//! let state = Isolation::new()
//!     .result(Action::Place(Isolation::cell(5, 4).unwrap()))
//!     .result(Action::Place(Isolation::cell(2, 2).unwrap()));
//!
//! let mut ai = AlphaBetaPlayer::with_difficulty(PlayerId::First, Difficulty::Easy);
//! let mut latest = LatestMove::new();
//! ai.get_action(&state, &SearchControl::new(), &mut latest);
//!
//! assert!(state.actions().contains(&latest.get().unwrap()));
//! ```

use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agent::player::{MovePublisher, Player};
use crate::game_repr::{GameState, PlayerId};
use super::alphabeta::AlphaBeta;
use super::control::SearchControl;
use super::evaluation::{Evaluator, LocalMobility, Neighborhood};
use super::search::iterative_deepening;

/// Search parameters for an [`AlphaBetaPlayer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Own per-move limit, applied on top of any host deadline
    pub time_limit: Option<Duration>,
    /// Deepest iteration to run; `None` deepens until stopped
    pub max_depth: Option<u32>,
    /// Seed for the fallback move; `None` draws from entropy
    pub seed: Option<u64>,
    /// Neighborhood scanned by the mobility heuristic
    pub neighborhood: Neighborhood,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Difficulty::Expert.config()
    }
}

/// AI difficulty levels that map to search depth and time controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Get the maximum search depth for this difficulty level
    pub fn max_depth(&self) -> Option<u32> {
        match self {
            Difficulty::Easy => Some(2),
            Difficulty::Medium => Some(4),
            Difficulty::Hard => Some(6),
            Difficulty::Expert => None,
        }
    }

    /// Get the time limit for this difficulty level
    pub fn time_limit(&self) -> Option<Duration> {
        match self {
            Difficulty::Expert => Some(Duration::from_millis(150)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            time_limit: self.time_limit(),
            max_depth: self.max_depth(),
            seed: None,
            neighborhood: Neighborhood::FiveByFive,
        }
    }
}

/// Player that runs iterative-deepening alpha-beta every turn
pub struct AlphaBetaPlayer<E = LocalMobility> {
    player_id: PlayerId,
    config: SearchConfig,
    evaluator: E,
    rng: StdRng,
    name: String,
    last_depth: u32,
    last_nodes: u64,
}

impl AlphaBetaPlayer<LocalMobility> {
    /// Player with the local-mobility heuristic over `config.neighborhood`
    pub fn new(player_id: PlayerId, config: SearchConfig) -> Self {
        let evaluator = LocalMobility::new(config.neighborhood);
        Self::with_evaluator(player_id, config, evaluator)
    }

    pub fn with_difficulty(player_id: PlayerId, difficulty: Difficulty) -> Self {
        let mut player = Self::new(player_id, difficulty.config());
        player.name = format!("AlphaBeta ({})", difficulty.name());
        player
    }
}

impl<E> AlphaBetaPlayer<E> {
    pub fn with_evaluator(player_id: PlayerId, config: SearchConfig, evaluator: E) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            player_id,
            config,
            evaluator,
            rng,
            name: "AlphaBeta".to_string(),
            last_depth: 0,
            last_nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Deepest completed depth of the previous turn
    pub fn last_depth(&self) -> u32 {
        self.last_depth
    }

    /// Nodes visited during the previous turn
    pub fn last_nodes(&self) -> u64 {
        self.last_nodes
    }
}

impl<S, E> Player<S> for AlphaBetaPlayer<E>
where
    S: GameState,
    E: Evaluator<S> + Clone + Send,
{
    fn get_action(
        &mut self,
        state: &S,
        control: &SearchControl,
        publisher: &mut dyn MovePublisher<S::Action>,
    ) {
        let control = control.tightened(self.config.time_limit);
        let mut engine = AlphaBeta::new(self.player_id, self.evaluator.clone(), control);

        let result = iterative_deepening(state, &mut engine, publisher, &mut self.rng, self.config.max_depth);

        self.last_depth = result.depth;
        self.last_nodes = result.nodes_searched;
        debug!(
            "[{}] {} reached depth {} ({} nodes, {}ms), playing {:?}",
            self.name, self.player_id, result.depth, result.nodes_searched, result.time_ms, result.best_move
        );
    }

    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
