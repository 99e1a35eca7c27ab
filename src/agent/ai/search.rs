// Iterative Deepening Search Driver
//
// Publishes a random legal move immediately, then runs the alpha-beta engine
// at depths 1, 2, 3, ... and publishes the move of every depth that completes.
// An interrupted depth publishes nothing, so the last published move always
// comes from the deepest completed search.

use std::time::Instant;

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::player::MovePublisher;
use crate::game_repr::{GameState, Score};
use super::alphabeta::AlphaBeta;
use super::control::SearchInterrupted;
use super::evaluation::Evaluator;

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Last published move
    pub best_move: Option<A>,
    /// Root value of the deepest completed depth
    pub score: Score,
    /// Deepest completed depth (0 = only the random fallback was published)
    pub depth: u32,
    pub nodes_searched: u64,
    pub time_ms: u64,
    /// Number of moves handed to the publisher
    pub published: usize,
    /// True when the game tree was searched to the end and deeper
    /// iterations could not change the answer
    pub exhausted: bool,
}

impl<A> SearchResult<A> {
    /// Create a new search result with no move found
    pub fn new() -> Self {
        Self {
            best_move: None,
            score: 0.0,
            depth: 0,
            nodes_searched: 0,
            time_ms: 0,
            published: 0,
            exhausted: false,
        }
    }
}

impl<A> Default for SearchResult<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Perform iterative deepening search, publishing after every completed depth
///
/// # Arguments
/// * `state` - Root position; the engine's player should be the one to move
/// * `engine` - Alpha-beta searcher carrying the cancellation control
/// * `publisher` - Receives the fallback move and each completed depth's move
/// * `rng` - Source for the fallback move
/// * `max_depth` - Optional depth bound; `None` deepens until interrupted
///
/// # Returns
/// SearchResult describing the last published move
pub fn iterative_deepening<S, E, R>(
    state: &S,
    engine: &mut AlphaBeta<E>,
    publisher: &mut dyn MovePublisher<S::Action>,
    rng: &mut R,
    max_depth: Option<u32>,
) -> SearchResult<S::Action>
where
    S: GameState,
    E: Evaluator<S>,
    R: Rng + ?Sized,
{
    let start_time = Instant::now();
    let mut result = SearchResult::new();

    // Publish a legal move right away in case depth 1 never completes
    let actions = state.actions();
    let Some(&fallback) = actions.choose(rng) else {
        debug!("no legal actions at the root, nothing to publish");
        return result;
    };
    publisher.publish(fallback);
    result.best_move = Some(fallback);
    result.published += 1;
    trace!("published fallback move {:?}", fallback);

    let mut depth = 1;
    loop {
        if max_depth.is_some_and(|max| depth > max) {
            break;
        }

        match engine.search_root(state, depth) {
            Ok(Some(decision)) => {
                publisher.publish(decision.action);
                result.best_move = Some(decision.action);
                result.score = decision.score;
                result.depth = depth;
                result.published += 1;
                result.nodes_searched = engine.nodes();
                result.time_ms = start_time.elapsed().as_millis() as u64;
                log_search_info(&result);

                if !engine.hit_depth_limit() {
                    result.exhausted = true;
                    debug!("game tree exhausted at depth {}", depth);
                    break;
                }
            }
            Ok(None) => break,
            Err(SearchInterrupted) => {
                debug!("depth {} interrupted after {} nodes", depth, engine.nodes());
                break;
            }
        }

        depth += 1;
    }

    result.nodes_searched = engine.nodes();
    result.time_ms = start_time.elapsed().as_millis() as u64;
    result
}

/// Log search information for a completed depth
fn log_search_info<A: std::fmt::Debug>(result: &SearchResult<A>) {
    let nps = if result.time_ms > 0 {
        (result.nodes_searched as f64 / result.time_ms as f64 * 1000.0) as u64
    } else {
        result.nodes_searched
    };

    debug!(
        "depth {} score {} nodes {} time {}ms nps {} move {:?}",
        result.depth, result.score, result.nodes_searched, result.time_ms, nps, result.best_move
    );
}
