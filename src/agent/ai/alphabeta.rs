// Minimax Search with Alpha-Beta Pruning
//
// Classic two-function minimax: `max_value` plays for the searching player,
// `min_value` for the opponent. Every value is expressed from the searching
// player's point of view, including terminal utilities reached inside the
// minimizer.
//
// Alpha-beta pruning keeps a window [alpha, beta]:
// - alpha: best value the maximizer can already guarantee
// - beta: best value the minimizer can already guarantee
// A node whose value falls outside the window cannot change the root decision,
// so its remaining siblings are skipped. The returned values are identical to
// plain minimax; only the number of visited nodes differs.
//
// Actions are searched in the order the board yields them. There is no move
// ordering, transposition table or quiescence extension.

use crate::game_repr::{GameState, PlayerId, Score};
use super::control::{SearchControl, SearchInterrupted};
use super::evaluation::Evaluator;

/// Root decision with its minimax value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision<A> {
    pub action: A,
    pub score: Score,
}

/// Depth-limited alpha-beta searcher for one player
#[derive(Debug, Clone)]
pub struct AlphaBeta<E> {
    player: PlayerId,
    evaluator: E,
    control: SearchControl,
    nodes: u64,
    depth_limited: bool,
}

impl<E> AlphaBeta<E> {
    pub fn new(player: PlayerId, evaluator: E, control: SearchControl) -> Self {
        Self {
            player,
            evaluator,
            control,
            nodes: 0,
            depth_limited: false,
        }
    }

    /// Player whose value is maximized
    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn control(&self) -> &SearchControl {
        &self.control
    }

    /// Nodes visited since construction
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// True if the last root search evaluated any non-terminal leaf with the
    /// heuristic. When false, its result is the exact game value.
    pub fn hit_depth_limit(&self) -> bool {
        self.depth_limited
    }

    /// Best action for the searching player, searched `depth` plies deep.
    ///
    /// `None` only when `state` has no legal actions.
    pub fn decide<S>(&mut self, state: &S, depth: u32) -> Result<Option<S::Action>, SearchInterrupted>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        Ok(self.search_root(state, depth)?.map(|decision| decision.action))
    }

    /// Like [`decide`](Self::decide), also returning the root value.
    ///
    /// Ties keep the first action in board order. If no action improves on
    /// negative infinity (every move loses), the first listed action is
    /// returned with that value.
    pub fn search_root<S>(&mut self, state: &S, depth: u32) -> Result<Option<Decision<S::Action>>, SearchInterrupted>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.control.check()?;
        self.nodes += 1;
        self.depth_limited = false;

        let actions = state.actions();
        let Some(&first) = actions.first() else {
            return Ok(None);
        };

        let mut alpha = Score::NEG_INFINITY;
        let beta = Score::INFINITY;
        let mut best: Option<Decision<S::Action>> = None;

        for &action in &actions {
            let child = state.result(action);
            let value = self.min_value(&child, alpha, beta, depth.saturating_sub(1))?;

            let best_score = best.map_or(Score::NEG_INFINITY, |b| b.score);
            if value > best_score {
                best = Some(Decision { action, score: value });
            }

            // Raise alpha even when the move did not become the new best
            alpha = alpha.max(value);
        }

        Ok(Some(best.unwrap_or(Decision {
            action: first,
            score: Score::NEG_INFINITY,
        })))
    }

    /// Heuristic value of `state` for the searching player
    pub fn heuristic<S>(&self, state: &S) -> Score
    where
        E: Evaluator<S>,
    {
        self.evaluator.evaluate(state, self.player)
    }

    /// Value of a state where the opponent is to move
    fn min_value<S>(&mut self, state: &S, alpha: Score, mut beta: Score, depth: u32) -> Result<Score, SearchInterrupted>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        debug_assert!(alpha <= beta, "alpha-beta window inverted: [{}, {}]", alpha, beta);
        self.control.check()?;
        self.nodes += 1;

        // Terminal check takes precedence over the depth cutoff
        if state.terminal_test() {
            return Ok(state.utility(self.player));
        }
        if depth == 0 {
            self.depth_limited = true;
            return Ok(self.heuristic(state));
        }

        let actions = state.actions();
        if actions.is_empty() {
            // Board reported no moves without being terminal
            self.depth_limited = true;
            return Ok(self.heuristic(state));
        }

        let mut v = Score::INFINITY;
        for &action in &actions {
            let child = state.result(action);
            v = v.min(self.max_value(&child, alpha, beta, depth - 1)?);
            if v <= alpha {
                return Ok(v);
            }
            beta = beta.min(v);
        }

        Ok(v)
    }

    /// Value of a state where the searching player is to move
    fn max_value<S>(&mut self, state: &S, mut alpha: Score, beta: Score, depth: u32) -> Result<Score, SearchInterrupted>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        debug_assert!(alpha <= beta, "alpha-beta window inverted: [{}, {}]", alpha, beta);
        self.control.check()?;
        self.nodes += 1;

        if state.terminal_test() {
            return Ok(state.utility(self.player));
        }
        if depth == 0 {
            self.depth_limited = true;
            return Ok(self.heuristic(state));
        }

        let actions = state.actions();
        if actions.is_empty() {
            self.depth_limited = true;
            return Ok(self.heuristic(state));
        }

        let mut v = Score::NEG_INFINITY;
        for &action in &actions {
            let child = state.result(action);
            v = v.max(self.min_value(&child, alpha, beta, depth - 1)?);
            if v >= beta {
                return Ok(v);
            }
            alpha = alpha.max(v);
        }

        Ok(v)
    }
}
