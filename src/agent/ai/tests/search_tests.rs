// Tests for the alpha-beta engine and the iterative deepening driver

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{inner, init_logging, leaf, terminal, TreeHeuristic, TreeNode, TreeState};
use crate::agent::ai::{iterative_deepening, AlphaBeta, Evaluator, LocalMobility, SearchControl, SearchInterrupted};
use crate::agent::player::{LatestMove, MovePublisher};
use crate::game_repr::tables::BLANK_BOARD;
use crate::game_repr::{Action, Cell, GameState, Isolation, Jump, PlayerId, Score};

// ==================== HELPER FUNCTIONS ====================

fn at(x: usize, y: usize) -> Cell {
    Isolation::cell(x, y).unwrap()
}

fn engine_for(player: PlayerId) -> AlphaBeta<LocalMobility> {
    AlphaBeta::new(player, LocalMobility::default(), SearchControl::new())
}

/// Both players placed near the centre, nothing else blocked
fn open_position() -> Isolation {
    Isolation::new()
        .result(Action::Place(at(5, 4)))
        .result(Action::Place(at(3, 3)))
}

/// Non-terminal position after a random opening and up to `plies` random moves
fn random_position(seed: u64, plies: usize) -> Isolation {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = Isolation::new();
    for _ in 0..plies + 2 {
        let candidates: Vec<Isolation> = state
            .actions()
            .iter()
            .map(|&a| state.result(a))
            .filter(|next| !next.terminal_test())
            .collect();
        match candidates.choose(&mut rng) {
            Some(next) => state = *next,
            None => break,
        }
    }
    state
}

/// Exhaustive minimax without pruning, same leaf rules as the engine
fn minimax<S, E>(state: &S, depth: u32, player: PlayerId, evaluator: &E, maximizing: bool) -> Score
where
    S: GameState,
    E: Evaluator<S>,
{
    if state.terminal_test() {
        return state.utility(player);
    }
    let actions = state.actions();
    if depth == 0 || actions.is_empty() {
        return evaluator.evaluate(state, player);
    }

    let values = actions
        .iter()
        .map(|&a| minimax(&state.result(a), depth - 1, player, evaluator, !maximizing));
    if maximizing {
        values.fold(Score::NEG_INFINITY, Score::max)
    } else {
        values.fold(Score::INFINITY, Score::min)
    }
}

/// Root decision of exhaustive minimax: first action with the highest value
fn minimax_root<S, E>(state: &S, depth: u32, player: PlayerId, evaluator: &E) -> (S::Action, Score)
where
    S: GameState,
    E: Evaluator<S>,
{
    let mut best: Option<(S::Action, Score)> = None;
    for &action in state.actions().iter() {
        let value = minimax(&state.result(action), depth.saturating_sub(1), player, evaluator, false);
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((action, value));
        }
    }
    best.unwrap()
}

/// Publisher that raises the stop flag once it has seen `limit` moves
struct StopAfter {
    control: SearchControl,
    limit: usize,
    published: Vec<Action>,
}

impl MovePublisher<Action> for StopAfter {
    fn publish(&mut self, action: Action) {
        self.published.push(action);
        if self.published.len() >= self.limit {
            self.control.stop();
        }
    }
}

// ==================== ENGINE TESTS ====================

#[test]
fn test_decide_is_deterministic() {
    let state = open_position();
    let first = engine_for(state.player()).decide(&state, 4).unwrap();
    let second = engine_for(state.player()).decide(&state, 4).unwrap();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_pruning_matches_exhaustive_minimax() {
    let evaluator = LocalMobility::default();

    for seed in 0..6 {
        let state = random_position(seed, 6);
        let player = state.player();

        for depth in 1..=4 {
            let decision = engine_for(player).search_root(&state, depth).unwrap().unwrap();
            let (action, value) = minimax_root(&state, depth, player, &evaluator);

            assert_eq!(decision.score, value, "seed {} depth {}", seed, depth);
            assert_eq!(decision.action, action, "seed {} depth {}", seed, depth);
        }
    }
}

#[test]
fn test_pruning_skips_refuted_sibling() {
    // Root (max) -> 1, 2 (min). Node 1 = min(5, 6) = 5.
    // Node 2's first child scores 4 <= alpha, so node 6 is never visited.
    let state = TreeState::new(vec![
        inner(&[1, 2], 0.0),
        inner(&[3, 4], 0.0),
        inner(&[5, 6], 0.0),
        leaf(5.0),
        leaf(6.0),
        leaf(4.0),
        leaf(9.0),
    ]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());

    let decision = engine.search_root(&state, 2).unwrap().unwrap();

    assert_eq!(decision.action, 1);
    assert_eq!(decision.score, 5.0);
    assert_eq!(engine.nodes(), 6);
    assert_eq!(minimax_root(&state, 2, PlayerId::First, &TreeHeuristic), (1, 5.0));
}

#[test]
fn test_node_count_grows_with_depth() {
    let state = open_position();
    let mut previous = 0;

    for depth in 1..=3 {
        let mut engine = engine_for(state.player());
        engine.decide(&state, depth).unwrap();
        assert!(
            engine.nodes() >= previous,
            "depth {} visited {} nodes, fewer than {}",
            depth,
            engine.nodes(),
            previous
        );
        previous = engine.nodes();
    }
}

#[test]
fn test_exact_tie_keeps_first_action() {
    let state = TreeState::new(vec![inner(&[1, 2], 0.0), leaf(3.0), leaf(3.0)]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());
    assert_eq!(engine.decide(&state, 1), Ok(Some(1)));

    let reversed = TreeState::new(vec![inner(&[2, 1], 0.0), leaf(3.0), leaf(3.0)]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());
    assert_eq!(engine.decide(&reversed, 1), Ok(Some(2)));
}

#[test]
fn test_later_strict_improvement_replaces_best() {
    let state = TreeState::new(vec![inner(&[1, 2, 3], 0.0), leaf(3.0), leaf(4.0), leaf(4.0)]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());
    assert_eq!(engine.decide(&state, 1), Ok(Some(2)));
}

#[test]
fn test_all_losing_moves_fall_back_to_first() {
    let state = TreeState::new(vec![
        inner(&[2, 1], 0.0),
        terminal(Score::NEG_INFINITY),
        terminal(Score::NEG_INFINITY),
    ]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());

    let decision = engine.search_root(&state, 3).unwrap().unwrap();
    assert_eq!(decision.action, 2);
    assert_eq!(decision.score, Score::NEG_INFINITY);
}

#[test]
fn test_terminal_utility_precedes_depth_cutoff() {
    // The child is terminal and also sits at the depth cutoff
    let state = TreeState::new(vec![
        inner(&[1, 2], 0.0),
        TreeNode { heuristic: 99.0, ..terminal(1.0) },
        leaf(0.5),
    ]);

    for depth in [0, 1] {
        let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());
        let decision = engine.search_root(&state, depth).unwrap().unwrap();
        assert_eq!(decision.action, 1);
        assert_eq!(decision.score, 1.0);
    }
}

#[test]
fn test_utility_is_from_searching_players_view_in_minimizer() {
    // Second player searches; the terminal favors the first player
    let state = TreeState::new(vec![
        inner(&[1], 0.0),
        inner(&[2, 3], 0.0),
        leaf(0.0),
        terminal(1.0),
    ]);
    // Root is the second player's turn in this scenario
    let state = TreeState { ply: 1, ..state };
    let mut engine = AlphaBeta::new(PlayerId::Second, TreeHeuristic, SearchControl::new());

    let decision = engine.search_root(&state, 2).unwrap().unwrap();
    // Opponent (first player) picks the terminal worth -1 to us
    assert_eq!(decision.score, -1.0);
}

#[test]
fn test_childless_nonterminal_scored_by_heuristic() {
    let state = TreeState::new(vec![inner(&[1], 0.0), leaf(7.0)]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());

    let decision = engine.search_root(&state, 5).unwrap().unwrap();
    assert_eq!(decision.score, 7.0);
    assert!(engine.hit_depth_limit());
}

#[test]
fn test_no_actions_yields_none() {
    let state = TreeState::new(vec![terminal(1.0)]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());
    assert_eq!(engine.decide(&state, 3), Ok(None));
}

#[test]
fn test_only_move_wins_immediately() {
    // First player at (0, 0): (2, 1) blocked, so the only jump is NNW to (1, 2).
    // Second player at (2, 0): every escape except (1, 2) blocked.
    let blocked = [at(0, 0), at(2, 0), at(2, 1), at(0, 1), at(3, 2), at(4, 1)];
    let board = blocked.iter().fold(BLANK_BOARD, |b, &c| b & !(1u128 << c));
    let state = Isolation::from_parts(board, 2, [Some(at(0, 0)), Some(at(2, 0))]).unwrap();

    assert_eq!(state.actions().as_slice(), &[Action::Jump(Jump::NNW)]);

    for depth in 1..=3 {
        let decision = engine_for(PlayerId::First).search_root(&state, depth).unwrap().unwrap();
        assert_eq!(decision.action, Action::Jump(Jump::NNW));
        assert_eq!(decision.score, state.result(decision.action).utility(PlayerId::First));
        assert_eq!(decision.score, Score::INFINITY);
    }
}

#[test]
fn test_search_is_abandoned_when_stopped() {
    let control = SearchControl::new();
    control.stop();
    let mut engine = AlphaBeta::new(PlayerId::First, LocalMobility::default(), control);
    assert_eq!(engine.search_root(&random_position(1, 2), 3), Err(SearchInterrupted));
}

// ==================== ITERATIVE DEEPENING TESTS ====================

#[test]
fn test_interrupt_after_depth_two_keeps_depth_two_move() {
    init_logging();
    let state = open_position();
    let control = SearchControl::new();
    let mut engine = AlphaBeta::new(state.player(), LocalMobility::default(), control.clone());
    let mut publisher = StopAfter { control, limit: 3, published: Vec::new() };
    let mut rng = StdRng::seed_from_u64(8);

    let result = iterative_deepening(&state, &mut engine, &mut publisher, &mut rng, None);

    // Fallback, depth 1, depth 2; depth 3 never publishes
    assert_eq!(publisher.published.len(), 3);
    assert_eq!(result.depth, 2);
    let depth_two = engine_for(state.player()).decide(&state, 2).unwrap();
    assert_eq!(publisher.published.last().copied(), depth_two);
    assert_eq!(result.best_move, depth_two);
}

#[test]
fn test_published_moves_follow_depth_order() {
    let state = open_position();
    let mut engine = engine_for(state.player());
    let mut publisher = StopAfter { control: SearchControl::new(), limit: usize::MAX, published: Vec::new() };
    let mut rng = StdRng::seed_from_u64(1);

    iterative_deepening(&state, &mut engine, &mut publisher, &mut rng, Some(4));

    assert_eq!(publisher.published.len(), 5);
    for depth in 1..=4u32 {
        let expected = engine_for(state.player()).decide(&state, depth).unwrap();
        assert_eq!(Some(publisher.published[depth as usize]), expected, "depth {}", depth);
    }
}

#[test]
fn test_external_stop_leaves_completed_depth_published() {
    init_logging();
    let state = open_position();
    let control = SearchControl::new();
    let mut engine = AlphaBeta::new(state.player(), LocalMobility::default(), control.clone());
    let mut latest = LatestMove::new();
    let mut rng = StdRng::seed_from_u64(2);

    let stopper = {
        let control = control.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            control.stop();
        })
    };
    let result = iterative_deepening(&state, &mut engine, &mut latest, &mut rng, None);
    stopper.join().unwrap();

    let last = latest.get().unwrap();
    assert!(state.actions().contains(&last));
    if result.depth > 0 {
        let completed = engine_for(state.player()).decide(&state, result.depth).unwrap();
        assert_eq!(Some(last), completed);
    }
}

#[test]
fn test_exhausted_tree_stops_deepening() {
    let state = TreeState::new(vec![inner(&[1, 2], 0.0), terminal(-1.0), terminal(1.0)]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());
    let mut latest = LatestMove::new();
    let mut rng = StdRng::seed_from_u64(0);

    let result = iterative_deepening(&state, &mut engine, &mut latest, &mut rng, None);

    assert!(result.exhausted);
    assert_eq!(result.depth, 1);
    assert_eq!(latest.get(), Some(2));
    assert_eq!(result.score, 1.0);
}

#[test]
fn test_no_legal_moves_publishes_nothing() {
    let state = TreeState::new(vec![terminal(1.0)]);
    let mut engine = AlphaBeta::new(PlayerId::First, TreeHeuristic, SearchControl::new());
    let mut latest = LatestMove::new();
    let mut rng = StdRng::seed_from_u64(0);

    let result = iterative_deepening(&state, &mut engine, &mut latest, &mut rng, None);

    assert_eq!(latest.writes(), 0);
    assert_eq!(result.best_move, None);
    assert_eq!(result.depth, 0);
}
