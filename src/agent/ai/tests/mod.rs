// Test suites for the search engine and its heuristics

mod search_tests;

use std::sync::Arc;

use smallvec::SmallVec;

use crate::agent::ai::Evaluator;
use crate::game_repr::{GameState, PlayerId, Score};

/// Node of a hand-built game tree. Values are from the first player's view.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub children: Vec<usize>,
    pub utility: Option<Score>,
    pub heuristic: Score,
}

/// Leaf that is not terminal; only the heuristic can score it
pub fn leaf(heuristic: Score) -> TreeNode {
    TreeNode { children: Vec::new(), utility: None, heuristic }
}

/// Finished game with a fixed utility
pub fn terminal(utility: Score) -> TreeNode {
    TreeNode { children: Vec::new(), utility: Some(utility), heuristic: 0.0 }
}

pub fn inner(children: &[usize], heuristic: Score) -> TreeNode {
    TreeNode { children: children.to_vec(), utility: None, heuristic }
}

/// Game played on an explicit tree; actions are child node indices
#[derive(Debug, Clone)]
pub struct TreeState {
    nodes: Arc<Vec<TreeNode>>,
    node: usize,
    ply: u32,
}

impl TreeState {
    /// Root is node 0, first player to move
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes: Arc::new(nodes), node: 0, ply: 0 }
    }

    fn current(&self) -> &TreeNode {
        &self.nodes[self.node]
    }
}

impl GameState for TreeState {
    type Action = usize;

    fn actions(&self) -> SmallVec<[usize; 8]> {
        if self.terminal_test() {
            return SmallVec::new();
        }
        self.current().children.iter().copied().collect()
    }

    fn result(&self, action: usize) -> Self {
        Self { nodes: Arc::clone(&self.nodes), node: action, ply: self.ply + 1 }
    }

    fn terminal_test(&self) -> bool {
        self.current().utility.is_some()
    }

    fn utility(&self, player: PlayerId) -> Score {
        match (self.current().utility, player) {
            (None, _) => 0.0,
            (Some(u), PlayerId::First) => u,
            (Some(u), PlayerId::Second) => -u,
        }
    }

    fn player(&self) -> PlayerId {
        PlayerId::to_move(self.ply)
    }
}

/// Reads the stored heuristic of the current node
#[derive(Debug, Clone, Copy)]
pub struct TreeHeuristic;

impl Evaluator<TreeState> for TreeHeuristic {
    fn evaluate(&self, state: &TreeState, player: PlayerId) -> Score {
        match player {
            PlayerId::First => state.current().heuristic,
            PlayerId::Second => -state.current().heuristic,
        }
    }
}

/// Install a test logger so `RUST_LOG=debug` shows search output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
