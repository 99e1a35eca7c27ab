//! One-ply player: plays the move whose resulting position evaluates best.
//!
//! Terminal positions score their utility, so an immediately winning move is
//! always taken and an immediately losing one avoided when possible.

use crate::agent::ai::{evaluate_leaf, Evaluator, KnightMobility, SearchControl};
use crate::agent::player::{MovePublisher, Player};
use crate::game_repr::{GameState, PlayerId, Score};

pub struct GreedyPlayer<E = KnightMobility> {
    player_id: PlayerId,
    evaluator: E,
}

impl GreedyPlayer<KnightMobility> {
    pub fn new(player_id: PlayerId) -> Self {
        Self::with_evaluator(player_id, KnightMobility)
    }
}

impl<E> GreedyPlayer<E> {
    pub fn with_evaluator(player_id: PlayerId, evaluator: E) -> Self {
        Self { player_id, evaluator }
    }
}

impl<S, E> Player<S> for GreedyPlayer<E>
where
    S: GameState,
    E: Evaluator<S> + Send,
{
    fn get_action(
        &mut self,
        state: &S,
        _control: &SearchControl,
        publisher: &mut dyn MovePublisher<S::Action>,
    ) {
        let mut best: Option<(S::Action, Score)> = None;

        for action in state.actions() {
            let score = evaluate_leaf(&state.result(action), self.player_id, &self.evaluator);
            // First of equally scored moves wins
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((action, score));
            }
        }

        if let Some((action, _)) = best {
            publisher.publish(action);
        }
    }

    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}
