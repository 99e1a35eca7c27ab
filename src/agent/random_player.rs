//! Baseline player that publishes a uniformly random legal move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::agent::ai::SearchControl;
use crate::agent::player::{MovePublisher, Player};
use crate::game_repr::{GameState, PlayerId};

pub struct RandomPlayer {
    player_id: PlayerId,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible player for tests and tournaments
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        Self {
            player_id,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<S: GameState> Player<S> for RandomPlayer {
    fn get_action(
        &mut self,
        state: &S,
        _control: &SearchControl,
        publisher: &mut dyn MovePublisher<S::Action>,
    ) {
        if let Some(&action) = state.actions().choose(&mut self.rng) {
            publisher.publish(action);
        }
    }

    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "Random"
    }
}
