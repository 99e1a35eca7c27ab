// Position evaluation for non-terminal leaves
// Returns a mobility advantage (positive = good for the evaluating player)

use crate::game_repr::tables::{bit_is_set, FIVE_BY_FIVE, THREE_BY_THREE};
use crate::game_repr::{BoardView, GameState, Isolation, PlayerId, Score};

/// Static evaluation of a state from one player's point of view
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S, player: PlayerId) -> Score;
}

/// Square of cells scanned around a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// 8 adjacent cells
    ThreeByThree,
    /// 24 cells within two steps
    #[default]
    FiveByFive,
}

impl Neighborhood {
    /// Precomputed offsets on the padded grid
    pub fn offsets(self) -> &'static [isize] {
        match self {
            Neighborhood::ThreeByThree => &THREE_BY_THREE,
            Neighborhood::FiveByFive => &FIVE_BY_FIVE,
        }
    }

    pub fn size(self) -> u32 {
        self.offsets().len() as u32
    }
}

/// Open-cell count around each player, mine minus my opponent's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalMobility {
    neighborhood: Neighborhood,
}

impl LocalMobility {
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self { neighborhood }
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Open cells in the neighborhood of `player`.
    ///
    /// An unplaced player is unconstrained and gets the full neighborhood size.
    /// Cell 0 and anything off the bitboard never count.
    pub fn mobility<S: BoardView>(&self, state: &S, player: PlayerId) -> u32 {
        let Some(loc) = state.location(player) else {
            return self.neighborhood.size();
        };

        let board = state.open_cells();
        self.neighborhood
            .offsets()
            .iter()
            .map(|&offset| loc as isize + offset)
            .filter(|&idx| idx > 0 && bit_is_set(board, idx))
            .count() as u32
    }
}

impl<S: BoardView> Evaluator<S> for LocalMobility {
    fn evaluate(&self, state: &S, player: PlayerId) -> Score {
        let mine = self.mobility(state, player);
        let theirs = self.mobility(state, player.opponent());
        Score::from(mine) - Score::from(theirs)
    }
}

/// Difference in the number of knight jumps available to each player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnightMobility;

impl KnightMobility {
    pub fn mobility(state: &Isolation, player: PlayerId) -> u32 {
        state.liberties(state.location(player)).len() as u32
    }
}

impl Evaluator<Isolation> for KnightMobility {
    fn evaluate(&self, state: &Isolation, player: PlayerId) -> Score {
        let mine = Self::mobility(state, player);
        let theirs = Self::mobility(state, player.opponent());
        Score::from(mine) - Score::from(theirs)
    }
}

/// Terminal states score their utility, everything else the evaluator's value
pub fn evaluate_leaf<S, E>(state: &S, player: PlayerId, evaluator: &E) -> Score
where
    S: GameState,
    E: Evaluator<S>,
{
    if state.terminal_test() {
        state.utility(player)
    } else {
        evaluator.evaluate(state, player)
    }
}
