use thiserror::Error;

use super::actions::{Action, Cell};
use super::player::PlayerId;

/// Errors raised when building or advancing an Isolation board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cell {cell} is outside the playable board")]
    CellOutOfRange { cell: Cell },

    #[error("cell {cell} is already blocked")]
    CellBlocked { cell: Cell },

    #[error("{player} stands on cell {cell}, which is marked open")]
    OccupiedCellOpen { player: PlayerId, cell: Cell },

    #[error("both players stand on cell {cell}")]
    SharedCell { cell: Cell },

    #[error("action {action} is not legal for {player}")]
    IllegalAction { action: Action, player: PlayerId },

    #[error("game already over")]
    GameOver,
}
