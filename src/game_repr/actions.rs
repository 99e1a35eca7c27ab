use std::fmt;

use super::tables::{E, N, ROW_STRIDE, S, W};

/// Linear index of a cell on the padded grid
pub type Cell = usize;

/// One of the eight knight jumps, named by its long leg first
/// (NNE = two rows north, one column east).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jump {
    NNE,
    ENE,
    ESE,
    SSE,
    SSW,
    WSW,
    WNW,
    NNW,
}

impl Jump {
    pub const ALL: [Jump; 8] = [
        Jump::NNE,
        Jump::ENE,
        Jump::ESE,
        Jump::SSE,
        Jump::SSW,
        Jump::WSW,
        Jump::WNW,
        Jump::NNW,
    ];

    /// Signed cell-index delta of this jump on the padded grid
    pub const fn delta(self) -> isize {
        match self {
            Jump::NNE => N + N + E,
            Jump::ENE => E + N + E,
            Jump::ESE => E + S + E,
            Jump::SSE => S + S + E,
            Jump::SSW => S + S + W,
            Jump::WSW => W + S + W,
            Jump::WNW => W + N + W,
            Jump::NNW => N + N + W,
        }
    }
}

/// A move in knight's Isolation.
///
/// Each player's first action places them on any open cell; every later action
/// is a knight jump relative to their current cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Place(Cell),
    Jump(Jump),
}

impl Action {
    /// Cell-index delta for jumps; placements are absolute
    pub fn delta(self) -> Option<isize> {
        match self {
            Action::Place(_) => None,
            Action::Jump(jump) => Some(jump.delta()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(cell) => write!(f, "place({}, {})", cell % ROW_STRIDE, cell / ROW_STRIDE),
            Action::Jump(jump) => write!(f, "{:?}", jump),
        }
    }
}
