use std::fmt;

use smallvec::SmallVec;

use super::actions::{Action, Cell, Jump};
use super::error::GameError;
use super::player::PlayerId;
use super::state::{BoardView, GameState, Score};
use super::tables::{bit_is_set, pop_lsb, BLANK_BOARD, HEIGHT, ROW_STRIDE, WIDTH};

/// Knight's Isolation position
///
/// `board` holds one bit per cell of the padded grid, set while the cell is
/// open. A cell is blocked the moment a player lands on it and stays blocked
/// after they leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Isolation {
    board: u128,
    ply_count: u32,
    locs: [Option<Cell>; 2],
}

impl Default for Isolation {
    fn default() -> Self {
        Self::new()
    }
}

impl Isolation {
    /// Empty board, nobody placed, first player to move
    pub fn new() -> Self {
        Self {
            board: BLANK_BOARD,
            ply_count: 0,
            locs: [None, None],
        }
    }

    /// Empty board with the given cells blocked before play starts
    pub fn with_blocked<I>(cells: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut state = Self::new();
        for cell in cells {
            if BLANK_BOARD & cell_bit(cell) == 0 {
                return Err(GameError::CellOutOfRange { cell });
            }
            if state.board & cell_bit(cell) == 0 {
                return Err(GameError::CellBlocked { cell });
            }
            state.board &= !cell_bit(cell);
        }
        Ok(state)
    }

    /// Build an arbitrary position, checking that it is self-consistent
    pub fn from_parts(board: u128, ply_count: u32, locs: [Option<Cell>; 2]) -> Result<Self, GameError> {
        let stray = board & !BLANK_BOARD;
        if stray != 0 {
            return Err(GameError::CellOutOfRange {
                cell: stray.trailing_zeros() as Cell,
            });
        }

        for player in PlayerId::BOTH {
            if let Some(cell) = locs[player.index()] {
                if BLANK_BOARD & cell_bit(cell) == 0 {
                    return Err(GameError::CellOutOfRange { cell });
                }
                if board & cell_bit(cell) != 0 {
                    return Err(GameError::OccupiedCellOpen { player, cell });
                }
            }
        }

        if let [Some(a), Some(b)] = locs {
            if a == b {
                return Err(GameError::SharedCell { cell: a });
            }
        }

        Ok(Self { board, ply_count, locs })
    }

    /// Cell index of playable coordinates, `None` off the board
    pub fn cell(x: usize, y: usize) -> Option<Cell> {
        (x < WIDTH && y < HEIGHT).then_some(x + y * ROW_STRIDE)
    }

    /// Playable coordinates of a cell index
    pub fn coords(cell: Cell) -> (usize, usize) {
        (cell % ROW_STRIDE, cell / ROW_STRIDE)
    }

    pub fn board(&self) -> u128 {
        self.board
    }

    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    pub fn locs(&self) -> [Option<Cell>; 2] {
        self.locs
    }

    /// Returns true if `idx` is an open cell. Out-of-range indices are never open.
    pub fn is_open(&self, idx: isize) -> bool {
        bit_is_set(self.board, idx)
    }

    /// Cells reachable by a knight jump from `loc`, or every open cell when
    /// the player has not been placed yet
    pub fn liberties(&self, loc: Option<Cell>) -> SmallVec<[Cell; 8]> {
        match loc {
            None => self.open_cells_iter().collect(),
            Some(loc) => Jump::ALL
                .iter()
                .map(|jump| loc as isize + jump.delta())
                .filter(|&target| self.is_open(target))
                .map(|target| target as Cell)
                .collect(),
        }
    }

    fn has_liberties(&self, player: PlayerId) -> bool {
        match self.locs[player.index()] {
            None => self.board != 0,
            Some(loc) => Jump::ALL
                .iter()
                .any(|jump| self.is_open(loc as isize + jump.delta())),
        }
    }

    fn open_cells_iter(&self) -> impl Iterator<Item = Cell> {
        let mut bits = self.board;
        std::iter::from_fn(move || (bits != 0).then(|| pop_lsb(&mut bits)))
    }

    /// Apply `action` for the player to move, rejecting anything illegal
    pub fn try_result(&self, action: Action) -> Result<Self, GameError> {
        if self.terminal_test() {
            return Err(GameError::GameOver);
        }

        let player = self.player();
        let target = match (action, self.locs[player.index()]) {
            (Action::Place(cell), None) => cell as isize,
            (Action::Jump(jump), Some(loc)) => loc as isize + jump.delta(),
            _ => return Err(GameError::IllegalAction { action, player }),
        };

        if !self.is_open(target) {
            return Err(GameError::IllegalAction { action, player });
        }

        let target = target as Cell;
        let mut locs = self.locs;
        locs[player.index()] = Some(target);

        Ok(Self {
            board: self.board & !cell_bit(target),
            ply_count: self.ply_count + 1,
            locs,
        })
    }
}

#[inline]
fn cell_bit(cell: Cell) -> u128 {
    1u128.checked_shl(cell as u32).unwrap_or(0)
}

impl GameState for Isolation {
    type Action = Action;

    fn actions(&self) -> SmallVec<[Action; 8]> {
        match self.locs[self.player().index()] {
            None => self.open_cells_iter().map(Action::Place).collect(),
            Some(loc) => Jump::ALL
                .iter()
                .filter(|jump| self.is_open(loc as isize + jump.delta()))
                .map(|&jump| Action::Jump(jump))
                .collect(),
        }
    }

    /// # Panics
    ///
    /// Panics if `action` is not one of `self.actions()`.
    fn result(&self, action: Action) -> Self {
        match self.try_result(action) {
            Ok(next) => next,
            Err(err) => panic!("Isolation::result called with an illegal action: {}", err),
        }
    }

    fn terminal_test(&self) -> bool {
        !self.has_liberties(self.player())
    }

    fn utility(&self, player: PlayerId) -> Score {
        if !self.terminal_test() {
            return 0.0;
        }

        // The player to move is the one who is stuck
        if player == self.player() {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        }
    }

    fn player(&self) -> PlayerId {
        PlayerId::to_move(self.ply_count)
    }
}

impl BoardView for Isolation {
    fn open_cells(&self) -> u128 {
        self.board
    }

    fn location(&self, player: PlayerId) -> Option<Cell> {
        self.locs[player.index()]
    }
}

impl fmt::Display for Isolation {
    /// Grid view with the north edge on top: `1`/`2` players, `.` open, `#` blocked
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..HEIGHT).rev() {
            // Offsets grow westward, so the highest column is drawn first
            let row: Vec<&str> = (0..WIDTH)
                .rev()
                .map(|x| {
                    let cell = x + y * ROW_STRIDE;
                    if self.locs[0] == Some(cell) {
                        "1"
                    } else if self.locs[1] == Some(cell) {
                        "2"
                    } else if self.is_open(cell as isize) {
                        "."
                    } else {
                        "#"
                    }
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
