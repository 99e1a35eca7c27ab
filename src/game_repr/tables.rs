//! Board geometry and precomputed offset tables.
//!
//! Cells are numbered row-major on a grid padded with two always-blocked
//! columns per row, so that horizontal offsets of up to two cells can never
//! wrap from one row into the next. Cell `(x, y)` has index `x + ROW_STRIDE * y`.

/// Playable columns per row
pub const WIDTH: usize = 11;

/// Playable rows
pub const HEIGHT: usize = 9;

/// Distance between vertically adjacent cells (row length plus two padding columns)
pub const ROW_STRIDE: usize = WIDTH + 2;

/// Number of bits in use; the padding of the last row is never stored
pub const SIZE: usize = ROW_STRIDE * HEIGHT - 2;

// Unit offsets on the padded grid
pub const N: isize = ROW_STRIDE as isize;
pub const S: isize = -N;
pub const W: isize = 1;
pub const E: isize = -1;

/// Board with every playable cell open and every padding bit clear
pub const BLANK_BOARD: u128 = generate_blank_board();

/// Offsets of the 24 cells within two steps of a cell (5x5 square minus the centre)
pub static FIVE_BY_FIVE: [isize; 24] = generate_neighborhood::<24>(2);

/// Offsets of the 8 adjacent cells (3x3 square minus the centre)
pub static THREE_BY_THREE: [isize; 8] = generate_neighborhood::<8>(1);

const fn generate_blank_board() -> u128 {
    let mut board = 0u128;
    let mut y = 0;

    while y < HEIGHT {
        let mut x = 0;
        while x < WIDTH {
            board |= 1u128 << (x + y * ROW_STRIDE);
            x += 1;
        }
        y += 1;
    }

    board
}

/// Generate the offsets of a square neighborhood at compile time.
/// `LEN` must equal `(2 * radius + 1)^2 - 1`.
const fn generate_neighborhood<const LEN: usize>(radius: isize) -> [isize; LEN] {
    let mut offsets = [0isize; LEN];
    let mut i = 0;
    let mut dy = -radius;

    while dy <= radius {
        let mut dx = -radius;
        while dx <= radius {
            if dx != 0 || dy != 0 {
                offsets[i] = dy * N + dx * W;
                i += 1;
            }
            dx += 1;
        }
        dy += 1;
    }

    offsets
}

/// Returns true if `idx` addresses a bit of `board` and that bit is set.
/// Negative or oversized indices are out of the board, never open.
#[inline]
pub fn bit_is_set(board: u128, idx: isize) -> bool {
    idx >= 0 && (idx as u32) < u128::BITS && (board >> idx) & 1 == 1
}

/// Pop the least significant set bit and return its index
#[inline]
pub fn pop_lsb(bits: &mut u128) -> usize {
    let idx = bits.trailing_zeros() as usize;
    *bits &= *bits - 1;
    idx
}
