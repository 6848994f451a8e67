//! Fixed parameters of the 75-ball game.

use std::ops::RangeInclusive;

/// Highest ball number; balls are numbered `1..=MAX_NUMBER`.
pub const MAX_NUMBER: u8 = 75;
pub const GRID_SIZE: usize = 5;
/// Width of each column's number band.
pub const BAND_WIDTH: u8 = 15;
/// Center cell, the free space.
pub const FREE_ROW: usize = 2;
pub const FREE_COL: usize = 2;

pub const QUINA_POINTS: i32 = 30;
pub const FULL_POINTS: i32 = 100;

/// Numbers allowed in column `col` (0-based): `15*col+1 ..= 15*col+15`.
pub fn column_band(col: usize) -> RangeInclusive<u8> {
    let lo = (col as u8) * BAND_WIDTH + 1;
    lo..=lo + BAND_WIDTH - 1
}

pub fn is_valid_number(n: u8) -> bool {
    (1..=MAX_NUMBER).contains(&n)
}
