//! Random card generation.

use rand::seq::index;
use rand::Rng;

use crate::domain::card_types::{BingoCard, Cell};
use crate::domain::rules::{column_band, BAND_WIDTH, FREE_COL, FREE_ROW, GRID_SIZE};

/// Deal a fresh card: for each column pick 5 distinct numbers from its band,
/// then blank the center.
///
/// Column values keep the order they were sampled in; the layout rules do not
/// require sorted columns.
pub fn deal_card<R: Rng + ?Sized>(rng: &mut R) -> BingoCard {
    let mut columns = [[Cell::Free; GRID_SIZE]; GRID_SIZE];
    for (c, column) in columns.iter_mut().enumerate() {
        let base = *column_band(c).start();
        let picks = index::sample(rng, BAND_WIDTH as usize, GRID_SIZE);
        for (r, offset) in picks.into_iter().enumerate() {
            column[r] = Cell::Number(base + offset as u8);
        }
    }
    columns[FREE_COL][FREE_ROW] = Cell::Free;
    BingoCard::from_columns_unchecked(columns)
}
