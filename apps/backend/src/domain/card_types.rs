//! Core card types: Cell, BingoCard

use crate::domain::rules::{column_band, FREE_COL, FREE_ROW, GRID_SIZE};
use crate::errors::domain::{DomainError, ValidationKind};

/// One square of a card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    Number(u8),
    /// Center wildcard, always marked.
    Free,
}

impl Cell {
    pub fn number(self) -> Option<u8> {
        match self {
            Cell::Number(n) => Some(n),
            Cell::Free => None,
        }
    }
}

/// A 5×5 card stored column-major: `columns[col][row]`.
///
/// Construct through [`BingoCard::from_columns`] (validating) or
/// [`crate::domain::dealing::deal_card`]; both guarantee the layout rules:
/// column `c` holds distinct numbers from its band and the center is free.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BingoCard {
    columns: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl BingoCard {
    pub fn from_columns(columns: [[Cell; GRID_SIZE]; GRID_SIZE]) -> Result<Self, DomainError> {
        validate_layout(&columns)?;
        Ok(Self { columns })
    }

    pub(crate) fn from_columns_unchecked(columns: [[Cell; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { columns }
    }

    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.columns[col][row]
    }

    pub fn columns(&self) -> &[[Cell; GRID_SIZE]; GRID_SIZE] {
        &self.columns
    }

    /// The 24 numbers on the card, column by column.
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.columns
            .iter()
            .flat_map(|col| col.iter().filter_map(|c| c.number()))
    }

    pub fn row(&self, row: usize) -> [Cell; GRID_SIZE] {
        std::array::from_fn(|col| self.columns[col][row])
    }
}

fn invalid(detail: String) -> DomainError {
    DomainError::validation(ValidationKind::InvalidCardLayout, detail)
}

fn validate_layout(columns: &[[Cell; GRID_SIZE]; GRID_SIZE]) -> Result<(), DomainError> {
    for (c, column) in columns.iter().enumerate() {
        let band = column_band(c);
        let mut seen: u128 = 0;
        for (r, cell) in column.iter().enumerate() {
            let center = c == FREE_COL && r == FREE_ROW;
            match (*cell, center) {
                (Cell::Free, true) => {}
                (Cell::Free, false) => {
                    return Err(invalid(format!("free space outside center at ({c},{r})")));
                }
                (Cell::Number(n), true) => {
                    return Err(invalid(format!("center must be free, found {n}")));
                }
                (Cell::Number(n), false) => {
                    if !band.contains(&n) {
                        return Err(invalid(format!(
                            "{n} outside column {c} band {}..={}",
                            band.start(),
                            band.end()
                        )));
                    }
                    let bit = 1u128 << n;
                    if seen & bit != 0 {
                        return Err(invalid(format!("{n} repeated in column {c}")));
                    }
                    seen |= bit;
                }
            }
        }
    }
    Ok(())
}
