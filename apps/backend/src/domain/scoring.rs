//! Card evaluation against a drawn set.

use crate::domain::card_types::{BingoCard, Cell};
use crate::domain::drawn_set::DrawnSet;
use crate::domain::rules::GRID_SIZE;

/// Win conditions currently met by a card.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WinStatus {
    /// Some line of five is fully marked.
    pub quina: bool,
    /// Every cell is marked.
    pub full: bool,
}

type Line = [(usize, usize); GRID_SIZE];

const fn row_line(r: usize) -> Line {
    [(0, r), (1, r), (2, r), (3, r), (4, r)]
}

const fn col_line(c: usize) -> Line {
    [(c, 0), (c, 1), (c, 2), (c, 3), (c, 4)]
}

/// The 12 scoring lines as (col, row) coordinates.
const LINES: [Line; 12] = [
    row_line(0),
    row_line(1),
    row_line(2),
    row_line(3),
    row_line(4),
    col_line(0),
    col_line(1),
    col_line(2),
    col_line(3),
    col_line(4),
    [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)],
    [(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)],
];

fn marked(cell: Cell, drawn: &DrawnSet) -> bool {
    match cell {
        Cell::Free => true,
        Cell::Number(n) => drawn.contains(n),
    }
}

/// Evaluate a card. Pure: depends only on the card and the set.
pub fn evaluate(card: &BingoCard, drawn: &DrawnSet) -> WinStatus {
    let full = card.numbers().all(|n| drawn.contains(n));
    let quina = full
        || LINES
            .iter()
            .any(|line| line.iter().all(|&(c, r)| marked(card.cell(c, r), drawn)));
    WinStatus { quina, full }
}
