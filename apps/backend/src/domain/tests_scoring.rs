//! Scenario tests for card evaluation on a fixed card.

use crate::domain::{evaluate, BingoCard, Cell, DrawnSet, WinStatus};

const GRID: &str = "[[1,2,3,4,5],[16,17,18,19,20],[31,32,\"FREE\",34,35],[46,47,48,49,50],[61,62,63,64,65]]";

fn card() -> BingoCard {
    BingoCard::from_json(GRID).unwrap()
}

fn drawn(numbers: &[u8]) -> DrawnSet {
    numbers.iter().copied().collect()
}

#[test]
fn nothing_drawn_wins_nothing() {
    assert_eq!(evaluate(&card(), &DrawnSet::new()), WinStatus::default());
}

#[test]
fn first_row_gives_quina_not_full() {
    let card = card();
    let row: Vec<u8> = card.row(0).iter().filter_map(|c| c.number()).collect();
    assert_eq!(row, vec![1, 16, 31, 46, 61]);

    let status = evaluate(&card, &drawn(&row));
    assert!(status.quina);
    assert!(!status.full);
}

#[test]
fn middle_row_counts_free_space() {
    // Row 2 passes through the center; four numbers complete it.
    let status = evaluate(&card(), &drawn(&[3, 18, 48, 63]));
    assert!(status.quina);
}

#[test]
fn column_and_diagonals_are_lines() {
    assert!(evaluate(&card(), &drawn(&[16, 17, 18, 19, 20])).quina);
    assert!(evaluate(&card(), &drawn(&[1, 17, 49, 65])).quina);
    assert!(evaluate(&card(), &drawn(&[5, 19, 47, 61])).quina);
}

#[test]
fn four_of_five_is_not_a_line() {
    let status = evaluate(&card(), &drawn(&[1, 16, 31, 46]));
    assert!(!status.quina);
}

#[test]
fn all_card_numbers_give_full_and_quina() {
    let card = card();
    let all: DrawnSet = card.numbers().collect();
    let status = evaluate(&card, &all);
    assert!(status.full);
    assert!(status.quina);
}

#[test]
fn missing_one_number_is_not_full() {
    let card = card();
    let almost: DrawnSet = card.numbers().filter(|n| *n != 35).collect();
    let status = evaluate(&card, &almost);
    assert!(!status.full);
    assert!(status.quina);
}

#[test]
fn numbers_not_on_card_do_not_matter() {
    let mut set = drawn(&[1, 16, 31, 46]);
    set.extend([6, 7, 8, 21, 22, 36, 51, 66, 75]);
    assert!(!evaluate(&card(), &set).quina);
    assert_eq!(card().cell(2, 2), Cell::Free);
}
