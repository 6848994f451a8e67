use backend_test_support::unique_helpers::{unique_player_name, unique_round_name};
use bingo_backend::domain::card_types::{BingoCard, Cell};
use bingo_backend::domain::rules::{FREE_COL, FREE_ROW, GRID_SIZE, MAX_NUMBER};
use bingo_backend::entities::rounds::DrawMode;
use bingo_backend::repos::drawn_numbers;
use bingo_backend::repos::kits::Kit;
use bingo_backend::repos::rounds::Round;
use bingo_backend::services::KitService;
use bingo_backend::AppState;

/// Card whose column `c` holds `15c + row + 1 + offset` top to bottom.
///
/// Row 0 is therefore `{1,16,31,46,61}` shifted by `offset` (0..=10).
pub fn ladder_card(offset: u8) -> BingoCard {
    let mut columns = [[Cell::Free; GRID_SIZE]; GRID_SIZE];
    for (col, column) in columns.iter_mut().enumerate() {
        for (row, cell) in column.iter_mut().enumerate() {
            if (col, row) != (FREE_COL, FREE_ROW) {
                *cell = Cell::Number(col as u8 * 15 + row as u8 + 1 + offset);
            }
        }
    }
    BingoCard::from_columns(columns).expect("ladder card is valid")
}

/// Every ball except those in `keep`.
pub fn drawn_all_but(keep: &[u8]) -> Vec<u8> {
    (1..=MAX_NUMBER).filter(|n| !keep.contains(n)).collect()
}

/// Store drawn numbers directly, bypassing the engine.
pub async fn seed_drawn(state: &AppState, round_id: i64, numbers: &[u8]) {
    for &n in numbers {
        drawn_numbers::insert_number(state.db(), round_id, n)
            .await
            .expect("seed drawn number");
    }
}

/// Create and start a manual round.
pub async fn started_round(state: &AppState) -> Round {
    let engine = state.engine();
    let round = engine
        .create_round(Some(&unique_round_name()), DrawMode::Manual, None)
        .await
        .expect("create round");
    engine.start_round(round.id).await.expect("start round")
}

/// A kit with a collision-free display name.
pub async fn named_kit(state: &AppState) -> Kit {
    KitService::new()
        .create_kit(state.db(), Some(&unique_player_name()))
        .await
        .expect("create kit")
}
