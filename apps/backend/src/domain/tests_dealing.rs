//! Card generation invariants.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::column_band;
use crate::domain::{deal_card, test_gens, test_prelude, BingoCard, Cell};

#[test]
fn same_seed_deals_same_card() {
    let a = deal_card(&mut ChaCha8Rng::seed_from_u64(42));
    let b = deal_card(&mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn different_seeds_deal_different_cards() {
    let a = deal_card(&mut ChaCha8Rng::seed_from_u64(111));
    let b = deal_card(&mut ChaCha8Rng::seed_from_u64(222));
    assert_ne!(a, b);
}

#[test]
fn dealt_card_survives_json() {
    let card = deal_card(&mut ChaCha8Rng::seed_from_u64(7));
    let json = card.to_json().unwrap();
    assert_eq!(BingoCard::from_json(&json).unwrap(), card);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Five distinct numbers per column, inside the band, free center.
    #[test]
    fn prop_dealt_card_layout(card in test_gens::card()) {
        for col in 0..5 {
            let band = column_band(col);
            let mut seen = HashSet::new();
            for row in 0..5 {
                match card.cell(col, row) {
                    Cell::Free => prop_assert!(col == 2 && row == 2),
                    Cell::Number(n) => {
                        prop_assert!(!(col == 2 && row == 2));
                        prop_assert!(band.contains(&n), "{} not in column {}", n, col);
                        prop_assert!(seen.insert(n), "{} repeated in column {}", n, col);
                    }
                }
            }
        }
        prop_assert_eq!(card.numbers().count(), 24);
        // Dealt cards pass the validating constructor too.
        prop_assert!(BingoCard::from_columns(*card.columns()).is_ok());
    }
}
