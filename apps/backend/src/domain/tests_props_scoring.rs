//! Property tests for card evaluation (pure domain, no DB).
//!
//! Properties tested:
//! - Evaluation is idempotent
//! - Evaluation ignores draw order
//! - Evaluation is monotone as numbers are added
//! - Full implies quina
//! - Full holds exactly when every card number is drawn

use proptest::prelude::*;

use crate::domain::{evaluate, test_gens, test_prelude, DrawnSet};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_evaluate_is_idempotent(card in test_gens::card(), drawn in test_gens::drawn_set()) {
        prop_assert_eq!(evaluate(&card, &drawn), evaluate(&card, &drawn));
    }

    #[test]
    fn prop_evaluate_ignores_draw_order(card in test_gens::card(), seq in test_gens::draw_sequence()) {
        let forward: DrawnSet = seq.iter().copied().collect();
        let backward: DrawnSet = seq.iter().rev().copied().collect();
        prop_assert_eq!(evaluate(&card, &forward), evaluate(&card, &backward));
    }

    #[test]
    fn prop_evaluate_is_monotone(card in test_gens::card(), seq in test_gens::draw_sequence()) {
        let mut drawn = DrawnSet::new();
        let mut prev = evaluate(&card, &drawn);
        for n in seq {
            drawn.insert(n);
            let next = evaluate(&card, &drawn);
            prop_assert!(!prev.quina || next.quina);
            prop_assert!(!prev.full || next.full);
            prev = next;
        }
    }

    #[test]
    fn prop_full_implies_quina(card in test_gens::card(), drawn in test_gens::drawn_set()) {
        let status = evaluate(&card, &drawn);
        prop_assert!(!status.full || status.quina);
    }

    #[test]
    fn prop_full_iff_every_number_drawn(card in test_gens::card(), drawn in test_gens::drawn_set()) {
        let expected = card.numbers().all(|n| drawn.contains(n));
        prop_assert_eq!(evaluate(&card, &drawn).full, expected);
    }
}
