//! Number drawer behaviour.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::{draw_number, test_gens, test_prelude, DrawnSet};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn drawing_75_times_empties_the_pool_without_repeats() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut drawn = DrawnSet::new();
    for _ in 0..75 {
        let n = draw_number(&drawn, &mut rng).unwrap();
        assert!(drawn.insert(n), "{n} drawn twice");
    }
    assert!(drawn.is_exhausted());

    let err = draw_number(&drawn, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RoundExhausted, _)
    ));
}

#[test]
fn last_remaining_number_is_drawn_immediately() {
    let drawn: DrawnSet = (1..=75).filter(|n| *n != 42).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(draw_number(&drawn, &mut rng).unwrap(), 42);
}

#[test]
fn every_number_is_reachable() {
    let drawn = DrawnSet::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut hit = DrawnSet::new();
    for _ in 0..5_000 {
        hit.insert(draw_number(&drawn, &mut rng).unwrap());
    }
    assert!(hit.is_exhausted());
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_draw_is_fresh_and_in_range(drawn in test_gens::drawn_set(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        match draw_number(&drawn, &mut rng) {
            Ok(n) => {
                prop_assert!((1..=75).contains(&n));
                prop_assert!(!drawn.contains(n));
            }
            Err(_) => prop_assert!(drawn.is_exhausted()),
        }
    }
}
