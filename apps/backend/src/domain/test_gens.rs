// Proptest generators for domain types.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::dealing::deal_card;
use crate::domain::{BingoCard, DrawnSet};

/// A valid card dealt from a generated seed.
pub fn card() -> impl Strategy<Value = BingoCard> {
    any::<u64>().prop_map(|seed| deal_card(&mut ChaCha8Rng::seed_from_u64(seed)))
}

/// Any subset of `1..=75`.
pub fn drawn_set() -> impl Strategy<Value = DrawnSet> {
    any::<u128>().prop_map(|bits| (1..=75u8).filter(|n| bits & (1u128 << n) != 0).collect())
}

/// A sequence of distinct numbers in `1..=75`, in draw order.
pub fn draw_sequence() -> impl Strategy<Value = Vec<u8>> {
    Just((1..=75u8).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_flat_map(|all| (0..=75usize).prop_map(move |k| all[..k].to_vec()))
}
