//! Number drawer: uniform pick among the numbers not yet drawn.

use rand::Rng;

use crate::domain::drawn_set::DrawnSet;
use crate::errors::domain::{DomainError, ValidationKind};

/// Pick the next ball for a round.
///
/// One RNG call indexes into the remaining pool, so the cost is flat as the
/// pool shrinks. Returns `RoundExhausted` once all 75 numbers are out.
pub fn draw_number<R: Rng + ?Sized>(drawn: &DrawnSet, rng: &mut R) -> Result<u8, DomainError> {
    let pool = drawn.remaining();
    if pool.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::RoundExhausted,
            "All 75 numbers have been drawn",
        ));
    }
    let idx = rng.random_range(0..pool.len());
    Ok(pool[idx])
}
