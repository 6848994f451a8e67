//! DTOs for prizes_sea adapter.

use crate::entities::prizes::PrizeKind;

/// DTO for inserting a prize or ledger entry.
#[derive(Debug, Clone)]
pub struct PrizeCreate {
    pub kit_id: String,
    pub card_id: Option<i64>,
    pub round_id: Option<i64>,
    pub kind: PrizeKind,
    pub points: i32,
}

impl PrizeCreate {
    /// Gameplay award tied to a card and round.
    pub fn award(
        kit_id: impl Into<String>,
        card_id: i64,
        round_id: i64,
        kind: PrizeKind,
        points: i32,
    ) -> Self {
        Self {
            kit_id: kit_id.into(),
            card_id: Some(card_id),
            round_id: Some(round_id),
            kind,
            points,
        }
    }

    /// Operator ledger entry, not tied to a card.
    pub fn ledger(kit_id: impl Into<String>, kind: PrizeKind, points: i32) -> Self {
        Self {
            kit_id: kit_id.into(),
            card_id: None,
            round_id: None,
            kind,
            points,
        }
    }
}
