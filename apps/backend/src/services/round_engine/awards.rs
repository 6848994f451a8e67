//! Prize awarding: at most one quina and one full per (round, kit).

use tracing::{debug, info};

use super::{AwardOutcome, RoundEngine};
use crate::db::with_txn;
use crate::domain::{evaluate, PrizeKind, WinStatus};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::realtime::EngineEvent;
use crate::repos::{cards, drawn_numbers, prizes, rounds};

impl RoundEngine {
    /// Award a gameplay prize to a kit for one of its cards.
    ///
    /// A second award for the same (round, kit, kind) returns
    /// [`AwardOutcome::AlreadyAwarded`] and writes nothing. The prize-won
    /// event is emitted only after the award is committed.
    pub async fn try_award(
        &self,
        round_id: i64,
        kit_id: &str,
        card_id: i64,
        kind: PrizeKind,
    ) -> Result<AwardOutcome, AppError> {
        if !kind.is_gameplay() {
            return Err(DomainError::validation(
                ValidationKind::InvalidPrizeKind,
                format!("{kind} is not awarded by play"),
            )
            .into());
        }

        let db = &self.inner.db;
        let round = rounds::require_round(db, round_id).await?;
        if round.is_ended() {
            return Err(DomainError::validation(
                ValidationKind::RoundEnded,
                format!("Round {round_id} has ended"),
            )
            .into());
        }

        let card = cards::require_card(db, card_id).await?;
        if card.kit_id != kit_id || card.round_id != round_id {
            return Err(DomainError::validation_other(format!(
                "Card {card_id} does not belong to kit {kit_id} in round {round_id}"
            ))
            .into());
        }

        self.record_award(round_id, kit_id, card_id, kind).await
    }

    /// Evaluate one card against its round's drawn numbers.
    pub async fn evaluate_card(&self, card_id: i64) -> Result<WinStatus, AppError> {
        let db = &self.inner.db;
        let card = cards::require_card(db, card_id).await?;
        let layout = card.layout()?;
        let drawn = drawn_numbers::load_set(db, card.round_id).await?;
        Ok(evaluate(&layout, &drawn))
    }

    /// Store the prize and the card's flag together; the store's unique
    /// index settles any race between two writers.
    pub(super) async fn record_award(
        &self,
        round_id: i64,
        kit_id: &str,
        card_id: i64,
        kind: PrizeKind,
    ) -> Result<AwardOutcome, AppError> {
        let db = &self.inner.db;
        if prizes::find_for_round_kit_kind(db, round_id, kit_id, kind)
            .await?
            .is_some()
        {
            debug!(round_id, kit_id, %kind, "Prize already awarded to kit");
            return Ok(AwardOutcome::AlreadyAwarded);
        }

        let points = kind.fixed_points().unwrap_or(0);
        let kit = kit_id.to_owned();
        let stored = with_txn(db, move |txn| {
            Box::pin(async move {
                let prize = prizes::insert_award(txn, round_id, &kit, card_id, kind, points).await?;
                match kind {
                    PrizeKind::Quina => cards::set_quina_awarded(txn, card_id).await?,
                    PrizeKind::Full => cards::set_full_awarded(txn, card_id).await?,
                    PrizeKind::PointGrant | PrizeKind::PointDeduction => false,
                };
                Ok(prize)
            })
        })
        .await;

        match stored {
            Ok(prize) => {
                info!(round_id, kit_id, card_id, %kind, points, "Prize awarded");
                self.emit(EngineEvent::PrizeWon {
                    kind,
                    kit_id: kit_id.to_owned(),
                    card_id,
                });
                Ok(AwardOutcome::Awarded(prize))
            }
            Err(err) if err.code() == ErrorCode::DuplicatePrize => {
                debug!(round_id, kit_id, %kind, "Concurrent award won the race");
                Ok(AwardOutcome::AlreadyAwarded)
            }
            Err(err) => Err(err),
        }
    }
}
