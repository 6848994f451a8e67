//! One draw: pick, persist, broadcast, evaluate every open card, award,
//! then pause or end the round as the awards dictate.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use super::{AwardOutcome, AwardedPrize, DrawOutcome, DrawPermit, DrawReport, RoundEngine, SkipReason};
use crate::domain::rules::MAX_NUMBER;
use crate::domain::{draw_number, evaluate, DrawnSet, PrizeKind};
use crate::error::AppError;
use crate::realtime::EngineEvent;
use crate::repos::{cards, drawn_numbers, prizes, rounds};

/// What the card pass produced for one draw.
#[derive(Debug, Default)]
struct CardPass {
    awards: Vec<AwardedPrize>,
    failed_cards: usize,
}

impl RoundEngine {
    /// Draw on the open round, whatever its id.
    pub async fn draw_current(&self) -> Result<DrawOutcome, AppError> {
        let current = self.current_round_id();
        match current {
            Some(round_id) => self.draw(round_id).await,
            None => Ok(DrawOutcome::Ignored {
                reason: SkipReason::NoRound,
            }),
        }
    }

    /// Draw one number for `round_id`.
    ///
    /// Requests that arrive while the round is not drawable (not open, not
    /// started, paused, or with another draw in flight) are ignored without
    /// side effects. Fails only when the drawn number cannot be stored or the
    /// open cards cannot be listed.
    pub async fn draw(&self, round_id: i64) -> Result<DrawOutcome, AppError> {
        let permit = match self.claim_draw(round_id) {
            Ok(permit) => permit,
            Err(reason) => return self.skipped(round_id, reason).await,
        };
        let _gate = self.inner.draw_gate.lock().await;
        // End or reset may have held the gate while this draw waited on it.
        if self.current_round_id() != Some(round_id) {
            drop(permit);
            return self.skipped(round_id, SkipReason::NotCurrent).await;
        }
        let db = &self.inner.db;

        let drawn = drawn_numbers::load_set(db, round_id).await?;
        let picked = draw_number(&drawn, &mut rand::rng());
        let number = match picked {
            Ok(number) => number,
            Err(_) => {
                info!(round_id, "All numbers drawn, ending round");
                self.finish_round(round_id, "numbers exhausted").await?;
                return Ok(DrawOutcome::Exhausted);
            }
        };

        if let Err(err) = drawn_numbers::insert_number(db, round_id, number).await {
            if err.is_duplicate_draw() {
                warn!(round_id, number, "Number already stored by a concurrent draw");
                return Ok(DrawOutcome::Ignored {
                    reason: SkipReason::Contended,
                });
            }
            if err.is_round_ended() {
                warn!(round_id, number, "Round ended before the number was stored");
                drop(permit);
                return self.skipped(round_id, SkipReason::NotCurrent).await;
            }
            error!(round_id, number, error = %err, "Failed to store drawn number");
            return Err(err.into());
        }

        let mut drawn = drawn;
        drawn.insert(number);
        self.emit(EngineEvent::NumberDrawn { number, round_id });
        info!(round_id, number, drawn = drawn.len(), "Number drawn");

        let pass = self.evaluate_open_cards(round_id, &drawn).await?;

        let paused = !pass.awards.is_empty();
        if paused {
            self.pause_after_award(round_id);
        }

        let full_won = prizes::count_by_round_and_kind(db, round_id, PrizeKind::Full).await? > 0;
        if full_won {
            self.finish_round(round_id, "full card").await?;
        }

        drop(permit);
        Ok(DrawOutcome::Drawn(DrawReport {
            round_id,
            number,
            awards: pass.awards,
            paused,
            round_ended: full_won,
            failed_cards: pass.failed_cards,
        }))
    }

    fn claim_draw(&self, round_id: i64) -> Result<DrawPermit, SkipReason> {
        self.inner
            .state
            .lock()
            .claim_draw(round_id, Instant::now())?;
        Ok(DrawPermit {
            inner: self.inner.clone(),
            round_id,
        })
    }

    /// A request for a round that is no longer open reports `Exhausted` when
    /// that round ran out of numbers.
    async fn skipped(&self, round_id: i64, reason: SkipReason) -> Result<DrawOutcome, AppError> {
        if matches!(reason, SkipReason::NoRound | SkipReason::NotCurrent) {
            let db = &self.inner.db;
            if let Some(round) = rounds::find_by_id(db, round_id).await? {
                let count = drawn_numbers::count_by_round(db, round_id).await?;
                if round.is_ended() && count >= u64::from(MAX_NUMBER) {
                    return Ok(DrawOutcome::Exhausted);
                }
            }
        }
        debug!(round_id, ?reason, "Draw request ignored");
        Ok(DrawOutcome::Ignored { reason })
    }

    /// Evaluate every card still missing a prize; one bad card never stops
    /// the others.
    async fn evaluate_open_cards(
        &self,
        round_id: i64,
        drawn: &DrawnSet,
    ) -> Result<CardPass, AppError> {
        let open_cards = cards::list_open_by_round(&self.inner.db, round_id).await?;
        let mut pass = CardPass::default();

        for card in open_cards {
            let layout = match card.layout() {
                Ok(layout) => layout,
                Err(err) => {
                    warn!(round_id, card_id = card.id, error = %err, "Skipping card with unreadable layout");
                    pass.failed_cards += 1;
                    continue;
                }
            };

            let status = evaluate(&layout, drawn);
            let mut won = Vec::with_capacity(2);
            if status.quina && !card.quina_awarded {
                won.push(PrizeKind::Quina);
            }
            if status.full && !card.full_awarded {
                won.push(PrizeKind::Full);
            }

            for kind in won {
                match self.record_award(round_id, &card.kit_id, card.id, kind).await {
                    Ok(AwardOutcome::Awarded(_)) => pass.awards.push(AwardedPrize {
                        kind,
                        kit_id: card.kit_id.clone(),
                        card_id: card.id,
                    }),
                    Ok(AwardOutcome::AlreadyAwarded) => {}
                    Err(err) => {
                        warn!(round_id, card_id = card.id, %kind, error = %err, "Failed to award prize");
                        pass.failed_cards += 1;
                    }
                }
            }
        }

        Ok(pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::db::DbProfile;
    use crate::entities::rounds::DrawMode;
    use crate::infra::state::build_state;

    #[tokio::test]
    async fn draw_queued_behind_round_end_writes_nothing() {
        let state = build_state()
            .with_db(DbProfile::InMemory)
            .build()
            .await
            .unwrap();
        let engine = state.engine().clone();
        let round = engine
            .create_round(Some("Queued"), DrawMode::Manual, None)
            .await
            .unwrap();
        engine.start_round(round.id).await.unwrap();

        let gate = engine.inner.draw_gate.lock().await;
        let queued = tokio::spawn({
            let engine = engine.clone();
            async move { engine.draw(round.id).await }
        });
        for _ in 0..100 {
            let in_flight = engine
                .inner
                .state
                .lock()
                .view(Instant::now())
                .is_some_and(|v| v.draw_in_flight);
            if in_flight {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(engine.inner.state.lock().view(Instant::now()).unwrap().draw_in_flight);

        engine.finish_round(round.id, "operator").await.unwrap();
        drop(gate);

        let outcome = queued.await.unwrap().unwrap();
        assert_eq!(
            outcome,
            DrawOutcome::Ignored {
                reason: SkipReason::NotCurrent
            }
        );
        let db = engine.db();
        assert_eq!(drawn_numbers::count_by_round(db, round.id).await.unwrap(), 0);
        assert!(rounds::require_round(db, round.id).await.unwrap().is_ended());
    }
}
