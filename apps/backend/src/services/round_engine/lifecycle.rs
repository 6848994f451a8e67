//! Round lifecycle: create, start, end, reset and startup restore.

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::{EndOutcome, ResetReport, RoundEngine};
use crate::db::with_txn;
use crate::domain::round_names::round_name_or_default;
use crate::entities::rounds::DrawMode;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::realtime::EngineEvent;
use crate::repos::rounds::Round;
use crate::repos::{cards, drawn_numbers, prizes, rounds};

fn draws_automatically(mode: DrawMode) -> bool {
    matches!(mode, DrawMode::Automatic | DrawMode::Scheduled)
}

impl RoundEngine {
    /// Open a new round in the Created phase.
    ///
    /// Fails with `RoundInProgress` while another round is still open. A blank
    /// or missing name is replaced by one of the default round names.
    pub async fn create_round(
        &self,
        name: Option<&str>,
        mode: DrawMode,
        scheduled_start: Option<OffsetDateTime>,
    ) -> Result<Round, AppError> {
        let _lifecycle = self.inner.lifecycle.lock().await;
        let db = &self.inner.db;

        if let Some(open) = rounds::find_open(db).await? {
            return Err(DomainError::conflict(
                ConflictKind::RoundInProgress,
                format!("Round {} is still open", open.id),
            )
            .into());
        }

        let name = round_name_or_default(name, &mut rand::rng());
        let round = rounds::create_round(db, name, mode, scheduled_start).await?;

        self.inner
            .state
            .lock()
            .install(round.id, round.draw_mode, false)
            .cancel();

        info!(round_id = round.id, name = %round.name, ?mode, "Round created");
        Ok(round)
    }

    /// Created → Active. Starting an already-started round is a no-op; an
    /// ended round cannot be restarted.
    pub async fn start_round(&self, round_id: i64) -> Result<Round, AppError> {
        let _lifecycle = self.inner.lifecycle.lock().await;
        let db = &self.inner.db;

        let round = rounds::require_round(db, round_id).await?;
        if round.is_ended() {
            return Err(DomainError::validation(
                ValidationKind::RoundEnded,
                format!("Round {round_id} has ended"),
            )
            .into());
        }

        let started_now = rounds::mark_started(db, round_id, OffsetDateTime::now_utc()).await?;

        {
            let mut state = self.inner.state.lock();
            if state.current_round_id() != Some(round_id) {
                state.install(round_id, round.draw_mode, true).cancel();
            }
            state.activate(round_id);
        }

        if draws_automatically(round.draw_mode) {
            self.start_auto_draw(round_id)?;
        }

        if started_now {
            info!(round_id, mode = ?round.draw_mode, "Round started");
        } else {
            debug!(round_id, "Round already started");
        }

        Ok(rounds::require_round(db, round_id).await?)
    }

    /// End the round. Idempotent: the round-ended event fires only for the
    /// call that actually ended it. Waits for an in-flight draw to finish.
    pub async fn end_round(&self, round_id: i64) -> Result<EndOutcome, AppError> {
        let _lifecycle = self.inner.lifecycle.lock().await;
        let _gate = self.inner.draw_gate.lock().await;
        self.finish_round(round_id, "operator").await
    }

    /// Delete the round's drawn numbers, cards and prizes in one transaction.
    /// The round row itself and its lifecycle timestamps are kept.
    pub async fn reset_round(&self, round_id: i64) -> Result<ResetReport, AppError> {
        let _lifecycle = self.inner.lifecycle.lock().await;
        let _gate = self.inner.draw_gate.lock().await;
        let db = &self.inner.db;

        rounds::require_round(db, round_id).await?;

        let report = with_txn(db, move |txn| {
            Box::pin(async move {
                let prizes = prizes::delete_by_round(txn, round_id).await?;
                let cards = cards::delete_by_round(txn, round_id).await?;
                let drawn_numbers = drawn_numbers::delete_by_round(txn, round_id).await?;
                Ok(ResetReport {
                    drawn_numbers,
                    cards,
                    prizes,
                })
            })
        })
        .await?;

        info!(
            round_id,
            drawn_numbers = report.drawn_numbers,
            cards = report.cards,
            prizes = report.prizes,
            "Round reset"
        );
        Ok(report)
    }

    /// Pick up the open round from storage after a restart.
    pub async fn restore(&self) -> Result<Option<i64>, AppError> {
        let Some(round) = rounds::find_open(&self.inner.db).await? else {
            debug!("No open round to restore");
            return Ok(None);
        };

        let started = round.is_started();
        self.inner
            .state
            .lock()
            .install(round.id, round.draw_mode, started)
            .cancel();

        if started && draws_automatically(round.draw_mode) {
            self.start_auto_draw(round.id)?;
        }

        info!(round_id = round.id, started, mode = ?round.draw_mode, "Restored open round");
        Ok(Some(round.id))
    }

    /// Mark the round ended, drop its in-memory state and cancel its tasks.
    ///
    /// Callers must hold the draw gate or be the draw itself.
    pub(super) async fn finish_round(
        &self,
        round_id: i64,
        reason: &'static str,
    ) -> Result<EndOutcome, AppError> {
        let db = &self.inner.db;
        rounds::require_round(db, round_id).await?;

        let ended_now = rounds::mark_ended(db, round_id, OffsetDateTime::now_utc()).await?;

        let detached = self.inner.state.lock().close(round_id);
        if let Some(tasks) = detached {
            tasks.cancel();
        }

        if ended_now {
            self.emit(EngineEvent::RoundEnded { round_id });
            info!(round_id, reason, "Round ended");
            Ok(EndOutcome::Ended)
        } else {
            warn!(round_id, reason, "Round was already ended");
            Ok(EndOutcome::AlreadyEnded)
        }
    }
}
