//! Background tasks: the periodic draw trigger and the post-award pause.

use std::time::Instant;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{DrawOutcome, RoundEngine, SkipReason};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

impl RoundEngine {
    /// Switch the periodic trigger on or off for the open round.
    ///
    /// Returns whether the trigger is running afterwards. Stopping never
    /// interrupts a draw already under way.
    pub fn set_auto_draw(&self, active: bool) -> Result<bool, AppError> {
        let Some(round_id) = self.current_round_id() else {
            return Err(DomainError::validation(ValidationKind::RoundNotActive, "No open round").into());
        };

        if active {
            self.start_auto_draw(round_id)?;
            return Ok(true);
        }

        let detached = self.inner.state.lock().detach_auto_draw(round_id);
        if let Some(token) = detached {
            token.cancel();
            info!(round_id, "Automatic drawing stopped");
        }
        Ok(false)
    }

    /// Spawn the periodic trigger unless one is already running.
    pub(super) fn start_auto_draw(&self, round_id: i64) -> Result<(), AppError> {
        let token = CancellationToken::new();
        let attached = self
            .inner
            .state
            .lock()
            .attach_auto_draw(round_id, token.clone());
        if attached.is_err() {
            if self.inner.state.lock().is_auto_drawing(round_id) {
                debug!(round_id, "Automatic drawing already running");
                return Ok(());
            }
            return Err(DomainError::validation(
                ValidationKind::RoundNotActive,
                format!("Round {round_id} is not started"),
            )
            .into());
        }

        let engine = self.clone();
        let period = self.inner.config.auto_draw_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                match engine.draw(round_id).await {
                    Ok(DrawOutcome::Drawn(report)) if report.round_ended => break,
                    Ok(DrawOutcome::Exhausted) => break,
                    Ok(DrawOutcome::Ignored {
                        reason: SkipReason::NoRound | SkipReason::NotCurrent,
                    }) => break,
                    Ok(_) => {}
                    Err(err) => warn!(round_id, error = %err, "Automatic draw failed"),
                }
            }
            debug!(round_id, "Automatic drawing task finished");
        });

        info!(round_id, period_ms = period.as_millis() as u64, "Automatic drawing started");
        Ok(())
    }

    /// Pause drawing for the configured window. A newer pause replaces the
    /// older one; each expiry task lifts only its own deadline.
    pub(super) fn pause_after_award(&self, round_id: i64) {
        let window = self.inner.config.prize_pause;
        let token = CancellationToken::new();
        let until = Instant::now() + window;
        let replaced = self
            .inner
            .state
            .lock()
            .pause(round_id, until, token.clone());

        match replaced {
            Ok(Some(previous)) => previous.cancel(),
            Ok(None) => {}
            Err(_) => {
                debug!(round_id, "Round closed before pause could start");
                return;
            }
        }

        let engine = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(window) => {
                    if engine.inner.state.lock().clear_pause(round_id, until) {
                        info!(round_id, "Prize pause over, drawing resumes");
                    }
                }
            }
        });

        info!(round_id, pause_ms = window.as_millis() as u64, "Drawing paused after award");
    }
}
