//! In-memory state of the open round.
//!
//! Owned by the engine behind a mutex; every method here is a short,
//! synchronous critical section. Time is passed in so pause checks are
//! deterministic under test.

use std::time::Instant;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::entities::rounds::DrawMode;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    Created,
    Active,
    Paused,
}

/// Why a draw request did nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No open round at all.
    NoRound,
    /// The request named a round that is not the open one.
    NotCurrent,
    /// The round exists but has not been started.
    NotStarted,
    Paused,
    /// Another draw for this round is in flight.
    DrawInFlight,
    /// The store already held the picked number; another process drew it.
    Contended,
}

#[derive(Debug)]
struct OpenRound {
    round_id: i64,
    mode: DrawMode,
    started: bool,
    paused_until: Option<Instant>,
    pause_task: Option<CancellationToken>,
    auto_draw: Option<CancellationToken>,
    drawing: bool,
}

impl OpenRound {
    fn is_paused(&self, now: Instant) -> bool {
        self.paused_until.is_some_and(|until| until > now)
    }
}

/// Point-in-time view of the open round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundStateView {
    pub round_id: i64,
    pub mode: DrawMode,
    pub phase: RoundPhase,
    #[serde(skip)]
    pub paused_until: Option<Instant>,
    pub auto_draw: bool,
    pub draw_in_flight: bool,
}

/// Tokens detached from a round that is closing; the caller cancels them.
#[derive(Debug, Default)]
pub struct DetachedTasks {
    pub auto_draw: Option<CancellationToken>,
    pub pause_task: Option<CancellationToken>,
}

impl DetachedTasks {
    pub fn cancel(self) {
        if let Some(token) = self.auto_draw {
            token.cancel();
        }
        if let Some(token) = self.pause_task {
            token.cancel();
        }
    }
}

#[derive(Debug, Default)]
pub struct RoundState {
    current: Option<OpenRound>,
}

impl RoundState {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn current_round_id(&self) -> Option<i64> {
        self.current.as_ref().map(|r| r.round_id)
    }

    fn current_mut(&mut self, round_id: i64) -> Option<&mut OpenRound> {
        self.current.as_mut().filter(|r| r.round_id == round_id)
    }

    /// Make `round_id` the open round, detaching whatever was open before.
    pub fn install(&mut self, round_id: i64, mode: DrawMode, started: bool) -> DetachedTasks {
        let previous = self.current.replace(OpenRound {
            round_id,
            mode,
            started,
            paused_until: None,
            pause_task: None,
            auto_draw: None,
            drawing: false,
        });
        previous
            .map(|r| DetachedTasks {
                auto_draw: r.auto_draw,
                pause_task: r.pause_task,
            })
            .unwrap_or_default()
    }

    /// Created -> Active. False when `round_id` is not the open round.
    pub fn activate(&mut self, round_id: i64) -> bool {
        match self.current_mut(round_id) {
            Some(round) => {
                round.started = true;
                true
            }
            None => false,
        }
    }

    /// Guard check and draw claim in one step.
    ///
    /// On success the round is marked as drawing until [`RoundState::release_draw`].
    pub fn claim_draw(&mut self, round_id: i64, now: Instant) -> Result<(), SkipReason> {
        let Some(round) = self.current.as_mut() else {
            return Err(SkipReason::NoRound);
        };
        if round.round_id != round_id {
            return Err(SkipReason::NotCurrent);
        }
        if !round.started {
            return Err(SkipReason::NotStarted);
        }
        if round.is_paused(now) {
            return Err(SkipReason::Paused);
        }
        if round.drawing {
            return Err(SkipReason::DrawInFlight);
        }
        round.drawing = true;
        Ok(())
    }

    pub fn release_draw(&mut self, round_id: i64) {
        if let Some(round) = self.current_mut(round_id) {
            round.drawing = false;
        }
    }

    /// Pause drawing until `until`. Returns the previous pause task, if any,
    /// for the caller to cancel; `None` when `round_id` is not open.
    pub fn pause(
        &mut self,
        round_id: i64,
        until: Instant,
        task: CancellationToken,
    ) -> Result<Option<CancellationToken>, CancellationToken> {
        match self.current_mut(round_id) {
            Some(round) => {
                round.paused_until = Some(until);
                Ok(round.pause_task.replace(task))
            }
            None => Err(task),
        }
    }

    /// Pause expiry for the pause ending at `until`.
    ///
    /// Clears only that pause; a newer pause with another deadline is left
    /// alone, as is a round that is no longer open.
    pub fn clear_pause(&mut self, round_id: i64, until: Instant) -> bool {
        match self.current_mut(round_id) {
            Some(round) if round.paused_until == Some(until) => {
                round.paused_until = None;
                round.pause_task = None;
                true
            }
            _ => false,
        }
    }

    /// Register the periodic trigger. Returns the token back when one is
    /// already running or the round is not open and started.
    pub fn attach_auto_draw(
        &mut self,
        round_id: i64,
        token: CancellationToken,
    ) -> Result<(), CancellationToken> {
        match self.current_mut(round_id) {
            Some(round) if round.started && round.auto_draw.is_none() => {
                round.auto_draw = Some(token);
                Ok(())
            }
            _ => Err(token),
        }
    }

    pub fn detach_auto_draw(&mut self, round_id: i64) -> Option<CancellationToken> {
        self.current_mut(round_id)
            .and_then(|round| round.auto_draw.take())
    }

    pub fn is_auto_drawing(&self, round_id: i64) -> bool {
        self.current
            .as_ref()
            .is_some_and(|r| r.round_id == round_id && r.auto_draw.is_some())
    }

    /// Drop the open round if it is `round_id`, handing back its tasks.
    pub fn close(&mut self, round_id: i64) -> Option<DetachedTasks> {
        if self.current_round_id() != Some(round_id) {
            return None;
        }
        self.current.take().map(|r| DetachedTasks {
            auto_draw: r.auto_draw,
            pause_task: r.pause_task,
        })
    }

    pub fn view(&self, now: Instant) -> Option<RoundStateView> {
        self.current.as_ref().map(|r| RoundStateView {
            round_id: r.round_id,
            mode: r.mode,
            phase: if !r.started {
                RoundPhase::Created
            } else if r.is_paused(now) {
                RoundPhase::Paused
            } else {
                RoundPhase::Active
            },
            paused_until: r.paused_until.filter(|until| *until > now),
            auto_draw: r.auto_draw.is_some(),
            draw_in_flight: r.drawing,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn started(round_id: i64) -> RoundState {
        let mut state = RoundState::new();
        state.install(round_id, DrawMode::Manual, false);
        assert!(state.activate(round_id));
        state
    }

    #[test]
    fn draw_needs_started_current_round() {
        let now = Instant::now();
        let mut state = RoundState::new();
        assert_eq!(state.claim_draw(1, now), Err(SkipReason::NoRound));

        state.install(1, DrawMode::Manual, false);
        assert_eq!(state.claim_draw(1, now), Err(SkipReason::NotStarted));
        assert_eq!(state.claim_draw(2, now), Err(SkipReason::NotCurrent));

        state.activate(1);
        assert_eq!(state.claim_draw(1, now), Ok(()));
    }

    #[test]
    fn second_claim_waits_for_release() {
        let now = Instant::now();
        let mut state = started(1);
        assert_eq!(state.claim_draw(1, now), Ok(()));
        assert_eq!(state.claim_draw(1, now), Err(SkipReason::DrawInFlight));
        state.release_draw(1);
        assert_eq!(state.claim_draw(1, now), Ok(()));
    }

    #[test]
    fn award_pause_blocks_at_five_seconds_and_allows_at_eleven() {
        let t0 = Instant::now();
        let mut state = started(1);
        let prev = state
            .pause(1, t0 + Duration::from_secs(10), CancellationToken::new())
            .unwrap();
        assert!(prev.is_none());

        assert_eq!(
            state.claim_draw(1, t0 + Duration::from_secs(5)),
            Err(SkipReason::Paused)
        );
        // Expiry task has not run; the deadline alone lifts the pause.
        assert_eq!(state.claim_draw(1, t0 + Duration::from_secs(11)), Ok(()));
    }

    #[test]
    fn repause_hands_back_previous_task() {
        let t0 = Instant::now();
        let mut state = started(1);
        let first = CancellationToken::new();
        state
            .pause(1, t0 + Duration::from_secs(10), first.clone())
            .unwrap();
        let prev = state
            .pause(1, t0 + Duration::from_secs(20), CancellationToken::new())
            .unwrap();
        assert!(prev.is_some());
        assert_eq!(
            state.claim_draw(1, t0 + Duration::from_secs(15)),
            Err(SkipReason::Paused)
        );
    }

    #[test]
    fn clear_pause_lifts_own_pause_and_ignores_closed_rounds() {
        let t0 = Instant::now();
        let until = t0 + Duration::from_secs(60);
        let mut state = started(1);
        state.pause(1, until, CancellationToken::new()).unwrap();
        assert!(state.clear_pause(1, until));
        assert_eq!(state.claim_draw(1, t0), Ok(()));
        state.release_draw(1);

        state.close(1);
        assert!(!state.clear_pause(1, until));
        assert!(state.pause(1, t0, CancellationToken::new()).is_err());
    }

    #[test]
    fn stale_expiry_leaves_newer_pause_in_place() {
        let t0 = Instant::now();
        let first = t0 + Duration::from_secs(10);
        let second = t0 + Duration::from_secs(20);
        let mut state = started(1);
        state.pause(1, first, CancellationToken::new()).unwrap();
        let replaced = state.pause(1, second, CancellationToken::new()).unwrap();
        assert!(replaced.is_some());

        // The first expiry task woke before it saw its cancellation.
        assert!(!state.clear_pause(1, first));
        assert_eq!(
            state.claim_draw(1, t0 + Duration::from_secs(15)),
            Err(SkipReason::Paused)
        );

        assert!(state.clear_pause(1, second));
        assert_eq!(state.claim_draw(1, t0 + Duration::from_secs(15)), Ok(()));
    }

    #[test]
    fn auto_draw_attaches_once_and_only_when_started() {
        let mut state = RoundState::new();
        state.install(1, DrawMode::Automatic, false);
        assert!(state.attach_auto_draw(1, CancellationToken::new()).is_err());

        state.activate(1);
        assert!(state.attach_auto_draw(1, CancellationToken::new()).is_ok());
        assert!(state.attach_auto_draw(1, CancellationToken::new()).is_err());
        assert!(state.is_auto_drawing(1));

        let token = state.detach_auto_draw(1).unwrap();
        assert!(!state.is_auto_drawing(1));
        token.cancel();
    }

    #[test]
    fn close_detaches_tasks_and_view_reflects_phase() {
        let t0 = Instant::now();
        let mut state = started(4);
        let auto = CancellationToken::new();
        state.attach_auto_draw(4, auto.clone()).unwrap();
        state
            .pause(4, t0 + Duration::from_secs(10), CancellationToken::new())
            .unwrap();

        let view = state.view(t0).unwrap();
        assert_eq!(view.phase, RoundPhase::Paused);
        assert!(view.auto_draw);
        assert_eq!(state.view(t0 + Duration::from_secs(11)).unwrap().phase, RoundPhase::Active);

        assert!(state.close(3).is_none());
        let tasks = state.close(4).unwrap();
        tasks.cancel();
        assert!(auto.is_cancelled());
        assert!(state.view(t0).is_none());
    }
}
