//! Live round engine: draws numbers, evaluates cards, awards prizes and
//! drives the create → start → draw/pause → end lifecycle.
//!
//! One engine owns the open round's in-memory state. Draw triggers (operator
//! calls, the automatic timer, transport commands) all funnel through
//! [`RoundEngine::draw`], which claims the round before touching storage so at
//! most one draw per round is ever in flight.

mod awards;
mod draw;
mod lifecycle;
mod scheduler;
pub mod state;

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::trace;

pub use self::state::{RoundPhase, RoundState, SkipReason};
use crate::config::engine::EngineConfig;
use crate::domain::PrizeKind;
use crate::entities::rounds::DrawMode;
use crate::error::AppError;
use crate::realtime::{EngineCommand, EngineEvent, EventSink};
use crate::repos::prizes::Prize;

/// Result of a draw request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DrawOutcome {
    Drawn(DrawReport),
    /// Silent no-op: the round was not in a drawable state.
    Ignored { reason: SkipReason },
    /// All 75 numbers are out; the round has been ended.
    Exhausted,
}

impl DrawOutcome {
    pub fn number(&self) -> Option<u8> {
        match self {
            DrawOutcome::Drawn(report) => Some(report.number),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawReport {
    pub round_id: i64,
    pub number: u8,
    pub awards: Vec<AwardedPrize>,
    /// Drawing is paused because of an award in this draw.
    pub paused: bool,
    /// A full card was won and the round has been ended.
    pub round_ended: bool,
    /// Cards that could not be evaluated or awarded this draw.
    pub failed_cards: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardedPrize {
    pub kind: PrizeKind,
    pub kit_id: String,
    pub card_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AwardOutcome {
    Awarded(Prize),
    /// The (round, kit, kind) prize already exists; nothing was written.
    AlreadyAwarded,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOutcome {
    Ended,
    AlreadyEnded,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub drawn_numbers: u64,
    pub cards: u64,
    pub prizes: u64,
}

/// Current round as seen by clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSnapshot {
    pub round_id: i64,
    pub mode: DrawMode,
    pub phase: RoundPhase,
    #[serde(with = "time::serde::rfc3339::option")]
    pub paused_until: Option<OffsetDateTime>,
    pub auto_draw: bool,
}

pub(crate) struct EngineInner {
    db: DatabaseConnection,
    config: EngineConfig,
    state: Mutex<RoundState>,
    /// Serializes create/start/end/reset.
    lifecycle: tokio::sync::Mutex<()>,
    /// Held for the whole of a draw; end and reset wait on it.
    draw_gate: tokio::sync::Mutex<()>,
    events: Arc<dyn EventSink>,
}

#[derive(Clone)]
pub struct RoundEngine {
    inner: Arc<EngineInner>,
}

impl std::fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("config", &self.inner.config)
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}

impl RoundEngine {
    pub fn new(db: DatabaseConnection, config: EngineConfig, events: Arc<dyn EventSink>) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                db,
                config,
                state: Mutex::new(RoundState::new()),
                lifecycle: tokio::sync::Mutex::new(()),
                draw_gate: tokio::sync::Mutex::new(()),
                events,
            }),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.inner.db
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    pub fn current_round_id(&self) -> Option<i64> {
        self.inner.state.lock().current_round_id()
    }

    pub fn snapshot(&self) -> Option<RoundSnapshot> {
        let now = Instant::now();
        let view = self.inner.state.lock().view(now)?;
        let paused_until = view.paused_until.map(|until| {
            let remaining = until.saturating_duration_since(now);
            OffsetDateTime::now_utc() + remaining
        });
        Some(RoundSnapshot {
            round_id: view.round_id,
            mode: view.mode,
            phase: view.phase,
            paused_until,
            auto_draw: view.auto_draw,
        })
    }

    /// Dispatch an inbound transport command against the open round.
    pub async fn handle_command(&self, command: EngineCommand) -> Result<(), AppError> {
        match command {
            EngineCommand::DrawNumber => self.draw_current().await.map(|_| ()),
            EngineCommand::AutoDraw { active } => self.set_auto_draw(active).map(|_| ()),
        }
    }

    fn emit(&self, event: EngineEvent) {
        trace!(event = event.name(), "Emitting engine event");
        self.inner.events.emit(event);
    }
}

/// Claimed right to draw on one round; releases the claim on drop.
struct DrawPermit {
    inner: Arc<EngineInner>,
    round_id: i64,
}

impl Drop for DrawPermit {
    fn drop(&mut self) {
        self.inner.state.lock().release_draw(self.round_id);
    }
}
