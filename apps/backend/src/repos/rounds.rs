//! Round repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::entities::rounds;
pub use crate::entities::rounds::DrawMode;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Round domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Round {
    pub id: i64,
    pub name: String,
    pub draw_mode: DrawMode,
    pub scheduled_start: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
}

impl Round {
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_id(conn, round_id).await?;
    Ok(round.map(Round::from))
}

/// Find round by ID or return `NotFound(Round)`.
pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    find_by_id(conn, round_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
    })
}

/// Find a round that has not ended; an ended round is `Validation(RoundEnded)`.
pub async fn require_open_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    let round = require_round(conn, round_id).await?;
    if round.is_ended() {
        return Err(DomainError::validation(
            ValidationKind::RoundEnded,
            format!("Round {round_id} has ended"),
        ));
    }
    Ok(round)
}

pub async fn find_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<Round>, DomainError> {
    Ok(rounds_adapter::find_open(conn).await?.map(Round::from))
}

pub async fn list_newest_first<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Round>, DomainError> {
    let rows = rounds_adapter::list_newest_first(conn).await?;
    Ok(rows.into_iter().map(Round::from).collect())
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
    draw_mode: DrawMode,
    scheduled_start: Option<OffsetDateTime>,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate::new(name, draw_mode).scheduled_at(scheduled_start);
    let round = rounds_adapter::create_round(conn, dto).await?;
    Ok(Round::from(round))
}

/// True when this call moved the round from created to started.
pub async fn mark_started<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    at: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(rounds_adapter::mark_started(conn, round_id, at).await? == 1)
}

/// True when this call ended the round; false if it had already ended.
pub async fn mark_ended<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    at: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(rounds_adapter::mark_ended(conn, round_id, at).await? == 1)
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            draw_mode: model.draw_mode,
            scheduled_start: model.scheduled_start,
            created_at: model.created_at,
            started_at: model.started_at,
            ended_at: model.ended_at,
        }
    }
}
