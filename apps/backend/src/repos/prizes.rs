//! Prize and point ledger repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::prizes_sea as prizes_adapter;
use crate::domain::PrizeKind;
use crate::entities::prizes::{self, PrizeKind as DbPrizeKind};
use crate::errors::domain::DomainError;
use crate::repos::rounds;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prize {
    pub id: i64,
    pub kit_id: String,
    pub card_id: Option<i64>,
    pub round_id: Option<i64>,
    pub kind: PrizeKind,
    pub points: i32,
    pub claimed: bool,
    pub created_at: OffsetDateTime,
}

/// Gameplay award row; a second award for the same (round, kit, kind) fails
/// with `Conflict(DuplicatePrize)`. Ended rounds take no new awards.
pub async fn insert_award<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    kit_id: &str,
    card_id: i64,
    kind: PrizeKind,
    points: i32,
) -> Result<Prize, DomainError> {
    rounds::require_open_round(conn, round_id).await?;
    let dto = prizes_adapter::PrizeCreate::award(kit_id, card_id, round_id, kind.into(), points);
    Ok(Prize::from(prizes_adapter::insert_prize(conn, dto).await?))
}

/// Ledger row (grant or deduction) with no round or card.
pub async fn insert_ledger<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
    kind: PrizeKind,
    points: i32,
) -> Result<Prize, DomainError> {
    let dto = prizes_adapter::PrizeCreate::ledger(kit_id, kind.into(), points);
    Ok(Prize::from(prizes_adapter::insert_prize(conn, dto).await?))
}

pub async fn find_for_round_kit_kind<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    kit_id: &str,
    kind: PrizeKind,
) -> Result<Option<Prize>, DomainError> {
    let row = prizes_adapter::find_for_round_kit_kind(conn, round_id, kit_id, kind.into()).await?;
    Ok(row.map(Prize::from))
}

pub async fn count_by_round_and_kind<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    kind: PrizeKind,
) -> Result<u64, DomainError> {
    Ok(prizes_adapter::count_by_round_and_kind(conn, round_id, kind.into()).await?)
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Prize>, DomainError> {
    let rows = prizes_adapter::list_by_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Prize::from).collect())
}

pub async fn list_by_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
) -> Result<Vec<Prize>, DomainError> {
    let rows = prizes_adapter::list_by_kit(conn, kit_id).await?;
    Ok(rows.into_iter().map(Prize::from).collect())
}

pub async fn sum_points_for_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
) -> Result<i64, DomainError> {
    Ok(prizes_adapter::sum_points_for_kit(conn, kit_id).await?)
}

pub async fn points_per_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, i64)>, DomainError> {
    let rows = prizes_adapter::points_per_kit(conn).await?;
    Ok(rows
        .into_iter()
        .map(|(kit, points)| (kit, points.unwrap_or(0)))
        .collect())
}

pub async fn gameplay_counts_per_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, PrizeKind, i64)>, DomainError> {
    let rows = prizes_adapter::gameplay_counts_per_kit(conn).await?;
    Ok(rows
        .into_iter()
        .map(|(kit, kind, n)| (kit, kind.into(), n))
        .collect())
}

pub async fn mark_claimed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    kit_id: &str,
    kind: PrizeKind,
) -> Result<u64, DomainError> {
    Ok(prizes_adapter::mark_claimed(conn, round_id, kit_id, kind.into()).await?)
}

pub async fn delete_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(prizes_adapter::delete_by_round(conn, round_id).await?)
}

impl From<PrizeKind> for DbPrizeKind {
    fn from(kind: PrizeKind) -> Self {
        match kind {
            PrizeKind::Quina => DbPrizeKind::Quina,
            PrizeKind::Full => DbPrizeKind::Full,
            PrizeKind::PointGrant => DbPrizeKind::PointGrant,
            PrizeKind::PointDeduction => DbPrizeKind::PointDeduction,
        }
    }
}

impl From<DbPrizeKind> for PrizeKind {
    fn from(kind: DbPrizeKind) -> Self {
        match kind {
            DbPrizeKind::Quina => PrizeKind::Quina,
            DbPrizeKind::Full => PrizeKind::Full,
            DbPrizeKind::PointGrant => PrizeKind::PointGrant,
            DbPrizeKind::PointDeduction => PrizeKind::PointDeduction,
        }
    }
}

impl From<prizes::Model> for Prize {
    fn from(model: prizes::Model) -> Self {
        Self {
            id: model.id,
            kit_id: model.kit_id,
            card_id: model.card_id,
            round_id: model.round_id,
            kind: model.kind.into(),
            points: model.points,
            claimed: model.claimed,
            created_at: model.created_at,
        }
    }
}
