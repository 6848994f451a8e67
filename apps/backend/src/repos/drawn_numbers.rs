//! Drawn number repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::drawn_numbers_sea as drawn_adapter;
use crate::domain::DrawnSet;
use crate::entities::drawn_numbers;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::rounds;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnNumber {
    pub id: i64,
    pub round_id: i64,
    pub number: u8,
    pub drawn_at: OffsetDateTime,
}

/// Persist a drawn number; a repeat for the round surfaces as `Conflict(DuplicateDraw)`.
///
/// Ended rounds are immutable: the insert is refused with `Validation(RoundEnded)`.
pub async fn insert_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    number: u8,
) -> Result<DrawnNumber, DomainError> {
    rounds::require_open_round(conn, round_id).await?;
    DrawnNumber::try_from(drawn_adapter::insert_number(conn, round_id, number).await?)
}

/// Drawn numbers in the order they were persisted.
pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<DrawnNumber>, DomainError> {
    drawn_adapter::list_by_round(conn, round_id)
        .await?
        .into_iter()
        .map(DrawnNumber::try_from)
        .collect()
}

pub async fn load_set<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<DrawnSet, DomainError> {
    Ok(list_by_round(conn, round_id)
        .await?
        .into_iter()
        .map(|d| d.number)
        .collect())
}

pub async fn count_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(drawn_adapter::count_by_round(conn, round_id).await?)
}

pub async fn delete_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(drawn_adapter::delete_by_round(conn, round_id).await?)
}

impl TryFrom<drawn_numbers::Model> for DrawnNumber {
    type Error = DomainError;

    fn try_from(model: drawn_numbers::Model) -> Result<Self, Self::Error> {
        let number = u8::try_from(model.number)
            .ok()
            .filter(|n| (1..=75).contains(n))
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("drawn number {} out of range", model.number),
                )
            })?;
        Ok(Self {
            id: model.id,
            round_id: model.round_id,
            number,
            drawn_at: model.drawn_at,
        })
    }
}
