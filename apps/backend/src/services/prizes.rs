//! Prize claims and the operator point ledger.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::PrizeKind;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::prizes::{self, Prize};
use crate::repos::{kits, rounds};

pub struct PrizeService;

impl PrizeService {
    pub fn new() -> Self {
        Self
    }

    /// Mark the kit's `kind` prize in the round as handed out.
    pub async fn claim<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
        kit_id: &str,
        kind: PrizeKind,
    ) -> Result<u64, AppError> {
        if !kind.is_gameplay() {
            return Err(DomainError::validation(
                ValidationKind::InvalidPrizeKind,
                format!("{kind} prizes cannot be claimed"),
            )
            .into());
        }
        rounds::require_round(conn, round_id).await?;

        let updated = prizes::mark_claimed(conn, round_id, kit_id, kind).await?;
        if updated == 0 {
            return Err(DomainError::not_found(
                NotFoundKind::Other("Prize".into()),
                format!("No {kind} prize for kit {kit_id} in round {round_id}"),
            )
            .into());
        }
        info!(round_id, kit_id, %kind, "Prize claimed");
        Ok(updated)
    }

    pub async fn grant_points<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        kit_id: &str,
        points: i32,
    ) -> Result<Prize, AppError> {
        self.record(conn, kit_id, PrizeKind::PointGrant, points).await
    }

    /// `points` is the positive amount taken away; it is stored negated.
    pub async fn deduct_points<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        kit_id: &str,
        points: i32,
    ) -> Result<Prize, AppError> {
        self.record(conn, kit_id, PrizeKind::PointDeduction, points).await
    }

    pub async fn list_for_kit<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        kit_id: &str,
    ) -> Result<Vec<Prize>, AppError> {
        Ok(prizes::list_by_kit(conn, kit_id).await?)
    }

    async fn record<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        kit_id: &str,
        kind: PrizeKind,
        points: i32,
    ) -> Result<Prize, AppError> {
        if points <= 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPoints,
                format!("Point amount must be positive, got {points}"),
            )
            .into());
        }
        kits::require_kit(conn, kit_id).await?;

        let signed = match kind {
            PrizeKind::PointDeduction => -points,
            _ => points,
        };
        let entry = prizes::insert_ledger(conn, kit_id, kind, signed).await?;
        info!(kit_id, %kind, points = signed, "Ledger entry recorded");
        Ok(entry)
    }
}

impl Default for PrizeService {
    fn default() -> Self {
        Self::new()
    }
}
