//! Read side for past and current rounds.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::domain::PrizeKind;
use crate::error::AppError;
use crate::repos::drawn_numbers::{self, DrawnNumber};
use crate::repos::rounds::{self, Round};
use crate::repos::{cards, prizes};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundStats {
    pub round_id: i64,
    pub drawn: u64,
    pub cards: u64,
    pub quinas: u64,
    pub fulls: u64,
}

pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_rounds<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Round>, AppError> {
        Ok(rounds::list_newest_first(conn).await?)
    }

    /// Drawn numbers in draw order.
    pub async fn drawn_numbers<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<Vec<DrawnNumber>, AppError> {
        rounds::require_round(conn, round_id).await?;
        Ok(drawn_numbers::list_by_round(conn, round_id).await?)
    }

    pub async fn round_stats<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<RoundStats, AppError> {
        rounds::require_round(conn, round_id).await?;
        Ok(RoundStats {
            round_id,
            drawn: drawn_numbers::count_by_round(conn, round_id).await?,
            cards: cards::count_by_round(conn, round_id).await?,
            quinas: prizes::count_by_round_and_kind(conn, round_id, PrizeKind::Quina).await?,
            fulls: prizes::count_by_round_and_kind(conn, round_id, PrizeKind::Full).await?,
        })
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
