//! SeaORM adapter for prizes and the point ledger.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::prizes::{self, PrizeKind};

pub mod dto;

pub use dto::PrizeCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Insert a prize row. Gameplay kinds hit the (round, kit, kind) partial unique index.
pub async fn insert_prize<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PrizeCreate,
) -> Result<prizes::Model, sea_orm::DbErr> {
    let prize = prizes::ActiveModel {
        id: NotSet,
        kit_id: Set(dto.kit_id),
        card_id: Set(dto.card_id),
        round_id: Set(dto.round_id),
        kind: Set(dto.kind),
        points: Set(dto.points),
        claimed: Set(false),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    prize.insert(conn).await
}

pub async fn find_for_round_kit_kind<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    kit_id: &str,
    kind: PrizeKind,
) -> Result<Option<prizes::Model>, sea_orm::DbErr> {
    prizes::Entity::find()
        .filter(prizes::Column::RoundId.eq(round_id))
        .filter(prizes::Column::KitId.eq(kit_id))
        .filter(prizes::Column::Kind.eq(kind))
        .one(conn)
        .await
}

pub async fn count_by_round_and_kind<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    kind: PrizeKind,
) -> Result<u64, sea_orm::DbErr> {
    prizes::Entity::find()
        .filter(prizes::Column::RoundId.eq(round_id))
        .filter(prizes::Column::Kind.eq(kind))
        .count(conn)
        .await
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<prizes::Model>, sea_orm::DbErr> {
    prizes::Entity::find()
        .filter(prizes::Column::RoundId.eq(round_id))
        .order_by_asc(prizes::Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
) -> Result<Vec<prizes::Model>, sea_orm::DbErr> {
    prizes::Entity::find()
        .filter(prizes::Column::KitId.eq(kit_id))
        .order_by_asc(prizes::Column::Id)
        .all(conn)
        .await
}

/// Sum of point deltas for a kit across every round and ledger entry.
pub async fn sum_points_for_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
) -> Result<i64, sea_orm::DbErr> {
    let total: Option<Option<i64>> = prizes::Entity::find()
        .select_only()
        .column_as(prizes::Column::Points.sum(), "points")
        .filter(prizes::Column::KitId.eq(kit_id))
        .into_tuple()
        .one(conn)
        .await?;
    Ok(total.flatten().unwrap_or(0))
}

/// (kit_id, points) for every kit holding at least one prize row.
pub async fn points_per_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, Option<i64>)>, sea_orm::DbErr> {
    prizes::Entity::find()
        .select_only()
        .column(prizes::Column::KitId)
        .column_as(prizes::Column::Points.sum(), "points")
        .group_by(prizes::Column::KitId)
        .into_tuple()
        .all(conn)
        .await
}

/// (kit_id, kind, count) over gameplay prizes.
pub async fn gameplay_counts_per_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, PrizeKind, i64)>, sea_orm::DbErr> {
    prizes::Entity::find()
        .select_only()
        .column(prizes::Column::KitId)
        .column(prizes::Column::Kind)
        .column_as(prizes::Column::Id.count(), "total")
        .filter(prizes::Column::Kind.is_in([PrizeKind::Quina, PrizeKind::Full]))
        .group_by(prizes::Column::KitId)
        .group_by(prizes::Column::Kind)
        .into_tuple()
        .all(conn)
        .await
}

/// Mark a kit's prizes of one kind in a round as claimed; returns rows changed.
pub async fn mark_claimed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    kit_id: &str,
    kind: PrizeKind,
) -> Result<u64, sea_orm::DbErr> {
    let res = prizes::Entity::update_many()
        .col_expr(prizes::Column::Claimed, Expr::value(true))
        .filter(prizes::Column::RoundId.eq(round_id))
        .filter(prizes::Column::KitId.eq(kit_id))
        .filter(prizes::Column::Kind.eq(kind))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = prizes::Entity::delete_many()
        .filter(prizes::Column::RoundId.eq(round_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
