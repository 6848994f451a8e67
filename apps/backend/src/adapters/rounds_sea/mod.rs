//! SeaORM adapter for rounds repository.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::rounds;

pub mod dto;

pub use dto::RoundCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Find a round by ID
pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

/// Find round by ID or return RecordNotFound error.
pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<rounds::Model, sea_orm::DbErr> {
    find_by_id(conn, round_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Round {round_id} not found")))
}

/// Latest round that has not ended, if any.
pub async fn find_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::EndedAt.is_null())
        .order_by_desc(rounds::Column::Id)
        .one(conn)
        .await
}

/// All rounds, newest first.
pub async fn list_newest_first<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .order_by_desc(rounds::Column::CreatedAt)
        .order_by_desc(rounds::Column::Id)
        .all(conn)
        .await
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let round = rounds::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        draw_mode: Set(dto.draw_mode),
        scheduled_start: Set(dto.scheduled_start),
        created_at: Set(now),
        started_at: Set(None),
        ended_at: Set(None),
    };
    round.insert(conn).await
}

/// Set `started_at` on a round that has neither started nor ended.
///
/// Returns the number of rows changed (0 or 1).
pub async fn mark_started<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    at: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let res = rounds::Entity::update_many()
        .col_expr(rounds::Column::StartedAt, Expr::value(at))
        .filter(rounds::Column::Id.eq(round_id))
        .filter(rounds::Column::StartedAt.is_null())
        .filter(rounds::Column::EndedAt.is_null())
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Set `ended_at` once; an already-ended round is left untouched.
pub async fn mark_ended<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    at: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let res = rounds::Entity::update_many()
        .col_expr(rounds::Column::EndedAt, Expr::value(at))
        .filter(rounds::Column::Id.eq(round_id))
        .filter(rounds::Column::EndedAt.is_null())
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
