//! SeaORM adapter for drawn numbers.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::drawn_numbers;

/// Insert one drawn number. The (round_id, number) unique index rejects repeats.
pub async fn insert_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    number: u8,
) -> Result<drawn_numbers::Model, sea_orm::DbErr> {
    let row = drawn_numbers::ActiveModel {
        id: NotSet,
        round_id: Set(round_id),
        number: Set(i16::from(number)),
        drawn_at: Set(OffsetDateTime::now_utc()),
    };
    row.insert(conn).await
}

/// Drawn numbers of a round in persistence order.
pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<drawn_numbers::Model>, sea_orm::DbErr> {
    drawn_numbers::Entity::find()
        .filter(drawn_numbers::Column::RoundId.eq(round_id))
        .order_by_asc(drawn_numbers::Column::Id)
        .all(conn)
        .await
}

pub async fn count_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    drawn_numbers::Entity::find()
        .filter(drawn_numbers::Column::RoundId.eq(round_id))
        .count(conn)
        .await
}

pub async fn delete_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = drawn_numbers::Entity::delete_many()
        .filter(drawn_numbers::Column::RoundId.eq(round_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
