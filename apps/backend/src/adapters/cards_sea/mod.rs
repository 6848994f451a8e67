//! SeaORM adapter for cards.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::cards;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<Option<cards::Model>, sea_orm::DbErr> {
    cards::Entity::find_by_id(card_id).one(conn).await
}

pub async fn create_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
    round_id: i64,
    grid: String,
) -> Result<cards::Model, sea_orm::DbErr> {
    let card = cards::ActiveModel {
        id: NotSet,
        kit_id: Set(kit_id.to_owned()),
        round_id: Set(round_id),
        grid: Set(grid),
        quina_awarded: Set(false),
        full_awarded: Set(false),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    card.insert(conn).await
}

pub async fn list_by_kit_and_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
    round_id: i64,
) -> Result<Vec<cards::Model>, sea_orm::DbErr> {
    cards::Entity::find()
        .filter(cards::Column::KitId.eq(kit_id))
        .filter(cards::Column::RoundId.eq(round_id))
        .order_by_asc(cards::Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<cards::Model>, sea_orm::DbErr> {
    cards::Entity::find()
        .filter(cards::Column::RoundId.eq(round_id))
        .order_by_asc(cards::Column::Id)
        .all(conn)
        .await
}

/// Cards of a round with at least one award flag still unset.
pub async fn list_open_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<cards::Model>, sea_orm::DbErr> {
    cards::Entity::find()
        .filter(cards::Column::RoundId.eq(round_id))
        .filter(
            Condition::any()
                .add(cards::Column::QuinaAwarded.eq(false))
                .add(cards::Column::FullAwarded.eq(false)),
        )
        .order_by_asc(cards::Column::Id)
        .all(conn)
        .await
}

/// Flip `quina_awarded` to true. Never clears it; returns rows changed.
pub async fn set_quina_awarded<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = cards::Entity::update_many()
        .col_expr(cards::Column::QuinaAwarded, Expr::value(true))
        .filter(cards::Column::Id.eq(card_id))
        .filter(cards::Column::QuinaAwarded.eq(false))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Flip `full_awarded` to true. Never clears it; returns rows changed.
pub async fn set_full_awarded<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = cards::Entity::update_many()
        .col_expr(cards::Column::FullAwarded, Expr::value(true))
        .filter(cards::Column::Id.eq(card_id))
        .filter(cards::Column::FullAwarded.eq(false))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn count_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    cards::Entity::find()
        .filter(cards::Column::RoundId.eq(round_id))
        .count(conn)
        .await
}

/// Card counts per kit across all rounds.
pub async fn count_per_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, i64)>, sea_orm::DbErr> {
    cards::Entity::find()
        .select_only()
        .column(cards::Column::KitId)
        .column_as(cards::Column::Id.count(), "cards")
        .group_by(cards::Column::KitId)
        .into_tuple()
        .all(conn)
        .await
}

pub async fn delete_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = cards::Entity::delete_many()
        .filter(cards::Column::RoundId.eq(round_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
