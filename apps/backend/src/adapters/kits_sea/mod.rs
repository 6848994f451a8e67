//! SeaORM adapter for kits.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::kits;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
) -> Result<Option<kits::Model>, sea_orm::DbErr> {
    kits::Entity::find_by_id(kit_id.to_owned()).one(conn).await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<kits::Model>, sea_orm::DbErr> {
    kits::Entity::find()
        .order_by_asc(kits::Column::CreatedAt)
        .order_by_asc(kits::Column::Id)
        .all(conn)
        .await
}

pub async fn create_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: String,
    name: Option<String>,
) -> Result<kits::Model, sea_orm::DbErr> {
    let kit = kits::ActiveModel {
        id: Set(kit_id),
        name: Set(name),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    kit.insert(conn).await
}
