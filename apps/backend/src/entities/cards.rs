use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "kit_id")]
    pub kit_id: String,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    /// Column-major JSON grid.
    #[sea_orm(column_type = "Text")]
    pub grid: String,
    #[sea_orm(column_name = "quina_awarded")]
    pub quina_awarded: bool,
    #[sea_orm(column_name = "full_awarded")]
    pub full_awarded: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kits::Entity",
        from = "Column::KitId",
        to = "super::kits::Column::Id"
    )]
    Kit,
    #[sea_orm(
        belongs_to = "super::rounds::Entity",
        from = "Column::RoundId",
        to = "super::rounds::Column::Id"
    )]
    Round,
}

impl Related<super::kits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kit.def()
    }
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
