//! Kit repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::kits_sea as kits_adapter;
use crate::entities::kits;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Kit domain model: a player's access code and display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kit {
    pub id: String,
    pub name: Option<String>,
    pub created_at: OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
) -> Result<Option<Kit>, DomainError> {
    Ok(kits_adapter::find_by_id(conn, kit_id).await?.map(Kit::from))
}

pub async fn require_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
) -> Result<Kit, DomainError> {
    find_by_id(conn, kit_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Kit, format!("Kit {kit_id} not found")))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Kit>, DomainError> {
    let rows = kits_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Kit::from).collect())
}

pub async fn create_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: String,
    name: Option<String>,
) -> Result<Kit, DomainError> {
    Ok(Kit::from(kits_adapter::create_kit(conn, kit_id, name).await?))
}

impl From<kits::Model> for Kit {
    fn from(model: kits::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
