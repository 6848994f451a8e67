//! Card repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::cards_sea as cards_adapter;
use crate::domain::BingoCard;
use crate::entities::cards;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Card domain model.
///
/// The grid stays in its stored form; [`Card::layout`] parses it so a corrupt
/// row fails on its own instead of failing the whole listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: i64,
    pub kit_id: String,
    pub round_id: i64,
    pub grid: String,
    pub quina_awarded: bool,
    pub full_awarded: bool,
    pub created_at: OffsetDateTime,
}

impl Card {
    pub fn layout(&self) -> Result<BingoCard, DomainError> {
        BingoCard::from_json(&self.grid)
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<Option<Card>, DomainError> {
    Ok(cards_adapter::find_by_id(conn, card_id).await?.map(Card::from))
}

pub async fn require_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<Card, DomainError> {
    find_by_id(conn, card_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Card, format!("Card {card_id} not found"))
    })
}

pub async fn create_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
    round_id: i64,
    layout: &BingoCard,
) -> Result<Card, DomainError> {
    let grid = layout.to_json()?;
    Ok(Card::from(
        cards_adapter::create_card(conn, kit_id, round_id, grid).await?,
    ))
}

pub async fn list_by_kit_and_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    kit_id: &str,
    round_id: i64,
) -> Result<Vec<Card>, DomainError> {
    let rows = cards_adapter::list_by_kit_and_round(conn, kit_id, round_id).await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Card>, DomainError> {
    let rows = cards_adapter::list_by_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

/// Cards still eligible for at least one gameplay prize.
pub async fn list_open_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Card>, DomainError> {
    let rows = cards_adapter::list_open_by_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

pub async fn set_quina_awarded<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<bool, DomainError> {
    Ok(cards_adapter::set_quina_awarded(conn, card_id).await? == 1)
}

pub async fn set_full_awarded<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<bool, DomainError> {
    Ok(cards_adapter::set_full_awarded(conn, card_id).await? == 1)
}

pub async fn count_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(cards_adapter::count_by_round(conn, round_id).await?)
}

pub async fn count_per_kit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(String, i64)>, DomainError> {
    Ok(cards_adapter::count_per_kit(conn).await?)
}

pub async fn delete_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(cards_adapter::delete_by_round(conn, round_id).await?)
}

impl From<cards::Model> for Card {
    fn from(model: cards::Model) -> Self {
        Self {
            id: model.id,
            kit_id: model.kit_id,
            round_id: model.round_id,
            grid: model.grid,
            quina_awarded: model.quina_awarded,
            full_awarded: model.full_awarded,
            created_at: model.created_at,
        }
    }
}
