//! Card purchase and listing.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;

use crate::domain::{deal_card, BingoCard};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{cards, kits, rounds};

/// A card with its parsed grid, as shown to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: i64,
    pub kit_id: String,
    pub round_id: i64,
    pub layout: BingoCard,
    pub quina_awarded: bool,
    pub full_awarded: bool,
}

impl TryFrom<cards::Card> for CardView {
    type Error = DomainError;

    fn try_from(card: cards::Card) -> Result<Self, Self::Error> {
        let layout = card.layout()?;
        Ok(Self {
            id: card.id,
            kit_id: card.kit_id,
            round_id: card.round_id,
            layout,
            quina_awarded: card.quina_awarded,
            full_awarded: card.full_awarded,
        })
    }
}

pub struct CardService;

impl CardService {
    pub fn new() -> Self {
        Self
    }

    /// Deal a fresh random card to `kit_id` in the open round.
    pub async fn buy_card<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        kit_id: &str,
    ) -> Result<CardView, AppError> {
        let round = rounds::find_open(conn).await?.ok_or_else(|| {
            DomainError::validation(ValidationKind::RoundNotActive, "No open round to buy cards for")
        })?;
        kits::require_kit(conn, kit_id).await?;

        let layout = deal_card(&mut rand::rng());
        let card = cards::create_card(conn, kit_id, round.id, &layout).await?;

        info!(kit_id, round_id = round.id, card_id = card.id, "Card bought");
        Ok(CardView::try_from(card)?)
    }

    pub async fn list_cards<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        kit_id: &str,
        round_id: i64,
    ) -> Result<Vec<CardView>, AppError> {
        let rows = cards::list_by_kit_and_round(conn, kit_id, round_id).await?;
        let views = rows
            .into_iter()
            .map(CardView::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }
}

impl Default for CardService {
    fn default() -> Self {
        Self::new()
    }
}
