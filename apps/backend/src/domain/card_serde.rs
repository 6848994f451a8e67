//! Serialization for cards.
//!
//! A card is stored and sent as a column-major JSON array of five columns;
//! numbers are JSON integers and the center is the string `"FREE"`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::card_types::{BingoCard, Cell};
use crate::domain::rules::GRID_SIZE;
use crate::errors::domain::{DomainError, ValidationKind};

const FREE_MARK: &str = "FREE";

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Number(n) => serializer.serialize_u8(*n),
            Cell::Free => serializer.serialize_str(FREE_MARK),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Number(u8),
    Mark(String),
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawCell::deserialize(deserializer)? {
            RawCell::Number(n) => Ok(Cell::Number(n)),
            RawCell::Mark(s) if s == FREE_MARK => Ok(Cell::Free),
            RawCell::Mark(s) => Err(D::Error::custom(format!("Invalid cell: {s}"))),
        }
    }
}

impl Serialize for BingoCard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.columns().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BingoCard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let columns = <[[Cell; GRID_SIZE]; GRID_SIZE]>::deserialize(deserializer)?;
        BingoCard::from_columns(columns).map_err(D::Error::custom)
    }
}

impl BingoCard {
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::validation(ValidationKind::InvalidCardLayout, e.to_string()))
    }

    /// Parse a stored grid; any shape or layout problem is `InvalidCardLayout`.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(ValidationKind::InvalidCardLayout, e.to_string()))
    }
}
