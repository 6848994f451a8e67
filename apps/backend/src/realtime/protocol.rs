//! Wire shapes for engine events and inbound commands.
//!
//! Both are closed sets; anything that does not decode into a variant is
//! rejected at the transport boundary.

use serde::{Deserialize, Serialize};

use crate::domain::PrizeKind;

pub const EVENTS_CHANNEL: &str = "bingo:events";
pub const COMMANDS_CHANNEL: &str = "bingo:commands";

/// Events the engine emits, serialized as `{"event": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum EngineEvent {
    #[serde(rename_all = "camelCase")]
    NumberDrawn { number: u8, round_id: i64 },
    #[serde(rename_all = "camelCase")]
    PrizeWon {
        #[serde(rename = "type")]
        kind: PrizeKind,
        kit_id: String,
        card_id: i64,
    },
    #[serde(rename_all = "camelCase")]
    RoundEnded { round_id: i64 },
}

impl EngineEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::NumberDrawn { .. } => "number-drawn",
            EngineEvent::PrizeWon { .. } => "prize-won",
            EngineEvent::RoundEnded { .. } => "round-ended",
        }
    }
}

/// Operator triggers accepted from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineCommand {
    /// Draw on the current round.
    DrawNumber,
    /// Toggle the periodic trigger on the current round.
    AutoDraw { active: bool },
}
