//! Error codes for the bingo engine.
//!
//! Every failure surfaced to callers carries one of these codes. Add new codes
//! here; never pass ad-hoc strings as error codes.
//!
//! All codes are SCREAMING_SNAKE_CASE so a transport layer can forward them
//! verbatim.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation
    /// Card grid is malformed (bad shape, out-of-band number, missing wildcard)
    InvalidCardLayout,
    /// Round is not in a phase that accepts the operation
    RoundNotActive,
    /// Round has ended and is immutable
    RoundEnded,
    /// All 75 numbers have been drawn
    RoundExhausted,
    /// Kit access code is malformed
    InvalidKitCode,
    /// Point amount is zero or has the wrong sign for the ledger kind
    InvalidPoints,
    /// Prize kind string is not recognised
    InvalidPrizeKind,
    /// General validation error
    ValidationError,

    // Not found
    RoundNotFound,
    KitNotFound,
    CardNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Number already drawn in this round
    DuplicateDraw,
    /// Gameplay prize already exists for (round, kit, kind)
    DuplicatePrize,
    /// Another round is still open
    RoundInProgress,
    /// Generated kit code collided with an existing one
    KitCodeConflict,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System
    DbError,
    DbUnavailable,
    DbTimeout,
    /// Realtime transport failed to deliver
    TransportError,
    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCardLayout => "INVALID_CARD_LAYOUT",
            Self::RoundNotActive => "ROUND_NOT_ACTIVE",
            Self::RoundEnded => "ROUND_ENDED",
            Self::RoundExhausted => "ROUND_EXHAUSTED",
            Self::InvalidKitCode => "INVALID_KIT_CODE",
            Self::InvalidPoints => "INVALID_POINTS",
            Self::InvalidPrizeKind => "INVALID_PRIZE_KIND",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::KitNotFound => "KIT_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicateDraw => "DUPLICATE_DRAW",
            Self::DuplicatePrize => "DUPLICATE_PRIZE",
            Self::RoundInProgress => "ROUND_IN_PROGRESS",
            Self::KitCodeConflict => "KIT_CODE_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::TransportError => "TRANSPORT_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
