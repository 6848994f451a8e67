//! Prize kinds and their point values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::rules::{FULL_POINTS, QUINA_POINTS};
use crate::errors::domain::{DomainError, ValidationKind};

/// Type tag on a prize record.
///
/// `Quina` and `Full` are gameplay awards, unique per (round, kit). The ledger
/// kinds carry operator point adjustments and repeat freely.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeKind {
    Quina,
    Full,
    PointGrant,
    PointDeduction,
}

impl PrizeKind {
    pub const GAMEPLAY: [PrizeKind; 2] = [PrizeKind::Quina, PrizeKind::Full];

    pub fn is_gameplay(self) -> bool {
        matches!(self, PrizeKind::Quina | PrizeKind::Full)
    }

    /// Fixed award for gameplay kinds; ledger kinds carry their own delta.
    pub fn fixed_points(self) -> Option<i32> {
        match self {
            PrizeKind::Quina => Some(QUINA_POINTS),
            PrizeKind::Full => Some(FULL_POINTS),
            PrizeKind::PointGrant | PrizeKind::PointDeduction => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrizeKind::Quina => "quina",
            PrizeKind::Full => "full",
            PrizeKind::PointGrant => "point_grant",
            PrizeKind::PointDeduction => "point_deduction",
        }
    }
}

impl fmt::Display for PrizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrizeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quina" => Ok(PrizeKind::Quina),
            "full" => Ok(PrizeKind::Full),
            "point_grant" => Ok(PrizeKind::PointGrant),
            "point_deduction" => Ok(PrizeKind::PointDeduction),
            other => Err(DomainError::validation(
                ValidationKind::InvalidPrizeKind,
                format!("Unknown prize kind: {other}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gameplay_points_are_fixed() {
        assert_eq!(PrizeKind::Quina.fixed_points(), Some(30));
        assert_eq!(PrizeKind::Full.fixed_points(), Some(100));
        assert_eq!(PrizeKind::PointGrant.fixed_points(), None);
        assert!(!PrizeKind::PointDeduction.is_gameplay());
    }

    #[test]
    fn string_forms_match_serde() {
        for kind in [
            PrizeKind::Quina,
            PrizeKind::Full,
            PrizeKind::PointGrant,
            PrizeKind::PointDeduction,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<PrizeKind>().unwrap(), kind);
        }
        assert!("bingo".parse::<PrizeKind>().is_err());
    }
}
