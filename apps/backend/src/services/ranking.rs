use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::domain::PrizeKind;
use crate::error::AppError;
use crate::repos::{cards, kits, prizes};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub kit_id: String,
    pub name: Option<String>,
    pub cards: i64,
    pub quinas: i64,
    pub fulls: i64,
    pub points: i64,
}

pub struct RankingService;

impl RankingService {
    pub fn new() -> Self {
        Self
    }

    /// Every kit, highest balance first; ties by kit code.
    pub async fn ranking<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<RankingEntry>, AppError> {
        let all_kits = kits::list_all(conn).await?;
        let card_counts: HashMap<String, i64> = cards::count_per_kit(conn).await?.into_iter().collect();
        let points: HashMap<String, i64> = prizes::points_per_kit(conn).await?.into_iter().collect();

        let mut wins: HashMap<(String, PrizeKind), i64> = HashMap::new();
        for (kit_id, kind, n) in prizes::gameplay_counts_per_kit(conn).await? {
            wins.insert((kit_id, kind), n);
        }

        let mut entries: Vec<RankingEntry> = all_kits
            .into_iter()
            .map(|kit| {
                let quinas = wins.get(&(kit.id.clone(), PrizeKind::Quina)).copied();
                let fulls = wins.get(&(kit.id.clone(), PrizeKind::Full)).copied();
                RankingEntry {
                    cards: card_counts.get(&kit.id).copied().unwrap_or(0),
                    points: points.get(&kit.id).copied().unwrap_or(0),
                    quinas: quinas.unwrap_or(0),
                    fulls: fulls.unwrap_or(0),
                    kit_id: kit.id,
                    name: kit.name,
                }
            })
            .collect();

        entries.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.kit_id.cmp(&b.kit_id)));
        Ok(entries)
    }
}

impl Default for RankingService {
    fn default() -> Self {
        Self::new()
    }
}
