use std::sync::Arc;

use crate::api::MoosementApi;
use crate::error::ClientResult;
use crate::models::LeaderboardEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTeam<'a> {
    pub rank: usize,
    pub team_id: &'a str,
    pub name: &'a str,
    pub score: i64,
}

/// Attach 1-based rank labels in the order given. No re-sorting: the server
/// decides the order, ties included.
pub fn rank_entries(entries: &[LeaderboardEntry]) -> Vec<RankedTeam<'_>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| RankedTeam {
            rank: i + 1,
            team_id: &entry.team_id,
            name: entry.display_name(),
            score: entry.total_team_points,
        })
        .collect()
}

pub struct Leaderboard {
    api: Arc<dyn MoosementApi>,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(api: Arc<dyn MoosementApi>) -> Self {
        Self {
            api,
            entries: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> ClientResult<usize> {
        self.entries = self.api.fetch_leaderboard().await.map_err(|e| {
            tracing::error!("Error fetching leaderboard: {}", e);
            e
        })?;
        Ok(self.entries.len())
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn ranked(&self) -> Vec<RankedTeam<'_>> {
        rank_entries(&self.entries)
    }
}
