use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::challenges::difficulty::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Empty when the backend projects `_id` away; see `parse_challenge_list`.
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "whole_points")]
    pub points: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_photo: Option<String>,
}

/// Point values are stored as doubles by some backends (`30.0`).
/// Fractions truncate toward zero.
fn whole_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(points) = number.as_i64() {
        return Ok(points);
    }
    match number.as_f64() {
        Some(points) if points.is_finite() => Ok(points as i64),
        _ => Err(de::Error::custom(format!("invalid points value {}", number))),
    }
}

impl Challenge {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_points(self.points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub name: String,
    #[serde(alias = "points")]
    pub points_required: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(alias = "id")]
    pub team_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(alias = "score", default)]
    pub total_team_points: i64,
}

impl LeaderboardEntry {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.team_id)
    }
}

/// One day of a user's completed-challenge history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub date: NaiveDate,
    pub activity: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RedeemedReward {
    pub reward_name: String,
    #[serde(default)]
    pub points_spent: Option<i64>,
    #[serde(default)]
    pub redeemed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointsSummary {
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub redeemed_rewards: Vec<RedeemedReward>,
}

/// Body of a successful `/challenges/complete` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompletionReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub points_earned: Option<i64>,
    #[serde(default)]
    pub current_streak: Option<u32>,
    #[serde(default)]
    pub total_points: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeemReceipt {
    pub remaining_points: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreatedTeam {
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteLink {
    pub invite_link: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountReceipt {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
