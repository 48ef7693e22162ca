pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ClientResult;
use crate::models::{
    AccountReceipt, ActivityRecord, Challenge, CompletionReceipt, CreatedTeam, InviteLink,
    LeaderboardEntry, PointsSummary, RedeemReceipt, Reward,
};

pub use self::http::HttpApi;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub user_id: String,
    pub challenge_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedeemRequest {
    pub user_id: String,
    pub reward_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinTeamRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub creator_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub privacy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The backend calls the screens make. One implementation talks HTTP; tests
/// substitute an in-memory one.
#[async_trait]
pub trait MoosementApi: Send + Sync {
    async fn fetch_challenges(&self) -> ClientResult<Vec<Challenge>>;

    async fn complete_challenge(&self, req: &CompletionRequest)
        -> ClientResult<CompletionReceipt>;

    async fn undo_challenge(&self, req: &CompletionRequest) -> ClientResult<()>;

    async fn fetch_activity(&self, user_id: &str) -> ClientResult<Vec<ActivityRecord>>;

    async fn fetch_rewards(&self) -> ClientResult<Vec<Reward>>;

    async fn fetch_points(&self, user_id: &str) -> ClientResult<PointsSummary>;

    async fn redeem_reward(&self, req: &RedeemRequest) -> ClientResult<RedeemReceipt>;

    async fn fetch_leaderboard(&self) -> ClientResult<Vec<LeaderboardEntry>>;

    async fn join_team(&self, invite_code: &str, req: &JoinTeamRequest) -> ClientResult<()>;

    async fn create_team(&self, req: &CreateTeamRequest) -> ClientResult<CreatedTeam>;

    async fn invite(&self, req: &InviteRequest) -> ClientResult<InviteLink>;

    async fn login(&self, req: &LoginRequest) -> ClientResult<AccountReceipt>;

    async fn register(&self, req: &RegisterRequest) -> ClientResult<AccountReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_omits_absent_photo() {
        let req = CompletionRequest {
            user_id: "u1".into(),
            challenge_id: "c1".into(),
            verification_photo: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"user_id": "u1", "challenge_id": "c1"})
        );
    }

    #[test]
    fn completion_request_carries_photo_reference() {
        let req = CompletionRequest {
            user_id: "u1".into(),
            challenge_id: "c1".into(),
            verification_photo: Some("file:///tmp/walk.jpg".into()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["verification_photo"], "file:///tmp/walk.jpg");
    }
}
