use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{
    CompletionRequest, CreateTeamRequest, InviteRequest, JoinTeamRequest, LoginRequest,
    MoosementApi, RedeemRequest, RegisterRequest,
};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AccountReceipt, ActivityRecord, Challenge, CompletionReceipt, CreatedTeam, InviteLink,
    LeaderboardEntry, PointsSummary, RedeemReceipt, Reward,
};

#[derive(Deserialize, Default)]
struct RewardList {
    #[serde(default)]
    rewards: Vec<Reward>,
}

#[derive(Deserialize, Default)]
struct ActivityList {
    #[serde(default)]
    challenges: Vec<ActivityRecord>,
}

#[derive(Deserialize, Default)]
struct LeaderboardList {
    #[serde(default)]
    leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// JSON-over-HTTP implementation of the backend calls.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    leaderboard_path: String,
}

impl HttpApi {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let base_url = Url::parse(&config.api.base_url)?;

        let mut builder = Client::builder();
        // 0 keeps reqwest's default of no timeout
        if config.api.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.api.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            leaderboard_path: config.leaderboard.path.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append a path to the base URL, keeping the base's own path prefix.
    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))?)
    }

    async fn get_text(&self, url: Url) -> ClientResult<String> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_body(response).await
    }

    async fn post_text<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> ClientResult<String> {
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        read_body(response).await
    }
}

async fn read_body(response: Response) -> ClientResult<String> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return Ok(text);
    }

    Err(ClientError::Status {
        status: status.as_u16(),
        message: error_message(&text, status),
    })
}

/// Prefer the backend's `{"error": ...}` text, then the raw body, then the reason phrase.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        trimmed.to_string()
    }
}

/// Empty bodies decode to the type's default.
fn decode<T: DeserializeOwned + Default>(text: &str) -> ClientResult<T> {
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(text)?)
}

/// The challenge list arrives either wrapped as `{"challenges": [...]}` or as a
/// bare array. Any other object shape means no challenges. Items that fail to
/// decode are skipped so one bad document does not hide the rest; items
/// without an id take their name as id.
pub(crate) fn parse_challenge_list(text: &str) -> ClientResult<Vec<Challenge>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let items = match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("challenges") {
            Some(Value::Array(items)) => items,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    let mut challenges = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Challenge>(item) {
            Ok(mut challenge) => {
                if challenge.id.is_empty() {
                    challenge.id = challenge.name.clone();
                }
                challenges.push(challenge);
            }
            Err(e) => tracing::warn!("Skipping challenge {}: {}", index, e),
        }
    }
    Ok(challenges)
}

#[async_trait]
impl MoosementApi for HttpApi {
    async fn fetch_challenges(&self) -> ClientResult<Vec<Challenge>> {
        let text = self.get_text(self.endpoint("challenges")?).await?;
        parse_challenge_list(&text)
    }

    async fn complete_challenge(
        &self,
        req: &CompletionRequest,
    ) -> ClientResult<CompletionReceipt> {
        let text = self
            .post_text(self.endpoint("challenges/complete")?, req)
            .await?;
        decode(&text)
    }

    async fn undo_challenge(&self, req: &CompletionRequest) -> ClientResult<()> {
        self.post_text(self.endpoint("challenges/undo")?, req)
            .await?;
        Ok(())
    }

    async fn fetch_activity(&self, user_id: &str) -> ClientResult<Vec<ActivityRecord>> {
        let mut url = self.endpoint("user")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation("Base URL cannot hold a path".into()))?
            .push(user_id)
            .push("challenges");
        let list: ActivityList = decode(&self.get_text(url).await?)?;
        Ok(list.challenges)
    }

    async fn fetch_rewards(&self) -> ClientResult<Vec<Reward>> {
        let list: RewardList = decode(&self.get_text(self.endpoint("rewards/rewards")?).await?)?;
        Ok(list.rewards)
    }

    async fn fetch_points(&self, user_id: &str) -> ClientResult<PointsSummary> {
        let mut url = self.endpoint("users/points")?;
        url.query_pairs_mut().append_pair("user_id", user_id);
        decode(&self.get_text(url).await?)
    }

    async fn redeem_reward(&self, req: &RedeemRequest) -> ClientResult<RedeemReceipt> {
        let text = self.post_text(self.endpoint("rewards/redeem")?, req).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn fetch_leaderboard(&self) -> ClientResult<Vec<LeaderboardEntry>> {
        let url = self.endpoint(&self.leaderboard_path)?;
        let list: LeaderboardList = decode(&self.get_text(url).await?)?;
        Ok(list.leaderboard)
    }

    async fn join_team(&self, invite_code: &str, req: &JoinTeamRequest) -> ClientResult<()> {
        let mut url = self.endpoint("team/accept_invite")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation("Base URL cannot hold a path".into()))?
            .push(invite_code);
        self.post_text(url, req).await?;
        Ok(())
    }

    async fn create_team(&self, req: &CreateTeamRequest) -> ClientResult<CreatedTeam> {
        let text = self.post_text(self.endpoint("teams/create")?, req).await?;
        decode(&text)
    }

    async fn invite(&self, req: &InviteRequest) -> ClientResult<InviteLink> {
        let text = self.post_text(self.endpoint("team/invite")?, req).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn login(&self, req: &LoginRequest) -> ClientResult<AccountReceipt> {
        let text = self.post_text(self.endpoint("login")?, req).await?;
        decode(&text)
    }

    async fn register(&self, req: &RegisterRequest) -> ClientResult<AccountReceipt> {
        let text = self.post_text(self.endpoint("users/register")?, req).await?;
        decode(&text)
    }
}
