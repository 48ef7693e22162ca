use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    CompletionRequest, CreateTeamRequest, InviteRequest, JoinTeamRequest, LoginRequest,
    MoosementApi, RedeemRequest, RegisterRequest,
};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AccountReceipt, ActivityRecord, Challenge, CompletionReceipt, CreatedTeam, InviteLink,
    LeaderboardEntry, PointsSummary, RedeemReceipt, Reward,
};

/// Canned backend state for unit tests.
#[derive(Default)]
pub struct FakeState {
    /// `None` makes the fetch fail with a 500.
    pub challenges: Option<Vec<Challenge>>,
    pub activity: Vec<ActivityRecord>,
    pub rewards: Vec<Reward>,
    pub points: PointsSummary,
    pub remaining_points: Option<i64>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub fail_writes: bool,
    pub fail_reads: bool,
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

fn server_error(message: &str) -> ClientError {
    ClientError::Status {
        status: 500,
        message: message.to_string(),
    }
}

impl FakeApi {
    pub fn new(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn calls(&self) -> Vec<String> {
        self.with(|s| s.calls.clone())
    }

    fn record(&self, call: String) -> (bool, bool) {
        self.with(|s| {
            s.calls.push(call);
            (s.fail_reads, s.fail_writes)
        })
    }

    fn write(&self, call: String) -> ClientResult<()> {
        let (_, fail_writes) = self.record(call);
        if fail_writes {
            return Err(server_error("write failed"));
        }
        Ok(())
    }

    fn read(&self, call: String) -> ClientResult<()> {
        let (fail_reads, _) = self.record(call);
        if fail_reads {
            return Err(server_error("read failed"));
        }
        Ok(())
    }
}

#[async_trait]
impl MoosementApi for FakeApi {
    async fn fetch_challenges(&self) -> ClientResult<Vec<Challenge>> {
        self.read("GET /challenges".into())?;
        self.with(|s| s.challenges.clone())
            .ok_or_else(|| server_error("challenges unavailable"))
    }

    async fn complete_challenge(
        &self,
        req: &CompletionRequest,
    ) -> ClientResult<CompletionReceipt> {
        self.write(format!("POST /challenges/complete {}", req.challenge_id))?;
        Ok(CompletionReceipt {
            message: Some("Challenge completed successfully".into()),
            ..Default::default()
        })
    }

    async fn undo_challenge(&self, req: &CompletionRequest) -> ClientResult<()> {
        self.write(format!("POST /challenges/undo {}", req.challenge_id))
    }

    async fn fetch_activity(&self, user_id: &str) -> ClientResult<Vec<ActivityRecord>> {
        self.read(format!("GET /user/{}/challenges", user_id))?;
        Ok(self.with(|s| s.activity.clone()))
    }

    async fn fetch_rewards(&self) -> ClientResult<Vec<Reward>> {
        self.read("GET /rewards/rewards".into())?;
        Ok(self.with(|s| s.rewards.clone()))
    }

    async fn fetch_points(&self, user_id: &str) -> ClientResult<PointsSummary> {
        self.read(format!("GET /users/points {}", user_id))?;
        Ok(self.with(|s| s.points.clone()))
    }

    async fn redeem_reward(&self, req: &RedeemRequest) -> ClientResult<RedeemReceipt> {
        self.write(format!("POST /rewards/redeem {}", req.reward_name))?;
        let remaining = self
            .with(|s| s.remaining_points)
            .ok_or_else(|| server_error("no remaining balance configured"))?;
        Ok(RedeemReceipt {
            remaining_points: remaining,
            message: None,
        })
    }

    async fn fetch_leaderboard(&self) -> ClientResult<Vec<LeaderboardEntry>> {
        self.read("GET /teams/new_leaderboard".into())?;
        Ok(self.with(|s| s.leaderboard.clone()))
    }

    async fn join_team(&self, invite_code: &str, _req: &JoinTeamRequest) -> ClientResult<()> {
        self.write(format!("POST /team/accept_invite/{}", invite_code))
    }

    async fn create_team(&self, req: &CreateTeamRequest) -> ClientResult<CreatedTeam> {
        self.write(format!("POST /teams/create {}", req.name))?;
        Ok(CreatedTeam {
            team_id: Some("team-1".into()),
            message: None,
        })
    }

    async fn invite(&self, req: &InviteRequest) -> ClientResult<InviteLink> {
        self.write(format!("POST /team/invite {}", req.user_id))?;
        Ok(InviteLink {
            invite_link: "http://localhost/api/team/accept_invite/abc123".into(),
        })
    }

    async fn login(&self, req: &LoginRequest) -> ClientResult<AccountReceipt> {
        self.write(format!("POST /login {}", req.email))?;
        Ok(AccountReceipt {
            user_id: Some("user-1".into()),
            message: None,
        })
    }

    async fn register(&self, req: &RegisterRequest) -> ClientResult<AccountReceipt> {
        self.write(format!("POST /users/register {}", req.email))?;
        Ok(AccountReceipt {
            user_id: Some("user-2".into()),
            message: None,
        })
    }
}
