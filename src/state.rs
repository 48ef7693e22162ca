use std::sync::Arc;

use crate::activity::ActivityCalendar;
use crate::api::{HttpApi, MoosementApi};
use crate::auth::account::AccountService;
use crate::auth::session::{init_session, SharedSession, UserSession};
use crate::challenges::ChallengeBoard;
use crate::config::Config;
use crate::error::ClientResult;
use crate::leaderboard::Leaderboard;
use crate::rewards::RewardsLedger;
use crate::teams::TeamService;

/// Shared handles each screen is built from.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn MoosementApi>,
    pub session: SharedSession,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn MoosementApi>) -> Self {
        Self {
            config,
            api,
            session: SharedSession::default(),
        }
    }

    /// State backed by the HTTP client described in `config`.
    pub fn connect(config: Config) -> ClientResult<Self> {
        let api = HttpApi::new(&config)?;
        tracing::info!("Using backend at {}", api.base_url());
        Ok(Self::new(config, Arc::new(api)))
    }

    pub async fn init_session(&self) -> UserSession {
        init_session(&self.session, &self.config.session).await
    }

    pub fn user_id(&self) -> &str {
        &self.config.user.id
    }

    pub fn challenge_board(&self) -> ChallengeBoard {
        ChallengeBoard::new(
            self.api.clone(),
            self.user_id(),
            self.config.challenges.clone(),
        )
    }

    pub fn activity_calendar(&self) -> ActivityCalendar {
        ActivityCalendar::new(self.api.clone(), self.user_id())
    }

    pub fn rewards_ledger(&self) -> RewardsLedger {
        RewardsLedger::new(self.api.clone(), self.user_id())
    }

    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::new(self.api.clone())
    }

    pub fn teams(&self) -> TeamService {
        TeamService::new(self.api.clone(), self.session.clone(), self.user_id())
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.api.clone(), self.session.clone())
    }
}
