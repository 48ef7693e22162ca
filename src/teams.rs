use std::sync::Arc;

use crate::api::{CreateTeamRequest, InviteRequest, JoinTeamRequest, MoosementApi};
use crate::auth::account::require;
use crate::auth::session::SharedSession;
use crate::error::ClientResult;
use crate::models::{CreatedTeam, InviteLink};

/// Form fields for a new team.
#[derive(Debug, Clone, Default)]
pub struct NewTeam {
    pub name: String,
    pub privacy: String,
    pub description: Option<String>,
    pub company_id: Option<String>,
}

/// Join, create and invite. Joining or creating moves the session past onboarding.
pub struct TeamService {
    api: Arc<dyn MoosementApi>,
    session: SharedSession,
    user_id: String,
}

impl TeamService {
    pub fn new(api: Arc<dyn MoosementApi>, session: SharedSession, user_id: impl Into<String>) -> Self {
        Self {
            api,
            session,
            user_id: user_id.into(),
        }
    }

    pub async fn join(&self, code: &str) -> ClientResult<()> {
        let code = require(code, "Team code")?;
        let request = JoinTeamRequest {
            user_id: self.user_id.clone(),
        };
        self.api.join_team(&code, &request).await?;
        tracing::info!("User {} joined team with code {}", self.user_id, code);
        self.session.lock().await.has_team = true;
        Ok(())
    }

    pub async fn create(&self, team: NewTeam) -> ClientResult<CreatedTeam> {
        let request = CreateTeamRequest {
            name: require(&team.name, "Team name")?,
            creator_id: self.user_id.clone(),
            company_id: team.company_id.filter(|c| !c.trim().is_empty()),
            privacy: team.privacy,
            description: team.description.filter(|d| !d.trim().is_empty()),
        };
        let created = self.api.create_team(&request).await?;
        tracing::info!("Created team {} ({:?})", request.name, created.team_id);
        self.session.lock().await.has_team = true;
        Ok(created)
    }

    pub async fn invite(&self) -> ClientResult<InviteLink> {
        let request = InviteRequest {
            user_id: self.user_id.clone(),
        };
        self.api.invite(&request).await
    }
}
