use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::SessionConfig;

/// Process-wide sign-in state. `authenticated` is `None` until the check settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserSession {
    pub authenticated: Option<bool>,
    pub has_team: bool,
}

/// Which group of screens the session gate lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenStack {
    Loading,
    Auth,
    TeamOnboarding,
    Main,
}

impl UserSession {
    pub fn stack(&self) -> ScreenStack {
        match (self.authenticated, self.has_team) {
            (None, _) => ScreenStack::Loading,
            (Some(false), _) => ScreenStack::Auth,
            (Some(true), false) => ScreenStack::TeamOnboarding,
            (Some(true), true) => ScreenStack::Main,
        }
    }
}

pub type SharedSession = Arc<Mutex<UserSession>>;

/// Simulated sign-in check: waits, then reports the configured result.
pub async fn check_auth(config: &SessionConfig) -> UserSession {
    tokio::time::sleep(Duration::from_millis(config.check_delay_ms)).await;
    UserSession {
        authenticated: Some(config.authenticated),
        has_team: config.has_team,
    }
}

/// Run the check the first time only. Later calls return the settled state.
pub async fn init_session(session: &SharedSession, config: &SessionConfig) -> UserSession {
    let mut guard = session.lock().await;
    if guard.authenticated.is_none() {
        *guard = check_auth(config).await;
        tracing::info!(
            "Session check settled: authenticated={:?} has_team={}",
            guard.authenticated,
            guard.has_team
        );
    }
    *guard
}
