use std::collections::HashSet;
use std::sync::Arc;

use crate::api::{CompletionRequest, MoosementApi};
use crate::config::{ChallengesConfig, SyncPolicy};
use crate::error::{ClientError, ClientResult};
use crate::models::{Challenge, CompletionReceipt};

use super::fallback::mock_challenges;

/// Where the currently displayed list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeSource {
    NotLoaded,
    Server,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleDirection {
    Complete,
    Undo,
}

/// An optimistic toggle that has been applied locally but not yet confirmed.
#[derive(Debug, Clone)]
pub struct PendingToggle {
    pub direction: ToggleDirection,
    pub request: CompletionRequest,
    previous_completed: bool,
    previous_photo: Option<String>,
}

impl PendingToggle {
    pub fn challenge_id(&self) -> &str {
        &self.request.challenge_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The id was already in flight; nothing happened.
    Ignored,
    /// Server accepted the change.
    Synced {
        completed: bool,
        receipt: Option<CompletionReceipt>,
    },
    /// Server call failed and the optimistic state was kept.
    Diverged { completed: bool, error: String },
    /// Server call failed and the previous state was restored.
    RolledBack { completed: bool, error: String },
}

impl ToggleOutcome {
    pub fn completed(&self) -> Option<bool> {
        match self {
            Self::Ignored => None,
            Self::Synced { completed, .. }
            | Self::Diverged { completed, .. }
            | Self::RolledBack { completed, .. } => Some(*completed),
        }
    }
}

/// Challenges split the way the list screen shows them.
#[derive(Debug, Default)]
pub struct ChallengeSections<'a> {
    pub pending: Vec<&'a Challenge>,
    pub completed: Vec<&'a Challenge>,
}

/// State behind the challenge list: the fetched items and the ids with a
/// completion request in flight.
pub struct ChallengeBoard {
    api: Arc<dyn MoosementApi>,
    user_id: String,
    config: ChallengesConfig,
    challenges: Vec<Challenge>,
    processing: HashSet<String>,
    source: ChallengeSource,
}

impl ChallengeBoard {
    pub fn new(api: Arc<dyn MoosementApi>, user_id: impl Into<String>, config: ChallengesConfig) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            config,
            challenges: Vec::new(),
            processing: HashSet::new(),
            source: ChallengeSource::NotLoaded,
        }
    }

    /// Fetch the list, substituting the mock list on any failure when
    /// fallback is enabled. Returns where the list came from.
    pub async fn load(&mut self) -> ClientResult<ChallengeSource> {
        match self.api.fetch_challenges().await {
            Ok(challenges) => {
                tracing::info!("Loaded {} challenges", challenges.len());
                self.challenges = challenges;
                self.source = ChallengeSource::Server;
            }
            Err(e) if self.config.mock_fallback => {
                tracing::warn!("Failed to fetch challenges, using mock list: {}", e);
                self.challenges = mock_challenges();
                self.source = ChallengeSource::Fallback;
            }
            Err(e) => return Err(e),
        }
        Ok(self.source)
    }

    pub fn source(&self) -> ChallengeSource {
        self.source
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn get(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn is_processing(&self, id: &str) -> bool {
        self.processing.contains(id)
    }

    pub fn sections(&self) -> ChallengeSections<'_> {
        let (completed, pending): (Vec<_>, Vec<_>) =
            self.challenges.iter().partition(|c| c.completed);
        ChallengeSections { pending, completed }
    }

    /// Flip the local flag and mark the id as in flight. Returns `None` if a
    /// request for this id is already outstanding.
    pub fn begin_toggle(
        &mut self,
        id: &str,
        photo: Option<String>,
    ) -> ClientResult<Option<PendingToggle>> {
        if self.processing.contains(id) {
            tracing::debug!("Ignoring toggle for {}: request in flight", id);
            return Ok(None);
        }

        let challenge = self
            .challenges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ClientError::UnknownChallenge(id.to_string()))?;

        let previous_completed = challenge.completed;
        let previous_photo = challenge.verification_photo.clone();
        let direction = if previous_completed {
            ToggleDirection::Undo
        } else {
            ToggleDirection::Complete
        };

        challenge.completed = !previous_completed;
        challenge.verification_photo = match direction {
            ToggleDirection::Complete => photo.clone(),
            ToggleDirection::Undo => None,
        };

        self.processing.insert(id.to_string());

        Ok(Some(PendingToggle {
            direction,
            request: CompletionRequest {
                user_id: self.user_id.clone(),
                challenge_id: id.to_string(),
                verification_photo: match direction {
                    ToggleDirection::Complete => photo,
                    ToggleDirection::Undo => None,
                },
            },
            previous_completed,
            previous_photo,
        }))
    }

    /// Apply the server's answer to a pending toggle and clear the in-flight mark.
    pub fn finish_toggle(
        &mut self,
        pending: PendingToggle,
        result: ClientResult<Option<CompletionReceipt>>,
    ) -> ToggleOutcome {
        let id = pending.challenge_id().to_string();
        self.processing.remove(&id);

        let policy = self.config.sync_policy;
        let Some(challenge) = self.challenges.iter_mut().find(|c| c.id == id) else {
            // The list was reloaded underneath us
            return match result {
                Ok(receipt) => ToggleOutcome::Synced {
                    completed: !pending.previous_completed,
                    receipt,
                },
                Err(e) => ToggleOutcome::Diverged {
                    completed: !pending.previous_completed,
                    error: e.to_string(),
                },
            };
        };

        match result {
            Ok(receipt) => {
                if let Some(ref r) = receipt {
                    tracing::info!(
                        "Challenge {} completed: earned {:?}, streak {:?}",
                        id,
                        r.points_earned,
                        r.current_streak
                    );
                } else {
                    tracing::info!("Challenge {} completion undone", id);
                }
                ToggleOutcome::Synced {
                    completed: challenge.completed,
                    receipt,
                }
            }
            Err(e) => match policy {
                SyncPolicy::Keep => {
                    tracing::warn!(
                        "Server sync failed for challenge {}, keeping local state: {}",
                        id,
                        e
                    );
                    ToggleOutcome::Diverged {
                        completed: challenge.completed,
                        error: e.to_string(),
                    }
                }
                SyncPolicy::Rollback => {
                    tracing::warn!(
                        "Server sync failed for challenge {}, rolling back: {}",
                        id,
                        e
                    );
                    challenge.completed = pending.previous_completed;
                    challenge.verification_photo = pending.previous_photo;
                    ToggleOutcome::RolledBack {
                        completed: challenge.completed,
                        error: e.to_string(),
                    }
                }
            },
        }
    }

    /// Optimistically toggle a challenge and sync it with the server.
    pub async fn toggle(&mut self, id: &str, photo: Option<String>) -> ClientResult<ToggleOutcome> {
        let Some(pending) = self.begin_toggle(id, photo)? else {
            return Ok(ToggleOutcome::Ignored);
        };

        let result = match pending.direction {
            ToggleDirection::Complete => self
                .api
                .complete_challenge(&pending.request)
                .await
                .map(Some),
            ToggleDirection::Undo => self.api.undo_challenge(&pending.request).await.map(|_| None),
        };

        Ok(self.finish_toggle(pending, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeApi, FakeState};

    fn board_with(api: Arc<FakeApi>, policy: SyncPolicy, mock_fallback: bool) -> ChallengeBoard {
        ChallengeBoard::new(
            api,
            "abcd",
            ChallengesConfig {
                mock_fallback,
                sync_policy: policy,
            },
        )
    }

    fn served(challenges: Vec<Challenge>) -> Arc<FakeApi> {
        Arc::new(FakeApi::new(FakeState {
            challenges: Some(challenges),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn load_uses_server_list() {
        let mut list = mock_challenges();
        list[1].completed = true;
        let mut board = board_with(served(list), SyncPolicy::Rollback, true);

        assert_eq!(board.load().await.unwrap(), ChallengeSource::Server);
        let sections = board.sections();
        assert_eq!(sections.pending.len(), 4);
        assert_eq!(sections.completed.len(), 1);
        assert_eq!(sections.completed[0].name, "Desk Stretches");
    }

    #[tokio::test]
    async fn load_falls_back_to_mock_list_on_failure() {
        let api = Arc::new(FakeApi::default());
        let mut board = board_with(api, SyncPolicy::Rollback, true);

        assert_eq!(board.load().await.unwrap(), ChallengeSource::Fallback);
        assert_eq!(board.challenges().len(), 5);
    }

    #[tokio::test]
    async fn load_propagates_failure_when_fallback_disabled() {
        let api = Arc::new(FakeApi::default());
        let mut board = board_with(api, SyncPolicy::Rollback, false);

        assert!(board.load().await.is_err());
        assert_eq!(board.source(), ChallengeSource::NotLoaded);
        assert!(board.challenges().is_empty());
    }

    #[tokio::test]
    async fn toggling_twice_restores_original_flag() {
        let api = served(mock_challenges());
        let mut board = board_with(api.clone(), SyncPolicy::Rollback, true);
        board.load().await.unwrap();

        let first = board.toggle("1", None).await.unwrap();
        assert_eq!(first.completed(), Some(true));
        let second = board.toggle("1", None).await.unwrap();
        assert_eq!(second.completed(), Some(false));

        assert!(!board.get("1").unwrap().completed);
        assert_eq!(
            api.calls(),
            vec![
                "GET /challenges",
                "POST /challenges/complete 1",
                "POST /challenges/undo 1"
            ]
        );
    }

    #[tokio::test]
    async fn completion_attaches_photo_and_undo_clears_it() {
        let mut board = board_with(served(mock_challenges()), SyncPolicy::Rollback, true);
        board.load().await.unwrap();

        let pending = board
            .begin_toggle("3", Some("photo://stairs".into()))
            .unwrap()
            .unwrap();
        assert_eq!(
            pending.request.verification_photo.as_deref(),
            Some("photo://stairs")
        );
        assert_eq!(
            board.get("3").unwrap().verification_photo.as_deref(),
            Some("photo://stairs")
        );
        board.finish_toggle(pending, Ok(None));

        board.toggle("3", Some("ignored".into())).await.unwrap();
        let challenge = board.get("3").unwrap();
        assert!(!challenge.completed);
        assert!(challenge.verification_photo.is_none());
    }

    #[tokio::test]
    async fn local_flip_happens_before_confirmation() {
        let mut board = board_with(served(mock_challenges()), SyncPolicy::Rollback, true);
        board.load().await.unwrap();

        let pending = board.begin_toggle("2", None).unwrap().unwrap();
        assert_eq!(pending.direction, ToggleDirection::Complete);
        assert!(board.get("2").unwrap().completed);
        assert!(board.is_processing("2"));
        assert_eq!(board.sections().completed.len(), 1);

        board.finish_toggle(pending, Ok(None));
        assert!(!board.is_processing("2"));
    }

    #[tokio::test]
    async fn repeat_tap_while_in_flight_is_ignored() {
        let mut board = board_with(served(mock_challenges()), SyncPolicy::Rollback, true);
        board.load().await.unwrap();

        let pending = board.begin_toggle("4", None).unwrap().unwrap();
        assert!(board.begin_toggle("4", None).unwrap().is_none());
        assert_eq!(board.toggle("4", None).await.unwrap(), ToggleOutcome::Ignored);
        assert!(board.get("4").unwrap().completed);

        board.finish_toggle(pending, Ok(None));
        assert!(board.begin_toggle("4", None).unwrap().is_some());
    }

    #[tokio::test]
    async fn failed_sync_rolls_back_by_default() {
        let api = served(mock_challenges());
        let mut board = board_with(api.clone(), SyncPolicy::Rollback, true);
        board.load().await.unwrap();
        api.with(|s| s.fail_writes = true);

        let outcome = board
            .toggle("5", Some("photo://lunch".into()))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            ToggleOutcome::RolledBack {
                completed: false,
                ..
            }
        ));
        let challenge = board.get("5").unwrap();
        assert!(!challenge.completed);
        assert!(challenge.verification_photo.is_none());
        assert!(!board.is_processing("5"));
    }

    #[tokio::test]
    async fn failed_sync_keeps_optimistic_state_under_keep_policy() {
        let api = served(mock_challenges());
        let mut board = board_with(api.clone(), SyncPolicy::Keep, true);
        board.load().await.unwrap();
        api.with(|s| s.fail_writes = true);

        let outcome = board.toggle("5", None).await.unwrap();
        assert!(matches!(
            outcome,
            ToggleOutcome::Diverged {
                completed: true,
                ..
            }
        ));
        assert!(board.get("5").unwrap().completed);
        assert!(!board.is_processing("5"));
    }

    #[tokio::test]
    async fn unknown_challenge_issues_no_request() {
        let api = served(mock_challenges());
        let mut board = board_with(api.clone(), SyncPolicy::Rollback, true);
        board.load().await.unwrap();

        let err = board.toggle("missing", None).await.unwrap_err();
        assert!(matches!(err, ClientError::UnknownChallenge(_)));
        assert_eq!(api.calls(), vec!["GET /challenges"]);
    }
}
