use std::sync::Arc;

use crate::api::{MoosementApi, RedeemRequest};
use crate::error::{ClientError, ClientResult};
use crate::models::Reward;

/// Whether a reward can be redeemed right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    AlreadyRedeemed,
    InsufficientPoints { balance: i64, cost: i64 },
}

impl Eligibility {
    /// Why a redemption would be refused, or `None` if it is allowed.
    pub fn skip_reason(self) -> Option<SkipReason> {
        match self {
            Self::Eligible => None,
            Self::AlreadyRedeemed => Some(SkipReason::AlreadyRedeemed),
            Self::InsufficientPoints { balance, cost } => {
                Some(SkipReason::InsufficientPoints { balance, cost })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyRedeemed,
    InsufficientPoints { balance: i64, cost: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemOutcome {
    Redeemed { remaining_points: i64 },
    /// Precondition failed; no request was sent and nothing changed.
    Skipped(SkipReason),
}

/// A catalog row as the rewards screen shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardView<'a> {
    pub reward: &'a Reward,
    pub redeemed: bool,
    pub eligibility: Eligibility,
}

/// Reward catalog plus the user's balance and redeemed reward names.
pub struct RewardsLedger {
    api: Arc<dyn MoosementApi>,
    user_id: String,
    catalog: Vec<Reward>,
    balance: i64,
    redeemed: Vec<String>,
}

impl RewardsLedger {
    pub fn new(api: Arc<dyn MoosementApi>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            catalog: Vec::new(),
            balance: 0,
            redeemed: Vec::new(),
        }
    }

    /// Fetch the catalog and the user's points together.
    pub async fn load(&mut self) -> ClientResult<()> {
        let (catalog, summary) = futures::try_join!(
            self.api.fetch_rewards(),
            self.api.fetch_points(&self.user_id)
        )?;

        tracing::info!(
            "Loaded {} rewards, balance {} for {}",
            catalog.len(),
            summary.total_points,
            self.user_id
        );

        self.catalog = catalog;
        self.balance = summary.total_points;
        self.redeemed = summary
            .redeemed_rewards
            .into_iter()
            .map(|r| r.reward_name)
            .collect();
        Ok(())
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn catalog(&self) -> &[Reward] {
        &self.catalog
    }

    pub fn redeemed(&self) -> &[String] {
        &self.redeemed
    }

    pub fn is_redeemed(&self, name: &str) -> bool {
        self.redeemed.iter().any(|r| r == name)
    }

    fn find(&self, name: &str) -> ClientResult<&Reward> {
        self.catalog
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ClientError::UnknownReward(name.to_string()))
    }

    fn eligibility_of(&self, reward: &Reward) -> Eligibility {
        if self.is_redeemed(&reward.name) {
            Eligibility::AlreadyRedeemed
        } else if self.balance < reward.points_required {
            Eligibility::InsufficientPoints {
                balance: self.balance,
                cost: reward.points_required,
            }
        } else {
            Eligibility::Eligible
        }
    }

    pub fn eligibility(&self, name: &str) -> ClientResult<Eligibility> {
        Ok(self.eligibility_of(self.find(name)?))
    }

    pub fn views(&self) -> Vec<RewardView<'_>> {
        self.catalog
            .iter()
            .map(|reward| RewardView {
                reward,
                redeemed: self.is_redeemed(&reward.name),
                eligibility: self.eligibility_of(reward),
            })
            .collect()
    }

    /// Redeem a reward. The new balance is whatever the server reports,
    /// never a client-side subtraction. On error nothing changes.
    pub async fn redeem(&mut self, name: &str) -> ClientResult<RedeemOutcome> {
        if let Some(reason) = self.eligibility(name)?.skip_reason() {
            tracing::debug!("Not redeeming {}: {:?}", name, reason);
            return Ok(RedeemOutcome::Skipped(reason));
        }

        let request = RedeemRequest {
            user_id: self.user_id.clone(),
            reward_name: name.to_string(),
        };
        let receipt = self.api.redeem_reward(&request).await.map_err(|e| {
            tracing::error!("Failed to redeem {}: {}", name, e);
            e
        })?;

        tracing::info!(
            "Redeemed {}, remaining points {}",
            name,
            receipt.remaining_points
        );
        self.balance = receipt.remaining_points;
        self.redeemed.push(name.to_string());

        Ok(RedeemOutcome::Redeemed {
            remaining_points: receipt.remaining_points,
        })
    }
}
