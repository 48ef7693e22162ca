use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moosement", about = "Workplace wellness challenges client")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:5000/api
    #[arg(long)]
    pub base_url: Option<String>,

    /// User id sent with every request
    #[arg(short, long)]
    pub user_id: Option<String>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show which screen stack the session gate selects
    Session,
    /// List today's challenges, pending first
    Challenges,
    /// Mark a challenge complete, or undo it if already complete
    Toggle {
        id: String,
        /// Reference to a verification photo
        #[arg(long)]
        photo: Option<String>,
    },
    /// Show the activity calendar and streaks
    Activity {
        /// Show the activity logged on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },
    /// List rewards and the current point balance
    Rewards,
    /// Redeem a reward by name
    Redeem { name: String },
    /// Show the team leaderboard
    Leaderboard,
    /// Join a team with an invite code
    Join { code: String },
    /// Create a new team
    CreateTeam {
        name: String,
        #[arg(long, default_value = "Private")]
        privacy: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        company_id: Option<String>,
    },
    /// Generate an invite link for your team
    Invite,
    /// Sign in
    Login { email: String, password: String },
    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Print the difficulty rating for a point value
    Difficulty {
        points: i64,
        /// Also preview the award at this streak length
        #[arg(long)]
        streak: Option<u32>,
    },
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub user: UserConfig,
    pub challenges: ChallengesConfig,
    pub session: SessionConfig,
    pub leaderboard: LeaderboardConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout; 0 waits forever.
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct UserConfig {
    pub id: String,
}

/// What happens to an optimistic completion toggle when the server call fails.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncPolicy {
    /// Leave the optimistic state in place; local and server may diverge.
    Keep,
    /// Restore the state from before the toggle.
    #[default]
    Rollback,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ChallengesConfig {
    pub mock_fallback: bool,
    pub sync_policy: SyncPolicy,
}

/// Result of the simulated sign-in check.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub check_delay_ms: u64,
    pub authenticated: bool,
    pub has_team: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 0,
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: "abcd".to_string(),
        }
    }
}

impl Default for ChallengesConfig {
    fn default() -> Self {
        Self {
            mock_fallback: true,
            sync_policy: SyncPolicy::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_delay_ms: 1000,
            authenticated: true,
            has_team: false,
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            path: "/teams/new_leaderboard".to_string(),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref base_url) = cli.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(ref user_id) = cli.user_id {
            config.user.id = user_id.clone();
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".moosement")
        })
    }
}
