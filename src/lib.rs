// Library exports for the Moosement client.
// The binary and integration tests build on these modules.

pub mod activity;
pub mod api;
pub mod auth;
pub mod challenges;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod models;
pub mod render;
pub mod rewards;
pub mod state;
pub mod teams;
