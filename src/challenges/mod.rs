pub mod board;
pub mod difficulty;
pub mod fallback;

pub use board::{ChallengeBoard, ChallengeSections, ChallengeSource, ToggleOutcome};
pub use difficulty::{projected_award, Difficulty};
